//! Rollups over logged nutrition entries and workouts. Totals are exact sums;
//! averages are sum/count with an explicit empty-collection policy: zero, not
//! NaN. Date-range filtering is inclusive of both bounds, matching the
//! `>= from AND <= to` queries the repos issue.

use serde::Serialize;
use time::Date;

use crate::nutrition::repo::NutritionEntry;
use crate::workouts::repo::Workout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub entries: usize,
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
    pub total_fiber_g: f64,
    pub average_calories: f64,
    pub average_protein_g: f64,
    pub average_carbs_g: f64,
    pub average_fat_g: f64,
    pub average_fiber_g: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkoutTotals {
    pub sessions: usize,
    pub total_burned: f64,
    pub average_burned: f64,
    /// Sum of sets * reps * weight across all sessions, in kilograms.
    pub total_volume_kg: f64,
    pub personal_records: usize,
}

/// Net energy picture for a period: logged intake vs. logged expenditure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnergyBalance {
    pub consumed: f64,
    pub burned: f64,
    pub net: f64,
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn in_range(date: Date, from: Option<Date>, to: Option<Date>) -> bool {
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

pub fn nutrition_totals(entries: &[NutritionEntry]) -> NutritionTotals {
    let mut totals = NutritionTotals {
        entries: entries.len(),
        ..NutritionTotals::default()
    };
    for entry in entries {
        totals.total_calories += entry.calories;
        totals.total_protein_g += entry.protein_g;
        totals.total_carbs_g += entry.carbs_g;
        totals.total_fat_g += entry.fat_g;
        totals.total_fiber_g += entry.fiber_g;
    }
    totals.average_calories = mean(totals.total_calories, totals.entries);
    totals.average_protein_g = mean(totals.total_protein_g, totals.entries);
    totals.average_carbs_g = mean(totals.total_carbs_g, totals.entries);
    totals.average_fat_g = mean(totals.total_fat_g, totals.entries);
    totals.average_fiber_g = mean(totals.total_fiber_g, totals.entries);
    totals
}

/// Same as [`nutrition_totals`] but applies the inclusive date filter itself,
/// for callers holding an unfiltered history.
pub fn nutrition_totals_between(
    entries: &[NutritionEntry],
    from: Option<Date>,
    to: Option<Date>,
) -> NutritionTotals {
    let filtered: Vec<NutritionEntry> = entries
        .iter()
        .filter(|e| in_range(e.entry_date, from, to))
        .cloned()
        .collect();
    nutrition_totals(&filtered)
}

pub fn workout_totals(workouts: &[Workout]) -> WorkoutTotals {
    let mut totals = WorkoutTotals {
        sessions: workouts.len(),
        ..WorkoutTotals::default()
    };
    for workout in workouts {
        totals.total_burned += workout.calories_burned.unwrap_or(0.0);
        totals.total_volume_kg +=
            f64::from(workout.sets) * f64::from(workout.reps) * workout.weight_kg;
        if workout.personal_record {
            totals.personal_records += 1;
        }
    }
    totals.average_burned = mean(totals.total_burned, totals.sessions);
    totals
}

pub fn workout_totals_between(
    workouts: &[Workout],
    from: Option<Date>,
    to: Option<Date>,
) -> WorkoutTotals {
    let filtered: Vec<Workout> = workouts
        .iter()
        .filter(|w| in_range(w.workout_date, from, to))
        .cloned()
        .collect();
    workout_totals(&filtered)
}

pub fn energy_balance(nutrition: &NutritionTotals, workouts: &WorkoutTotals) -> EnergyBalance {
    EnergyBalance {
        consumed: nutrition.total_calories,
        burned: workouts.total_burned,
        net: nutrition.total_calories - workouts.total_burned,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn entry(calories: f64, protein: f64, day: Date) -> NutritionEntry {
        NutritionEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            food: "test food".into(),
            servings: 1.0,
            calories,
            protein_g: protein,
            carbs_g: 10.0,
            fat_g: 5.0,
            fiber_g: 2.0,
            meal_type: None,
            entry_date: day,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn session(burned: Option<f64>, sets: i32, reps: i32, weight: f64, pr: bool) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            exercise: "bench press".into(),
            sets,
            reps,
            weight_kg: weight,
            calories_burned: burned,
            notes: None,
            personal_record: pr,
            workout_date: date!(2025 - 07 - 01),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn empty_collections_produce_all_zeroes() {
        let totals = nutrition_totals(&[]);
        assert_eq!(totals, NutritionTotals::default());
        assert_eq!(totals.average_calories, 0.0);

        let totals = workout_totals(&[]);
        assert_eq!(totals, WorkoutTotals::default());
        assert_eq!(totals.average_burned, 0.0);
    }

    #[test]
    fn nutrition_sums_and_means_are_exact() {
        let day = date!(2025 - 07 - 01);
        let entries = vec![
            entry(500.0, 30.0, day),
            entry(700.0, 40.0, day),
            entry(650.0, 20.0, day),
        ];
        let totals = nutrition_totals(&entries);
        assert_eq!(totals.entries, 3);
        assert_eq!(totals.total_calories, 1850.0);
        assert!((totals.average_calories - 1850.0 / 3.0).abs() < 1e-9);
        assert_eq!(totals.total_protein_g, 90.0);
        assert_eq!(totals.average_protein_g, 30.0);
        assert_eq!(totals.total_fiber_g, 6.0);
    }

    #[test]
    fn date_filter_is_inclusive_of_both_bounds() {
        let entries = vec![
            entry(100.0, 0.0, date!(2025 - 06 - 30)),
            entry(200.0, 0.0, date!(2025 - 07 - 01)),
            entry(300.0, 0.0, date!(2025 - 07 - 07)),
            entry(400.0, 0.0, date!(2025 - 07 - 08)),
        ];
        let totals = nutrition_totals_between(
            &entries,
            Some(date!(2025 - 07 - 01)),
            Some(date!(2025 - 07 - 07)),
        );
        assert_eq!(totals.entries, 2);
        assert_eq!(totals.total_calories, 500.0);
    }

    #[test]
    fn open_ended_ranges_keep_everything_on_the_open_side() {
        let entries = vec![
            entry(100.0, 0.0, date!(2025 - 06 - 30)),
            entry(200.0, 0.0, date!(2025 - 07 - 01)),
        ];
        let totals = nutrition_totals_between(&entries, None, Some(date!(2025 - 06 - 30)));
        assert_eq!(totals.total_calories, 100.0);

        let totals = nutrition_totals_between(&entries, Some(date!(2025 - 07 - 01)), None);
        assert_eq!(totals.total_calories, 200.0);

        let totals = nutrition_totals_between(&entries, None, None);
        assert_eq!(totals.entries, 2);
    }

    #[test]
    fn workout_totals_sum_burned_volume_and_prs() {
        let workouts = vec![
            session(Some(300.0), 3, 5, 100.0, true),
            session(None, 5, 10, 60.0, false),
            session(Some(200.0), 1, 8, 0.0, true),
        ];
        let totals = workout_totals(&workouts);
        assert_eq!(totals.sessions, 3);
        assert_eq!(totals.total_burned, 500.0);
        assert!((totals.average_burned - 500.0 / 3.0).abs() < 1e-9);
        // 3*5*100 + 5*10*60 + 1*8*0
        assert_eq!(totals.total_volume_kg, 4500.0);
        assert_eq!(totals.personal_records, 2);
    }

    #[test]
    fn energy_balance_nets_intake_against_expenditure() {
        let day = date!(2025 - 07 - 01);
        let nutrition = nutrition_totals(&[entry(2000.0, 0.0, day)]);
        let workouts = workout_totals(&[session(Some(450.0), 3, 5, 80.0, false)]);
        let balance = energy_balance(&nutrition, &workouts);
        assert_eq!(balance.consumed, 2000.0);
        assert_eq!(balance.burned, 450.0);
        assert_eq!(balance.net, 1550.0);
    }
}
