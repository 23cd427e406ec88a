//! Advisory strings comparing logged actuals against profile-derived targets.
//! Rules run in a fixed order and each contributes at most one message; an
//! empty result means there is nothing to report, not an error.

use crate::metrics::aggregate::NutritionTotals;
use crate::metrics::energy::{compute_tdee, Goal, Profile};
use crate::workouts::repo::Workout;

/// How many of the most recent workouts the PR congratulation looks at.
pub const RECENT_WORKOUT_WINDOW: usize = 5;

/// Recommended daily protein intake in grams per kilogram of body weight.
pub const PROTEIN_G_PER_KG: f64 = 0.8;

/// Evaluate the insight rules. `recent_workouts` is expected newest-first,
/// as the workouts repo returns it; only the first
/// [`RECENT_WORKOUT_WINDOW`] entries are considered for the PR rule.
///
/// Rules whose inputs cannot be computed (no TDEE, no body weight) emit
/// nothing rather than comparing against a bogus zero target.
pub fn generate_insights(
    profile: &Profile,
    nutrition: &NutritionTotals,
    recent_workouts: &[Workout],
) -> Vec<String> {
    let mut insights = Vec::new();
    let tdee = compute_tdee(profile);

    if let (Some(Goal::Lose), Some(target)) = (profile.goal, tdee) {
        if nutrition.total_calories > f64::from(target) {
            insights.push(
                "You're above your calorie target for weight loss. Consider reducing portions."
                    .to_string(),
            );
        }
    }

    if let (Some(Goal::Gain), Some(target)) = (profile.goal, tdee) {
        if nutrition.total_calories < f64::from(target) {
            insights.push(
                "You're below your calorie target for muscle gain. Consider adding a snack."
                    .to_string(),
            );
        }
    }

    if let Some(weight) = profile.weight_kg {
        if nutrition.total_protein_g < PROTEIN_G_PER_KG * weight {
            insights.push(
                "Your protein intake is below the recommended 0.8g per kg of body weight."
                    .to_string(),
            );
        }
    }

    let recent_prs = recent_workouts
        .iter()
        .take(RECENT_WORKOUT_WINDOW)
        .filter(|w| w.personal_record)
        .count();
    if recent_prs > 0 {
        insights.push(format!(
            "Great job! You've set {recent_prs} new personal records recently."
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::metrics::energy::{ActivityLevel, Gender};

    fn profile(goal: Goal) -> Profile {
        // BMR 1674, TDEE 2595
        Profile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: Some(25),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(goal),
        }
    }

    fn totals(calories: f64, protein: f64) -> NutritionTotals {
        NutritionTotals {
            entries: 1,
            total_calories: calories,
            total_protein_g: protein,
            ..NutritionTotals::default()
        }
    }

    fn workout(pr: bool) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            exercise: "bench press".into(),
            sets: 3,
            reps: 5,
            weight_kg: 80.0,
            calories_burned: None,
            notes: None,
            personal_record: pr,
            workout_date: date!(2025 - 07 - 01),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn over_target_for_loss_fires_only_above_tdee() {
        let insights = generate_insights(&profile(Goal::Lose), &totals(2800.0, 100.0), &[]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("above your calorie target"));

        let insights = generate_insights(&profile(Goal::Lose), &totals(2000.0, 100.0), &[]);
        assert!(insights.is_empty());
    }

    #[test]
    fn under_target_for_gain_fires_only_below_tdee() {
        let insights = generate_insights(&profile(Goal::Gain), &totals(2000.0, 100.0), &[]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("below your calorie target"));

        let insights = generate_insights(&profile(Goal::Gain), &totals(3000.0, 100.0), &[]);
        assert!(insights.is_empty());
    }

    #[test]
    fn maintain_goal_skips_both_calorie_rules() {
        let insights = generate_insights(&profile(Goal::Maintain), &totals(5000.0, 100.0), &[]);
        assert!(insights.is_empty());
    }

    #[test]
    fn low_protein_rule_uses_point_eight_grams_per_kg() {
        // threshold for 70 kg is 56 g
        let insights = generate_insights(&profile(Goal::Maintain), &totals(2595.0, 55.9), &[]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("protein"));

        let insights = generate_insights(&profile(Goal::Maintain), &totals(2595.0, 56.0), &[]);
        assert!(insights.is_empty());
    }

    #[test]
    fn pr_rule_counts_records_in_the_recent_window() {
        let recent = vec![workout(true), workout(false), workout(true)];
        let insights = generate_insights(&profile(Goal::Maintain), &totals(2595.0, 100.0), &recent);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("2 new personal records"));
    }

    #[test]
    fn pr_rule_ignores_records_outside_the_window() {
        let mut recent: Vec<Workout> = (0..RECENT_WORKOUT_WINDOW).map(|_| workout(false)).collect();
        recent.push(workout(true)); // sixth-most-recent
        let insights = generate_insights(&profile(Goal::Maintain), &totals(2595.0, 100.0), &recent);
        assert!(insights.is_empty());
    }

    #[test]
    fn rules_emit_in_fixed_order() {
        let recent = vec![workout(true)];
        let insights = generate_insights(&profile(Goal::Lose), &totals(2800.0, 10.0), &recent);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("calorie target"));
        assert!(insights[1].contains("protein"));
        assert!(insights[2].contains("personal records"));
    }

    #[test]
    fn incomplete_profile_skips_target_rules_without_failing() {
        let profile = Profile {
            goal: Some(Goal::Lose),
            ..Profile::default()
        };
        let insights = generate_insights(&profile, &totals(2800.0, 10.0), &[]);
        // no TDEE and no weight: neither calorie nor protein rule can run
        assert!(insights.is_empty());
    }
}
