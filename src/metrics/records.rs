//! Personal-record detection over a user's lift history. Best weight and best
//! reps are tracked independently per exercise, each with the date it was
//! first achieved.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::workouts::repo::Workout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseBests {
    pub max_weight_kg: f64,
    pub max_weight_date: Date,
    pub max_reps: i32,
    pub max_reps_date: Date,
}

/// Per-exercise bests derived from the full history. Entries are walked in
/// chronological order so a tied value keeps the date it was first achieved.
pub fn detect_prs(history: &[Workout]) -> BTreeMap<String, ExerciseBests> {
    let mut ordered: Vec<&Workout> = history.iter().collect();
    ordered.sort_by_key(|w| (w.workout_date, w.created_at));

    let mut bests: BTreeMap<String, ExerciseBests> = BTreeMap::new();
    for workout in ordered {
        let best = bests
            .entry(workout.exercise.clone())
            .or_insert_with(|| ExerciseBests {
                max_weight_kg: workout.weight_kg,
                max_weight_date: workout.workout_date,
                max_reps: workout.reps,
                max_reps_date: workout.workout_date,
            });
        if workout.weight_kg > best.max_weight_kg {
            best.max_weight_kg = workout.weight_kg;
            best.max_weight_date = workout.workout_date;
        }
        if workout.reps > best.max_reps {
            best.max_reps = workout.reps;
            best.max_reps_date = workout.workout_date;
        }
    }
    bests
}

/// Whether a candidate lift would set a new record for its exercise.
///
/// A lift is a record when its weight exceeds the best weight on file, or
/// when it matches the best weight and beats the best rep count at that
/// weight. Equal weight with equal-or-fewer reps is not a record. The first
/// lift for an exercise always is.
pub fn is_new_record(history: &[Workout], exercise: &str, weight_kg: f64, reps: i32) -> bool {
    let best_weight = history
        .iter()
        .filter(|w| w.exercise == exercise)
        .map(|w| w.weight_kg)
        .fold(None, |acc: Option<f64>, w| {
            Some(acc.map_or(w, |a| a.max(w)))
        });

    match best_weight {
        None => true,
        Some(best) if weight_kg > best => true,
        Some(best) if weight_kg == best => {
            let best_reps_at_weight = history
                .iter()
                .filter(|w| w.exercise == exercise && w.weight_kg == best)
                .map(|w| w.reps)
                .max()
                .unwrap_or(0);
            reps > best_reps_at_weight
        }
        Some(_) => false,
    }
}
