use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::Workout;
use crate::metrics::units::UnitSystem;

/// Shared by POST (create) and PUT (full-record edit).
#[derive(Debug, Deserialize)]
pub struct UpsertWorkoutRequest {
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    /// Bar/load weight; 0 for bodyweight work.
    #[serde(default)]
    pub weight: f64,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    /// Defaults to today (UTC) when omitted.
    pub date: Option<Date>,
    #[serde(default)]
    pub units: UnitSystem,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: f64,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    pub personal_record: bool,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            exercise: workout.exercise,
            sets: workout.sets,
            reps: workout.reps,
            weight_kg: workout.weight_kg,
            calories_burned: workout.calories_burned,
            notes: workout.notes,
            personal_record: workout.personal_record,
            date: workout.workout_date,
            created_at: workout.created_at,
        }
    }
}
