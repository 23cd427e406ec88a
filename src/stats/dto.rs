use serde::{Deserialize, Serialize};
use time::Date;

use crate::metrics::aggregate::{NutritionTotals, WorkoutTotals};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct NutritionStatsResponse {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub totals: NutritionTotals,
}

#[derive(Debug, Serialize)]
pub struct WorkoutStatsResponse {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub totals: WorkoutTotals,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub from: Option<Date>,
    pub to: Option<Date>,
    /// `None` until the profile carries weight, height, age, and gender;
    /// clients render "--".
    pub bmr: Option<i32>,
    pub tdee: Option<i32>,
    pub consumed: f64,
    pub burned: f64,
    pub net: f64,
    pub entries: usize,
    pub sessions: usize,
    pub insights: Vec<String>,
}
