use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::NutritionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// Shared by POST (create) and PUT (full-record edit).
#[derive(Debug, Deserialize)]
pub struct UpsertEntryRequest {
    pub food: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub meal_type: Option<MealType>,
    /// Defaults to today (UTC) when omitted.
    pub date: Option<Date>,
}

fn default_servings() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub food: String,
    pub servings: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub meal_type: Option<String>,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

impl From<NutritionEntry> for EntryResponse {
    fn from(entry: NutritionEntry) -> Self {
        Self {
            id: entry.id,
            food: entry.food,
            servings: entry.servings,
            calories: entry.calories,
            protein: entry.protein_g,
            carbs: entry.carbs_g,
            fat: entry.fat_g,
            fiber: entry.fiber_g,
            meal_type: entry.meal_type,
            date: entry.entry_date,
            created_at: entry.created_at,
        }
    }
}
