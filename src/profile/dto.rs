use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::metrics::units::UnitSystem;
use crate::metrics::{ActivityLevel, Gender, Goal};

/// Upsert payload. Provided fields overwrite, omitted fields keep their
/// stored value; `units: "imperial"` converts weight/height before storage.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    #[serde(default)]
    pub units: UnitSystem,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    /// `None` until the profile carries weight, height, age, and gender;
    /// clients render "--".
    pub bmr: Option<i32>,
    pub tdee: Option<i32>,
    pub updated_at: OffsetDateTime,
}
