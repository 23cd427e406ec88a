//! Metabolic calculator: Mifflin-St Jeor BMR and activity-scaled TDEE.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier for this activity level.
    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            // older revisions stored the level with a space
            "very_active" | "very active" => Ok(Self::VeryActive),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

impl FromStr for Goal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lose" => Ok(Self::Lose),
            "maintain" => Ok(Self::Maintain),
            "gain" => Ok(Self::Gain),
            _ => Err(()),
        }
    }
}

/// Profile fields the calculators and insight rules read. Every field is
/// optional: a user may have saved only part of their profile, and the
/// calculators answer `None` instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor), rounded to the nearest
/// integer. `None` when weight, height, age, or gender is missing.
pub fn compute_bmr(profile: &Profile) -> Option<i32> {
    let weight = profile.weight_kg?;
    let height = profile.height_cm?;
    let age = profile.age?;
    let gender = profile.gender?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    };
    Some(bmr.round() as i32)
}

/// Total daily energy expenditure: BMR scaled by the activity factor. A
/// missing or unrecognized activity level falls back to sedentary (1.2)
/// rather than failing.
pub fn compute_tdee(profile: &Profile) -> Option<i32> {
    let bmr = compute_bmr(profile)?;
    let factor = profile
        .activity_level
        .map_or(ActivityLevel::Sedentary.factor(), ActivityLevel::factor);
    Some((f64::from(bmr) * factor).round() as i32)
}
