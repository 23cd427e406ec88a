use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::metrics;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl ProfileRow {
    /// Lenient read-boundary conversion: enum text that fails to parse
    /// behaves as if the field were absent.
    pub fn to_metrics(&self) -> metrics::Profile {
        metrics::Profile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            gender: self.gender.as_deref().and_then(|s| s.parse().ok()),
            activity_level: self.activity_level.as_deref().and_then(|s| s.parse().ok()),
            goal: self.goal.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

/// Normalized field set for an upsert; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT user_id, weight_kg, height_cm, age, gender, activity_level, goal, updated_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// One profile per user: insert on first submission, merge on later edits
/// (provided columns overwrite, absent ones survive).
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    changes: &ProfileChanges,
) -> anyhow::Result<ProfileRow> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (user_id, weight_kg, height_cm, age, gender, activity_level, goal, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (user_id) DO UPDATE SET
            weight_kg      = COALESCE(EXCLUDED.weight_kg, profiles.weight_kg),
            height_cm      = COALESCE(EXCLUDED.height_cm, profiles.height_cm),
            age            = COALESCE(EXCLUDED.age, profiles.age),
            gender         = COALESCE(EXCLUDED.gender, profiles.gender),
            activity_level = COALESCE(EXCLUDED.activity_level, profiles.activity_level),
            goal           = COALESCE(EXCLUDED.goal, profiles.goal),
            updated_at     = now()
        RETURNING user_id, weight_kg, height_cm, age, gender, activity_level, goal, updated_at
        "#,
    )
    .bind(user_id)
    .bind(changes.weight_kg)
    .bind(changes.height_cm)
    .bind(changes.age)
    .bind(changes.gender.as_deref())
    .bind(changes.activity_level.as_deref())
    .bind(changes.goal.as_deref())
    .fetch_one(db)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::metrics::{ActivityLevel, Gender, Goal};

    fn row() -> ProfileRow {
        ProfileRow {
            user_id: Uuid::new_v4(),
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age: Some(25),
            gender: Some("male".into()),
            activity_level: Some("moderate".into()),
            goal: Some("lose".into()),
            updated_at: datetime!(2025-07-01 12:00 UTC),
        }
    }

    #[test]
    fn to_metrics_parses_stored_enum_text() {
        let profile = row().to_metrics();
        assert_eq!(profile.gender, Some(Gender::Male));
        assert_eq!(profile.activity_level, Some(ActivityLevel::Moderate));
        assert_eq!(profile.goal, Some(Goal::Lose));
        assert_eq!(profile.weight_kg, Some(70.0));
    }

    #[test]
    fn to_metrics_treats_unparseable_text_as_absent() {
        let mut stored = row();
        stored.gender = Some("1".into()); // legacy numeric convention
        stored.activity_level = Some("couch".into());
        let profile = stored.to_metrics();
        assert_eq!(profile.gender, None);
        assert_eq!(profile.activity_level, None);
        assert_eq!(profile.goal, Some(Goal::Lose));
    }
}
