use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NutritionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food: String,
    pub servings: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub meal_type: Option<String>,
    pub entry_date: Date,
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct EntryChanges {
    pub food: String,
    pub servings: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub meal_type: Option<String>,
    pub entry_date: Date,
}

const COLUMNS: &str = "id, user_id, food, servings, calories, protein_g, carbs_g, fat_g, \
                       fiber_g, meal_type, entry_date, created_at";

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    changes: &EntryChanges,
) -> anyhow::Result<NutritionEntry> {
    let row = sqlx::query_as::<_, NutritionEntry>(&format!(
        r#"
        INSERT INTO nutrition_entries
            (user_id, food, servings, calories, protein_g, carbs_g, fat_g, fiber_g, meal_type, entry_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&changes.food)
    .bind(changes.servings)
    .bind(changes.calories)
    .bind(changes.protein_g)
    .bind(changes.carbs_g)
    .bind(changes.fat_g)
    .bind(changes.fiber_g)
    .bind(changes.meal_type.as_deref())
    .bind(changes.entry_date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Entries for one user, newest first, optionally limited to an inclusive
/// date range.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    from: Option<Date>,
    to: Option<Date>,
) -> anyhow::Result<Vec<NutritionEntry>> {
    let rows = sqlx::query_as::<_, NutritionEntry>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM nutrition_entries
        WHERE user_id = $1
          AND ($2::date IS NULL OR entry_date >= $2)
          AND ($3::date IS NULL OR entry_date <= $3)
        ORDER BY entry_date DESC, created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<NutritionEntry>> {
    let row = sqlx::query_as::<_, NutritionEntry>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM nutrition_entries
        WHERE id = $1 AND user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    changes: &EntryChanges,
) -> anyhow::Result<Option<NutritionEntry>> {
    let row = sqlx::query_as::<_, NutritionEntry>(&format!(
        r#"
        UPDATE nutrition_entries
        SET food = $3, servings = $4, calories = $5, protein_g = $6, carbs_g = $7,
            fat_g = $8, fiber_g = $9, meal_type = $10, entry_date = $11
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(&changes.food)
    .bind(changes.servings)
    .bind(changes.calories)
    .bind(changes.protein_g)
    .bind(changes.carbs_g)
    .bind(changes.fat_g)
    .bind(changes.fiber_g)
    .bind(changes.meal_type.as_deref())
    .bind(changes.entry_date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM nutrition_entries
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
