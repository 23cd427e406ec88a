use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: f64,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    pub personal_record: bool,
    pub workout_date: Date,
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct WorkoutChanges {
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: f64,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    pub personal_record: bool,
    pub workout_date: Date,
}

const COLUMNS: &str = "id, user_id, exercise, sets, reps, weight_kg, calories_burned, notes, \
                       personal_record, workout_date, created_at";

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    changes: &WorkoutChanges,
) -> anyhow::Result<Workout> {
    let row = sqlx::query_as::<_, Workout>(&format!(
        r#"
        INSERT INTO workouts
            (user_id, exercise, sets, reps, weight_kg, calories_burned, notes, personal_record, workout_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&changes.exercise)
    .bind(changes.sets)
    .bind(changes.reps)
    .bind(changes.weight_kg)
    .bind(changes.calories_burned)
    .bind(changes.notes.as_deref())
    .bind(changes.personal_record)
    .bind(changes.workout_date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Workouts for one user, newest first, optionally limited to an inclusive
/// date range. `list_by_user(db, user, None, None)` is the full history the
/// record detector runs over.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    from: Option<Date>,
    to: Option<Date>,
) -> anyhow::Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM workouts
        WHERE user_id = $1
          AND ($2::date IS NULL OR workout_date >= $2)
          AND ($3::date IS NULL OR workout_date <= $3)
        ORDER BY workout_date DESC, created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_recent(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM workouts
        WHERE user_id = $1
        ORDER BY workout_date DESC, created_at DESC
        LIMIT $2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Workout>> {
    let row = sqlx::query_as::<_, Workout>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM workouts
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
    changes: &WorkoutChanges,
) -> anyhow::Result<Option<Workout>> {
    let row = sqlx::query_as::<_, Workout>(&format!(
        r#"
        UPDATE workouts
        SET exercise = $3, sets = $4, reps = $5, weight_kg = $6, calories_burned = $7,
            notes = $8, personal_record = $9, workout_date = $10
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(&changes.exercise)
    .bind(changes.sets)
    .bind(changes.reps)
    .bind(changes.weight_kg)
    .bind(changes.calories_burned)
    .bind(changes.notes.as_deref())
    .bind(changes.personal_record)
    .bind(changes.workout_date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM workouts
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
