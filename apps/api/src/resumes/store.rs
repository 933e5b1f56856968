use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

pub async fn insert(
    pool: &PgPool,
    profile_id: Uuid,
    file_path: &str,
    parsed: &Value,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "INSERT INTO resumes (profile_id, file_path, parsed) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(profile_id)
    .bind(file_path)
    .bind(parsed)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list_for_profile(pool: &PgPool, profile_id: Uuid) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE profile_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await
}

/// Replaces `parsed` on a resume owned by `profile_id`. `None` if no such resume.
pub async fn update_parsed(
    pool: &PgPool,
    resume_id: Uuid,
    profile_id: Uuid,
    parsed: &Value,
) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "UPDATE resumes SET parsed = $1 WHERE id = $2 AND profile_id = $3 RETURNING *",
    )
    .bind(parsed)
    .bind(resume_id)
    .bind(profile_id)
    .fetch_optional(pool)
    .await
}

/// The most recent resume of every profile that has one.
pub async fn latest_per_profile(pool: &PgPool) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT DISTINCT ON (profile_id) *
        FROM resumes
        ORDER BY profile_id, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
