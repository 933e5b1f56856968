use sqlx::PgPool;
use uuid::Uuid;

use crate::jobs::search::JobFilter;
use crate::models::job::JobRow;

pub struct NewJob<'a> {
    pub employer_profile_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub city: &'a str,
    pub skills: &'a [String],
}

pub async fn insert(pool: &PgPool, job: NewJob<'_>) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (employer_profile_id, title, description, city, skills)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(job.employer_profile_id)
    .bind(job.title)
    .bind(job.description)
    .bind(job.city)
    .bind(job.skills)
    .fetch_one(pool)
    .await
}

pub async fn find(pool: &PgPool, job_id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Title OR description contains the pattern; city matches exactly. Newest first.
pub async fn search(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT *
        FROM jobs
        WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)
          AND ($2::text IS NULL OR city = $2)
        ORDER BY created_at DESC, id
        "#,
    )
    .bind(filter.text_pattern.as_deref())
    .bind(filter.city.as_deref())
    .fetch_all(pool)
    .await
}
