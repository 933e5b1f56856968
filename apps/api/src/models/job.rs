use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub employer_profile_id: Uuid,
    pub title: String,
    pub description: String,
    pub city: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}
