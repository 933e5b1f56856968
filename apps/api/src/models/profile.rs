use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Employer,
    Admin,
    Superadmin,
}

impl Role {
    /// Roles other than `Candidate`. Any stored tag outside these reads as a candidate.
    pub const NON_CANDIDATE: [Role; 3] = [Role::Employer, Role::Admin, Role::Superadmin];

    /// Case-insensitive; unknown or blank tags fall back to `Candidate`.
    pub fn parse_lenient(tag: &str) -> Role {
        match tag.trim().to_ascii_lowercase().as_str() {
            "employer" => Role::Employer,
            "admin" => Role::Admin,
            "superadmin" => Role::Superadmin,
            _ => Role::Candidate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    pub fn can_post_jobs(&self) -> bool {
        !matches!(self, Role::Candidate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    /// Identity provider user id. One profile per identity.
    pub auth_uid: String,
    pub full_name: String,
    pub headline: Option<String>,
    pub city: String,
    pub skills: Vec<String>,
    pub years_experience: Option<i32>,
    pub phone: Option<String>,
    pub consent: bool,
    pub role: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn role(&self) -> Role {
        Role::parse_lenient(&self.role)
    }
}
