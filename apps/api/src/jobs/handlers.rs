use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::identity::extractor::AuthUser;
use crate::jobs::search::JobSearchQuery;
use crate::jobs::store::{self, NewJob};
use crate::models::job::JobRow;
use crate::models::skills::SkillsInput;
use crate::profiles::handlers::require_profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub skills: SkillsInput,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobRow>,
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let profile = require_profile(
        &state,
        &auth,
        "Create your employer profile first (set role to employer)",
    )
    .await?;
    if !profile.role().can_post_jobs() {
        return Err(AppError::Forbidden(
            "Only employer profiles can post jobs".to_string(),
        ));
    }

    let skills = request.skills.normalize();
    let job = store::insert(
        &state.db,
        NewJob {
            employer_profile_id: profile.id,
            title,
            description: request.description.trim(),
            city: request.city.trim(),
            skills: &skills,
        },
    )
    .await?;

    info!("Profile {} posted job {}", profile.id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/search/jobs?q=&city=
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let filter = query.into_filter();
    let jobs = store::search(&state.db, &filter).await?;
    Ok(Json(JobSearchResponse { jobs }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_comma_separated_skills() {
        let request: CreateJobRequest = serde_json::from_str(
            r#"{ "title": "Electrician", "city": "Pune", "skills": "wiring, installation" }"#,
        )
        .unwrap();
        assert_eq!(request.description, "");
        assert_eq!(request.skills.normalize(), vec!["wiring", "installation"]);
    }

    #[test]
    fn test_create_request_accepts_skill_list() {
        let request: CreateJobRequest = serde_json::from_str(
            r#"{ "title": "Plumber", "skills": ["pipes", " fittings "] }"#,
        )
        .unwrap();
        assert_eq!(request.skills.normalize(), vec!["pipes", "fittings"]);
    }
}
