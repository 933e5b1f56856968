//! Axum route handler for ranked candidate matches.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::matching::contact::whatsapp_link;
use crate::matching::scorer::{rank_candidates, Candidate, RankedCandidate, ScoreBreakdown};
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::ResumeRow;
use crate::profiles::store as profile_store;
use crate::resumes::store as resume_store;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CandidateMatch {
    pub profile: ProfileRow,
    pub resume: Option<ResumeRow>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub resume_url: Option<String>,
    pub contact_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub candidates: Vec<CandidateMatch>,
}

/// GET /api/match/job/
pub async fn handle_match_missing_id() -> Result<Json<MatchResponse>, AppError> {
    Err(AppError::Validation("Missing job id".to_string()))
}

/// GET /api/match/job/:id
///
/// Ranks every candidate profile against the job, best first.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let job_id = parse_job_id(&raw_id)?;

    // Lookup failure is a 500; a missing row is a 404.
    let job = require_job(job_store::find(&state.db, job_id).await?)?;

    let (profiles, resumes) = tokio::try_join!(
        profile_store::list_candidates(&state.db),
        resume_store::latest_per_profile(&state.db),
    )?;
    debug!(
        "Scoring {} candidates ({} with resumes) for job {job_id}",
        profiles.len(),
        resumes.len()
    );

    let ranked = rank_candidates(&job, pair_resumes(profiles, resumes));
    let candidates = ranked
        .into_iter()
        .map(|r| to_match(&state, &job.title, r))
        .collect();

    Ok(Json(MatchResponse { candidates }))
}

fn parse_job_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("Missing job id".to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid job id '{raw}'")))
}

fn require_job(job: Option<JobRow>) -> Result<JobRow, AppError> {
    job.ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// Keeps profile order; each profile gets its resume, if one exists.
fn pair_resumes(profiles: Vec<ProfileRow>, resumes: Vec<ResumeRow>) -> Vec<Candidate> {
    let mut by_profile: HashMap<Uuid, ResumeRow> =
        resumes.into_iter().map(|r| (r.profile_id, r)).collect();

    profiles
        .into_iter()
        .map(|profile| {
            let resume = by_profile.remove(&profile.id);
            Candidate { profile, resume }
        })
        .collect()
}

fn to_match(state: &AppState, job_title: &str, ranked: RankedCandidate) -> CandidateMatch {
    let RankedCandidate {
        profile,
        resume,
        score,
        breakdown,
    } = ranked;

    CandidateMatch {
        resume_url: resume.as_ref().map(|r| state.resume_url(&r.file_path)),
        contact_url: whatsapp_link(&profile, job_title),
        profile,
        resume,
        score,
        breakdown,
    }
}
