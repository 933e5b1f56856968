use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::extractor::AuthUser;
use crate::models::resume::ResumeRow;
use crate::profiles::handlers::require_profile;
use crate::profiles::store as profile_store;
use crate::resumes::store;
use crate::resumes::text::extract_text;
use crate::state::AppState;
use crate::storage::{file_extension, object_key, put_object};
use crate::upload::read_file_field;

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    #[serde(flatten)]
    pub resume: ResumeRow,
    pub file_url: String,
}

impl ResumeResponse {
    fn new(state: &AppState, resume: ResumeRow) -> Self {
        let file_url = state.resume_url(&resume.file_path);
        Self { resume, file_url }
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeResponse>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateParsedRequest {
    pub parsed: Value,
}

/// POST /api/resumes
///
/// Multipart field `file`. Stores the document, then records it with
/// `parsed = { "text": <extracted text or null> }` for the owner to review.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let profile = require_profile(
        &state,
        &auth,
        "Create your profile before uploading a resume",
    )
    .await?;

    let file = read_file_field(
        &mut multipart,
        "file",
        MAX_RESUME_BYTES,
        "Please upload a file smaller than 10 MB.",
    )
    .await?;

    let extension = accepted_extension(&file.file_name)?;

    let key = object_key(profile.id, &file.file_name);
    put_object(
        &state.s3,
        &state.config.s3_resume_bucket,
        &key,
        file.bytes.clone(),
        file.content_type.as_deref(),
    )
    .await?;

    let text = extract_text(&extension, file.bytes).await;
    let resume = store::insert(&state.db, profile.id, &key, &json!({ "text": text }))
        .await
        .map_err(|e| {
            warn!("{}", orphaned_object_message(&state.config.s3_resume_bucket, &key));
            AppError::from(e)
        })?;

    info!(
        "Stored resume {} for profile {} (text extracted: {})",
        resume.id,
        profile.id,
        text.is_some()
    );
    Ok((StatusCode::CREATED, Json(ResumeResponse::new(&state, resume))))
}

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeListResponse>, AppError> {
    let Some(profile) = profile_store::find_by_auth_uid(&state.db, auth.id()).await? else {
        return Ok(Json(ResumeListResponse { resumes: vec![] }));
    };

    let resumes = store::list_for_profile(&state.db, profile.id)
        .await?
        .into_iter()
        .map(|r| ResumeResponse::new(&state, r))
        .collect();
    Ok(Json(ResumeListResponse { resumes }))
}

/// PATCH /api/resumes/:id/parsed
///
/// Replaces the free-form parsed content after the owner reviews it.
pub async fn handle_update_parsed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<UpdateParsedRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("Resume {resume_id} not found"));

    let profile = profile_store::find_by_auth_uid(&state.db, auth.id())
        .await?
        .ok_or_else(not_found)?;

    let resume = store::update_parsed(&state.db, resume_id, profile.id, &request.parsed)
        .await?
        .ok_or_else(not_found)?;

    info!("Updated parsed content of resume {resume_id}");
    Ok(Json(ResumeResponse::new(&state, resume)))
}

fn orphaned_object_message(bucket: &str, key: &str) -> String {
    format!("Resume row insert failed; object {bucket}/{key} is orphaned")
}

fn accepted_extension(file_name: &str) -> Result<String, AppError> {
    file_extension(file_name)
        .filter(|ext| RESUME_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            AppError::Validation("Resume must be a .pdf, .doc, .docx or .txt file".to_string())
        })
}
