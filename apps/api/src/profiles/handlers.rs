use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::identity::extractor::AuthUser;
use crate::models::profile::{ProfileRow, Role};
use crate::models::skills::SkillsInput;
use crate::profiles::store::{self, ProfileFields};
use crate::state::AppState;
use crate::storage::{file_extension, object_key, put_object};
use crate::upload::read_file_field;

const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const AVATAR_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const AVATAR_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub full_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub skills: SkillsInput,
    #[serde(default)]
    pub years_experience: Option<i32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub consent: bool,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileRow,
    pub avatar_url: Option<String>,
}

impl ProfileResponse {
    fn new(state: &AppState, profile: ProfileRow) -> Self {
        let avatar_url = profile.avatar_path.as_deref().map(|p| state.avatar_url(p));
        Self {
            profile,
            avatar_url,
        }
    }
}

/// Loads the caller's profile or fails with 422 and `missing_message`.
pub async fn require_profile(
    state: &AppState,
    auth: &AuthUser,
    missing_message: &str,
) -> Result<ProfileRow, AppError> {
    store::find_by_auth_uid(&state.db, auth.id())
        .await?
        .ok_or_else(|| AppError::UnprocessableEntity(missing_message.to_string()))
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = store::find_by_auth_uid(&state.db, auth.id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(ProfileResponse::new(&state, profile)))
}

/// PUT /api/profile
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if matches!(request.years_experience, Some(years) if years < 0) {
        return Err(AppError::Validation(
            "years_experience cannot be negative".to_string(),
        ));
    }

    let role = request
        .role
        .as_deref()
        .map(Role::parse_lenient)
        .unwrap_or(Role::Candidate);
    let skills = request.skills.normalize();
    let headline = request.headline.as_deref().map(str::trim).filter(|h| !h.is_empty());
    let phone = request.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());

    let profile = store::upsert(
        &state.db,
        auth.id(),
        ProfileFields {
            full_name: request.full_name.trim(),
            headline,
            city: request.city.trim(),
            skills: &skills,
            years_experience: request.years_experience,
            phone,
            consent: request.consent,
            role,
        },
    )
    .await?;

    info!("Saved profile {} for identity {}", profile.id, auth.id());
    Ok(Json(ProfileResponse::new(&state, profile)))
}

/// POST /api/profile/avatar
///
/// Multipart field `avatar`. Images only, 5 MB max.
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = require_profile(
        &state,
        &auth,
        "Create your profile before uploading an avatar",
    )
    .await?;

    let file = read_file_field(
        &mut multipart,
        "avatar",
        MAX_AVATAR_BYTES,
        "Please upload an image smaller than 5 MB.",
    )
    .await?;

    if !is_image(&file.file_name, file.content_type.as_deref()) {
        return Err(AppError::Validation(
            "Avatar must be a PNG, JPEG, GIF or WebP image".to_string(),
        ));
    }

    let key = object_key(profile.id, &file.file_name);
    put_object(
        &state.s3,
        &state.config.s3_avatar_bucket,
        &key,
        file.bytes,
        file.content_type.as_deref(),
    )
    .await?;

    let profile = store::set_avatar_path(&state.db, profile.id, &key).await?;
    info!("Updated avatar for profile {}", profile.id);
    Ok(Json(ProfileResponse::new(&state, profile)))
}

/// Raster images only. The extension must be allowed, and a declared
/// content type must be one of the matching raster types.
fn is_image(file_name: &str, content_type: Option<&str>) -> bool {
    let by_ext = file_extension(file_name).is_some_and(|ext| AVATAR_EXTENSIONS.contains(&ext.as_str()));
    let by_type = content_type.map_or(true, |ct| {
        let essence = ct.split(';').next().unwrap_or_default().trim();
        AVATAR_CONTENT_TYPES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    });
    by_ext && by_type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_requires_raster_extension_and_type() {
        assert!(is_image("photo.png", Some("image/png")));
        assert!(is_image("photo.JPG", None));
        assert!(is_image("photo.jpeg", Some("IMAGE/JPEG; charset=binary")));
        assert!(!is_image("photo.bin", Some("image/png")));
        assert!(!is_image("photo.webp", Some("application/octet-stream")));
        assert!(!is_image("cv.pdf", Some("application/pdf")));
        assert!(!is_image("noext", None));
    }

    #[test]
    fn test_svg_avatar_is_rejected() {
        assert!(!is_image("logo.svg", Some("image/svg+xml")));
        assert!(!is_image("logo.png", Some("image/svg+xml")));
        assert!(!is_image("logo.svg", None));
    }

    #[test]
    fn test_upsert_request_defaults() {
        let request: UpsertProfileRequest =
            serde_json::from_str(r#"{ "full_name": "Asha" }"#).unwrap();
        assert_eq!(request.city, "");
        assert!(!request.consent);
        assert!(request.role.is_none());
        assert!(request.skills.normalize().is_empty());
    }

    #[test]
    fn test_upsert_request_accepts_csv_skills() {
        let request: UpsertProfileRequest = serde_json::from_str(
            r#"{ "full_name": "Asha", "skills": "wiring, installation", "role": "Employer" }"#,
        )
        .unwrap();
        assert_eq!(request.skills.normalize(), vec!["wiring", "installation"]);
        assert_eq!(
            request.role.as_deref().map(Role::parse_lenient),
            Some(Role::Employer)
        );
    }
}
