use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::identity::IdentityClient;
use crate::storage::public_object_url;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub identity: IdentityClient,
    pub config: Config,
}

impl AppState {
    pub fn resume_url(&self, file_path: &str) -> String {
        public_object_url(
            &self.config.s3_public_url,
            &self.config.s3_resume_bucket,
            file_path,
        )
    }

    pub fn avatar_url(&self, avatar_path: &str) -> String {
        public_object_url(
            &self.config.s3_public_url,
            &self.config.s3_avatar_bucket,
            avatar_path,
        )
    }
}
