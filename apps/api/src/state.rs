use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every external collaborator is constructed once at startup
/// and passed in here — no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Short-TTL cache for recommendation responses.
    pub redis: RedisClient,
    /// Archive store for raw resume snapshots.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
}
