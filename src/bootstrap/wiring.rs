//! # Dependency Injection
//!
//! The only place that depends on cs-infra, cs-platform and cs-app at once.
//! Builds concrete adapters and hands them to [`AppDeps`] as ports; no
//! decisions are made here.

use std::path::Path;
use std::sync::Arc;

use cs_app::AppDeps;
use cs_core::config::AppConfig;
use cs_infra::clipboard::FileSkipNextChange;
use cs_infra::db::mappers::ClipboardEntryRowMapper;
use cs_infra::db::pool::{init_db_pool, DbPool};
use cs_infra::db::repositories::DieselClipboardHistoryRepository;
use cs_infra::db::DieselSqliteExecutor;
use cs_infra::fs::{AppDataPaths, FsImageBlobStore};
use cs_infra::settings::FileSettingsRepository;
use cs_infra::thumbnail::{ThumbnailCache, WebpThumbnailGenerator};
use cs_infra::SystemClock;
use cs_platform::{FrontmostAppSource, SystemClipboard};
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

/// Infrastructure that failed to initialize.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory initialization failed: {0}")]
    DataDir(String),

    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit(format!("non UTF-8 path: {}", db_path.display())))?;
    init_db_pool(db_url).map_err(|e| WiringError::DatabaseInit(format!("{:#}", e)))
}

/// Storage adapters: history repository, image blobs and settings.
fn create_storage(
    config: &AppConfig,
    paths: &AppDataPaths,
) -> WiringResult<(
    DieselClipboardHistoryRepository<
        DieselSqliteExecutor,
        ClipboardEntryRowMapper,
        ClipboardEntryRowMapper,
    >,
    FsImageBlobStore,
    FileSettingsRepository,
)> {
    let pool = create_db_pool(&paths.database_file())?;
    let history_repo = DieselClipboardHistoryRepository::new(
        DieselSqliteExecutor::new(pool),
        ClipboardEntryRowMapper,
        ClipboardEntryRowMapper,
    );

    let blob_store = FsImageBlobStore::new(
        paths.root(),
        Arc::new(WebpThumbnailGenerator::new()),
        ThumbnailCache::from_config(&config.thumbnail_cache),
    );

    let settings = FileSettingsRepository::new(paths.settings_file());

    Ok((history_repo, blob_store, settings))
}

/// Wire every port for the given data root.
pub fn wire_dependencies(config: &AppConfig, paths: &AppDataPaths) -> WiringResult<AppDeps> {
    paths
        .ensure_root()
        .map_err(|e| WiringError::DataDir(format!("{:#}", e)))?;

    let (history_repo, blob_store, settings) = create_storage(config, paths)?;
    let clipboard =
        SystemClipboard::new().map_err(|e| WiringError::ClipboardInit(format!("{:#}", e)))?;

    let clock = Arc::new(SystemClock);
    // Shared through the data root: `copy` and `watch` run as separate processes.
    let skip_next = FileSkipNextChange::new(paths.skip_next_file(), clock.clone());

    info!(data_dir = %paths.root().display(), "Dependencies wired");

    Ok(AppDeps {
        clipboard: Arc::new(clipboard),
        source_app: Arc::new(FrontmostAppSource::new()),
        skip_next: Arc::new(skip_next),
        history_repo: Arc::new(history_repo),
        blob_store: Arc::new(blob_store),
        settings: Arc::new(settings),
        clock,
    })
}
