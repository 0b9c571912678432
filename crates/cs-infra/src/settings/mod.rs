pub mod file_repo;
pub mod migration;

pub use file_repo::FileSettingsRepository;
