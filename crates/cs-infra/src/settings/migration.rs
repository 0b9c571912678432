use cs_core::ports::SettingsMigrationPort;
use cs_core::settings::model::{Settings, CURRENT_SCHEMA_VERSION};
use tracing::warn;

/// Files written before `schema_version` existed are treated as version 0.
pub struct MigrationV0ToV1;

impl SettingsMigrationPort for MigrationV0ToV1 {
    fn from_version(&self) -> u32 {
        0
    }

    fn to_version(&self) -> u32 {
        1
    }

    fn migrate(&self, mut settings: Settings) -> Settings {
        // Bundle ids are compared exactly; older files could carry padded entries.
        settings.capture.ignored_app_bundle_ids = settings
            .capture
            .ignored_app_bundle_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        settings.schema_version = self.to_version();
        settings
    }
}

pub struct SettingsMigrator {
    migrations: Vec<Box<dyn SettingsMigrationPort>>,
}

impl Default for SettingsMigrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(MigrationV0ToV1)],
        }
    }

    /// Applies migrations in order until the current schema version is reached.
    ///
    /// A gap in the chain stops migration and stamps the current version, keeping
    /// whatever fields deserialized.
    pub fn migrate_to_latest(&self, mut settings: Settings) -> Settings {
        while settings.schema_version < CURRENT_SCHEMA_VERSION {
            let current = settings.schema_version;
            match self.migrations.iter().find(|m| m.from_version() == current) {
                Some(migration) => settings = migration.migrate(settings),
                None => {
                    warn!(from = current, "No settings migration found; stamping current version");
                    settings.schema_version = CURRENT_SCHEMA_VERSION;
                }
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v0_settings_are_upgraded_and_cleaned() {
        let mut settings = Settings::default();
        settings.schema_version = 0;
        settings
            .capture
            .ignored_app_bundle_ids
            .insert(" com.1password.1password ".to_string());
        settings.capture.ignored_app_bundle_ids.insert("  ".to_string());

        let migrated = SettingsMigrator::new().migrate_to_latest(settings);

        assert_eq!(migrated.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(migrated.capture.is_app_ignored("com.1password.1password"));
        assert_eq!(migrated.capture.ignored_app_bundle_ids.len(), 1);
    }

    #[test]
    fn current_settings_are_untouched() {
        let settings = Settings::default();
        let migrated = SettingsMigrator::new().migrate_to_latest(settings.clone());
        assert_eq!(migrated, settings);
    }
}
