//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::Settings;

/// Repository trait for persisted application settings, stored as key/value
/// pairs.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, with defaults for keys that were never stored.
    fn get_settings(&self) -> Result<Settings>;

    /// Get a single setting value by key. Fails with a not-found error when
    /// the key was never stored.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Insert or replace a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
