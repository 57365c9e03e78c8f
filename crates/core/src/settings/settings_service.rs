use async_trait::async_trait;
use log::{debug, info};
use std::sync::{Arc, RwLock};

use crate::errors::{Error, Result};
use crate::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate, Theme, THEME_KEY};

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Loads persisted settings once and stores defaults for missing keys.
    async fn initialize(&self) -> Result<Settings>;

    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings>;

    async fn update_theme(&self, theme: Theme) -> Result<Settings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    cache: RwLock<Option<Settings>>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self {
            settings_repository,
            cache: RwLock::new(None),
        }
    }

    fn cached(&self) -> Result<Option<Settings>> {
        let guard = self
            .cache
            .read()
            .map_err(|_| Error::Unexpected("Settings cache lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn store(&self, settings: Settings) -> Result<Settings> {
        let mut guard = self
            .cache
            .write()
            .map_err(|_| Error::Unexpected("Settings cache lock poisoned".to_string()))?;
        *guard = Some(settings.clone());
        Ok(settings)
    }

    /// Reads from the repository and forces the fixed fields.
    fn load(&self) -> Result<Settings> {
        let stored = self.settings_repository.get_settings()?;
        let defaults = Settings::default();
        Ok(Settings {
            theme: stored.theme,
            currency: defaults.currency,
            language: defaults.language,
            updated_at: stored.updated_at,
        })
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn initialize(&self) -> Result<Settings> {
        match self.settings_repository.get_setting(THEME_KEY) {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                let theme = Settings::default().theme;
                debug!("No stored theme, persisting default '{}'", theme);
                self.settings_repository
                    .update_setting(THEME_KEY, theme.as_str())
                    .await?;
            }
            Err(e) => return Err(e),
        }
        let settings = self.load()?;
        self.store(settings)
    }

    fn get_settings(&self) -> Result<Settings> {
        if let Some(settings) = self.cached()? {
            return Ok(settings);
        }
        let settings = self.load()?;
        self.store(settings)
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        match update.theme {
            Some(theme) => self.update_theme(theme).await,
            None => self.get_settings(),
        }
    }

    async fn update_theme(&self, theme: Theme) -> Result<Settings> {
        self.settings_repository
            .update_setting(THEME_KEY, theme.as_str())
            .await?;
        info!("Theme set to '{}'", theme);
        let settings = self.load()?;
        self.store(settings)
    }
}
