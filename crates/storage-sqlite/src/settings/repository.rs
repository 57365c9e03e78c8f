use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::warn;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use piggybank_core::errors::Result;
use piggybank_core::settings::{Settings, SettingsRepositoryTrait, THEME_KEY};

const UPDATED_AT_KEY: &str = "updated_at";

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut settings = Settings::default();

        for (key, value) in all_settings {
            match key.as_str() {
                THEME_KEY => match value.parse() {
                    Ok(theme) => settings.theme = theme,
                    Err(_) => warn!("Ignoring unknown stored theme '{}'", value),
                },
                UPDATED_AT_KEY => {
                    settings.updated_at = DateTime::parse_from_rfc3339(&value)
                        .ok()
                        .map(|ts| ts.with_timezone(&Utc));
                }
                // Currency and language are fixed.
                _ => {}
            }
        }

        Ok(settings)
    }

    fn get_setting(&self, setting_key_param: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_settings
            .filter(setting_key.eq(setting_key_param))
            .select(setting_value)
            .first::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn update_setting(
        &self,
        setting_key_param: &str,
        setting_value_param: &str,
    ) -> Result<()> {
        let rows = vec![
            AppSettingDB {
                setting_key: setting_key_param.to_string(),
                setting_value: setting_value_param.to_string(),
            },
            AppSettingDB {
                setting_key: UPDATED_AT_KEY.to_string(),
                setting_value: Utc::now().to_rfc3339(),
            },
        ];

        self.writer
            .exec(move |conn| {
                for row in &rows {
                    diesel::replace_into(app_settings)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
