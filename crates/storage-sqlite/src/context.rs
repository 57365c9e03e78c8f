//! Wires the core services over one SQLite database.

use std::sync::Arc;

use log::info;

use crate::config::StorageConfig;
use crate::db::{self, DbPool};
use crate::goals::GoalRepository;
use crate::settings::SettingsRepository;
use crate::transactions::TransactionRepository;
use piggybank_core::goals::{GoalService, GoalServiceTrait};
use piggybank_core::ledger::{LedgerService, LedgerServiceTrait};
use piggybank_core::reset::{ResetService, ResetServiceTrait};
use piggybank_core::settings::{SettingsService, SettingsServiceTrait};
use piggybank_core::Result;

pub struct ServiceContext {
    pub db_path: String,
    pub pool: Arc<DbPool>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub reset_service: Arc<dyn ResetServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
}

/// Opens the database, applies pending migrations, starts the writer actor
/// and loads settings once. Must be called from within a Tokio runtime.
pub async fn build_context(config: &StorageConfig) -> Result<ServiceContext> {
    let db_path = db::init(config)?;
    info!("Database path in use: {}", db_path);

    let pool = db::create_pool(config)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer));

    let ledger_service: Arc<dyn LedgerServiceTrait> = Arc::new(LedgerService::new(
        transaction_repository,
        goal_repository.clone(),
    ));
    let goal_service = Arc::new(GoalService::new(
        goal_repository.clone(),
        ledger_service.clone(),
    ));
    let reset_service = Arc::new(ResetService::new(goal_repository, ledger_service.clone()));

    let settings_service = Arc::new(SettingsService::new(settings_repository));
    let settings = settings_service.initialize().await?;
    info!(
        "Settings loaded: theme={}, currency={}, language={}",
        settings.theme, settings.currency, settings.language
    );

    Ok(ServiceContext {
        db_path,
        pool,
        ledger_service,
        goal_service,
        reset_service,
        settings_service,
    })
}
