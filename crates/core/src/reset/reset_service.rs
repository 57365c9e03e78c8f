use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};
use crate::goals::{compute_progress, Goal, GoalProgress, GoalRepositoryTrait};
use crate::ledger::LedgerServiceTrait;

/// Result of resetting a goal: its unchanged configuration, its now-zero
/// progress and how many transactions were erased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetOutcome {
    pub goal: Goal,
    pub progress: GoalProgress,
    pub removed: usize,
}

/// Checks the typed confirmation a caller must collect before resetting.
///
/// The typed text has to equal the goal's current title exactly: the
/// comparison is case-sensitive and nothing is trimmed. `reset_progress`
/// itself never checks this.
pub fn confirm_reset(goal: &Goal, typed_title: &str) -> Result<()> {
    if typed_title != goal.title {
        return Err(Error::Validation(ValidationError::ConfirmationMismatch));
    }
    Ok(())
}

#[async_trait]
pub trait ResetServiceTrait: Send + Sync {
    /// Irreversibly deletes every transaction of a goal.
    ///
    /// Either the whole history is removed or, on failure, none of it is.
    async fn reset_progress(&self, goal_id: &str) -> Result<ResetOutcome>;
}

pub struct ResetService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    ledger_service: Arc<dyn LedgerServiceTrait>,
}

impl ResetService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        ledger_service: Arc<dyn LedgerServiceTrait>,
    ) -> Self {
        Self {
            goal_repository,
            ledger_service,
        }
    }

    fn load_goal(&self, goal_id: &str) -> Result<Goal> {
        match self.goal_repository.get_by_id(goal_id) {
            Ok(goal) => Ok(goal),
            Err(e) if e.is_not_found() => Err(Error::goal_not_found(goal_id)),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ResetServiceTrait for ResetService {
    async fn reset_progress(&self, goal_id: &str) -> Result<ResetOutcome> {
        let mut goal = self.load_goal(goal_id)?;

        let removed = self.ledger_service.delete_all_for_goal(goal_id).await?;

        // The deletion is committed; nothing below may fail.
        goal.cached_balance = Decimal::ZERO;
        let progress = compute_progress(&goal, Decimal::ZERO);
        info!(
            "Reset goal {}: {} transactions removed, balance now {}",
            goal_id, removed, progress.balance
        );

        Ok(ResetOutcome {
            goal,
            progress,
            removed,
        })
    }
}
