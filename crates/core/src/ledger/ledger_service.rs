use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ledger_model::{
    compute_balance, sort_newest_first, NewTransaction, Transaction, TransactionUpdate,
};
use super::ledger_traits::{LedgerServiceTrait, TransactionRepositoryTrait};
use crate::errors::{Error, Result};
use crate::goals::GoalRepositoryTrait;

/// Service owning the transaction set of every goal.
pub struct LedgerService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl LedgerService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            goal_repository,
        }
    }

    fn ensure_goal_exists(&self, goal_id: &str) -> Result<()> {
        match self.goal_repository.get_by_id(goal_id) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(Error::goal_not_found(goal_id)),
            Err(e) => Err(e),
        }
    }

    fn find_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        match self.transaction_repository.get_by_id(transaction_id) {
            Ok(transaction) => Ok(transaction),
            Err(e) if e.is_not_found() => Err(Error::transaction_not_found(transaction_id)),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;

        if let Some(goal_id) = new_transaction.goal_id.as_deref() {
            self.ensure_goal_exists(goal_id)?;
        }

        let transaction = self.transaction_repository.create(new_transaction).await?;
        debug!(
            "Recorded {} of {} for goal {:?}",
            transaction.kind, transaction.amount, transaction.goal_id
        );
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        patch: TransactionUpdate,
    ) -> Result<Transaction> {
        let existing = self.find_transaction(transaction_id)?;
        patch.validate()?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = patch.apply_to(&existing);
        self.transaction_repository.update(updated).await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let deleted = self.transaction_repository.delete(transaction_id).await?;
        if deleted == 0 {
            return Err(Error::transaction_not_found(transaction_id));
        }
        debug!("Deleted transaction {}", transaction_id);
        Ok(())
    }

    async fn delete_all_for_goal(&self, goal_id: &str) -> Result<usize> {
        let removed = self
            .transaction_repository
            .delete_all_for_goal(goal_id)
            .await?;
        info!("Removed {} transactions of goal {}", removed, goal_id);
        Ok(removed)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.find_transaction(transaction_id)
    }

    fn list_transactions(&self, offset: i64, limit: i64) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .transaction_repository
            .list(offset.max(0), limit.max(0))?;
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    fn list_by_goal(&self, goal_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions = self.transaction_repository.find_by_goal(goal_id)?;
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    fn balance_for(&self, goal_id: &str) -> Result<Decimal> {
        let transactions = self.transaction_repository.find_by_goal(goal_id)?;
        compute_balance(transactions.iter().filter(|t| t.belongs_to(goal_id)))
    }
}
