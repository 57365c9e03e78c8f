//! Transaction repository and ledger service traits.
//!
//! These traits define the contract for ledger operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ledger_model::{NewTransaction, Transaction};
use super::TransactionUpdate;
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
///
/// Each write must be indivisible against the backing store: a store that
/// caches goal balances has to refresh the cache inside the same unit of work.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Persists a validated transaction, assigning its id and creation time.
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Writes the mutable fields (amount, description) of an existing
    /// transaction.
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;

    /// Deletes a transaction by its ID.
    ///
    /// Returns the number of deleted records, zero when the id is unknown.
    async fn delete(&self, transaction_id: &str) -> Result<usize>;

    /// Deletes every transaction attached to a goal in a single unit of work.
    async fn delete_all_for_goal(&self, goal_id: &str) -> Result<usize>;

    /// Retrieves a transaction by its ID.
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// All transactions attached to a goal. Order is not guaranteed.
    fn find_by_goal(&self, goal_id: &str) -> Result<Vec<Transaction>>;

    /// A page of the whole ledger, newest first.
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for Ledger service operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        transaction_id: &str,
        patch: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Fails with `NotFound` when the id is unknown, including on a second
    /// delete of the same id.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;

    /// Removes a goal's whole history. Only the reset operation calls this.
    async fn delete_all_for_goal(&self, goal_id: &str) -> Result<usize>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(&self, offset: i64, limit: i64) -> Result<Vec<Transaction>>;

    /// A goal's transactions, newest first with ties broken by descending id.
    fn list_by_goal(&self, goal_id: &str) -> Result<Vec<Transaction>>;

    /// Deposits minus withdrawals for a goal; zero when it has no transactions.
    fn balance_for(&self, goal_id: &str) -> Result<Decimal>;
}
