use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::balance::refresh_cached_balance;
use super::model::{into_domain, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use piggybank_core::errors::Result;
use piggybank_core::ledger::{NewTransaction, Transaction, TransactionRepositoryTrait};

/// Ledger storage. Every write also refreshes the cached balance of the goal
/// it touched, within the same transaction.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB::from_new(
                    Uuid::now_v7().to_string(),
                    new_transaction,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if let Some(goal_id) = inserted.goal_id.as_deref() {
                    refresh_cached_balance(conn, goal_id)?;
                }
                Ok(Transaction::try_from(inserted)?)
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(transactions::table.find(&transaction.id))
                    .set((
                        transactions::amount.eq(transaction.amount.to_string()),
                        transactions::description.eq(&transaction.description),
                        transactions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if let Some(goal_id) = updated.goal_id.as_deref() {
                    refresh_cached_balance(conn, goal_id)?;
                }
                Ok(Transaction::try_from(updated)?)
            })
            .await
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let goal_id: Option<Option<String>> = transactions::table
                    .find(&transaction_id)
                    .select(transactions::goal_id)
                    .first(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                let Some(goal_id) = goal_id else {
                    return Ok(0);
                };

                let deleted = diesel::delete(transactions::table.find(&transaction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if let Some(goal_id) = goal_id.as_deref() {
                    refresh_cached_balance(conn, goal_id)?;
                }
                Ok(deleted)
            })
            .await
    }

    async fn delete_all_for_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let removed =
                    diesel::delete(transactions::table.filter(transactions::goal_id.eq(&goal_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                refresh_cached_balance(conn, &goal_id)?;
                Ok(removed)
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Transaction::try_from(row)?)
    }

    fn find_by_goal(&self, goal_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::goal_id.eq(goal_id))
            .order((transactions::created_at.desc(), transactions::id.desc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows)?)
    }

    fn list(&self, offset: i64, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .order((transactions::created_at.desc(), transactions::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(into_domain(rows)?)
    }
}
