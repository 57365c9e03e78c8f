//! Database model for ledger entries.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use piggybank_core::ledger::{NewTransaction, Transaction, TransactionKind};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub goal_id: Option<String>,
    pub amount: String,
    pub transaction_type: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionDB {
    pub fn from_new(id: String, new_transaction: NewTransaction, now: NaiveDateTime) -> Self {
        Self {
            id,
            goal_id: new_transaction.goal_id,
            amount: new_transaction.amount.to_string(),
            transaction_type: new_transaction.kind.as_str().to_string(),
            description: new_transaction.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Decimal::from_str(&db.amount)?,
            kind: TransactionKind::from_str(&db.transaction_type)?,
            id: db.id,
            goal_id: db.goal_id,
            description: db.description,
            created_at: db.created_at.and_utc(),
        })
    }
}

/// Converts loaded rows, failing on the first undecodable one.
pub(crate) fn into_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>, StorageError> {
    rows.into_iter().map(Transaction::try_from).collect()
}
