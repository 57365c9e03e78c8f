//! Ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Direction of a transaction. The amount itself is always a positive
/// magnitude; the kind alone decides whether it adds to or takes from a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    /// Contribution of `amount` to a goal balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid transaction type '{}'. Use 'deposit' or 'withdrawal'",
                other
            )))),
        }
    }
}

/// Domain model representing a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Unattached entries carry no goal and count toward no balance.
    pub goal_id: Option<String>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    pub fn belongs_to(&self, goal_id: &str) -> bool {
        self.goal_id.as_deref() == Some(goal_id)
    }
}

/// Input model for recording a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub goal_id: Option<String>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
}

impl NewTransaction {
    pub fn deposit(goal_id: Option<&str>, amount: Decimal, description: &str) -> Self {
        Self {
            goal_id: goal_id.map(str::to_string),
            amount,
            kind: TransactionKind::Deposit,
            description: description.to_string(),
        }
    }

    pub fn withdrawal(goal_id: Option<&str>, amount: Decimal, description: &str) -> Self {
        Self {
            goal_id: goal_id.map(str::to_string),
            amount,
            kind: TransactionKind::Withdrawal,
            description: description.to_string(),
        }
    }

    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(&self.description)?;
        if let Some(goal_id) = &self.goal_id {
            if goal_id.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Goal ID cannot be blank".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Partial update of a transaction.
///
/// Only the amount and the description are editable. Kind, goal and creation
/// time are fixed at creation so the balance derivation stays unambiguous.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.description.is_none()
    }

    /// Returns `transaction` with the patched fields replaced.
    pub fn apply_to(&self, transaction: &Transaction) -> Transaction {
        let mut updated = transaction.clone();
        if let Some(amount) = self.amount {
            updated.amount = amount;
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        updated
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NonPositiveAmount {
            field: "amount".to_string(),
            value: amount.to_string(),
        }));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "description".to_string(),
        )));
    }
    Ok(())
}

/// Sum of deposits minus sum of withdrawals. Zero for an empty ledger.
///
/// Fails instead of overflowing when the total leaves the `Decimal` range.
pub fn compute_balance<'a, I>(transactions: I) -> Result<Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .try_fold(Decimal::ZERO, |balance, transaction| {
            balance
                .checked_add(transaction.signed_amount())
                .ok_or_else(|| {
                    Error::Validation(ValidationError::InvalidInput(format!(
                        "Balance overflows after transaction {}",
                        transaction.id
                    )))
                })
        })
}

/// Orders transactions most recent first, breaking timestamp ties by
/// descending id.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
