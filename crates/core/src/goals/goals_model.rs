//! Goals domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target_amount: Decimal,
    /// Informational deadline, never enforced.
    pub target_date: NaiveDate,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Balance as last cached by the store, for listings. The ledger is the
    /// source of truth; use `progress` for anything that matters.
    pub cached_balance: Decimal,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl NewGoal {
    /// Validates the new goal data.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_target_amount(self.target_amount)
    }
}

/// Partial update of a goal's settings.
///
/// `None` leaves a field untouched. For the optional text fields an empty
/// string clears the stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(target_amount) = self.target_amount {
            validate_target_amount(target_amount)?;
        }
        Ok(())
    }

    /// Returns `goal` with the patched fields replaced.
    pub fn apply_to(&self, goal: &Goal) -> Goal {
        let mut updated = goal.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(target_amount) = self.target_amount {
            updated.target_amount = target_amount;
        }
        if let Some(target_date) = self.target_date {
            updated.target_date = target_date;
        }
        if let Some(description) = &self.description {
            updated.description = non_empty(description);
        }
        if let Some(image_url) = &self.image_url {
            updated.image_url = non_empty(image_url);
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }
        updated
    }
}

/// Derived progress of a goal toward its target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub balance: Decimal,
    /// Always within `[0, 100]`.
    pub percentage: Decimal,
    pub is_complete: bool,
}

/// A goal together with its freshly derived progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    pub goal: Goal,
    pub progress: GoalProgress,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    Ok(())
}

fn validate_target_amount(target_amount: Decimal) -> Result<()> {
    if target_amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NonPositiveAmount {
            field: "targetAmount".to_string(),
            value: target_amount.to_string(),
        }));
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
