//! Database models for goals.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use piggybank_core::goals::{Goal, NewGoal};

/// Database model for goals. Amounts are stored as decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub target_amount: String,
    pub target_date: NaiveDate,
    pub current_balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable columns of a goal. `None` clears the optional text columns.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
pub struct GoalChangesDB {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub target_amount: String,
    pub target_date: NaiveDate,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    pub fn from_new(id: String, new_goal: NewGoal, now: NaiveDateTime) -> Self {
        Self {
            id,
            title: new_goal.title,
            description: new_goal.description,
            image_url: new_goal.image_url,
            target_amount: new_goal.target_amount.to_string(),
            target_date: new_goal.target_date,
            current_balance: Decimal::ZERO.to_string(),
            is_active: new_goal.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl GoalChangesDB {
    pub fn from_domain(goal: &Goal, now: NaiveDateTime) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone(),
            image_url: goal.image_url.clone(),
            target_amount: goal.target_amount.to_string(),
            target_date: goal.target_date,
            is_active: goal.is_active,
            updated_at: now,
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: Decimal::from_str(&db.target_amount)?,
            cached_balance: Decimal::from_str(&db.current_balance)?,
            id: db.id,
            title: db.title,
            target_date: db.target_date,
            description: db.description,
            image_url: db.image_url,
            is_active: db.is_active,
            created_at: db.created_at.and_utc(),
        })
    }
}
