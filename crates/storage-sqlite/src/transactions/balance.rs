use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;

use super::model::{into_domain, TransactionDB};
use crate::errors::StorageError;
use crate::schema::{goals, transactions};
use piggybank_core::ledger::compute_balance;

/// Recomputes a goal's cached balance from its transactions.
///
/// Must run on the writer connection, inside the job that changed the
/// transactions, so the cache never outlives a rolled-back write.
pub(crate) fn refresh_cached_balance(
    conn: &mut SqliteConnection,
    goal_id: &str,
) -> Result<Decimal, StorageError> {
    let rows = transactions::table
        .filter(transactions::goal_id.eq(goal_id))
        .select(TransactionDB::as_select())
        .load::<TransactionDB>(conn)?;
    // An overflow aborts the job, so the write that caused it rolls back.
    let balance = compute_balance(&into_domain(rows)?)?;

    diesel::update(goals::table.find(goal_id))
        .set(goals::current_balance.eq(balance.to_string()))
        .execute(conn)?;
    debug!("Goal {} cached balance is now {}", goal_id, balance);
    Ok(balance)
}
