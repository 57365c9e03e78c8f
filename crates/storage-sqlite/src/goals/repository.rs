use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{GoalChangesDB, GoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{goals, transactions};
use piggybank_core::errors::Result;
use piggybank_core::goals::{Goal, GoalRepositoryTrait, NewGoal};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .order((goals::created_at.asc(), goals::id.asc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db
            .into_iter()
            .map(Goal::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let goal_db = goals::table
            .find(goal_id)
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Goal::try_from(goal_db)?)
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = GoalDB::from_new(
                    Uuid::now_v7().to_string(),
                    new_goal,
                    Utc::now().naive_utc(),
                );
                let result_db = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::try_from(result_db)?)
            })
            .await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let changes = GoalChangesDB::from_domain(&goal, Utc::now().naive_utc());
        let goal_id = goal.id;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let result_db = diesel::update(goals::table.find(&goal_id))
                    .set(&changes)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::try_from(result_db)?)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let removed =
                    diesel::delete(transactions::table.filter(transactions::goal_id.eq(&goal_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                let deleted = diesel::delete(goals::table.find(&goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!(
                    "Deleted goal {} ({} rows) with {} transactions",
                    goal_id, deleted, removed
                );
                Ok(deleted)
            })
            .await
    }
}
