use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, GoalProgress, GoalUpdate, GoalWithProgress, NewGoal};
use crate::goals::goals_progress::{progress, select_current_goal, sort_by_creation};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::ledger::LedgerServiceTrait;

pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    ledger_service: Arc<dyn LedgerServiceTrait>,
}

impl GoalService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        ledger_service: Arc<dyn LedgerServiceTrait>,
    ) -> Self {
        GoalService {
            goal_repository,
            ledger_service,
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut goals = self.goal_repository.load_goals()?;
        sort_by_creation(&mut goals);
        Ok(goals)
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        match self.goal_repository.get_by_id(goal_id) {
            Ok(goal) => Ok(goal),
            Err(e) if e.is_not_found() => Err(Error::goal_not_found(goal_id)),
            Err(e) => Err(e),
        }
    }

    fn get_current_goal(&self) -> Result<Option<Goal>> {
        let goals = self.goal_repository.load_goals()?;
        Ok(select_current_goal(&goals).cloned())
    }

    fn get_progress(&self, goal_id: &str) -> Result<GoalProgress> {
        let goal = self.get_goal(goal_id)?;
        progress(&goal, self.ledger_service.as_ref())
    }

    fn get_goal_with_progress(&self, goal_id: &str) -> Result<GoalWithProgress> {
        let goal = self.get_goal(goal_id)?;
        let progress = progress(&goal, self.ledger_service.as_ref())?;
        Ok(GoalWithProgress { goal, progress })
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let goal = self.goal_repository.insert_new_goal(new_goal).await?;
        info!("Created goal {} ('{}')", goal.id, goal.title);
        Ok(goal)
    }

    async fn update_goal(&self, goal_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        let existing = self.get_goal(goal_id)?;
        goal_update.validate()?;
        let updated = goal_update.apply_to(&existing);
        debug!("Updating goal {}", goal_id);
        self.goal_repository.update_goal(updated).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let deleted = self.goal_repository.delete_goal(goal_id).await?;
        if deleted == 0 {
            return Err(Error::goal_not_found(goal_id));
        }
        info!("Deleted goal {} and its transactions", goal_id);
        Ok(())
    }
}
