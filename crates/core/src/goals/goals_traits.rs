use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgress, GoalUpdate, GoalWithProgress, NewGoal};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// All goals. Order is not guaranteed.
    fn load_goals(&self) -> Result<Vec<Goal>>;

    /// Fails with a not-found error for unknown ids.
    fn get_by_id(&self, goal_id: &str) -> Result<Goal>;

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    /// Writes every mutable field of `goal`. Id, creation time and the cached
    /// balance are left as stored.
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;

    /// Deletes the goal and its transactions in one unit of work.
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    /// All goals in creation order.
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    fn get_current_goal(&self) -> Result<Option<Goal>>;
    fn get_progress(&self, goal_id: &str) -> Result<GoalProgress>;
    fn get_goal_with_progress(&self, goal_id: &str) -> Result<GoalWithProgress>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
}
