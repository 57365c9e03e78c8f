//! Goals module - domain models, progress derivation, services, and traits.

mod goals_model;
mod goals_progress;
mod goals_service;
mod goals_traits;



pub use goals_model::{Goal, GoalProgress, GoalUpdate, GoalWithProgress, NewGoal};
pub use goals_progress::{
    compute_progress, progress, select_current_goal, sort_by_creation, CelebrationPolicy,
    CompletionTracker, GoalReached,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
