//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::{GoalChangesDB, GoalDB};
pub use repository::GoalRepository;
