//! Progress derivation, completion signalling and current-goal selection.

use std::collections::HashMap;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::goals_model::{Goal, GoalProgress};
use crate::constants::PERCENT_COMPLETE;
use crate::errors::Result;
use crate::ledger::LedgerServiceTrait;

/// Derives a goal's progress from the ledger.
pub fn progress(goal: &Goal, ledger: &dyn LedgerServiceTrait) -> Result<GoalProgress> {
    let balance = ledger.balance_for(&goal.id)?;
    Ok(compute_progress(goal, balance))
}

/// Progress of `goal` for a given balance.
///
/// The percentage is clamped to `[0, 100]`, so a negative balance reads as 0%
/// and any overshoot reads as 100%.
pub fn compute_progress(goal: &Goal, balance: Decimal) -> GoalProgress {
    let percentage = completion_percentage(balance, goal.target_amount);
    if goal.target_amount <= Decimal::ZERO {
        warn!(
            "Goal {} has a non-positive target {}; reporting 0%",
            goal.id, goal.target_amount
        );
    }
    GoalProgress {
        balance,
        percentage,
        is_complete: percentage >= PERCENT_COMPLETE,
    }
}

fn completion_percentage(balance: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO || balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match balance
        .checked_div(target_amount)
        .and_then(|ratio| ratio.checked_mul(PERCENT_COMPLETE))
    {
        Some(percentage) => percentage.min(PERCENT_COMPLETE),
        // Only a positive ratio far beyond the target can overflow here.
        None => PERCENT_COMPLETE,
    }
}

/// Orders goals by creation time, ties broken by ascending id.
pub fn sort_by_creation(goals: &mut [Goal]) {
    goals.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Picks the goal the presentation layer should treat as current.
///
/// The earliest-created active goal wins; with no active goal the earliest
/// goal overall is used. The input order does not matter. Returns `None` only
/// for an empty slice.
pub fn select_current_goal(goals: &[Goal]) -> Option<&Goal> {
    let earliest = |a: &&Goal, b: &&Goal| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    };
    goals
        .iter()
        .filter(|g| g.is_active)
        .min_by(earliest)
        .or_else(|| goals.iter().min_by(earliest))
}

/// Whether a goal that dropped below its target and climbed back should be
/// celebrated again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CelebrationPolicy {
    /// Signal every upward crossing of 100%.
    #[default]
    EveryCrossing,
    /// Signal only the first upward crossing ever observed for a goal.
    FirstCrossingOnly,
}

/// Emitted when a goal crosses from below 100% to 100% or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReached {
    pub goal_id: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct CompletionState {
    was_complete: bool,
    signaled: bool,
}

/// Turns successive progress snapshots into one-shot "goal reached" signals.
///
/// Observing the same complete goal repeatedly (e.g. on every render) signals
/// nothing after the crossing itself. The first observation of a goal only
/// records its state.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    policy: CelebrationPolicy,
    states: HashMap<String, CompletionState>,
}

impl CompletionTracker {
    pub fn new(policy: CelebrationPolicy) -> Self {
        Self {
            policy,
            states: HashMap::new(),
        }
    }

    pub fn policy(&self) -> CelebrationPolicy {
        self.policy
    }

    pub fn observe(&mut self, goal_id: &str, progress: &GoalProgress) -> Option<GoalReached> {
        if !self.states.contains_key(goal_id) {
            self.states.insert(
                goal_id.to_string(),
                CompletionState {
                    was_complete: progress.is_complete,
                    signaled: progress.is_complete,
                },
            );
            return None;
        }
        let state = self.states.get_mut(goal_id)?;

        let crossed = !state.was_complete && progress.is_complete;
        state.was_complete = progress.is_complete;
        if !crossed {
            return None;
        }

        if self.policy == CelebrationPolicy::FirstCrossingOnly && state.signaled {
            debug!("Goal {} re-crossed its target; already celebrated", goal_id);
            return None;
        }

        state.signaled = true;
        Some(GoalReached {
            goal_id: goal_id.to_string(),
            balance: progress.balance,
        })
    }

    /// Drops the state of a goal, e.g. after it was deleted.
    pub fn forget(&mut self, goal_id: &str) {
        self.states.remove(goal_id);
    }
}
