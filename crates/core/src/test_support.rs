//! In-memory repositories shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalRepositoryTrait, GoalService, NewGoal};
use crate::ledger::{
    compute_balance, LedgerService, NewTransaction, Transaction, TransactionRepositoryTrait,
};
use crate::reset::ResetService;

#[derive(Default)]
struct StoreState {
    goals: Vec<Goal>,
    transactions: Vec<Transaction>,
    seq: u32,
    frozen_at: Option<DateTime<Utc>>,
}

impl StoreState {
    fn next(&mut self) -> (u32, DateTime<Utc>) {
        self.seq += 1;
        let created_at = self.frozen_at.unwrap_or_else(|| {
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.seq as i64)
        });
        (self.seq, created_at)
    }

    fn refresh_cached_balance(&mut self, goal_id: &str) -> Result<()> {
        let balance =
            compute_balance(self.transactions.iter().filter(|t| t.belongs_to(goal_id)))?;
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.cached_balance = balance;
        }
        Ok(())
    }
}

/// One store backing both repositories, so goal deletion can cascade.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following record share `at` as its creation time.
    pub fn freeze_clock(&self, at: DateTime<Utc>) {
        self.state.lock().unwrap().frozen_at = Some(at);
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        // Reverse insertion order so callers cannot rely on it.
        let mut goals = self.state.lock().unwrap().goals.clone();
        goals.reverse();
        Ok(goals)
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Goal> {
        self.state
            .lock()
            .unwrap()
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(goal_id.to_string()))
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        let (seq, created_at) = state.next();
        let goal = Goal {
            id: format!("goal-{:04}", seq),
            title: new_goal.title,
            target_amount: new_goal.target_amount,
            target_date: new_goal.target_date,
            description: new_goal.description,
            image_url: new_goal.image_url,
            is_active: new_goal.is_active,
            created_at,
            cached_balance: Decimal::ZERO,
        };
        state.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| Error::NotFound(goal.id.clone()))?;
        *stored = Goal {
            id: stored.id.clone(),
            created_at: stored.created_at,
            cached_balance: stored.cached_balance,
            ..goal
        };
        Ok(stored.clone())
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.goals.len();
        state.goals.retain(|g| g.id != goal_id);
        let deleted = before - state.goals.len();
        if deleted > 0 {
            state.transactions.retain(|t| !t.belongs_to(goal_id));
        }
        Ok(deleted)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let (seq, created_at) = state.next();
        let transaction = Transaction {
            id: format!("tx-{:04}", seq),
            goal_id: new_transaction.goal_id,
            amount: new_transaction.amount,
            kind: new_transaction.kind,
            description: new_transaction.description,
            created_at,
        };
        state.transactions.push(transaction.clone());
        if let Some(goal_id) = &transaction.goal_id {
            if let Err(e) = state.refresh_cached_balance(goal_id) {
                state.transactions.pop();
                return Err(e);
            }
        }
        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| Error::NotFound(transaction.id.clone()))?;
        let previous = stored.clone();
        stored.amount = transaction.amount;
        stored.description = transaction.description;
        let updated = stored.clone();
        if let Some(goal_id) = &updated.goal_id {
            if let Err(e) = state.refresh_cached_balance(goal_id) {
                if let Some(t) = state.transactions.iter_mut().find(|t| t.id == previous.id) {
                    *t = previous;
                }
                return Err(e);
            }
        }
        Ok(updated)
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let Some(pos) = state.transactions.iter().position(|t| t.id == transaction_id) else {
            return Ok(0);
        };
        let removed = state.transactions.remove(pos);
        if let Some(goal_id) = removed.goal_id.clone() {
            if let Err(e) = state.refresh_cached_balance(&goal_id) {
                state.transactions.insert(pos, removed);
                return Err(e);
            }
        }
        Ok(1)
    }

    async fn delete_all_for_goal(&self, goal_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.transactions.len();
        state.transactions.retain(|t| !t.belongs_to(goal_id));
        let removed = before - state.transactions.len();
        state.refresh_cached_balance(goal_id)?;
        Ok(removed)
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        self.state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(transaction_id.to_string()))
    }

    fn find_by_goal(&self, goal_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|t| t.belongs_to(goal_id))
            .cloned()
            .collect())
    }

    fn list(&self, offset: i64, limit: i64) -> Result<Vec<Transaction>> {
        let mut transactions = self.state.lock().unwrap().transactions.clone();
        transactions.reverse();
        Ok(transactions
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

/// The three services wired over one in-memory store.
pub struct Fixture {
    pub store: InMemoryStore,
    pub ledger: Arc<LedgerService>,
    pub goals: GoalService,
    pub reset: ResetService,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let goal_repo: Arc<dyn GoalRepositoryTrait> = Arc::new(store.clone());
        let tx_repo: Arc<dyn TransactionRepositoryTrait> = Arc::new(store.clone());
        let ledger = Arc::new(LedgerService::new(tx_repo, goal_repo.clone()));
        let goals = GoalService::new(goal_repo.clone(), ledger.clone());
        let reset = ResetService::new(goal_repo, ledger.clone());
        Self {
            store,
            ledger,
            goals,
            reset,
        }
    }
}

pub fn new_goal(title: &str, target_amount: Decimal) -> NewGoal {
    NewGoal {
        title: title.to_string(),
        target_amount,
        target_date: NaiveDate::from_ymd_opt(2027, 6, 1).unwrap(),
        description: None,
        image_url: None,
        is_active: true,
    }
}

pub fn goal_at(id: &str, created_at: DateTime<Utc>, is_active: bool) -> Goal {
    Goal {
        id: id.to_string(),
        title: format!("Goal {}", id),
        target_amount: Decimal::from(1000),
        target_date: NaiveDate::from_ymd_opt(2027, 6, 1).unwrap(),
        description: None,
        image_url: None,
        is_active,
        created_at,
        cached_balance: Decimal::ZERO,
    }
}
