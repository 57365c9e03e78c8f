//! Ledger module - transaction models, balance derivation, services, and traits.

mod ledger_model;
mod ledger_service;
mod ledger_traits;



pub use ledger_model::{
    compute_balance, sort_newest_first, NewTransaction, Transaction, TransactionKind,
    TransactionUpdate,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerServiceTrait, TransactionRepositoryTrait};
