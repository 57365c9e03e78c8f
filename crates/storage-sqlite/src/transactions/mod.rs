//! SQLite storage implementation for the ledger.

mod balance;
mod model;
mod repository;

pub use model::TransactionDB;
pub use repository::TransactionRepository;
