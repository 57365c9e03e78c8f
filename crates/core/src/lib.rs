//! Piggybank Core - Domain entities, services, and traits.
//!
//! This crate contains the goal and ledger consistency rules of the savings
//! tracker. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod ledger;
pub mod reset;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
