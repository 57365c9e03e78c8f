//! SQLite storage implementation for Piggybank.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `piggybank-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, transactions and settings
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! All writes are funnelled through a single writer actor, so each repository
//! write, including the cached goal balance it refreshes, commits as one
//! immediate transaction.

pub mod config;
pub mod context;
pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod settings;
pub mod transactions;

pub use config::StorageConfig;
pub use context::{build_context, ServiceContext};

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from piggybank-core for convenience
pub use piggybank_core::errors::{DatabaseError, Error, Result};
