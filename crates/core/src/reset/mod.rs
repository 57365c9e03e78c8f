//! Reset module - erasing a goal's progress and the confirmation guarding it.

mod reset_service;

pub use reset_service::{confirm_reset, ResetOutcome, ResetService, ResetServiceTrait};
