//! Shared types for the Perch reservation framework
//!
//! Common types used across the engine and store-client crates:
//! calendar/slot value types, record models and parse errors.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ParseError;
pub use types::{DateKey, DateRange, Slot, SlotSpan, TableId};
