//! Data models
//!
//! Shared between the booking engine and the store client (via the store's
//! JSON API). All IDs are `i64`.

pub mod booking;
pub mod dining_table;
pub mod reservation;

// Re-exports
pub use booking::*;
pub use dining_table::*;
pub use reservation::*;
