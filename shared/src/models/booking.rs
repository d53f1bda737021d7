//! Booking and event source records
//!
//! The three occupancy sources of the store: confirmed single-date bookings,
//! one-off events and recurring events. Slot/duration fields travel as
//! fractional-hour numbers and are grid-validated on deserialization, so a
//! malformed store row is rejected at the boundary before it can reach the
//! occupancy index builder.

use serde::{Deserialize, Serialize};

use crate::types::{DateKey, Slot, SlotSpan, TableId};

/// 已确认的单日预订记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Store-assigned ID (absent on rows we are about to create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: DateKey,
    /// Start slot, fractional hours on the wire
    #[serde(rename = "hour")]
    pub start: Slot,
    /// Booked length, multiple of 0.5 hours
    pub duration: SlotSpan,
    pub table: TableId,
    /// Party size (informational, not capacity-enforced here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<i32>,
}

/// 单次活动记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: DateKey,
    #[serde(rename = "hour")]
    pub start: Slot,
    pub duration: SlotSpan,
    pub table: TableId,
}

/// 周期活动记录
///
/// Occupies `table` on every date from `max(anchor, window start)` through
/// the window end, one calendar day at a time. The store keeps these in the
/// same `events` collection, distinguished by `repeat: "daily"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringEventRecord {
    /// First date the event occurs on
    #[serde(rename = "date")]
    pub anchor: DateKey,
    #[serde(rename = "hour")]
    pub start: Slot,
    pub duration: SlotSpan,
    pub table: TableId,
}
