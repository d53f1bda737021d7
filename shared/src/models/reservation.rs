//! Reservation request / acknowledgment payloads

use serde::{Deserialize, Serialize};

use crate::types::{DateKey, Slot, SlotSpan, TableId};

/// 联系方式（格式校验由外部表单负责，这里只透传）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub address: String,
}

/// Reservation request sent to the store's `bookings` collection.
///
/// Constructed only from a valid, available selection; the wire shape matches
/// `BookingRecord` plus contact details and chosen starters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub date: DateKey,
    pub hour: Slot,
    pub table: TableId,
    pub duration: SlotSpan,
    pub people: i32,
    pub phone: String,
    pub address: String,
    /// 选中的前菜 / 加购项（保持选择顺序）
    pub starters: Vec<String>,
}

/// Store acknowledgment of a created booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationAck {
    pub id: i64,
}
