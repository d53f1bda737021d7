//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::types::TableId;

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: TableId,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i32>,
}
