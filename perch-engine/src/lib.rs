//! Perch Engine - 餐厅预订可用性与选择引擎
//!
//! # 架构概述
//!
//! 每个会话持有一个引擎实例，引擎独占其全部可变状态（无共享索引）：
//!
//! - **占用索引** (`occupancy`): 由预订、单次活动、周期活动构建的
//!   派生缓存，按日期 → 时段 → 桌台集合组织，整体重建、从不原地修补
//! - **选择状态机** (`selection`): 追踪当前 (日期, 时段, 桌台) 选择，
//!   日期/时段变更时无条件清除桌台绑定
//! - **编排** (`engine`): 加载窗口数据、处理外部变更通知、提交预订并
//!   在写入成功后全量重建索引
//!
//! # 模块结构
//!
//! ```text
//! perch-engine/src/
//! ├── config.rs      # 营业窗口 / 时长默认值配置
//! ├── error.rs       # 引擎错误
//! ├── occupancy.rs   # 占用索引构建与可用性查询
//! ├── selection.rs   # 选择状态机
//! └── engine.rs      # 引擎编排与预订提交
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod occupancy;
pub mod selection;

#[cfg(test)]
mod tests;

// Re-export 公共类型
pub use config::EngineConfig;
pub use engine::BookingEngine;
pub use error::{EngineError, EngineResult};
pub use occupancy::OccupancyIndex;
pub use selection::{ClickOutcome, Selection, SelectionMachine, TableStatus};
