//! Parse errors for the shared value types
//!
//! 边界解析错误：日期 / 小时标签 / 0.5 网格校验。
//! 这些错误总是可恢复的（重新输入即可），在最靠近来源的边界处拒绝。

use thiserror::Error;

/// Parse error for dates, hour labels and half-hour grid values
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// 日期格式错误（期望 `YYYY-MM-DD`）
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    Date(String),

    /// 小时标签格式错误（期望 `HH:MM`，分钟为 00/30）
    #[error("invalid hour label (expected HH:MM on the half hour): {0}")]
    Hour(String),

    /// 数值不在 0.5 小时网格上或超出 [0, 24)
    #[error("value off the half-hour grid: {0}")]
    OffGrid(f64),
}
