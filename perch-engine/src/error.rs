//! Engine error types

use perch_client::StoreError;
use shared::error::ParseError;
use shared::types::{DateKey, DateRange};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// 日期 / 时段解析失败
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 查询落在已加载索引范围之外（调用方 bug，不能默认当作空闲）
    #[error("日期 {date} 超出已加载范围 {range}")]
    OutOfRange { date: DateKey, range: DateRange },

    /// 当前选择不可用（被占用 / 未选桌台 / 午夜时段）
    #[error("所选桌台不可用")]
    NotAvailable,

    /// 存储拒绝或不可达，原样向调用方传播
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
}

/// 引擎操作的 Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
