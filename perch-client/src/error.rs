//! Client error types

use thiserror::Error;

/// Store client error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (transport / timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("store rejected request: {path} -> {status}")]
    Status { status: u16, path: String },

    /// 存储返回的行无法解析为类型化记录（缺字段 / 非 0.5 网格值）
    #[error("invalid record from store: {path}: {message}")]
    InvalidRecord { path: String, message: String },
}

/// Result type for store client operations
pub type StoreResult<T> = Result<T, StoreError>;
