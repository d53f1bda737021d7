//! Perch Store Client - 预订数据存储客户端
//!
//! 封装对预订存储（REST/JSON）的访问：桌台列表、预订、单次活动、
//! 周期活动的查询，以及新预订的创建。引擎只依赖 [`StoreClient`]
//! trait；网络实现为 [`NetworkStore`]，测试用内存实现为
//! `MockStore`（`mock` feature）。

pub mod client;
pub mod error;

#[cfg(feature = "mock")]
pub mod mock;

// Re-exports
pub use client::{NetworkStore, StoreClient};
pub use error::{StoreError, StoreResult};

#[cfg(feature = "mock")]
pub use mock::MockStore;
