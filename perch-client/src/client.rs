//! 统一存储客户端实现
//!
//! REST 资源路径与查询参数沿用存储端的过滤约定：日期范围用
//! `date_gte` / `date_lte`，单次与周期活动共用 `events` 集合并以
//! `repeat=daily` 区分。

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use shared::models::{
    BookingRecord, DiningTable, EventRecord, RecurringEventRecord, ReservationAck,
    ReservationRequest,
};
use shared::types::{DateKey, DateRange};

use crate::error::{StoreError, StoreResult};

// ============================================================================
// StoreClient Trait
// ============================================================================

/// 统一存储客户端接口
///
/// The engine is generic over this trait; wire encoding is entirely the
/// implementation's concern.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// 获取桌台列表
    async fn fetch_tables(&self) -> StoreResult<Vec<DiningTable>>;

    /// 获取日期范围内的预订
    async fn fetch_bookings(&self, range: &DateRange) -> StoreResult<Vec<BookingRecord>>;

    /// 获取日期范围内的单次活动
    async fn fetch_events(&self, range: &DateRange) -> StoreResult<Vec<EventRecord>>;

    /// 获取 anchor 不晚于 `until` 的周期活动
    async fn fetch_recurring_events(
        &self,
        until: DateKey,
    ) -> StoreResult<Vec<RecurringEventRecord>>;

    /// 创建新预订
    async fn create_booking(&self, request: &ReservationRequest) -> StoreResult<ReservationAck>;
}

// 允许共享句柄作为客户端使用（测试与多持有方场景）
#[async_trait]
impl<T: StoreClient + ?Sized> StoreClient for std::sync::Arc<T> {
    async fn fetch_tables(&self) -> StoreResult<Vec<DiningTable>> {
        (**self).fetch_tables().await
    }

    async fn fetch_bookings(&self, range: &DateRange) -> StoreResult<Vec<BookingRecord>> {
        (**self).fetch_bookings(range).await
    }

    async fn fetch_events(&self, range: &DateRange) -> StoreResult<Vec<EventRecord>> {
        (**self).fetch_events(range).await
    }

    async fn fetch_recurring_events(
        &self,
        until: DateKey,
    ) -> StoreResult<Vec<RecurringEventRecord>> {
        (**self).fetch_recurring_events(until).await
    }

    async fn create_booking(&self, request: &ReservationRequest) -> StoreResult<ReservationAck> {
        (**self).create_booking(request).await
    }
}

// ============================================================================
// NetworkStore - HTTP 网络客户端
// ============================================================================

const TABLES_PATH: &str = "tables";
const BOOKINGS_PATH: &str = "bookings";
const EVENTS_PATH: &str = "events";

/// 网络客户端 (HTTP/JSON)
#[derive(Debug, Clone)]
pub struct NetworkStore {
    client: reqwest::Client,
    base_url: String,
}

impl NetworkStore {
    /// 创建新的网络客户端
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request and parse the JSON body.
    ///
    /// Rows are parsed from the response text (not `Response::json`) so a
    /// malformed record surfaces as [`StoreError::InvalidRecord`] rather than
    /// a transport error.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> StoreResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.text().await?;
        parse_rows(path, &body)
    }

    /// Make a POST request with a JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> StoreResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let text = response.text().await?;
        parse_rows(path, &text)
    }
}

#[async_trait]
impl StoreClient for NetworkStore {
    async fn fetch_tables(&self) -> StoreResult<Vec<DiningTable>> {
        self.get(TABLES_PATH, &[]).await
    }

    async fn fetch_bookings(&self, range: &DateRange) -> StoreResult<Vec<BookingRecord>> {
        self.get(BOOKINGS_PATH, &range_query(range)).await
    }

    async fn fetch_events(&self, range: &DateRange) -> StoreResult<Vec<EventRecord>> {
        let mut query = range_query(range);
        query.push(("repeat_ne", "daily".to_string()));
        self.get(EVENTS_PATH, &query).await
    }

    async fn fetch_recurring_events(
        &self,
        until: DateKey,
    ) -> StoreResult<Vec<RecurringEventRecord>> {
        let query = [
            ("repeat", "daily".to_string()),
            ("date_lte", until.to_string()),
        ];
        self.get(EVENTS_PATH, &query).await
    }

    async fn create_booking(&self, request: &ReservationRequest) -> StoreResult<ReservationAck> {
        tracing::debug!(
            table = request.table,
            date = %request.date,
            hour = %request.hour,
            "Creating booking"
        );
        self.post(BOOKINGS_PATH, request).await
    }
}

/// 日期范围过滤参数
fn range_query(range: &DateRange) -> Vec<(&'static str, String)> {
    vec![
        ("date_gte", range.start.to_string()),
        ("date_lte", range.end.to_string()),
    ]
}

/// Parse a JSON body into typed rows, mapping failures to `InvalidRecord`
fn parse_rows<T: DeserializeOwned>(path: &str, body: &str) -> StoreResult<T> {
    serde_json::from_str(body).map_err(|e| StoreError::InvalidRecord {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::new(
            DateKey::parse("2024-01-01").unwrap(),
            DateKey::parse("2024-01-14").unwrap(),
        )
    }

    #[test]
    fn test_range_query_shape() {
        let query = range_query(&range());
        assert_eq!(
            query,
            vec![
                ("date_gte", "2024-01-01".to_string()),
                ("date_lte", "2024-01-14".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rows_valid() {
        let body = r#"[{"date":"2024-01-05","hour":18.0,"duration":1.0,"table":3,"repeat":"daily"}]"#;
        let rows: Vec<RecurringEventRecord> = parse_rows(EVENTS_PATH, body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].table, 3);
    }

    #[test]
    fn test_parse_rows_rejects_off_grid() {
        let body = r#"[{"date":"2024-01-05","hour":18.25,"duration":1.0,"table":3}]"#;
        let err = parse_rows::<Vec<EventRecord>>(EVENTS_PATH, body).unwrap_err();
        match err {
            StoreError::InvalidRecord { path, .. } => assert_eq!(path, EVENTS_PATH),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rows_rejects_missing_field() {
        let body = r#"[{"date":"2024-01-05","hour":18.0,"table":3}]"#;
        assert!(parse_rows::<Vec<EventRecord>>(EVENTS_PATH, body).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = NetworkStore::new("http://localhost:3131/");
        assert_eq!(store.base_url, "http://localhost:3131");
    }
}
