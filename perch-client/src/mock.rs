//! 内存 Mock 存储
//!
//! Engine 测试用的 [`StoreClient`] 实现：记录保存在内存中，
//! `create_booking` 会把新行写回 bookings，使随后的全量重建能看到它。

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;

use shared::models::{
    BookingRecord, DiningTable, EventRecord, RecurringEventRecord, ReservationAck,
    ReservationRequest,
};
use shared::types::{DateKey, DateRange};

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct MockData {
    tables: Vec<DiningTable>,
    bookings: Vec<BookingRecord>,
    events: Vec<EventRecord>,
    recurring: Vec<RecurringEventRecord>,
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MockStore {
    data: Mutex<MockData>,
    next_id: AtomicI64,
    create_calls: AtomicUsize,
    /// 置位后 create_booking 返回 503
    fail_submissions: AtomicBool,
    /// 置位后 fetch_bookings 返回 503（模拟写入成功后的刷新故障）
    fail_fetches: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn with_tables(self, tables: Vec<DiningTable>) -> Self {
        self.data.lock().unwrap().tables = tables;
        self
    }

    pub fn with_bookings(self, bookings: Vec<BookingRecord>) -> Self {
        self.data.lock().unwrap().bookings = bookings;
        self
    }

    pub fn with_events(self, events: Vec<EventRecord>) -> Self {
        self.data.lock().unwrap().events = events;
        self
    }

    pub fn with_recurring(self, recurring: Vec<RecurringEventRecord>) -> Self {
        self.data.lock().unwrap().recurring = recurring;
        self
    }

    /// 模拟存储拒绝写入
    pub fn fail_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }

    /// 模拟存储查询不可用
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// `create_booking` 被调用的次数（含失败的调用）
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// 当前 bookings 快照
    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.data.lock().unwrap().bookings.clone()
    }

    /// 模拟其他客户端的并发写入
    pub fn push_booking(&self, booking: BookingRecord) {
        self.data.lock().unwrap().bookings.push(booking);
    }
}

#[async_trait]
impl StoreClient for MockStore {
    async fn fetch_tables(&self) -> StoreResult<Vec<DiningTable>> {
        Ok(self.data.lock().unwrap().tables.clone())
    }

    async fn fetch_bookings(&self, range: &DateRange) -> StoreResult<Vec<BookingRecord>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                path: "bookings".to_string(),
            });
        }
        let data = self.data.lock().unwrap();
        Ok(data
            .bookings
            .iter()
            .filter(|b| range.contains(b.date))
            .cloned()
            .collect())
    }

    async fn fetch_events(&self, range: &DateRange) -> StoreResult<Vec<EventRecord>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .events
            .iter()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect())
    }

    async fn fetch_recurring_events(
        &self,
        until: DateKey,
    ) -> StoreResult<Vec<RecurringEventRecord>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recurring
            .iter()
            .filter(|r| r.anchor <= until)
            .cloned()
            .collect())
    }

    async fn create_booking(&self, request: &ReservationRequest) -> StoreResult<ReservationAck> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                path: "bookings".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut data = self.data.lock().unwrap();
        data.bookings.push(BookingRecord {
            id: Some(id),
            date: request.date,
            start: request.hour,
            duration: request.duration,
            table: request.table,
            people: Some(request.people),
        });
        Ok(ReservationAck { id })
    }
}
