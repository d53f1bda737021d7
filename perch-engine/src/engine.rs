//! 引擎编排 - 加载、变更通知与预订提交
//!
//! 一个会话一个引擎实例，独占索引与选择状态；唯一的异步边界是
//! 存储客户端的 fetch / create。提交成功后全量重建索引，使本次及
//! 其他客户端的并发预订一并反映出来；失败的提交不触碰任何状态。

use perch_client::StoreClient;
use shared::models::{ContactInfo, DiningTable, ReservationAck, ReservationRequest};
use shared::types::{DateKey, DateRange, Slot, SlotSpan, TableId};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::occupancy::OccupancyIndex;
use crate::selection::{ClickOutcome, Selection, SelectionMachine, TableStatus};

/// Availability & selection engine for one session
pub struct BookingEngine<C> {
    config: EngineConfig,
    client: C,
    tables: Vec<DiningTable>,
    index: OccupancyIndex,
    machine: SelectionMachine,
}

impl<C: StoreClient> BookingEngine<C> {
    /// 启动引擎：拉取桌台列表并加载从 `today` 起的可见窗口
    ///
    /// `today` 由日期选择器提供（场馆本地日历），引擎自身不读时钟。
    pub async fn start(config: EngineConfig, client: C, today: DateKey) -> EngineResult<Self> {
        let range = DateRange::new(today, today.add_days(config.window_days));
        let tables = client.fetch_tables().await?;
        let machine = SelectionMachine::new(&config);

        let mut engine = Self {
            config,
            client,
            tables,
            index: OccupancyIndex::empty(range),
            machine,
        };
        engine.load(range).await?;
        Ok(engine)
    }

    /// 全量加载：并发拉取三种来源并整体重建索引
    pub async fn load(&mut self, range: DateRange) -> EngineResult<()> {
        let (bookings, events, recurring) = tokio::try_join!(
            self.client.fetch_bookings(&range),
            self.client.fetch_events(&range),
            self.client.fetch_recurring_events(range.end),
        )?;
        self.index = OccupancyIndex::build(&bookings, &events, &recurring, range);
        Ok(())
    }

    /// 日期/时段选择器变更通知（见 [`SelectionMachine::on_date_or_hour_changed`]）
    pub fn date_or_hour_changed(
        &mut self,
        date: DateKey,
        hour: Slot,
    ) -> EngineResult<Vec<TableStatus>> {
        self.machine
            .on_date_or_hour_changed(date, hour, &self.index, &self.tables)
    }

    /// 桌台点击（见 [`SelectionMachine::on_table_clicked`]）
    pub fn table_clicked(&mut self, table: TableId) -> EngineResult<ClickOutcome> {
        self.machine.on_table_clicked(table, &self.index)
    }

    /// 外部时长选择器写入新值
    pub fn set_duration(&mut self, duration: SlotSpan) {
        self.machine.set_duration(duration);
    }

    /// 提交预订
    ///
    /// 前置条件：选择齐备且当前可用，否则以 [`EngineError::NotAvailable`]
    /// 拒绝（不自动重试、不换桌）。创建成功后清除桌台绑定并全量重建
    /// 索引；创建之前的任何失败都保持索引与选择原样。存储已确认后的
    /// 重建失败只记录告警，提交仍按成功上报 — 把它当失败会诱导调用方
    /// 对同一时段重复预订。
    pub async fn submit(
        &mut self,
        people: i32,
        contact: ContactInfo,
        starters: Vec<String>,
    ) -> EngineResult<ReservationAck> {
        let Some((date, hour, table)) = self.machine.selection().bound() else {
            tracing::warn!("Submission rejected, no table selected");
            return Err(EngineError::NotAvailable);
        };
        if !self.index.is_available_for_selection(date, hour, table)? {
            tracing::warn!(table, date = %date, hour = %hour, "Submission rejected, not available");
            return Err(EngineError::NotAvailable);
        }

        let request = ReservationRequest {
            date,
            hour,
            table,
            duration: self.machine.duration(),
            // 人数下限由外部步进控件保证，这里兜底到 1
            people: people.max(1),
            phone: contact.phone,
            address: contact.address,
            starters,
        };

        let ack = self.client.create_booking(&request).await?;
        tracing::info!(id = ack.id, table, date = %date, "Reservation created");

        // 存储已确认：原绑定指向被占用的时段，先清除以满足绑定约定
        self.machine.clear_table();

        // 写入成功后针对存储当前数据整体重建，而非本地修补。
        // 重建失败不改变提交结果：确认单已拿到，索引在下次加载前保持过期
        let range = self.index.range();
        if let Err(err) = self.load(range).await {
            tracing::warn!(
                error = %err,
                "Index refresh after booking failed, occupancy stale until next load"
            );
        }
        Ok(ack)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn index(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn selection(&self) -> &Selection {
        self.machine.selection()
    }

    pub fn duration(&self) -> SlotSpan {
        self.machine.duration()
    }

    pub fn duration_bound(&self) -> SlotSpan {
        self.machine.duration_bound()
    }
}
