//! 占用索引 - 构建与可用性查询
//!
//! 三种来源（预订 / 单次活动 / 周期活动）统一展开为
//! 日期 → 时段 → 桌台集合的成员关系。索引是派生缓存：每次全量加载
//! 整体重建，写入成功后也整体重建，从不原地修补。
//!
//! 周期活动按「每日特别活动」语义展开：从
//! `max(anchor, 窗口起点)` 到窗口终点，每个日历日各占用一次。

use std::collections::{HashMap, HashSet};

use shared::models::{BookingRecord, EventRecord, RecurringEventRecord};
use shared::types::{DateKey, DateRange, Slot, SlotSpan, TableId};

use crate::error::{EngineError, EngineResult};

/// Derived occupancy cache: date -> slot -> set of occupied tables.
///
/// Complete only within `range`; queries outside it are caller bugs and fail
/// with [`EngineError::OutOfRange`] instead of silently reading "free".
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyIndex {
    range: DateRange,
    days: HashMap<DateKey, HashMap<Slot, HashSet<TableId>>>,
}

impl OccupancyIndex {
    /// 空索引（引擎启动时的初始状态）
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            days: HashMap::new(),
        }
    }

    /// 从三种来源构建索引
    ///
    /// 集合并集可交换，三个输入序列的摄入顺序不影响结果。
    pub fn build(
        bookings: &[BookingRecord],
        events: &[EventRecord],
        recurring: &[RecurringEventRecord],
        range: DateRange,
    ) -> Self {
        let mut index = Self::empty(range);

        for booking in bookings {
            index.occupy(booking.date, booking.start, booking.duration, booking.table);
        }

        for event in events {
            index.occupy(event.date, event.start, event.duration, event.table);
        }

        for event in recurring {
            // 锚点早于窗口时从窗口起点开始展开
            let from = if event.anchor >= range.start {
                event.anchor
            } else {
                range.start
            };
            let mut date = from;
            while date <= range.end {
                index.occupy(date, event.start, event.duration, event.table);
                date = date.succ();
            }
        }

        tracing::info!(
            range = %range,
            days = index.days.len(),
            "Occupancy index rebuilt"
        );
        index
    }

    /// 已加载的日期范围
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// 将 [start, start+duration) 的每个半小时标记为被 `table` 占用
    ///
    /// 日期/时段映射惰性创建；重复加入同一桌台是 no-op（集合语义）。
    /// 越过当日网格末端的部分被截断（不跨日）。
    fn occupy(&mut self, date: DateKey, start: Slot, duration: SlotSpan, table: TableId) {
        let day = self.days.entry(date).or_default();
        for step in 0..duration.steps() {
            let Some(slot) = start.offset(step) else {
                break;
            };
            day.entry(slot).or_default().insert(table);
        }
    }

    fn check_range(&self, date: DateKey) -> EngineResult<()> {
        if !self.range.contains(date) {
            return Err(EngineError::OutOfRange {
                date,
                range: self.range,
            });
        }
        Ok(())
    }

    /// 桌台在 (date, slot) 是否被占用；日期/时段无记录即空闲
    pub fn is_occupied(&self, date: DateKey, slot: Slot, table: TableId) -> EngineResult<bool> {
        self.check_range(date)?;
        Ok(self
            .days
            .get(&date)
            .and_then(|day| day.get(&slot))
            .is_some_and(|tables| tables.contains(&table)))
    }

    /// 桌台在 (date, slot) 是否可被选择提交
    ///
    /// 午夜（0 点）是固定的收市边界，与占用无关，一律不可预订。
    pub fn is_available_for_selection(
        &self,
        date: DateKey,
        slot: Slot,
        table: TableId,
    ) -> EngineResult<bool> {
        if slot == Slot::MIDNIGHT {
            self.check_range(date)?;
            return Ok(false);
        }
        Ok(!self.is_occupied(date, slot, table)?)
    }

    /// 从 `start` 起连续空闲的半小时数，以 `close` 为独占上界。
    ///
    /// 作为时长选择器的上限。首个时段即不可用时为 0；收市前只剩最后
    /// 一个半小时且空闲时，返回 `minimum` 而不是半小时，保证最后时段
    /// 仍可按最小时长预订。
    pub fn max_contiguous_free(
        &self,
        date: DateKey,
        start: Slot,
        table: TableId,
        close: Slot,
        minimum: SlotSpan,
    ) -> EngineResult<SlotSpan> {
        let mut steps: u16 = 0;
        let mut slot = start;
        while slot < close && self.is_available_for_selection(date, slot, table)? {
            steps += 1;
            match slot.next() {
                Some(next) => slot = next,
                None => break,
            }
        }

        if steps == 1 && start.next() == Some(close) {
            return Ok(minimum);
        }
        Ok(SlotSpan::from_steps(steps))
    }
}
