//! 选择状态机
//!
//! 状态：`Empty`（未选桌台）↔ `TableSelected`（日期、时段、桌台齐备）。
//! 硬性约定：桌台绑定只相对当前 (日期, 时段) 有意义，日期或时段一旦
//! 变更，桌台选择无条件清除，杜绝过期绑定。

use serde::Serialize;
use shared::models::DiningTable;
use shared::types::{DateKey, Slot, SlotSpan, TableId};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::occupancy::OccupancyIndex;

/// 用户当前的 (日期, 时段, 桌台) 选择
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub date: Option<DateKey>,
    pub hour: Option<Slot>,
    pub table: Option<TableId>,
}

impl Selection {
    /// 三项齐备时返回 (date, hour, table)
    pub fn bound(&self) -> Option<(DateKey, Slot, TableId)> {
        Some((self.date?, self.hour?, self.table?))
    }
}

/// 桌台在当前 (日期, 时段) 下的显示状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStatus {
    pub table: TableId,
    pub occupied: bool,
    pub selected: bool,
}

/// 桌台点击的处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClickOutcome {
    /// 桌台被占用或缺少日期/时段，点击被拒绝，状态不变
    Rejected,
    /// 再次点击已选桌台，取消选择
    Deselected,
    /// 选中桌台；`max_duration` 为时长选择器的新上限
    Selected { max_duration: SlotSpan },
}

/// Selection state machine: owns the current selection plus the duration
/// choice and its upper bound.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    selection: Selection,
    /// 当前选择的预订时长
    duration: SlotSpan,
    /// 时长选择器上限（随桌台选择重算）
    bound: SlotSpan,
    min_duration: SlotSpan,
    close: Slot,
}

impl SelectionMachine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            selection: Selection::default(),
            duration: config.min_duration,
            bound: config.min_duration,
            min_duration: config.min_duration,
            close: config.close,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn duration(&self) -> SlotSpan {
        self.duration
    }

    pub fn duration_bound(&self) -> SlotSpan {
        self.bound
    }

    /// 外部时长选择器写入新值；夹取到 [最小时长, 上限]
    pub fn set_duration(&mut self, duration: SlotSpan) {
        self.duration = clamp_duration(duration, self.min_duration, self.bound);
    }

    /// 日期或时段变更：无条件清除桌台绑定，重算全部桌台的显示状态。
    ///
    /// 午夜时段强制所有桌台按占用显示（收市边界），提交可用性仍由
    /// [`OccupancyIndex::is_available_for_selection`] 把关。
    pub fn on_date_or_hour_changed(
        &mut self,
        date: DateKey,
        hour: Slot,
        index: &OccupancyIndex,
        tables: &[DiningTable],
    ) -> EngineResult<Vec<TableStatus>> {
        if self.selection.table.is_some() {
            tracing::debug!("Date/hour changed, clearing table selection");
        }
        self.selection.table = None;
        self.selection.date = Some(date);
        self.selection.hour = Some(hour);
        // 没有桌台绑定，上限与时长回到默认
        self.bound = self.min_duration;
        self.duration = self.min_duration;

        let mut statuses = Vec::with_capacity(tables.len());
        for table in tables {
            let occupied =
                hour == Slot::MIDNIGHT || index.is_occupied(date, hour, table.id)?;
            statuses.push(TableStatus {
                table: table.id,
                occupied,
                selected: false,
            });
        }
        Ok(statuses)
    }

    /// 清除桌台绑定，时长与上限回到默认（日期/时段保留）
    pub fn clear_table(&mut self) {
        self.selection.table = None;
        self.bound = self.min_duration;
        self.duration = self.min_duration;
    }

    /// 桌台点击：占用则拒绝，已选则取消，否则选中并重算时长上限。
    pub fn on_table_clicked(
        &mut self,
        table: TableId,
        index: &OccupancyIndex,
    ) -> EngineResult<ClickOutcome> {
        let (Some(date), Some(hour)) = (self.selection.date, self.selection.hour) else {
            return Ok(ClickOutcome::Rejected);
        };

        if !index.is_available_for_selection(date, hour, table)? {
            tracing::debug!(table, "Click rejected, table occupied");
            return Ok(ClickOutcome::Rejected);
        }

        if self.selection.table == Some(table) {
            self.clear_table();
            tracing::debug!(table, "Table deselected");
            return Ok(ClickOutcome::Deselected);
        }

        self.selection.table = Some(table);
        let bound = index.max_contiguous_free(date, hour, table, self.close, self.min_duration)?;
        self.bound = bound;
        self.duration = clamp_duration(self.duration, self.min_duration, bound);
        tracing::debug!(table, bound = %bound, "Table selected");
        Ok(ClickOutcome::Selected { max_duration: bound })
    }
}

/// 夹取时长：上限不高于最小时长时回落到最小时长（最小粒度默认值）
fn clamp_duration(duration: SlotSpan, min: SlotSpan, bound: SlotSpan) -> SlotSpan {
    if bound <= min {
        min
    } else if duration > bound {
        bound
    } else if duration < min {
        min
    } else {
        duration
    }
}
