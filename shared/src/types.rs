//! 预订核心值类型 — 日历日期、半小时时段
//!
//! `DateKey` 规范形式为 `YYYY-MM-DD`（零填充，字典序即日期序）。
//! `Slot` 以半小时刻度表示一天内的时间点，线上传输为小数小时
//! (e.g. `13.5` = 13:30)；非 0.5 网格上的值在边界处直接拒绝。

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ParseError;

/// 桌台 ID 类型
pub type TableId = i64;

// ============================================================================
// DateKey
// ============================================================================

/// Calendar date in the venue's local calendar, canonical form `YYYY-MM-DD`.
///
/// Ordering of the wrapped date matches lexical ordering of the canonical
/// string (zero padding), so either can be used for range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// 解析 `YYYY-MM-DD` 字符串
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ParseError::Date(s.to_string()))
    }

    /// n 天之后的日期（跨月/跨年自动进位）
    ///
    /// 溢出日历上限时返回自身（与日历末端行为一致，实际窗口远小于上限）。
    pub fn add_days(&self, n: u64) -> Self {
        self.0
            .checked_add_days(Days::new(n))
            .map(Self)
            .unwrap_or(*self)
    }

    /// 次日
    pub fn succ(&self) -> Self {
        self.0.succ_opt().map(Self).unwrap_or(*self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ============================================================================
// DateRange
// ============================================================================

/// 闭区间日期范围 [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateKey,
    pub end: DateKey,
}

impl DateRange {
    pub fn new(start: DateKey, end: DateKey) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: DateKey) -> bool {
        self.start <= date && date <= self.end
    }

    /// 逐日迭代（含两端）
    pub fn days(&self) -> impl Iterator<Item = DateKey> + use<> {
        let end = self.end;
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let current = next?;
            if current > end {
                return None;
            }
            next = Some(current.succ());
            Some(current)
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ============================================================================
// Slot
// ============================================================================

/// Half-hour time-of-day slot, stored as a tick index in `[0, 48)`.
///
/// Tick 0 is midnight, tick 27 is 13:30. On the wire a slot travels as a
/// fractional-hour number; deserialization rejects anything off the 0.5 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

/// 每天的半小时刻度数
pub const SLOTS_PER_DAY: u16 = 48;

impl Slot {
    /// 午夜（0 点）— 全局不可预订的收市边界
    pub const MIDNIGHT: Slot = Slot(0);

    /// 从小数小时构造 (e.g. `13.5` → 13:30)
    pub fn from_hours(hours: f64) -> Result<Self, ParseError> {
        let ticks = hours * 2.0;
        if !ticks.is_finite() || ticks.fract() != 0.0 {
            return Err(ParseError::OffGrid(hours));
        }
        let ticks = ticks as i64;
        if !(0..i64::from(SLOTS_PER_DAY)).contains(&ticks) {
            return Err(ParseError::OffGrid(hours));
        }
        Ok(Self(ticks as u16))
    }

    /// 解析小时标签 (e.g. `"13:30"`)，分钟只接受 `00` / `30`
    pub fn parse_label(label: &str) -> Result<Self, ParseError> {
        let Some((hour, minute)) = label.split_once(':') else {
            return Err(ParseError::Hour(label.to_string()));
        };
        let hour: u16 = hour
            .parse()
            .map_err(|_| ParseError::Hour(label.to_string()))?;
        let half = match minute {
            "00" => 0,
            "30" => 1,
            _ => return Err(ParseError::Hour(label.to_string())),
        };
        if hour >= 24 {
            return Err(ParseError::Hour(label.to_string()));
        }
        Ok(Self(hour * 2 + half))
    }

    pub fn as_hours(&self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn index(&self) -> u16 {
        self.0
    }

    /// 向后偏移 steps 个半小时；越过当日网格末端返回 None
    pub fn offset(&self, steps: u16) -> Option<Slot> {
        let tick = self.0 + steps;
        (tick < SLOTS_PER_DAY).then_some(Slot(tick))
    }

    /// 下一个半小时刻度
    pub fn next(&self) -> Option<Slot> {
        self.offset(1)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 2, (self.0 % 2) * 30)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_hours())
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hours = f64::deserialize(deserializer)?;
        Self::from_hours(hours).map_err(de::Error::custom)
    }
}

// ============================================================================
// SlotSpan
// ============================================================================

/// Booking duration as a count of half-hour steps (wire form: fractional
/// hours, multiple of 0.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotSpan(u16);

impl SlotSpan {
    pub const ZERO: SlotSpan = SlotSpan(0);
    pub const HALF_HOUR: SlotSpan = SlotSpan(1);
    pub const ONE_HOUR: SlotSpan = SlotSpan(2);

    pub fn from_steps(steps: u16) -> Self {
        Self(steps)
    }

    /// 从小数小时构造 (e.g. `1.5` → 3 个半小时)
    pub fn from_hours(hours: f64) -> Result<Self, ParseError> {
        let steps = hours * 2.0;
        if !steps.is_finite() || steps.fract() != 0.0 || steps < 0.0 {
            return Err(ParseError::OffGrid(hours));
        }
        let steps = steps as i64;
        if steps > i64::from(SLOTS_PER_DAY) {
            return Err(ParseError::OffGrid(hours));
        }
        Ok(Self(steps as u16))
    }

    pub fn as_hours(&self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn steps(&self) -> u16 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SlotSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.as_hours())
    }
}

impl Serialize for SlotSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_hours())
    }
}

impl<'de> Deserialize<'de> for SlotSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hours = f64::deserialize(deserializer)?;
        Self::from_hours(hours).map_err(de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
