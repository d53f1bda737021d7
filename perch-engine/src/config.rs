use shared::types::{Slot, SlotSpan};

/// 引擎配置 - 营业窗口与时长默认值
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | BOOKING_WINDOW_DAYS | 14 | 可预订窗口天数（从今天起） |
/// | BOOKING_OPEN_HOUR | 12.0 | 开始营业时段（小数小时） |
/// | BOOKING_CLOSE_HOUR | 23.5 | 首个不可预订时段（独占上界） |
/// | BOOKING_MIN_DURATION | 1.0 | 最小/默认预订时长（小时） |
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 可预订窗口天数
    pub window_days: u64,
    /// 开始营业时段
    pub open: Slot,
    /// 首个不可预订时段（可用性步进的独占上界）
    pub close: Slot,
    /// 最小预订时长，同时是时长选择器的默认值
    pub min_duration: SlotSpan,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_days: 14,
            open: Slot::from_hours(12.0).unwrap_or(Slot::MIDNIGHT),
            close: Slot::from_hours(23.5).unwrap_or(Slot::MIDNIGHT),
            min_duration: SlotSpan::ONE_HOUR,
        }
    }
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_days: std::env::var("BOOKING_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_days),
            open: std::env::var("BOOKING_OPEN_HOUR")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .and_then(|h| Slot::from_hours(h).ok())
                .unwrap_or(defaults.open),
            close: std::env::var("BOOKING_CLOSE_HOUR")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .and_then(|h| Slot::from_hours(h).ok())
                .unwrap_or(defaults.close),
            min_duration: std::env::var("BOOKING_MIN_DURATION")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .and_then(|h| SlotSpan::from_hours(h).ok())
                .unwrap_or(defaults.min_duration),
        }
    }
}
