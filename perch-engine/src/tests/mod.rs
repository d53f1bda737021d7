use shared::models::{BookingRecord, DiningTable, EventRecord, RecurringEventRecord};
use shared::types::{DateKey, DateRange, Slot, SlotSpan};

use crate::config::EngineConfig;

mod test_occupancy;

fn date(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn slot(hours: f64) -> Slot {
    Slot::from_hours(hours).unwrap()
}

fn span(hours: f64) -> SlotSpan {
    SlotSpan::from_hours(hours).unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end))
}

fn booking(d: &str, hour: f64, duration: f64, table: i64) -> BookingRecord {
    BookingRecord {
        id: None,
        date: date(d),
        start: slot(hour),
        duration: span(duration),
        table,
        people: None,
    }
}

fn event(d: &str, hour: f64, duration: f64, table: i64) -> EventRecord {
    EventRecord {
        date: date(d),
        start: slot(hour),
        duration: span(duration),
        table,
    }
}

fn recurring(anchor: &str, hour: f64, duration: f64, table: i64) -> RecurringEventRecord {
    RecurringEventRecord {
        anchor: date(anchor),
        start: slot(hour),
        duration: span(duration),
        table,
    }
}

fn dining_tables(count: i64) -> Vec<DiningTable> {
    (1..=count)
        .map(|id| DiningTable {
            id,
            name: format!("Table {}", id),
            capacity: Some(4),
        })
        .collect()
}

fn test_config() -> EngineConfig {
    EngineConfig::default()
}
