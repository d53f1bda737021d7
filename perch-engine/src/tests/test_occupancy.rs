use super::*;
use crate::error::EngineError;
use crate::occupancy::OccupancyIndex;

#[test]
fn test_booking_covers_its_slot_run() {
    let r = range("2024-01-01", "2024-01-14");
    let index = OccupancyIndex::build(&[booking("2024-01-05", 18.0, 1.5, 2)], &[], &[], r);

    let d = date("2024-01-05");
    for hour in [18.0, 18.5, 19.0] {
        assert!(index.is_occupied(d, slot(hour), 2).unwrap(), "slot {hour}");
    }
    // Half-open run: slot after the covered range is free
    assert!(!index.is_occupied(d, slot(19.5), 2).unwrap());
    assert!(!index.is_occupied(d, slot(17.5), 2).unwrap());
    // Other tables and days untouched
    assert!(!index.is_occupied(d, slot(18.0), 3).unwrap());
    assert!(!index.is_occupied(date("2024-01-06"), slot(18.0), 2).unwrap());
}

#[test]
fn test_event_and_booking_expand_identically() {
    let r = range("2024-01-01", "2024-01-14");
    let from_booking = OccupancyIndex::build(&[booking("2024-01-03", 12.0, 2.0, 1)], &[], &[], r);
    let from_event = OccupancyIndex::build(&[], &[event("2024-01-03", 12.0, 2.0, 1)], &[], r);

    let d = date("2024-01-03");
    for step in 0..4 {
        let s = slot(12.0).offset(step).unwrap();
        assert_eq!(
            from_booking.is_occupied(d, s, 1).unwrap(),
            from_event.is_occupied(d, s, 1).unwrap(),
        );
    }
}

#[test]
fn test_build_order_independent() {
    let r = range("2024-01-01", "2024-01-07");
    let bookings = vec![
        booking("2024-01-02", 13.0, 1.0, 1),
        booking("2024-01-02", 13.0, 1.0, 2),
        booking("2024-01-03", 20.0, 2.0, 1),
    ];
    let events = vec![
        event("2024-01-02", 13.0, 1.0, 1), // overlaps a booking on purpose
        event("2024-01-04", 18.0, 1.5, 3),
    ];
    let recurring = vec![
        recurring("2024-01-03", 19.0, 1.0, 2),
        recurring("2024-01-05", 13.0, 1.5, 1),
    ];

    let reference = OccupancyIndex::build(&bookings, &events, &recurring, r);

    let mut bookings_rev = bookings.clone();
    bookings_rev.reverse();
    let mut events_rev = events.clone();
    events_rev.reverse();
    let mut recurring_rev = recurring.clone();
    recurring_rev.reverse();

    // 每个来源内部的顺序都不影响结果
    for (b, e, rec) in [
        (&bookings_rev, &events, &recurring),
        (&bookings, &events_rev, &recurring),
        (&bookings, &events, &recurring_rev),
        (&bookings_rev, &events_rev, &recurring_rev),
    ] {
        let permuted = OccupancyIndex::build(b, e, rec, r);
        assert_eq!(reference, permuted);
    }
}

#[test]
fn test_recurring_daily_expansion() {
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[], &[recurring("2024-01-05", 18.0, 1.0, 3)], r);

    for d in ["2024-01-05", "2024-01-06", "2024-01-07"] {
        assert!(index.is_occupied(date(d), slot(18.0), 3).unwrap(), "{d} 18.0");
        assert!(index.is_occupied(date(d), slot(18.5), 3).unwrap(), "{d} 18.5");
        assert!(!index.is_occupied(date(d), slot(19.0), 3).unwrap());
    }
    for d in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"] {
        assert!(!index.is_occupied(date(d), slot(18.0), 3).unwrap(), "{d}");
    }
}

#[test]
fn test_recurring_anchor_before_window_clipped_to_start() {
    let r = range("2024-01-01", "2024-01-03");
    let index = OccupancyIndex::build(&[], &[], &[recurring("2023-12-25", 12.0, 0.5, 7)], r);

    for d in r.days() {
        assert!(index.is_occupied(d, slot(12.0), 7).unwrap(), "{d}");
    }
}

#[test]
fn test_duplicate_records_are_set_members() {
    let r = range("2024-01-01", "2024-01-07");
    let one = OccupancyIndex::build(&[booking("2024-01-02", 14.0, 1.0, 1)], &[], &[], r);
    let twice = OccupancyIndex::build(
        &[
            booking("2024-01-02", 14.0, 1.0, 1),
            booking("2024-01-02", 14.0, 1.0, 1),
        ],
        &[],
        &[],
        r,
    );
    assert_eq!(one, twice);
}

#[test]
fn test_run_crossing_day_end_is_clipped() {
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[event("2024-01-02", 23.0, 2.0, 4)], &[], r);

    assert!(index.is_occupied(date("2024-01-02"), slot(23.0), 4).unwrap());
    assert!(index.is_occupied(date("2024-01-02"), slot(23.5), 4).unwrap());
    // 不跨日
    assert!(!index.is_occupied(date("2024-01-03"), slot(0.0), 4).unwrap());
}

#[test]
fn test_out_of_range_query_errors() {
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[], &[], r);

    let err = index
        .is_occupied(date("2024-02-01"), slot(18.0), 1)
        .unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));

    let err = index
        .is_available_for_selection(date("2023-12-31"), slot(0.0), 1)
        .unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));
}

#[test]
fn test_midnight_never_available() {
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[], &[], r);

    for table in 1..=8 {
        for d in r.days() {
            assert!(!index.is_available_for_selection(d, Slot::MIDNIGHT, table).unwrap());
        }
    }
}

#[test]
fn test_max_contiguous_free_duration_bound() {
    // Free 14.0..16.0, occupied at 16.0: four half-hour increments remain
    let r = range("2024-01-01", "2024-01-07");
    let d = "2024-01-03";
    let index = OccupancyIndex::build(&[booking(d, 16.0, 1.0, 5)], &[], &[], r);

    let bound = index
        .max_contiguous_free(date(d), slot(14.0), 5, slot(23.5), SlotSpan::ONE_HOUR)
        .unwrap();
    assert_eq!(bound.steps(), 4);
    assert_eq!(bound.as_hours(), 2.0);
}

#[test]
fn test_bound_zero_when_first_slot_occupied() {
    let r = range("2024-01-01", "2024-01-07");
    let d = "2024-01-03";
    let index = OccupancyIndex::build(&[booking(d, 14.0, 1.0, 5)], &[], &[], r);

    let bound = index
        .max_contiguous_free(date(d), slot(14.0), 5, slot(23.5), SlotSpan::ONE_HOUR)
        .unwrap();
    assert!(bound.is_zero());
}

#[test]
fn test_last_half_hour_yields_minimum_duration() {
    // Exactly one free half hour before closing: bound falls back to the
    // minimum so a last-slot booking is still possible
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[], &[], r);

    let bound = index
        .max_contiguous_free(date("2024-01-03"), slot(23.0), 5, slot(23.5), SlotSpan::ONE_HOUR)
        .unwrap();
    assert_eq!(bound, SlotSpan::ONE_HOUR);
}

#[test]
fn test_bound_stops_at_closing() {
    let r = range("2024-01-01", "2024-01-07");
    let index = OccupancyIndex::build(&[], &[], &[], r);

    // 22.0 起到 23.5 收市共 3 个空闲半小时
    let bound = index
        .max_contiguous_free(date("2024-01-03"), slot(22.0), 5, slot(23.5), SlotSpan::ONE_HOUR)
        .unwrap();
    assert_eq!(bound.steps(), 3);
}
