#![forbid(unsafe_code)]
mod common;

use common::{calendar, d, strings, t};
use salon_booking::{
    generate_slots, slots::SlotError, to_minutes, to_time_string, Availability, ClockTime,
    Closure, TimeError,
};

#[test]
fn time_arithmetic_roundtrip() {
    assert_eq!(to_minutes("00:00").unwrap(), 0);
    assert_eq!(to_minutes("09:30").unwrap(), 570);
    assert_eq!(to_minutes("23:59").unwrap(), 1439);
    assert_eq!(to_time_string(570), "09:30");
    assert_eq!(to_time_string(0), "00:00");
    assert_eq!("13:05".parse::<ClockTime>().unwrap().to_string(), "13:05");
}

#[test]
fn malformed_times_are_rejected() {
    for raw in ["", "9:30", "09:3", "24:00", "12:60", "ab:cd", "09-30", "09:30:00", " 09:30", "+9:30"] {
        assert_eq!(
            to_minutes(raw),
            Err(TimeError::InvalidTimeFormat(raw.to_string())),
            "{raw:?} should not parse"
        );
    }
    assert_eq!(ClockTime::from_minutes(1440), Err(TimeError::OutOfRange(1440)));
}

#[test]
fn monday_slots_skip_lunch_break() {
    let cal = calendar();
    let monday = d(2025, 9, 8);
    let slots = generate_slots(&cal.availability(monday), 30).unwrap();

    insta::assert_snapshot!(
        strings(&slots).join(" "),
        @"09:00 09:30 10:00 10:30 11:00 11:30 13:00 13:30 14:00 14:30 15:00 15:30 16:00 16:30 17:00 17:30"
    );
    assert_eq!(slots.len(), 16);
    assert!(!slots.contains(&t("12:00")));
    assert!(!slots.contains(&t("12:30")));
    assert!(!slots.contains(&t("18:00")));
}

#[test]
fn special_hours_replace_weekly_slots() {
    let cal = calendar();
    let slots = strings(&generate_slots(&cal.availability(d(2025, 9, 15)), 30).unwrap());

    assert_eq!(slots.first().map(String::as_str), Some("10:00"));
    assert_eq!(slots.last().map(String::as_str), Some("15:30"));
    assert_eq!(slots.len(), 12);
    assert!(!slots.contains(&"09:00".to_string()));
    assert!(!slots.contains(&"16:00".to_string()));
    // pas de pause dans l'horaire spécial
    assert!(slots.contains(&"12:00".to_string()));
}

#[test]
fn closed_days_have_no_slots() {
    let cal = calendar();
    assert!(generate_slots(&cal.availability(d(2025, 9, 14)), 30).unwrap().is_empty()); // dimanche
    assert!(generate_slots(&cal.availability(d(2025, 9, 20)), 30).unwrap().is_empty()); // spécial fermé
    assert!(generate_slots(&Availability::Closed(Closure::Unscheduled), 30)
        .unwrap()
        .is_empty());
}

#[test]
fn slots_stay_inside_open_window_for_any_granularity() {
    let cal = calendar();
    let window = *cal.availability(d(2025, 9, 9)).window().unwrap();
    for granularity in [5, 15, 20, 25, 30, 45, 60, 90, 240] {
        let slots = generate_slots(&Availability::Open(window), granularity).unwrap();
        assert!(!slots.is_empty());
        assert!(slots.windows(2).all(|w| w[0] < w[1]), "ascending order");
        for slot in &slots {
            assert!(window.open <= *slot && *slot < window.close, "{slot} outside window");
            assert!(!(t("12:00") <= *slot && *slot < t("13:00")), "{slot} inside break");
        }
    }
}

#[test]
fn zero_granularity_is_an_error() {
    let cal = calendar();
    assert_eq!(
        generate_slots(&cal.availability(d(2025, 9, 8)), 0),
        Err(SlotError::ZeroGranularity)
    );
}

#[test]
fn huge_granularity_yields_only_the_opening_slot() {
    let cal = calendar();
    let monday = cal.availability(d(2025, 9, 8));
    assert_eq!(strings(&generate_slots(&monday, u32::MAX).unwrap()), ["09:00"]);
    assert_eq!(strings(&generate_slots(&monday, 24 * 60).unwrap()), ["09:00"]);
}
