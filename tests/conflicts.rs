#![forbid(unsafe_code)]
mod common;

use common::{d, t};
use salon_booking::conflicts::conflict_for;
use salon_booking::{find_conflicts, Reservation, ReservationStatus, ServiceType};

fn booking(name: &str, date: (i32, u32, u32), time: &str, stylist: &str) -> Reservation {
    Reservation::new(name, d(date.0, date.1, date.2), t(time), stylist, ServiceType::Cut)
}

#[test]
fn cancelled_reservation_is_not_counted() {
    let a = booking("Alice", (2025, 9, 10), "10:00", "Kim");
    let b = booking("Bora", (2025, 9, 10), "10:00", "Kim").with_status(ReservationStatus::Confirmed);
    let c = booking("Chul", (2025, 9, 10), "10:00", "Kim").with_status(ReservationStatus::Cancelled);

    let groups = find_conflicts(&[a.clone(), b.clone(), c]);
    assert_eq!(groups.len(), 1);
    let g = &groups[0];
    assert_eq!(g.count(), 2);
    assert_eq!((g.date, g.time, g.stylist.as_str()), (d(2025, 9, 10), t("10:00"), "Kim"));
    assert_eq!(g.reservation_ids, vec![a.id, b.id]);
    assert_eq!(g.customer_names, vec!["Alice".to_string(), "Bora".to_string()]);
}

#[test]
fn only_pending_and_confirmed_collide() {
    let mut all = Vec::new();
    for status in [
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ] {
        all.push(booking("Old", (2025, 9, 10), "11:00", "Kim").with_status(status));
    }
    all.push(booking("New", (2025, 9, 10), "11:00", "Kim"));
    assert!(find_conflicts(&all).is_empty());
}

#[test]
fn different_stylist_date_or_time_do_not_collide() {
    let rs = vec![
        booking("A", (2025, 9, 10), "10:00", "Kim"),
        booking("B", (2025, 9, 10), "10:00", "Park"),
        booking("C", (2025, 9, 11), "10:00", "Kim"),
        booking("D", (2025, 9, 10), "10:30", "Kim"),
    ];
    assert!(find_conflicts(&rs).is_empty());
}

#[test]
fn groups_are_sorted_by_date_time_stylist() {
    let rs = vec![
        booking("A", (2025, 9, 11), "09:00", "Kim"),
        booking("B", (2025, 9, 11), "09:00", "Kim"),
        booking("C", (2025, 9, 10), "15:00", "Park"),
        booking("D", (2025, 9, 10), "15:00", "Park"),
        booking("E", (2025, 9, 10), "15:00", "Kim"),
        booking("F", (2025, 9, 10), "15:00", "Kim"),
        booking("G", (2025, 9, 10), "15:00", "Kim"),
    ];
    let groups = find_conflicts(&rs);
    let keys: Vec<_> = groups
        .iter()
        .map(|g| (g.date.to_string(), g.time.to_string(), g.stylist.clone(), g.count()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2025-09-10".into(), "15:00".into(), "Kim".into(), 3),
            ("2025-09-10".into(), "15:00".into(), "Park".into(), 2),
            ("2025-09-11".into(), "09:00".into(), "Kim".into(), 2),
        ]
    );
}

#[test]
fn conflict_for_single_slot() {
    let rs = vec![
        booking("A", (2025, 9, 10), "10:00", "Kim"),
        booking("B", (2025, 9, 10), "10:00", "Kim"),
        booking("C", (2025, 9, 10), "10:30", "Kim"),
    ];
    let g = conflict_for(&rs, d(2025, 9, 10), t("10:00"), "Kim").unwrap();
    assert_eq!(g.count(), 2);
    assert!(conflict_for(&rs, d(2025, 9, 10), t("10:30"), "Kim").is_none());
}
