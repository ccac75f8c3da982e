#![forbid(unsafe_code)]
mod common;

use common::{calendar, d, t, weekly_hours};
use salon_booking::availability::day_of_week;
use salon_booking::model::HoursError;
use salon_booking::{
    effective_hours, resolve_availability, Availability, Closure, DayHours, Holiday, HoursSource,
    SpecialHour, WeeklyHour,
};

#[test]
fn day_of_week_starts_on_sunday() {
    assert_eq!(day_of_week(d(2025, 9, 14)), 0); // dimanche
    assert_eq!(day_of_week(d(2025, 9, 15)), 1);
    assert_eq!(day_of_week(d(2025, 9, 20)), 6);
}

#[test]
fn recurring_holiday_closes_every_year() {
    let cal = calendar();
    for year in [2019, 2024, 2025, 2031] {
        let date = d(year, 10, 3);
        assert_eq!(
            cal.availability(date),
            Availability::Closed(Closure::Holiday {
                name: "National Foundation Day".into()
            }),
            "{date}"
        );
        assert!(cal.effective_hours(date).is_none());
    }
}

#[test]
fn one_off_holiday_only_matches_its_year() {
    let cal = calendar();
    assert!(matches!(
        cal.availability(d(2025, 9, 26)),
        Availability::Closed(Closure::Holiday { .. })
    ));
    // même jour un an plus tard : samedi ordinaire
    assert!(cal.availability(d(2026, 9, 26)).is_open());
}

#[test]
fn holiday_wins_over_special_hours() {
    let date = d(2025, 12, 25);
    let holidays = vec![Holiday::new(d(1999, 12, 25), "Christmas", true)];
    let specials = vec![SpecialHour::new(date, DayHours::open(t("10:00"), t("14:00")))];

    assert!(effective_hours(date, &weekly_hours(), &holidays, &specials).is_none());
    assert!(matches!(
        resolve_availability(date, &weekly_hours(), &holidays, &specials),
        Availability::Closed(Closure::Holiday { .. })
    ));
}

#[test]
fn special_hours_win_over_weekly_hours() {
    let cal = calendar();
    let open = cal.availability(d(2025, 9, 15));
    let window = open.window().unwrap();
    assert_eq!((window.open, window.close), (t("10:00"), t("16:00")));
    assert_eq!(window.break_window, None);

    // horaire spécial fermé : renvoyé tel quel par la recherche brute
    let raw = cal.effective_hours(d(2025, 9, 20)).unwrap();
    assert_eq!(raw.source, HoursSource::Special);
    assert!(raw.hours.is_closed);
    assert_eq!(cal.availability(d(2025, 9, 20)), Availability::Closed(Closure::Special));
}

#[test]
fn weekly_closure_and_missing_weekday_are_distinct() {
    let cal = calendar();
    let sunday = d(2025, 9, 14);
    assert_eq!(cal.effective_hours(sunday).unwrap().source, HoursSource::Weekly);
    assert_eq!(cal.availability(sunday), Availability::Closed(Closure::Regular));

    let only_monday = vec![WeeklyHour::new(1, DayHours::open(t("09:00"), t("18:00")))];
    let tuesday = d(2025, 9, 16);
    assert!(effective_hours(tuesday, &only_monday, &[], &[]).is_none());
    assert_eq!(
        resolve_availability(tuesday, &only_monday, &[], &[]),
        Availability::Closed(Closure::Unscheduled)
    );
}

#[test]
fn open_record_without_times_resolves_closed() {
    let broken = vec![WeeklyHour::new(1, DayHours::default())];
    assert_eq!(
        resolve_availability(d(2025, 9, 15), &broken, &[], &[]),
        Availability::Closed(Closure::Regular)
    );
}

#[test]
fn hours_invariants() {
    assert!(DayHours::closed().validate().is_ok());
    assert_eq!(DayHours::default().validate(), Err(HoursError::MissingOpenClose));
    assert!(matches!(
        DayHours::open(t("18:00"), t("09:00")).validate(),
        Err(HoursError::OpenNotBeforeClose { .. })
    ));
    assert!(matches!(
        DayHours::open(t("09:00"), t("18:00"))
            .with_break(t("13:00"), t("12:00"))
            .validate(),
        Err(HoursError::BreakNotOrdered { .. })
    ));
    assert!(matches!(
        DayHours::open(t("09:00"), t("18:00"))
            .with_break(t("08:00"), t("10:00"))
            .validate(),
        Err(HoursError::BreakOutsideHours { .. })
    ));
    let mut half = DayHours::open(t("09:00"), t("18:00"));
    half.break_start = Some(t("12:00"));
    assert_eq!(half.validate(), Err(HoursError::HalfBreak));

    assert_eq!(
        WeeklyHour::new(7, DayHours::closed()).validate(),
        Err(HoursError::DayOutOfRange(7))
    );
    assert!(calendar().validate().is_ok());
}
