#![allow(dead_code)]
use chrono::{NaiveDate, NaiveDateTime};
use salon_booking::{BusinessCalendar, ClockTime, DayHours, Designer, Holiday, SpecialHour, WeeklyHour};

pub fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn at(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).unwrap()
}

/// Lundi-samedi 09:00-18:00, pause 12:00-13:00 ; dimanche fermé.
pub fn weekly_hours() -> Vec<WeeklyHour> {
    let mut out = vec![WeeklyHour::new(0, DayHours::closed())];
    for dow in 1..=6 {
        out.push(WeeklyHour::new(
            dow,
            DayHours::open(t("09:00"), t("18:00")).with_break(t("12:00"), t("13:00")),
        ));
    }
    out
}

pub fn calendar() -> BusinessCalendar {
    BusinessCalendar {
        weekly_hours: weekly_hours(),
        holidays: vec![
            Holiday::new(d(2020, 10, 3), "National Foundation Day", true),
            Holiday::new(d(2025, 9, 26), "Staff training", false),
        ],
        special_hours: vec![
            SpecialHour::new(d(2025, 9, 15), DayHours::open(t("10:00"), t("16:00"))),
            SpecialHour::new(d(2025, 9, 20), DayHours::closed()),
        ],
    }
}

pub fn designers() -> Vec<Designer> {
    vec![Designer::new("Kim"), Designer::new("Park"), Designer::inactive("Lee")]
}

pub fn strings<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
