//! Contrôle d'une demande de réservation avant écriture.
//!
//! Les violations s'accumulent : l'appelant reçoit la liste complète.

use crate::availability::{Availability, Closure};
use crate::model::{BusinessCalendar, Designer, ServiceType};
use crate::time::ClockTime;
use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Demande brute telle que reçue d'un formulaire ou d'un import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub stylist: String,
    #[serde(default)]
    pub service_type: String,
}

/// Demande dont tous les champs ont passé les contrôles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub customer_name: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub stylist: String,
    pub service_type: ServiceType,
}

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Longueur admise du nom (en caractères, après trim).
    pub name_len: RangeInclusive<usize>,
    pub max_advance_months: u32,
    /// Refuse une heure dans la fenêtre d'ouverture mais pendant la pause.
    pub reject_break_times: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            name_len: 2..=50,
            max_advance_months: 3,
            reject_break_times: true,
        }
    }
}

/// Données externes nécessaires au contrôle.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub calendar: &'a BusinessCalendar,
    pub designers: &'a [Designer],
    pub now: NaiveDateTime,
    pub options: &'a ValidationOptions,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("customer name is required")]
    NameRequired,
    #[error("customer name must be {min} to {max} characters (got {len})")]
    NameLength { min: usize, max: usize, len: usize },
    #[error("date is required")]
    DateRequired,
    #[error("invalid date (expected YYYY-MM-DD): {0:?}")]
    DateInvalid(String),
    #[error("date {0} is in the past")]
    DateInPast(NaiveDate),
    #[error("date {date} is too far ahead (latest bookable date is {limit})")]
    DateTooFar { date: NaiveDate, limit: NaiveDate },
    #[error("time is required")]
    TimeRequired,
    #[error("invalid time (expected HH:MM, 24h): {0:?}")]
    TimeInvalid(String),
    #[error("time {0} has already passed today")]
    TimeInPast(ClockTime),
    #[error("the salon is closed on {date} ({name})")]
    ClosedHoliday { date: NaiveDate, name: String },
    #[error("the salon is exceptionally closed on {0}")]
    ClosedSpecial(NaiveDate),
    #[error("the salon is not open on {0}")]
    ClosedRegular(NaiveDate),
    #[error("time {time} is outside business hours {open}-{close}")]
    OutsideBusinessHours {
        time: ClockTime,
        open: ClockTime,
        close: ClockTime,
    },
    #[error("time {time} falls within the break {start}-{end}")]
    DuringBreak {
        time: ClockTime,
        start: ClockTime,
        end: ClockTime,
    },
    #[error("stylist is required")]
    StylistRequired,
    #[error("unknown or inactive stylist: {0}")]
    StylistUnknown(String),
    #[error("service type is required")]
    ServiceRequired,
    #[error("unknown service type: {0}")]
    ServiceUnknown(String),
}

impl Violation {
    /// Champ de la demande concerné.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired | Self::NameLength { .. } => "customer_name",
            Self::DateRequired
            | Self::DateInvalid(_)
            | Self::DateInPast(_)
            | Self::DateTooFar { .. }
            | Self::ClosedHoliday { .. }
            | Self::ClosedSpecial(_)
            | Self::ClosedRegular(_) => "date",
            Self::TimeRequired
            | Self::TimeInvalid(_)
            | Self::TimeInPast(_)
            | Self::OutsideBusinessHours { .. }
            | Self::DuringBreak { .. } => "time",
            Self::StylistRequired | Self::StylistUnknown(_) => "stylist",
            Self::ServiceRequired | Self::ServiceUnknown(_) => "service_type",
        }
    }
}

/// Contrôle complet ; renvoie la demande typée ou toutes les violations.
pub fn check_reservation(
    request: &ReservationRequest,
    ctx: &ValidationContext<'_>,
) -> Result<ValidatedRequest, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = check_name(&request.customer_name, ctx.options, &mut violations);
    let date = check_date(&request.date, ctx, &mut violations);
    let time = check_time(&request.time, date, ctx, &mut violations);
    let stylist = check_stylist(&request.stylist, ctx.designers, &mut violations);
    let service_type = check_service(&request.service_type, &mut violations);

    match (name, date, time, stylist, service_type) {
        (Some(customer_name), Some(date), Some(time), Some(stylist), Some(service_type))
            if violations.is_empty() =>
        {
            Ok(ValidatedRequest {
                customer_name,
                date,
                time,
                stylist,
                service_type,
            })
        }
        _ => Err(violations),
    }
}

/// Liste des violations (vide si la demande est acceptable).
pub fn validate_reservation(request: &ReservationRequest, ctx: &ValidationContext<'_>) -> Vec<Violation> {
    check_reservation(request, ctx).err().unwrap_or_default()
}

fn check_name(raw: &str, opts: &ValidationOptions, out: &mut Vec<Violation>) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        out.push(Violation::NameRequired);
        return None;
    }
    let len = name.chars().count();
    if !opts.name_len.contains(&len) {
        out.push(Violation::NameLength {
            min: *opts.name_len.start(),
            max: *opts.name_len.end(),
            len,
        });
        return None;
    }
    Some(name.to_string())
}

fn check_date(raw: &str, ctx: &ValidationContext<'_>, out: &mut Vec<Violation>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        out.push(Violation::DateRequired);
        return None;
    }
    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        out.push(Violation::DateInvalid(raw.to_string()));
        return None;
    };

    let today = ctx.now.date();
    if date < today {
        out.push(Violation::DateInPast(date));
    } else if let Some(limit) = today.checked_add_months(Months::new(ctx.options.max_advance_months)) {
        if date > limit {
            out.push(Violation::DateTooFar { date, limit });
        }
    }
    Some(date)
}

fn check_time(
    raw: &str,
    date: Option<NaiveDate>,
    ctx: &ValidationContext<'_>,
    out: &mut Vec<Violation>,
) -> Option<ClockTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        out.push(Violation::TimeRequired);
        return None;
    }
    let Ok(time) = raw.parse::<ClockTime>() else {
        out.push(Violation::TimeInvalid(raw.to_string()));
        return None;
    };
    let Some(date) = date else {
        return Some(time);
    };

    if date == ctx.now.date() && time < ClockTime::from_naive(ctx.now.time()) {
        out.push(Violation::TimeInPast(time));
    }

    match ctx.calendar.availability(date) {
        Availability::Closed(Closure::Holiday { name }) => {
            out.push(Violation::ClosedHoliday { date, name });
        }
        Availability::Closed(Closure::Special) => out.push(Violation::ClosedSpecial(date)),
        Availability::Closed(Closure::Regular | Closure::Unscheduled) => {
            out.push(Violation::ClosedRegular(date));
        }
        Availability::Open(window) => {
            if !window.contains(time) {
                out.push(Violation::OutsideBusinessHours {
                    time,
                    open: window.open,
                    close: window.close,
                });
            } else if ctx.options.reject_break_times && window.in_break(time) {
                if let Some((start, end)) = window.break_window {
                    out.push(Violation::DuringBreak { time, start, end });
                }
            }
        }
    }
    Some(time)
}

fn check_stylist(raw: &str, designers: &[Designer], out: &mut Vec<Violation>) -> Option<String> {
    let stylist = raw.trim();
    if stylist.is_empty() {
        out.push(Violation::StylistRequired);
        return None;
    }
    if !designers.iter().any(|d| d.is_active && d.name == stylist) {
        out.push(Violation::StylistUnknown(stylist.to_string()));
        return None;
    }
    Some(stylist.to_string())
}

fn check_service(raw: &str, out: &mut Vec<Violation>) -> Option<ServiceType> {
    let raw = raw.trim();
    if raw.is_empty() {
        out.push(Violation::ServiceRequired);
        return None;
    }
    match raw.parse::<ServiceType>() {
        Ok(service) => Some(service),
        Err(_) => {
            out.push(Violation::ServiceUnknown(raw.to_string()));
            None
        }
    }
}
