//! Résolution des horaires effectifs d'une date.
//!
//! Priorité : jour férié > horaire spécial > horaire hebdomadaire.

use crate::model::{BusinessCalendar, DayHours, Holiday, SpecialHour, WeeklyHour};
use crate::time::ClockTime;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

/// Origine d'un enregistrement d'horaires retenu pour une date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursSource {
    Special,
    Weekly,
}

/// Enregistrement retenu tel quel, y compris s'il est marqué fermé.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveHours<'a> {
    pub source: HoursSource,
    pub hours: &'a DayHours,
}

/// Motif de fermeture d'une date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Closure {
    Holiday { name: String },
    /// Horaire spécial marqué fermé (ou inutilisable).
    Special,
    /// Horaire hebdomadaire marqué fermé (ou inutilisable).
    Regular,
    /// Aucun horaire hebdomadaire pour ce jour.
    Unscheduled,
}

/// Fenêtre d'ouverture `[open, close)` avec pause éventuelle `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenWindow {
    pub open: ClockTime,
    pub close: ClockTime,
    pub break_window: Option<(ClockTime, ClockTime)>,
}

impl OpenWindow {
    pub fn contains(&self, t: ClockTime) -> bool {
        self.open <= t && t < self.close
    }

    pub fn in_break(&self, t: ClockTime) -> bool {
        self.break_window
            .is_some_and(|(start, end)| start <= t && t < end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Open(OpenWindow),
    Closed(Closure),
}

impl Availability {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn window(&self) -> Option<&OpenWindow> {
        match self {
            Self::Open(window) => Some(window),
            Self::Closed(_) => None,
        }
    }
}

/// Jour de semaine au format 0 = dimanche … 6 = samedi.
pub fn day_of_week(date: NaiveDate) -> u8 {
    // 0..=6
    date.weekday().num_days_from_sunday() as u8
}

pub fn matching_holiday<'a>(date: NaiveDate, holidays: &'a [Holiday]) -> Option<&'a Holiday> {
    holidays.iter().find(|h| h.matches(date))
}

/// Recherche brute : `None` si jour férié ou si aucun horaire ne s'applique,
/// sinon l'enregistrement spécial ou hebdomadaire, sans l'interpréter.
pub fn effective_hours<'a>(
    date: NaiveDate,
    weekly_hours: &'a [WeeklyHour],
    holidays: &[Holiday],
    special_hours: &'a [SpecialHour],
) -> Option<EffectiveHours<'a>> {
    if matching_holiday(date, holidays).is_some() {
        return None;
    }
    if let Some(special) = special_hours.iter().find(|s| s.date == date) {
        return Some(EffectiveHours {
            source: HoursSource::Special,
            hours: &special.hours,
        });
    }
    let dow = day_of_week(date);
    weekly_hours
        .iter()
        .find(|w| w.day_of_week == dow)
        .map(|w| EffectiveHours {
            source: HoursSource::Weekly,
            hours: &w.hours,
        })
}

/// Résout la disponibilité d'une date en distinguant explicitement les fermetures.
pub fn resolve_availability(
    date: NaiveDate,
    weekly_hours: &[WeeklyHour],
    holidays: &[Holiday],
    special_hours: &[SpecialHour],
) -> Availability {
    if let Some(holiday) = matching_holiday(date, holidays) {
        debug!(%date, holiday = %holiday.name, "closed for holiday");
        return Availability::Closed(Closure::Holiday {
            name: holiday.name.clone(),
        });
    }

    let Some(effective) = effective_hours(date, weekly_hours, &[], special_hours) else {
        debug!(%date, "no weekly hours for this day");
        return Availability::Closed(Closure::Unscheduled);
    };

    let closure = match effective.source {
        HoursSource::Special => Closure::Special,
        HoursSource::Weekly => Closure::Regular,
    };
    let hours = effective.hours;
    if hours.is_closed {
        return Availability::Closed(closure);
    }

    match (hours.open_time, hours.close_time) {
        (Some(open), Some(close)) if open < close => Availability::Open(OpenWindow {
            open,
            close,
            break_window: hours.break_window(),
        }),
        _ => {
            warn!(%date, source = ?effective.source, "hours record is open but has no usable open/close times");
            Availability::Closed(closure)
        }
    }
}

impl BusinessCalendar {
    pub fn availability(&self, date: NaiveDate) -> Availability {
        resolve_availability(date, &self.weekly_hours, &self.holidays, &self.special_hours)
    }

    pub fn effective_hours(&self, date: NaiveDate) -> Option<EffectiveHours<'_>> {
        effective_hours(date, &self.weekly_hours, &self.holidays, &self.special_hours)
    }
}
