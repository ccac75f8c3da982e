use crate::time::ClockTime;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifiant fort pour Reservation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoursError {
    #[error("day_of_week must be within 0..=6, got {0}")]
    DayOutOfRange(u8),
    #[error("open and close times are required unless the day is closed")]
    MissingOpenClose,
    #[error("open time {open} must be before close time {close}")]
    OpenNotBeforeClose { open: ClockTime, close: ClockTime },
    #[error("break start and break end must be given together")]
    HalfBreak,
    #[error("break start {start} must be before break end {end}")]
    BreakNotOrdered { start: ClockTime, end: ClockTime },
    #[error("break {start}-{end} must lie within opening hours {open}-{close}")]
    BreakOutsideHours {
        start: ClockTime,
        end: ClockTime,
        open: ClockTime,
        close: ClockTime,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Horaires d'une journée, partagés par l'horaire hebdo et les dates spéciales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open_time: Option<ClockTime>,
    #[serde(default)]
    pub close_time: Option<ClockTime>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub break_start: Option<ClockTime>,
    #[serde(default)]
    pub break_end: Option<ClockTime>,
}

impl DayHours {
    pub fn open(open: ClockTime, close: ClockTime) -> Self {
        Self {
            open_time: Some(open),
            close_time: Some(close),
            ..Self::default()
        }
    }

    pub fn closed() -> Self {
        Self {
            is_closed: true,
            ..Self::default()
        }
    }

    pub fn with_break(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    /// Pause effective : seulement si les deux bornes sont présentes.
    pub fn break_window(&self) -> Option<(ClockTime, ClockTime)> {
        self.break_start.zip(self.break_end)
    }

    /// Vérifie les invariants d'un jour ouvert. Un jour fermé est toujours valide.
    pub fn validate(&self) -> Result<(), HoursError> {
        if self.is_closed {
            return Ok(());
        }
        let (Some(open), Some(close)) = (self.open_time, self.close_time) else {
            return Err(HoursError::MissingOpenClose);
        };
        if open >= close {
            return Err(HoursError::OpenNotBeforeClose { open, close });
        }
        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if start >= end {
                    return Err(HoursError::BreakNotOrdered { start, end });
                }
                // les deux bornes dans [open, close)
                if start < open || end >= close {
                    return Err(HoursError::BreakOutsideHours {
                        start,
                        end,
                        open,
                        close,
                    });
                }
                Ok(())
            }
            _ => Err(HoursError::HalfBreak),
        }
    }
}

/// Horaire récurrent d'un jour de semaine (0 = dimanche).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHour {
    pub day_of_week: u8,
    #[serde(flatten)]
    pub hours: DayHours,
}

impl WeeklyHour {
    pub fn new(day_of_week: u8, hours: DayHours) -> Self {
        Self { day_of_week, hours }
    }

    pub fn validate(&self) -> Result<(), HoursError> {
        if self.day_of_week > 6 {
            return Err(HoursError::DayOutOfRange(self.day_of_week));
        }
        self.hours.validate()
    }
}

/// Surcharge des horaires pour une date précise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialHour {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub hours: DayHours,
}

impl SpecialHour {
    pub fn new(date: NaiveDate, hours: DayHours) -> Self {
        Self { date, hours }
    }
}

/// Jour férié ou fermeture exceptionnelle ; ferme toujours le salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Holiday {
    pub fn new<N: Into<String>>(date: NaiveDate, name: N, is_recurring: bool) -> Self {
        Self {
            date,
            name: name.into(),
            is_recurring,
        }
    }

    /// Récurrent : même (mois, jour) quelle que soit l'année. Sinon date exacte.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if self.is_recurring {
            self.date.month() == date.month() && self.date.day() == date.day()
        } else {
            self.date == date
        }
    }
}

/// Ensemble des données d'ouverture du salon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    #[serde(default)]
    pub weekly_hours: Vec<WeeklyHour>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub special_hours: Vec<SpecialHour>,
}

impl BusinessCalendar {
    pub fn validate(&self) -> Result<(), HoursError> {
        for weekly in &self.weekly_hours {
            weekly.validate()?;
        }
        for special in &self.special_hours {
            special.hours.validate()?;
        }
        Ok(())
    }

    /// Remplace (ou ajoute) l'horaire d'un jour de semaine.
    pub fn set_weekly(&mut self, weekly: WeeklyHour) {
        self.weekly_hours.retain(|w| w.day_of_week != weekly.day_of_week);
        self.weekly_hours.push(weekly);
        self.weekly_hours.sort_by_key(|w| w.day_of_week);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Seules les réservations actives comptent pour les conflits et l'occupation.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError {
                kind: "reservation status",
                value: s.to_string(),
            })
    }
}

/// Prestations proposées par le salon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Cut,
    Perm,
    Color,
    Styling,
    Treatment,
    Clinic,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        Self::Cut,
        Self::Perm,
        Self::Color,
        Self::Styling,
        Self::Treatment,
        Self::Clinic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Perm => "perm",
            Self::Color => "color",
            Self::Styling => "styling",
            Self::Treatment => "treatment",
            Self::Clinic => "clinic",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "service type",
                value: s.to_string(),
            })
    }
}

/// Réservation d'un client auprès d'un designer.
///
/// (date, time, stylist) n'est pas unique : les doublons sont acceptés et remontés
/// comme conflits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub customer_name: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub stylist: String,
    pub service_type: ServiceType,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new<C: Into<String>, S: Into<String>>(
        customer_name: C,
        date: NaiveDate,
        time: ClockTime,
        stylist: S,
        service_type: ServiceType,
    ) -> Self {
        Self {
            id: ReservationId::random(),
            customer_name: customer_name.into(),
            date,
            time,
            stylist: stylist.into(),
            service_type,
            status: ReservationStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }
}

fn default_active() -> bool {
    true
}

/// Designer (coiffeur) du salon ; un designer supprimé reste listé mais inactif.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designer {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Designer {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            is_active: true,
        }
    }

    pub fn inactive<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            is_active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub visit_count: u32,
}

/// Trace d'un changement de statut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub reservation_id: ReservationId,
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// Agenda complet du salon (ce que persiste le stockage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agenda {
    #[serde(default)]
    pub calendar: BusinessCalendar,
    #[serde(default)]
    pub designers: Vec<Designer>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<StatusRecord>,
}

impl Agenda {
    pub fn find_reservation<'a>(&'a self, id: &ReservationId) -> Option<&'a Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }
    pub fn find_reservation_mut(&mut self, id: &ReservationId) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| &r.id == id)
    }
    pub fn find_customer<'a>(&'a self, name: &str) -> Option<&'a Customer> {
        self.customers.iter().find(|c| c.name == name)
    }
    pub fn find_designer<'a>(&'a self, name: &str) -> Option<&'a Designer> {
        self.designers.iter().find(|d| d.name == name)
    }

    /// Incrémente le compteur de visites, en créant le client si besoin.
    pub fn record_visit(&mut self, name: &str) -> u32 {
        match self.customers.iter_mut().find(|c| c.name == name) {
            Some(customer) => {
                customer.visit_count += 1;
                customer.visit_count
            }
            None => {
                self.customers.push(Customer {
                    name: name.to_string(),
                    visit_count: 1,
                });
                1
            }
        }
    }
}
