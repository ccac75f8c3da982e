#![forbid(unsafe_code)]
//! Salon booking — règles de réservation d'un salon de coiffure.
//!
//! - Horaires effectifs d'une date (férié > horaire spécial > horaire hebdo).
//! - Créneaux réservables à granularité fixe, hors pause.
//! - Détection des réservations en double par (date, heure, designer).
//! - Contrôle des demandes et cycle de vie des statuts.
//! - Stockage fichier JSON et import/export CSV en dehors du cœur.

pub mod availability;
pub mod booking;
pub mod clock;
pub mod conflicts;
pub mod io;
pub mod model;
pub mod slots;
pub mod status;
pub mod storage;
pub mod time;
pub mod validation;

pub use availability::{
    effective_hours, resolve_availability, Availability, Closure, EffectiveHours, HoursSource,
    OpenWindow,
};
pub use booking::{BookingError, BookingOptions, Reserved, Salon};
pub use clock::{Clock, FixedClock, SystemClock};
pub use conflicts::{find_conflicts, ConflictGroup};
pub use model::{
    Agenda, BusinessCalendar, Customer, DayHours, Designer, Holiday, Reservation, ReservationId,
    ReservationStatus, ServiceType, SpecialHour, StatusRecord, WeeklyHour,
};
pub use slots::{free_slots, generate_slots};
pub use status::{requires_reason, validate_status_transition, StatusChange, TransitionError};
pub use storage::{JsonStorage, Storage};
pub use time::{to_minutes, to_time_string, ClockTime, TimeError};
pub use validation::{validate_reservation, ReservationRequest, ValidationContext, Violation};
