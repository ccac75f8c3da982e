mod reserve;
mod transition;
mod types;

pub use types::{BookingError, BookingOptions, Reserved};

use crate::availability::Availability;
use crate::clock::{Clock, SystemClock};
use crate::conflicts::{self, ConflictGroup};
use crate::model::{Agenda, Reservation, ReservationId, ReservationStatus};
use crate::slots;
use crate::storage::Storage;
use crate::status::StatusChange;
use crate::time::ClockTime;
use crate::validation::{self, ReservationRequest, ValidationContext, Violation};
use chrono::NaiveDate;

/// Salon : encapsule l'agenda, l'horloge et les options.
///
/// Les mutations passent par `&mut self` ; une transition de statut lit, valide
/// et écrit (statut, historique, visites) en un seul appel.
#[derive(Debug)]
pub struct Salon<C: Clock = SystemClock> {
    agenda: Agenda,
    clock: C,
    options: BookingOptions,
}

impl Salon<SystemClock> {
    pub fn new(agenda: Agenda) -> Self {
        Self::with_clock(agenda, SystemClock)
    }
}

impl<C: Clock> Salon<C> {
    pub fn with_clock(agenda: Agenda, clock: C) -> Self {
        Self {
            agenda,
            clock,
            options: BookingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BookingOptions) -> Self {
        self.options = options;
        self
    }

    /// Charge l'agenda depuis un stockage.
    pub fn load<S: Storage>(storage: &S, clock: C) -> Result<Self, BookingError> {
        Ok(Self::with_clock(storage.load()?, clock))
    }

    pub fn save<S: Storage>(&self, storage: &S) -> Result<(), BookingError> {
        storage.save(&self.agenda)?;
        Ok(())
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }
    pub fn agenda_mut(&mut self) -> &mut Agenda {
        &mut self.agenda
    }
    pub fn into_agenda(self) -> Agenda {
        self.agenda
    }
    pub fn options(&self) -> &BookingOptions {
        &self.options
    }

    pub fn availability(&self, date: NaiveDate) -> Availability {
        self.agenda.calendar.availability(date)
    }

    /// Créneaux d'une date à la granularité configurée.
    pub fn slots(&self, date: NaiveDate) -> Result<Vec<ClockTime>, BookingError> {
        Ok(slots::generate_slots(
            &self.availability(date),
            self.options.slot_minutes,
        )?)
    }

    /// Créneaux encore libres pour un designer.
    pub fn free_slots(&self, date: NaiveDate, stylist: &str) -> Result<Vec<ClockTime>, BookingError> {
        Ok(slots::free_slots(
            &self.availability(date),
            self.options.slot_minutes,
            &self.agenda.reservations,
            date,
            stylist,
        )?)
    }

    pub fn validate(&self, request: &ReservationRequest) -> Vec<Violation> {
        let options = self.options.validation();
        validation::validate_reservation(request, &self.validation_context(&options))
    }

    pub fn reserve(&mut self, request: &ReservationRequest) -> Result<Reserved, BookingError> {
        reserve::reserve(self, request)
    }

    pub fn change_status(
        &mut self,
        id: &ReservationId,
        to: ReservationStatus,
        reason: Option<&str>,
    ) -> Result<StatusChange, BookingError> {
        transition::change_status(self, id, to, reason)
    }

    pub fn conflicts(&self) -> Vec<ConflictGroup> {
        conflicts::find_conflicts(&self.agenda.reservations)
    }

    /// Réservations d'une date, triées par heure puis designer.
    pub fn reservations_on(&self, date: NaiveDate) -> Vec<&Reservation> {
        let mut out: Vec<&Reservation> = self
            .agenda
            .reservations
            .iter()
            .filter(|r| r.date == date)
            .collect();
        out.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.stylist.cmp(&b.stylist)));
        out
    }

    fn validation_context<'a>(
        &'a self,
        options: &'a validation::ValidationOptions,
    ) -> ValidationContext<'a> {
        ValidationContext {
            calendar: &self.agenda.calendar,
            designers: &self.agenda.designers,
            now: self.clock.now(),
            options,
        }
    }
}
