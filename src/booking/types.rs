use crate::conflicts::ConflictGroup;
use crate::model::ReservationId;
use crate::slots::{SlotError, DEFAULT_GRANULARITY};
use crate::status::TransitionError;
use crate::validation::{ValidationOptions, Violation};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Options du salon
#[derive(Debug, Clone)]
pub struct BookingOptions {
    pub slot_minutes: u32,
    pub max_advance_months: u32,
    pub reject_break_times: bool,
    pub name_len: RangeInclusive<usize>,
}

impl Default for BookingOptions {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_GRANULARITY,
            max_advance_months: 3,
            reject_break_times: true,
            name_len: 2..=50,
        }
    }
}

impl BookingOptions {
    pub fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            name_len: self.name_len.clone(),
            max_advance_months: self.max_advance_months,
            reject_break_times: self.reject_break_times,
        }
    }
}

/// Résultat d'une réservation acceptée.
#[derive(Debug, Clone)]
pub struct Reserved {
    pub id: ReservationId,
    /// Présent si le créneau était déjà pris : la réservation est tout de même enregistrée.
    pub conflict: Option<ConflictGroup>,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("reservation request rejected ({} violation(s))", .0.len())]
    ValidationFailed(Vec<Violation>),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("unknown reservation: {0}")]
    UnknownReservation(String),
    #[error(transparent)]
    Slots(#[from] SlotError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
