//! Cycle de vie d'une réservation.
//!
//! ```text
//! pending    -> confirmed | cancelled
//! confirmed  -> completed | cancelled | no_show
//! cancelled  -> confirmed
//! completed, no_show : terminaux
//! ```

use crate::model::ReservationStatus;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    #[error("a reason is required to move a reservation to {0}")]
    MissingReason(ReservationStatus),
}

/// Changement de statut accepté, à appliquer par l'appelant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    pub reason: Option<String>,
}

impl StatusChange {
    /// Une prestation terminée compte comme visite du client.
    pub fn counts_as_visit(&self) -> bool {
        self.to == ReservationStatus::Completed
    }
}

/// `true` si la transition figure dans la table ; les transitions vers soi-même sont refusées.
pub fn validate_status_transition(current: ReservationStatus, requested: ReservationStatus) -> bool {
    use ReservationStatus::*;

    matches!(
        (current, requested),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Confirmed, Completed)
            | (Confirmed, Cancelled)
            | (Confirmed, NoShow)
            | (Cancelled, Confirmed)
    )
}

pub fn requires_reason(status: ReservationStatus) -> bool {
    matches!(status, ReservationStatus::Cancelled | ReservationStatus::NoShow)
}

pub fn is_terminal(status: ReservationStatus) -> bool {
    matches!(status, ReservationStatus::Completed | ReservationStatus::NoShow)
}

/// Valide une demande de transition avant toute mutation.
///
/// Une raison vide (après trim) est traitée comme absente.
pub fn transition(
    current: ReservationStatus,
    requested: ReservationStatus,
    reason: Option<&str>,
) -> Result<StatusChange, TransitionError> {
    if !validate_status_transition(current, requested) {
        return Err(TransitionError::InvalidTransition {
            from: current,
            to: requested,
        });
    }
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    if requires_reason(requested) && reason.is_none() {
        return Err(TransitionError::MissingReason(requested));
    }
    Ok(StatusChange {
        from: current,
        to: requested,
        reason: reason.map(str::to_string),
    })
}
