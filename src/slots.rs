use crate::availability::Availability;
use crate::model::Reservation;
use crate::time::ClockTime;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

/// Granularité par défaut des créneaux (minutes).
pub const DEFAULT_GRANULARITY: u32 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("slot granularity must be > 0 minutes")]
    ZeroGranularity,
}

/// Découpe la fenêtre d'ouverture en créneaux `[open, close)` triés, hors pause.
///
/// Une date fermée produit une liste vide. Recalculé à chaque appel.
pub fn generate_slots(
    availability: &Availability,
    granularity_minutes: u32,
) -> Result<Vec<ClockTime>, SlotError> {
    if granularity_minutes == 0 {
        return Err(SlotError::ZeroGranularity);
    }
    let Some(window) = availability.window() else {
        return Ok(Vec::new());
    };

    let close = window.close.minutes();
    let mut out = Vec::new();
    let mut t = window.open.minutes();
    while t < close {
        // t < close < 1440
        if let Ok(slot) = ClockTime::from_minutes(t) {
            if !window.in_break(slot) {
                out.push(slot);
            }
        }
        match t.checked_add(granularity_minutes) {
            Some(next) => t = next,
            None => break,
        }
    }
    debug!(count = out.len(), granularity_minutes, "generated slots");
    Ok(out)
}

/// Créneaux non occupés par une réservation active du designer à cette date.
pub fn free_slots(
    availability: &Availability,
    granularity_minutes: u32,
    reservations: &[Reservation],
    date: NaiveDate,
    stylist: &str,
) -> Result<Vec<ClockTime>, SlotError> {
    let mut slots = generate_slots(availability, granularity_minutes)?;
    slots.retain(|slot| {
        !reservations.iter().any(|r| {
            r.status.is_active() && r.date == date && r.stylist == stylist && r.time == *slot
        })
    });
    Ok(slots)
}
