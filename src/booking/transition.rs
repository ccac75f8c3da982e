use super::{BookingError, Salon};
use crate::clock::Clock;
use crate::model::{ReservationId, ReservationStatus, StatusRecord};
use crate::status::{self, StatusChange};
use chrono::{Local, TimeZone, Utc};
use tracing::info;

pub(super) fn change_status<C: Clock>(
    salon: &mut Salon<C>,
    id: &ReservationId,
    to: ReservationStatus,
    reason: Option<&str>,
) -> Result<StatusChange, BookingError> {
    let Some(pos) = salon.agenda.reservations.iter().position(|r| &r.id == id) else {
        return Err(BookingError::UnknownReservation(id.as_str().to_string()));
    };

    // tout est validé avant la moindre écriture
    let current = salon.agenda.reservations[pos].status;
    let change = status::transition(current, to, reason)?;

    let now = salon.clock.now();
    let changed_at = Local
        .from_local_datetime(&now)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&now));

    let reservation = &mut salon.agenda.reservations[pos];
    reservation.status = change.to;
    let customer = reservation.customer_name.clone();

    salon.agenda.history.push(StatusRecord {
        reservation_id: id.clone(),
        from: change.from,
        to: change.to,
        reason: change.reason.clone(),
        changed_at,
    });

    if change.counts_as_visit() {
        let visits = salon.agenda.record_visit(&customer);
        info!(%id, %customer, visits, "visit recorded");
    }

    info!(%id, from = %change.from, to = %change.to, "reservation status changed");
    Ok(change)
}
