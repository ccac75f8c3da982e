use super::{BookingError, Reserved, Salon};
use crate::clock::Clock;
use crate::conflicts;
use crate::model::Reservation;
use crate::validation::{self, ReservationRequest};
use tracing::{info, warn};

pub(super) fn reserve<C: Clock>(
    salon: &mut Salon<C>,
    request: &ReservationRequest,
) -> Result<Reserved, BookingError> {
    let options = salon.options.validation();
    let valid = validation::check_reservation(request, &salon.validation_context(&options))
        .map_err(BookingError::ValidationFailed)?;

    let reservation = Reservation::new(
        valid.customer_name,
        valid.date,
        valid.time,
        valid.stylist,
        valid.service_type,
    );
    let id = reservation.id.clone();
    let (date, time) = (reservation.date, reservation.time);
    let stylist = reservation.stylist.clone();
    salon.agenda.reservations.push(reservation);

    // jamais rejetée : le doublon est signalé pour arbitrage
    let conflict = conflicts::conflict_for(&salon.agenda.reservations, date, time, &stylist);
    match &conflict {
        Some(group) => warn!(
            %id, %date, %time, %stylist, count = group.count(),
            "reservation accepted on an already booked slot"
        ),
        None => info!(%id, %date, %time, %stylist, "reservation accepted"),
    }

    Ok(Reserved { id, conflict })
}
