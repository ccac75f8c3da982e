use crate::model::{Reservation, ReservationId};
use crate::time::ClockTime;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Réservations actives partageant le même (date, heure, designer).
///
/// Calculé à la demande, jamais persisté. Les réservations en double ne sont
/// pas rejetées à l'écriture : elles sont listées ici pour arbitrage manuel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroup {
    pub date: NaiveDate,
    pub time: ClockTime,
    pub stylist: String,
    pub reservation_ids: Vec<ReservationId>,
    pub customer_names: Vec<String>,
}

impl ConflictGroup {
    pub fn count(&self) -> usize {
        self.reservation_ids.len()
    }
}

type SlotKey<'a> = (NaiveDate, ClockTime, &'a str);

fn group_active(reservations: &[Reservation]) -> BTreeMap<SlotKey<'_>, Vec<&Reservation>> {
    let mut groups: BTreeMap<SlotKey<'_>, Vec<&Reservation>> = BTreeMap::new();
    for r in reservations.iter().filter(|r| r.status.is_active()) {
        groups
            .entry((r.date, r.time, r.stylist.as_str()))
            .or_default()
            .push(r);
    }
    groups
}

fn to_group(key: SlotKey<'_>, members: &[&Reservation]) -> ConflictGroup {
    let (date, time, stylist) = key;
    ConflictGroup {
        date,
        time,
        stylist: stylist.to_string(),
        reservation_ids: members.iter().map(|r| r.id.clone()).collect(),
        customer_names: members.iter().map(|r| r.customer_name.clone()).collect(),
    }
}

/// Groupes en conflit, triés par date, heure puis designer.
///
/// Seules les réservations `pending`/`confirmed` sont prises en compte.
pub fn find_conflicts(reservations: &[Reservation]) -> Vec<ConflictGroup> {
    group_active(reservations)
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| to_group(key, &members))
        .collect()
}

/// Groupe en conflit pour un créneau donné, s'il existe.
pub fn conflict_for(
    reservations: &[Reservation],
    date: NaiveDate,
    time: ClockTime,
    stylist: &str,
) -> Option<ConflictGroup> {
    let members: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status.is_active() && r.date == date && r.time == time && r.stylist == stylist)
        .collect();
    (members.len() > 1).then(|| to_group((date, time, stylist), &members))
}
