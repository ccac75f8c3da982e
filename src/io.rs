use crate::conflicts::ConflictGroup;
use crate::model::{Holiday, Reservation, ReservationStatus, ServiceType, WeeklyHour};
use crate::time::ClockTime;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de réservations: header `customer_name,date,time,stylist,service_type[,status]`
///
/// Pas de contrôle métier (historique) : seul le format est vérifié.
pub fn import_reservations_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Reservation>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let name = rec.get(0).context("missing customer_name")?.trim();
        let date = rec.get(1).context("missing date")?.trim();
        let time = rec.get(2).context("missing time")?.trim();
        let stylist = rec.get(3).context("missing stylist")?.trim();
        let service = rec.get(4).context("missing service_type")?.trim();
        if name.is_empty() || stylist.is_empty() {
            bail!("invalid reservation row {row} (empty name or stylist)");
        }
        let date = parse_date(date).with_context(|| format!("row {row}"))?;
        let time: ClockTime = time.parse().with_context(|| format!("row {row}"))?;
        let service: ServiceType = service.parse().with_context(|| format!("row {row}"))?;

        let mut reservation = Reservation::new(name, date, time, stylist, service);
        if let Some(status) = rec.get(5) {
            let status = status.trim();
            if !status.is_empty() {
                reservation.status = status
                    .parse::<ReservationStatus>()
                    .with_context(|| format!("row {row}"))?;
            }
        }
        out.push(reservation);
    }
    Ok(out)
}

/// Import de jours fériés: header `date,name[,is_recurring]`
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Holiday>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = rec.get(0).context("missing date")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid holiday row (empty name)");
        }
        let date = parse_date(date)?;
        let recurring = match rec.get(2).map(str::trim) {
            Some(flag) if !flag.is_empty() => parse_bool(flag)
                .with_context(|| format!("invalid is_recurring value for holiday {name}"))?,
            _ => false,
        };
        out.push(Holiday::new(date, name, recurring));
    }
    Ok(out)
}

/// Import JSON de l'horaire hebdomadaire (tableau de `WeeklyHour`), validé.
pub fn import_weekly_hours_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<WeeklyHour>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let hours: Vec<WeeklyHour> = serde_json::from_slice(&data)
        .with_context(|| format!("parsing weekly hours {}", path.display()))?;
    for weekly in &hours {
        weekly
            .validate()
            .with_context(|| format!("invalid hours for day {}", weekly.day_of_week))?;
    }
    Ok(hours)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Export CSV: header `id,date,time,stylist,customer_name,service_type,status`
pub fn export_reservations_csv<'a, P, I>(path: P, reservations: I) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Reservation>,
{
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "date",
        "time",
        "stylist",
        "customer_name",
        "service_type",
        "status",
    ])?;
    for r in reservations {
        let date = r.date.to_string();
        let time = r.time.to_string();
        w.write_record([
            r.id.as_str(),
            date.as_str(),
            time.as_str(),
            r.stylist.as_str(),
            r.customer_name.as_str(),
            r.service_type.as_str(),
            r.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Rapport CSV: header `date,time,stylist,count,reservation_ids,customer_names`
///
/// Les listes sont séparées par `;`.
pub fn export_conflicts_csv<P: AsRef<Path>>(path: P, groups: &[ConflictGroup]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "date",
        "time",
        "stylist",
        "count",
        "reservation_ids",
        "customer_names",
    ])?;
    for g in groups {
        let ids: Vec<&str> = g.reservation_ids.iter().map(|id| id.as_str()).collect();
        w.write_record([
            g.date.to_string(),
            g.time.to_string(),
            g.stylist.clone(),
            g.count().to_string(),
            ids.join(";"),
            g.customer_names.join(";"),
        ])?;
    }
    w.flush()?;
    Ok(())
}
