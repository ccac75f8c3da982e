#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use salon_booking::{
    io,
    model::{Designer, ReservationId, ReservationStatus},
    storage::JsonStorage,
    Availability, BookingError, BookingOptions, Closure, ReservationRequest, Salon,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'exploitation du salon (agenda JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'agenda
    #[arg(long, global = true, default_value = "agenda.json")]
    agenda: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher les créneaux d'une date
    Slots {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 30)]
        granularity: u32,
        /// N'afficher que les créneaux libres de ce designer
        #[arg(long)]
        stylist: Option<String>,
    },

    /// Enregistrer une réservation
    Reserve {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        stylist: String,
        #[arg(long)]
        service: String,
        /// Accepter une heure pendant la pause
        #[arg(long)]
        allow_break: bool,
    },

    /// Changer le statut d'une réservation
    Status {
        #[arg(long)]
        id: String,
        /// pending | confirmed | completed | cancelled | no_show
        #[arg(long)]
        to: String,
        /// Obligatoire pour cancelled et no_show
        #[arg(long)]
        reason: Option<String>,
    },

    /// Vérifier les réservations en double
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Importer des réservations depuis un CSV
    ImportReservations {
        #[arg(long)]
        csv: String,
    },

    /// Importer des jours fériés depuis un CSV
    ImportHolidays {
        #[arg(long)]
        csv: String,
    },

    /// Remplacer l'horaire hebdomadaire depuis un JSON
    ImportHours {
        #[arg(long)]
        json: String,
    },

    /// Ajouter un designer
    AddDesigner {
        #[arg(long)]
        name: String,
        #[arg(long)]
        inactive: bool,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.agenda)?;
    let mut salon = Salon::new(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::Slots {
            date,
            granularity,
            stylist,
        } => {
            let date = parse_date(&date)?;
            let salon = salon.with_options(BookingOptions {
                slot_minutes: granularity,
                ..BookingOptions::default()
            });
            match salon.availability(date) {
                Availability::Closed(closure) => {
                    let why = match closure {
                        Closure::Holiday { name } => format!("holiday ({name})"),
                        Closure::Special => "special closure".to_string(),
                        Closure::Regular | Closure::Unscheduled => "regular closing day".to_string(),
                    };
                    println!("{date}: closed, {why}");
                }
                Availability::Open(_) => {
                    let slots = match &stylist {
                        Some(s) => salon.free_slots(date, s)?,
                        None => salon.slots(date)?,
                    };
                    for slot in slots {
                        println!("{slot}");
                    }
                }
            }
            0
        }
        Commands::Reserve {
            name,
            date,
            time,
            stylist,
            service,
            allow_break,
        } => {
            let mut salon = salon.with_options(BookingOptions {
                reject_break_times: !allow_break,
                ..BookingOptions::default()
            });
            let request = ReservationRequest {
                customer_name: name,
                date,
                time,
                stylist,
                service_type: service,
            };
            match salon.reserve(&request) {
                Ok(reserved) => {
                    salon.save(&storage)?;
                    println!("{}", reserved.id);
                    if let Some(group) = reserved.conflict {
                        eprintln!(
                            "Warning: {} reservation(s) on {} {} with {}: {}",
                            group.count(),
                            group.date,
                            group.time,
                            group.stylist,
                            group.customer_names.join(", ")
                        );
                    }
                    0
                }
                Err(BookingError::ValidationFailed(violations)) => {
                    for v in &violations {
                        eprintln!("{}: {}", v.field(), v);
                    }
                    1
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Status { id, to, reason } => {
            let to: ReservationStatus = to.parse()?;
            let change = salon.change_status(&ReservationId::new(&id), to, reason.as_deref())?;
            salon.save(&storage)?;
            println!("{id}: {} -> {}", change.from, change.to);
            0
        }
        Commands::Check { report } => {
            let conflicts = salon.conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for g in &conflicts {
                    println!(
                        "{} {} | {} | {} | {}",
                        g.date,
                        g.time,
                        g.stylist,
                        g.count(),
                        g.customer_names.join(", ")
                    );
                }
                if let Some(path) = report {
                    io::export_conflicts_csv(path, &conflicts)?;
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::List { date, out_csv } => {
            let reservations = match date {
                Some(raw) => salon.reservations_on(parse_date(&raw)?),
                None => salon.agenda().reservations.iter().collect(),
            };
            if let Some(path) = out_csv {
                io::export_reservations_csv(path, reservations.iter().copied())?;
            }
            for r in &reservations {
                println!(
                    "{} | {} {} | {} | {} | {} | {}",
                    r.id, r.date, r.time, r.stylist, r.customer_name, r.service_type, r.status
                );
            }
            0
        }
        Commands::ImportReservations { csv } => {
            let reservations = io::import_reservations_csv(csv)?;
            println!("imported {} reservation(s)", reservations.len());
            salon.agenda_mut().reservations.extend(reservations);
            salon.save(&storage)?;
            0
        }
        Commands::ImportHolidays { csv } => {
            let holidays = io::import_holidays_csv(csv)?;
            salon.agenda_mut().calendar.holidays.extend(holidays);
            salon.save(&storage)?;
            0
        }
        Commands::ImportHours { json } => {
            let hours = io::import_weekly_hours_json(json)?;
            let calendar = &mut salon.agenda_mut().calendar;
            for weekly in hours {
                calendar.set_weekly(weekly);
            }
            salon.save(&storage)?;
            0
        }
        Commands::AddDesigner { name, inactive } => {
            let name = name.trim().to_string();
            if salon.agenda().find_designer(&name).is_some() {
                anyhow::bail!("designer already exists: {name}");
            }
            let designer = if inactive {
                Designer::inactive(name)
            } else {
                Designer::new(name)
            };
            salon.agenda_mut().designers.push(designer);
            salon.save(&storage)?;
            0
        }
    };

    std::process::exit(code);
}
