use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{AppError, FleetSession};
use crate::domain::{Money, Vehicle, VehicleStatus, generate_registration};

mod menu;

pub use menu::{Credentials, Menu};

/// CarWave - fleet inventory for a car rental business
#[derive(Parser)]
#[command(name = "carwave")]
#[command(about = "Track rental cars, their status and rental revenue")]
#[command(version)]
pub struct Cli {
    /// Fleet snapshot file
    #[arg(short, long, global = true, env = "CARWAVE_FLEET", default_value = "fleet.txt")]
    pub fleet: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and manage the fleet through the interactive menu
    Session {
        /// Operator login
        #[arg(long, env = "CARWAVE_USER", default_value = "Grzegorz")]
        user: String,

        /// Operator password
        #[arg(
            long,
            env = "CARWAVE_PASSWORD",
            default_value = "35744",
            hide_default_value = true,
            hide_env_values = true
        )]
        password: String,

        /// Do not add the standard fleet after loading the snapshot
        #[arg(long)]
        no_seed: bool,
    },

    /// List vehicles
    List {
        /// Only show vehicles in this status
        #[arg(short, long, value_enum)]
        status: Option<StatusFilter>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a vehicle to the fleet
    Add {
        /// Manufacturer, e.g. "Toyota"
        make: String,

        /// Model, e.g. "Corolla"
        model: String,

        /// Year of manufacture
        #[arg(short, long)]
        year: i32,

        /// Rental price (e.g. "400" or "400.00")
        #[arg(short, long)]
        price: String,

        /// Deposit amount
        #[arg(short, long)]
        deposit: String,

        /// Registration plate (a Warsaw plate is generated if omitted)
        #[arg(short, long)]
        registration: Option<String>,
    },

    /// Rent a vehicle out
    Rent {
        /// Registration plate (case-insensitive)
        registration: String,
    },

    /// Take a vehicle back
    Return {
        /// Registration plate (case-insensitive)
        registration: String,
    },

    /// Send a vehicle to the workshop
    Service {
        /// Registration plate (case-insensitive)
        registration: String,
    },

    /// Take a vehicle out of the workshop
    Serviceable {
        /// Registration plate (case-insensitive)
        registration: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Available,
    Rented,
    InService,
}

impl From<StatusFilter> for VehicleStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Available => VehicleStatus::Available,
            StatusFilter::Rented => VehicleStatus::Rented,
            StatusFilter::InService => VehicleStatus::InService,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Session {
                user,
                password,
                no_seed,
            } => {
                let session = open_session(self.fleet, !no_seed)?;
                run_session(session, Credentials { user, password })?;
            }

            Commands::List { status, format } => {
                let session = open_session(self.fleet, false)?;
                let registry = session.registry();
                let vehicles: Vec<&Vehicle> = match status {
                    Some(filter) => registry.with_status(filter.into()).collect(),
                    None => registry.all().collect(),
                };

                let mut out = io::stdout().lock();
                match format {
                    OutputFormat::Table => write_vehicle_table(&mut out, vehicles)?,
                    OutputFormat::Json => {
                        serde_json::to_writer_pretty(&mut out, &vehicles)?;
                        writeln!(out)?;
                    }
                }
            }

            Commands::Add {
                make,
                model,
                year,
                price,
                deposit,
                registration,
            } => {
                let mut session = open_session(self.fleet, false)?;
                let rental_price = parse_money(&price).context("Invalid rental price")?;
                let deposit = parse_money(&deposit).context("Invalid deposit")?;
                let registration =
                    registration.unwrap_or_else(|| generate_registration(&mut rand::rng()));

                let vehicle = Vehicle::new(make, model, year, rental_price, deposit, registration);
                println!("Added: {}", vehicle);
                session.add_vehicle(vehicle);
                session.save()?;
            }

            Commands::Rent { registration } => {
                let mut session = open_session(self.fleet, false)?;
                let result = session.rent(&registration)?;
                session.save()?;
                println!(
                    "Rented: {} {} ({}), charged {}",
                    result.vehicle.make,
                    result.vehicle.model,
                    result.vehicle.registration,
                    result.charged
                );
            }

            Commands::Return { registration } => {
                let mut session = open_session(self.fleet, false)?;
                let line = describe(session.return_vehicle(&registration)?);
                session.save()?;
                println!("Returned: {}", line);
            }

            Commands::Service { registration } => {
                let mut session = open_session(self.fleet, false)?;
                let line = describe(session.send_to_service(&registration)?);
                session.save()?;
                println!("In service: {}", line);
            }

            Commands::Serviceable { registration } => {
                let mut session = open_session(self.fleet, false)?;
                let line = describe(session.mark_serviceable(&registration)?);
                session.save()?;
                println!("Serviceable: {}", line);
            }
        }

        Ok(())
    }
}

fn open_session(fleet: PathBuf, seed: bool) -> Result<FleetSession> {
    let display = fleet.display().to_string();
    let (session, report) = FleetSession::open(fleet, seed)
        .with_context(|| format!("Failed to load fleet from {}", display))?;
    if report.skipped() > 0 {
        eprintln!(
            "Warning: skipped {} malformed line(s) in {}",
            report.skipped(),
            display
        );
    }
    Ok(session)
}

fn run_session(mut session: FleetSession, credentials: Credentials) -> Result<()> {
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout().lock());

    if !menu.login(&credentials)? {
        bail!("Invalid login or password");
    }
    menu.run(&mut session)
}

fn parse_money(input: &str) -> Result<Money, AppError> {
    Money::parse_amount(input).map_err(|reason| AppError::InvalidAmount {
        input: input.to_string(),
        reason,
    })
}

fn describe(vehicle: &Vehicle) -> String {
    format!(
        "{} {} ({}) is now {}",
        vehicle.make,
        vehicle.model,
        vehicle.registration,
        vehicle.status()
    )
}

/// Aligned table of vehicles, or a notice when there are none.
pub fn write_vehicle_table<'a, W, I>(out: &mut W, vehicles: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut vehicles = vehicles.into_iter().peekable();
    if vehicles.peek().is_none() {
        return writeln!(out, "No vehicles found.");
    }

    writeln!(
        out,
        "{:<12} {:<10} {:<16} {:>4} {:>10} {:>10} {}",
        "REGISTRATION", "MAKE", "MODEL", "YEAR", "PRICE", "DEPOSIT", "STATUS"
    )?;
    writeln!(out, "{}", "-".repeat(78))?;
    for v in vehicles {
        writeln!(
            out,
            "{:<12} {:<10} {:<16} {:>4} {:>10} {:>10} {}",
            v.registration,
            truncate(&v.make, 10),
            truncate(&v.model, 16),
            v.year,
            v.rental_price.to_string(),
            v.deposit.to_string(),
            v.status()
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
