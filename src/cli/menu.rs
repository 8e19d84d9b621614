use std::io::{BufRead, Write};

use anyhow::Result;

use super::write_vehicle_table;
use crate::application::{AppError, FleetSession};
use crate::domain::{Vehicle, VehicleStatus};

/// The operator login the menu accepts.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    fn matches(&self, user: &str, password: &str) -> bool {
        self.user == user && self.password == password
    }
}

type StatusChange = for<'s> fn(&'s mut FleetSession, &str) -> Result<&'s Vehicle, AppError>;

/// Line-oriented interactive menu. Reads choices from `input`, writes
/// everything to `output`; end of input ends the session.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the banner and ask for credentials. Returns whether they matched.
    pub fn login(&mut self, credentials: &Credentials) -> Result<bool> {
        writeln!(self.output, "********************************")?;
        writeln!(self.output, "*                              *")?;
        writeln!(self.output, "*           CARWAVE            *")?;
        writeln!(self.output, "*                              *")?;
        writeln!(self.output, "********************************")?;

        let user = self.prompt("Login: ")?.unwrap_or_default();
        let password = self.prompt("Password: ")?.unwrap_or_default();

        if credentials.matches(&user, &password) {
            writeln!(self.output, "Welcome, {}!", user)?;
            Ok(true)
        } else {
            writeln!(self.output, "Invalid login or password.")?;
            Ok(false)
        }
    }

    pub fn run(&mut self, session: &mut FleetSession) -> Result<()> {
        loop {
            self.write_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };

            match choice.trim() {
                "1" => self.list("All Vehicles", session.registry().all())?,
                "2" => self.list("Available Vehicles", session.registry().available())?,
                "3" => self.list("Rented Vehicles", session.registry().rented())?,
                "4" => self.list("Vehicles in Service", session.registry().in_service())?,
                "5" => self.rent(session)?,
                "6" => self.change_status(
                    session,
                    "Send a Vehicle to Service",
                    VehicleStatus::Available,
                    FleetSession::send_to_service,
                )?,
                "7" => self.change_status(
                    session,
                    "Return a Vehicle",
                    VehicleStatus::Rented,
                    FleetSession::return_vehicle,
                )?,
                "8" => self.change_status(
                    session,
                    "Mark a Vehicle Serviceable",
                    VehicleStatus::InService,
                    FleetSession::mark_serviceable,
                )?,
                "9" => {
                    writeln!(self.output, "\n--- Company Finances ---")?;
                    writeln!(self.output, "Rental revenue: {}", session.revenue())?;
                }
                "10" => match session.save() {
                    Ok(count) => writeln!(
                        self.output,
                        "Fleet saved to {} ({} vehicles).",
                        session.snapshot_path().display(),
                        count
                    )?,
                    Err(e) => writeln!(self.output, "Error: {}", e)?,
                },
                "0" => break,
                _ => writeln!(self.output, "Invalid choice, try again.")?,
            }
        }
        Ok(())
    }

    fn write_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Main Menu ---")?;
        writeln!(self.output, "1. List all vehicles")?;
        writeln!(self.output, "2. List available vehicles")?;
        writeln!(self.output, "3. List rented vehicles")?;
        writeln!(self.output, "4. List vehicles in service")?;
        writeln!(self.output, "5. Rent a vehicle")?;
        writeln!(self.output, "6. Send a vehicle to service")?;
        writeln!(self.output, "7. Return a vehicle")?;
        writeln!(self.output, "8. Mark a vehicle serviceable")?;
        writeln!(self.output, "9. Company finances")?;
        writeln!(self.output, "10. Save fleet")?;
        writeln!(self.output, "0. Exit")?;
        self.output.flush()?;
        Ok(())
    }

    fn list<'a>(&mut self, title: &str, vehicles: impl Iterator<Item = &'a Vehicle>) -> Result<()> {
        writeln!(self.output, "\n--- {} ---", title)?;
        write_vehicle_table(&mut self.output, vehicles)?;
        Ok(())
    }

    fn rent(&mut self, session: &mut FleetSession) -> Result<()> {
        writeln!(self.output, "\n--- Rent a Vehicle ---")?;
        self.write_candidates(session.registry().available())?;
        let Some(registration) = self.prompt("Registration: ")? else {
            return Ok(());
        };

        match session.rent(&registration) {
            Ok(result) => writeln!(
                self.output,
                "{} {} is now rented. Added {} to revenue.",
                result.vehicle.make, result.vehicle.model, result.charged
            )?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn change_status(
        &mut self,
        session: &mut FleetSession,
        title: &str,
        candidates: VehicleStatus,
        action: StatusChange,
    ) -> Result<()> {
        writeln!(self.output, "\n--- {} ---", title)?;
        self.write_candidates(session.registry().with_status(candidates))?;
        let Some(registration) = self.prompt("Registration: ")? else {
            return Ok(());
        };

        match action(session, &registration) {
            Ok(vehicle) => writeln!(
                self.output,
                "{} {} is now {}.",
                vehicle.make,
                vehicle.model,
                vehicle.status()
            )?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn write_candidates<'a>(&mut self, vehicles: impl Iterator<Item = &'a Vehicle>) -> Result<()> {
        for v in vehicles {
            writeln!(self.output, "- {} {} ({})", v.make, v.model, v.registration)?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::application::FleetRegistry;
    use crate::domain::Money;

    fn credentials() -> Credentials {
        Credentials {
            user: "Grzegorz".into(),
            password: "35744".into(),
        }
    }

    fn session(path: &std::path::Path) -> FleetSession {
        let mut registry = FleetRegistry::new();
        registry.add(Vehicle::new(
            "Toyota",
            "Corolla",
            2022,
            Money::from_units(400),
            Money::from_units(5000),
            "WI AB1234",
        ));
        FleetSession::with_registry(registry, path)
    }

    fn drive(script: &str, session: &mut FleetSession) -> (bool, String) {
        let mut output = Vec::new();
        let mut menu = Menu::new(Cursor::new(script.as_bytes()), &mut output);
        let logged_in = menu.login(&credentials()).unwrap();
        if logged_in {
            menu.run(session).unwrap();
        }
        (logged_in, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir.path().join("fleet.txt"));

        let (logged_in, output) = drive("Grzegorz\nwrong\n", &mut session);

        assert!(!logged_in);
        assert!(output.contains("Invalid login or password."));
    }

    #[test]
    fn test_rent_then_finances() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir.path().join("fleet.txt"));

        let (_, output) = drive("Grzegorz\n35744\n5\nwi ab1234\n9\n0\n", &mut session);

        assert!(output.contains("Welcome, Grzegorz!"));
        assert!(output.contains("- Toyota Corolla (WI AB1234)"));
        assert!(output.contains("Toyota Corolla is now rented. Added 400.00 to revenue."));
        assert!(output.contains("Rental revenue: 400.00"));
        assert_eq!(session.revenue(), Money::from_units(400));
    }

    #[test]
    fn test_failed_rent_is_reported_and_session_continues() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir.path().join("fleet.txt"));

        let (_, output) = drive(
            "Grzegorz\n35744\n6\nWI AB1234\n5\nWI AB1234\n9\n",
            &mut session,
        );

        assert!(output.contains("Toyota Corolla is now in-service."));
        assert!(output.contains(
            "Error: Vehicle WI AB1234: vehicle is in service and cannot be rented"
        ));
        assert!(output.contains("Rental revenue: 0.00"));
    }

    #[test]
    fn test_save_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fleet.txt");
        let mut session = session(&path);

        let (_, output) = drive("Grzegorz\n35744\n10\n0\n", &mut session);

        assert!(output.contains("(1 vehicles)"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Toyota,Corolla,2022,400.00,5000.00,WI AB1234,False,False\n"
        );
    }

    #[test]
    fn test_unknown_choice() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir.path().join("fleet.txt"));

        let (_, output) = drive("Grzegorz\n35744\n42\n0\n", &mut session);
        assert!(output.contains("Invalid choice, try again."));
    }
}
