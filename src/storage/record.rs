use std::fmt;

use crate::domain::{InvalidState, Money, Vehicle};

/// Number of fields in one snapshot line:
/// `make,model,year,rentalPrice,deposit,registrationId,isRented,isInService`
pub const FIELD_COUNT: usize = 8;

/// Field separator. Fields are never quoted or escaped.
pub const DELIMITER: u8 = b',';

/// Turn a vehicle into its eight snapshot fields.
/// Both flags are derived from the one status, so at most one is `True`.
pub fn encode_record(vehicle: &Vehicle) -> [String; FIELD_COUNT] {
    [
        vehicle.make.clone(),
        vehicle.model.clone(),
        vehicle.year.to_string(),
        vehicle.rental_price.to_string(),
        vehicle.deposit.to_string(),
        vehicle.registration.clone(),
        format_flag(vehicle.is_rented()).to_string(),
        format_flag(vehicle.is_in_service()).to_string(),
    ]
}

/// Rebuild a vehicle from its snapshot fields.
///
/// The status is replayed through the regular transitions: a rented flag
/// goes through `rent()`, then an in-service flag through `mark_in_service()`,
/// so in-service wins when both flags are set.
pub fn decode_record(fields: &[&str]) -> Result<Vehicle, MalformedRecord> {
    let [make, model, year, price, deposit, registration, rented, in_service] = fields else {
        return Err(MalformedRecord::FieldCount {
            found: fields.len(),
        });
    };

    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| MalformedRecord::invalid("year", year))?;
    let rental_price = Money::parse_amount(price)
        .map_err(|_| MalformedRecord::invalid("rental price", price))?;
    let deposit = Money::parse_amount(deposit)
        .map_err(|_| MalformedRecord::invalid("deposit", deposit))?;
    let rented = parse_flag(rented).ok_or_else(|| MalformedRecord::invalid("rented flag", rented))?;
    let in_service = parse_flag(in_service)
        .ok_or_else(|| MalformedRecord::invalid("in-service flag", in_service))?;

    let mut vehicle = Vehicle::new(*make, *model, year, rental_price, deposit, *registration);
    if rented {
        vehicle.rent().map_err(MalformedRecord::Replay)?;
    }
    if in_service {
        vehicle.mark_in_service();
    }
    Ok(vehicle)
}

fn format_flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn parse_flag(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A snapshot line that does not describe a valid vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    FieldCount { found: usize },
    InvalidField { field: &'static str, value: String },
    /// The stored flags could not be replayed onto a new vehicle
    Replay(InvalidState),
    Unreadable(String),
}

impl MalformedRecord {
    fn invalid(field: &'static str, value: &str) -> Self {
        MalformedRecord::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRecord::FieldCount { found } => {
                write!(f, "expected {} fields, found {}", FIELD_COUNT, found)
            }
            MalformedRecord::InvalidField { field, value } => {
                write!(f, "invalid {}: '{}'", field, value)
            }
            MalformedRecord::Replay(reason) => write!(f, "cannot restore status: {}", reason),
            MalformedRecord::Unreadable(reason) => write!(f, "unreadable line: {}", reason),
        }
    }
}

impl std::error::Error for MalformedRecord {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleStatus;

    fn tesla() -> Vehicle {
        Vehicle::new(
            "Tesla",
            "Model S Plaid",
            2022,
            Money::from_units(1000),
            Money::from_units(9000),
            "WI KT4821",
        )
    }

    fn fabia(price: &str, rented: &str, in_service: &str) -> Result<Vehicle, MalformedRecord> {
        decode_record(&[
            "Skoda",
            "Fabia",
            "2022",
            price,
            "2000",
            "WI AA1111",
            rented,
            in_service,
        ])
    }

    #[test]
    fn test_encode_available_vehicle() {
        assert_eq!(
            encode_record(&tesla()),
            [
                "Tesla",
                "Model S Plaid",
                "2022",
                "1000.00",
                "9000.00",
                "WI KT4821",
                "False",
                "False"
            ]
        );
    }

    #[test]
    fn test_flags_follow_status() {
        let mut car = tesla();
        car.rent().unwrap();
        let fields = encode_record(&car);
        assert_eq!([fields[6].as_str(), fields[7].as_str()], ["True", "False"]);

        car.mark_in_service();
        let fields = encode_record(&car);
        assert_eq!([fields[6].as_str(), fields[7].as_str()], ["False", "True"]);
    }

    #[test]
    fn test_decode_restores_fields_and_status() {
        let car = decode_record(&[
            "BMW",
            "M3 Competition",
            "2022",
            "900",
            "5000",
            "WI AB1234",
            "True",
            "False",
        ])
        .unwrap();
        assert_eq!(car.make, "BMW");
        assert_eq!(car.rental_price, Money::from_units(900));
        assert_eq!(car.deposit, Money::from_units(5000));
        assert_eq!(car.registration, "WI AB1234");
        assert_eq!(car.status(), VehicleStatus::Rented);
    }

    #[test]
    fn test_decode_what_encode_produced() {
        let mut car = tesla();
        car.mark_in_service();
        let fields = encode_record(&car);
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();

        assert_eq!(decode_record(&fields), Ok(car));
    }

    #[test]
    fn test_flags_are_case_insensitive() {
        let car = fabia("300", "false", "TRUE").unwrap();
        assert_eq!(car.status(), VehicleStatus::InService);
    }

    #[test]
    fn test_in_service_wins_over_rented() {
        let car = fabia("300", "True", "True").unwrap();
        assert_eq!(car.status(), VehicleStatus::InService);
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            decode_record(&["Skoda", "Fabia", "2022", "300", "2000"]),
            Err(MalformedRecord::FieldCount { found: 5 })
        );
        assert_eq!(
            decode_record(&["a", "b", "2022", "1", "1", "WI AA1111", "False", "False", "extra"]),
            Err(MalformedRecord::FieldCount { found: 9 })
        );
    }

    #[test]
    fn test_invalid_typed_fields() {
        let err = decode_record(&[
            "Skoda", "Fabia", "twenty", "300", "2000", "WI AA1111", "False", "False",
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid year: 'twenty'");

        assert!(matches!(
            fabia("3o0", "False", "False"),
            Err(MalformedRecord::InvalidField {
                field: "rental price",
                ..
            })
        ));
        assert!(matches!(
            fabia("300", "yes", "False"),
            Err(MalformedRecord::InvalidField {
                field: "rented flag",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_amounts_are_malformed() {
        assert_eq!(
            fabia("-300", "False", "False"),
            Err(MalformedRecord::InvalidField {
                field: "rental price",
                value: "-300".to_string()
            })
        );

        let err = decode_record(&[
            "Skoda", "Fabia", "2022", "300", "-1", "WI AA1111", "False", "False",
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid deposit: '-1'");
    }

    #[test]
    fn test_extra_decimals_are_rounded() {
        let car = fabia("300.005", "False", "False").unwrap();
        assert_eq!(car.rental_price, Money::from_cents(30001));
    }

    #[test]
    fn test_text_fields_are_kept_verbatim() {
        let car = decode_record(&[
            "Skoda ", "Fabia", "2022", "300", "2000", "wi aa1111", "False", "False",
        ])
        .unwrap();
        assert_eq!(car.make, "Skoda ");
        assert_eq!(car.registration, "wi aa1111");
    }
}
