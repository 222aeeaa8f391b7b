use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::status::{Status, TripStatus};
use crate::listview::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: u32,
    pub origin: String,
    pub destination: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Driver name, not a structural key
    pub driver: String,
    /// Vehicle plate, not a structural key
    pub vehicle: String,
    pub client: String,
    pub amount: Decimal,
    pub status: TripStatus,
}

impl Trip {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_time > self.end_time {
            return Err(DomainError::InvalidTripWindow {
                id: self.id,
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(DomainError::validation(
                "trip",
                self.id,
                "origin",
                "and destination are required",
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::validation(
                "trip",
                self.id,
                "amount",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

impl Record for Trip {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.origin.clone(),
            self.destination.clone(),
            self.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            self.end_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            self.driver.clone(),
            self.vehicle.clone(),
            self.client.clone(),
            self.amount.to_string(),
            self.status.label().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn trip() -> Trip {
        Trip {
            id: 1,
            origin: "São Paulo".to_string(),
            destination: "Rio de Janeiro".to_string(),
            start_time: at(20, 8),
            end_time: at(21, 18),
            driver: "João Silva".to_string(),
            vehicle: "ABC-1234".to_string(),
            client: "Empresa XYZ".to_string(),
            amount: Decimal::new(250000, 2),
            status: TripStatus::Scheduled,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(trip().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut t = trip();
        t.end_time = at(19, 8);
        assert!(matches!(
            t.validate(),
            Err(DomainError::InvalidTripWindow { id: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let mut t = trip();
        t.amount = Decimal::ZERO;
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("amount"));

        t.amount = Decimal::new(-100, 2);
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_zero_length_trip_is_allowed() {
        let mut t = trip();
        t.end_time = t.start_time;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_search_fields_keep_raw_amount() {
        let fields = trip().search_fields();
        assert!(fields.contains(&"2500.00".to_string()));
        assert!(fields.contains(&"2024-03-20T08:00:00".to_string()));
    }
}
