use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::status::{Status, VehicleStatus};
use crate::listview::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub year: i32,
    /// Body type as registered ("Van", "Ônibus", "Micro-ônibus", ...)
    pub kind: String,
    /// Seats
    pub capacity: u32,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.plate.trim().is_empty() {
            return Err(DomainError::validation("vehicle", self.id, "plate", "is required"));
        }
        if self.model.trim().is_empty() || self.brand.trim().is_empty() {
            return Err(DomainError::validation(
                "vehicle",
                self.id,
                "model",
                "and brand are required",
            ));
        }
        if self.year < 1900 || self.year > Local::now().year() {
            return Err(DomainError::validation(
                "vehicle",
                self.id,
                "year",
                format!("{} is out of range", self.year),
            ));
        }
        if self.capacity == 0 {
            return Err(DomainError::validation(
                "vehicle",
                self.id,
                "capacity",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Plate with separators removed, used to resolve soft references.
    pub fn plate_key(&self) -> String {
        plate_key(&self.plate)
    }
}

pub fn plate_key(plate: &str) -> String {
    plate
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

impl Record for Vehicle {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.plate.clone(),
            self.model.clone(),
            self.brand.clone(),
            self.year.to_string(),
            self.kind.clone(),
            self.capacity.to_string(),
            self.status.label().to_string(),
        ]
    }
}
