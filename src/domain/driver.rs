use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::status::{DriverStatus, Status};
use crate::listview::Record;

/// Brazilian driving license (CNH) categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LicenseCategory {
    A,
    B,
    C,
    D,
    E,
}

impl LicenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseCategory::A => "A",
            LicenseCategory::B => "B",
            LicenseCategory::C => "C",
            LicenseCategory::D => "D",
            LicenseCategory::E => "E",
        }
    }
}

impl std::str::FromStr for LicenseCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(LicenseCategory::A),
            "B" => Ok(LicenseCategory::B),
            "C" => Ok(LicenseCategory::C),
            "D" => Ok(LicenseCategory::D),
            "E" => Ok(LicenseCategory::E),
            _ => Err(DomainError::UnknownCategory(value.to_string())),
        }
    }
}

impl TryFrom<String> for LicenseCategory {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LicenseCategory> for &'static str {
    fn from(category: LicenseCategory) -> Self {
        category.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u32,
    pub name: String,
    /// CPF
    pub national_id: String,
    /// CNH number
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry: NaiveDate,
    pub status: DriverStatus,
}

impl Driver {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("driver", self.id, "name", "is required"));
        }
        if self.national_id.trim().is_empty() {
            return Err(DomainError::validation(
                "driver",
                self.id,
                "national_id",
                "is required",
            ));
        }
        if self.license_number.trim().is_empty() {
            return Err(DomainError::validation(
                "driver",
                self.id,
                "license_number",
                "is required",
            ));
        }
        Ok(())
    }

    pub fn license_expired(&self, today: NaiveDate) -> bool {
        self.license_expiry < today
    }
}

impl Record for Driver {
    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.national_id.clone(),
            self.license_number.clone(),
            self.license_category.as_str().to_string(),
            self.license_expiry.to_string(),
            self.status.label().to_string(),
        ]
    }
}
