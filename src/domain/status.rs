//! Closed status enumerations and their badge mapping

use serde::{Deserialize, Serialize};

use super::error::{status_key, DomainError};

/// Badge colour families used by status cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Green,
    Amber,
    Red,
    Blue,
}

/// A status enumeration that can be rendered as a badge.
///
/// Implementations map every variant with an exhaustive `match`, so adding a
/// variant without a badge is a compile error.
pub trait Status: Copy {
    fn label(&self) -> &'static str;
    fn badge(&self) -> Badge;
}

/// Availability shared by vehicles and drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Availability {
    Available,
    OnTrip,
}

pub type VehicleStatus = Availability;
pub type DriverStatus = Availability;

impl Availability {
    pub const ALL: [Availability; 2] = [Availability::Available, Availability::OnTrip];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::OnTrip => "on_trip",
        }
    }
}

impl Status for Availability {
    fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::OnTrip => "On Trip",
        }
    }

    fn badge(&self) -> Badge {
        match self {
            Availability::Available => Badge::Green,
            Availability::OnTrip => Badge::Amber,
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match status_key(value).as_str() {
            "available" | "disponivel" => Ok(Availability::Available),
            "on_trip" | "ontrip" | "em_viagem" | "em_uso" => Ok(Availability::OnTrip),
            _ => Err(DomainError::UnknownStatus {
                entity: "availability",
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Availability> for &'static str {
    fn from(status: Availability) -> Self {
        status.as_str()
    }
}

/// Lifecycle of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Scheduled,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the trip contributes to revenue.
    pub fn is_billable(&self) -> bool {
        !matches!(self, TripStatus::Cancelled)
    }
}

impl Status for TripStatus {
    fn label(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "Scheduled",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    fn badge(&self) -> Badge {
        match self {
            TripStatus::Scheduled | TripStatus::Completed => Badge::Blue,
            TripStatus::InProgress => Badge::Amber,
            TripStatus::Cancelled => Badge::Red,
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match status_key(value).as_str() {
            "scheduled" | "agendada" => Ok(TripStatus::Scheduled),
            "in_progress" | "inprogress" | "em_andamento" => Ok(TripStatus::InProgress),
            "completed" | "concluida" => Ok(TripStatus::Completed),
            "cancelled" | "canceled" | "cancelada" => Ok(TripStatus::Cancelled),
            _ => Err(DomainError::UnknownStatus {
                entity: "trip",
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TripStatus {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TripStatus> for &'static str {
    fn from(status: TripStatus) -> Self {
        status.as_str()
    }
}
