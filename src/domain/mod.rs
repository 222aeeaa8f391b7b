//! Fleet records: vehicles, drivers and trips
//!
//! Records are flat, identified by a `u32` unique within their collection,
//! and carry a status drawn from a closed enumeration.

mod driver;
mod error;
mod status;
mod trip;
mod vehicle;

pub use driver::{Driver, LicenseCategory};
pub use error::DomainError;
pub use status::{Availability, Badge, DriverStatus, Status, TripStatus, VehicleStatus};
pub use trip::Trip;
pub use vehicle::{plate_key, Vehicle};

/// The three record collections the dashboard manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Vehicles,
    Drivers,
    Trips,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Vehicles, RecordKind::Drivers, RecordKind::Trips];

    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Vehicles => "Vehicles",
            RecordKind::Drivers => "Drivers",
            RecordKind::Trips => "Trips",
        }
    }

    /// Singular noun used in messages
    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::Vehicles => "vehicle",
            RecordKind::Drivers => "driver",
            RecordKind::Trips => "trip",
        }
    }

    /// Stem for export file names
    pub fn slug(&self) -> &'static str {
        match self {
            RecordKind::Vehicles => "vehicles",
            RecordKind::Drivers => "drivers",
            RecordKind::Trips => "trips",
        }
    }
}
