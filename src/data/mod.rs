//! Record datasets and the sources that serve them

mod source;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{plate_key, DomainError, Driver, RecordKind, Trip, Vehicle};
use crate::listview::Record;

pub use source::{RecordSource, SeedFileSource, Snapshot, SourceError, StaticSource};

const BUILTIN_SEED: &str = include_str!("../../seed/agencia.toml");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("duplicate {noun} id {id}")]
    DuplicateId { noun: &'static str, id: u32 },
}

/// All three record collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
}

/// A trip field that names no known record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingRef {
    Driver { trip: u32, name: String },
    Vehicle { trip: u32, plate: String },
}

impl std::fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DanglingRef::Driver { trip, name } => {
                write!(f, "trip #{trip} references unknown driver {name:?}")
            }
            DanglingRef::Vehicle { trip, plate } => {
                write!(f, "trip #{trip} references unknown vehicle {plate:?}")
            }
        }
    }
}

impl Dataset {
    /// The dataset shipped with the binary
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_toml_str(BUILTIN_SEED)
    }

    /// Parse and validate a TOML seed document
    pub fn from_toml_str(input: &str) -> Result<Self, DataError> {
        let dataset: Dataset = toml::from_str(input).map_err(|err| {
            // Unknown status values surface here through the status `TryFrom`
            tracing::error!(error = %err, "rejected seed data");
            DataError::from(err)
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        unique_ids("vehicle", &self.vehicles)?;
        unique_ids("driver", &self.drivers)?;
        unique_ids("trip", &self.trips)?;

        for vehicle in &self.vehicles {
            vehicle.validate()?;
        }
        for driver in &self.drivers {
            driver.validate()?;
        }
        for trip in &self.trips {
            trip.validate()?;
        }
        Ok(())
    }

    /// Trip driver and vehicle fields that resolve to no record.
    ///
    /// Plates are compared without separators and case, so `ABC-1234`
    /// resolves to `ABC1234`.
    pub fn dangling_references(&self) -> Vec<DanglingRef> {
        let plates: HashSet<String> = self.vehicles.iter().map(Vehicle::plate_key).collect();
        let names: HashSet<&str> = self.drivers.iter().map(|d| d.name.trim()).collect();

        let mut dangling = Vec::new();
        for trip in &self.trips {
            if !names.contains(trip.driver.trim()) {
                dangling.push(DanglingRef::Driver {
                    trip: trip.id,
                    name: trip.driver.clone(),
                });
            }
            if !plates.contains(&plate_key(&trip.vehicle)) {
                dangling.push(DanglingRef::Vehicle {
                    trip: trip.id,
                    plate: trip.vehicle.clone(),
                });
            }
        }
        dangling
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Vehicles => self.vehicles.len(),
            RecordKind::Drivers => self.drivers.len(),
            RecordKind::Trips => self.trips.len(),
        }
    }

    pub fn snapshot(&self, kind: RecordKind) -> Snapshot {
        match kind {
            RecordKind::Vehicles => Snapshot::Vehicles(self.vehicles.clone()),
            RecordKind::Drivers => Snapshot::Drivers(self.drivers.clone()),
            RecordKind::Trips => Snapshot::Trips(self.trips.clone()),
        }
    }

    /// Log counts and dangling soft references
    pub fn log_summary(&self) {
        tracing::info!(
            vehicles = self.vehicles.len(),
            drivers = self.drivers.len(),
            trips = self.trips.len(),
            "dataset loaded"
        );
        for dangling in self.dangling_references() {
            match dangling {
                DanglingRef::Driver { trip, name } => {
                    tracing::warn!(trip, driver = %name, "trip references unknown driver")
                }
                DanglingRef::Vehicle { trip, plate } => {
                    tracing::warn!(trip, vehicle = %plate, "trip references unknown vehicle")
                }
            }
        }
    }
}

fn unique_ids<T: Record>(noun: &'static str, records: &[T]) -> Result<(), DataError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(DataError::DuplicateId {
                noun,
                id: record.id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIP: &str = r#"
[[trips]]
id = 7
origin = "A"
destination = "B"
start_time = "2024-03-20T08:00:00"
end_time = "2024-03-21T18:00:00"
driver = "Nobody"
vehicle = "zzz-0000"
client = "C"
amount = "10.00"
status = "scheduled"
"#;

    #[test]
    fn test_builtin_seed_is_valid() {
        let dataset = Dataset::builtin().unwrap();
        assert_eq!(dataset.vehicles.len(), 3);
        assert_eq!(dataset.drivers.len(), 3);
        assert_eq!(dataset.trips.len(), 6);
        assert!(dataset.dangling_references().is_empty());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let input = format!("{TRIP}\n{TRIP}");
        assert!(matches!(
            Dataset::from_toml_str(&input),
            Err(DataError::DuplicateId { noun: "trip", id: 7 })
        ));
    }

    #[test]
    fn test_inverted_trip_window_is_rejected() {
        let input = TRIP.replace("2024-03-21T18:00:00", "2024-03-19T18:00:00");
        assert!(matches!(
            Dataset::from_toml_str(&input),
            Err(DataError::Domain(DomainError::InvalidTripWindow { id: 7, .. }))
        ));
    }

    #[test]
    fn test_unknown_status_is_a_parse_error() {
        let input = TRIP.replace("\"scheduled\"", "\"lost\"");
        assert!(matches!(
            Dataset::from_toml_str(&input),
            Err(DataError::Parse(_))
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_status_is_logged_as_error() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let input = TRIP.replace("\"scheduled\"", "\"lost\"");
        let result = tracing::subscriber::with_default(subscriber, || Dataset::from_toml_str(&input));
        assert!(result.is_err());

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("rejected seed data"));
        assert!(output.contains("lost"));
    }

    #[test]
    fn test_dangling_references() {
        let dataset = Dataset::from_toml_str(TRIP).unwrap();
        assert_eq!(
            dataset.dangling_references(),
            vec![
                DanglingRef::Driver {
                    trip: 7,
                    name: "Nobody".to_string()
                },
                DanglingRef::Vehicle {
                    trip: 7,
                    plate: "zzz-0000".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("agencia-missing-seed-file.toml");
        assert!(matches!(Dataset::load(&path), Err(DataError::Io { .. })));
    }
}
