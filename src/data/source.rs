//! Record sources served to the refresh worker

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::{DataError, Dataset};
use crate::domain::{Driver, RecordKind, Trip, Vehicle};

/// A freshly fetched collection
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Vehicles(Vec<Vehicle>),
    Drivers(Vec<Driver>),
    Trips(Vec<Trip>),
}

impl Snapshot {
    pub fn kind(&self) -> RecordKind {
        match self {
            Snapshot::Vehicles(_) => RecordKind::Vehicles,
            Snapshot::Drivers(_) => RecordKind::Drivers,
            Snapshot::Trips(_) => RecordKind::Trips,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Vehicles(records) => records.len(),
            Snapshot::Drivers(records) => records.len(),
            Snapshot::Trips(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Where list pages get their records from
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, kind: RecordKind) -> Result<Snapshot, SourceError>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Serves an in-memory dataset, optionally after a simulated delay
#[derive(Debug, Clone)]
pub struct StaticSource {
    dataset: Dataset,
    latency: Duration,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self, kind: RecordKind) -> Result<Snapshot, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.dataset.snapshot(kind))
    }

    fn describe(&self) -> String {
        "built-in dataset".to_string()
    }
}

/// Re-reads a TOML seed file on every fetch
#[derive(Debug, Clone)]
pub struct SeedFileSource {
    path: PathBuf,
}

impl SeedFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for SeedFileSource {
    async fn fetch(&self, kind: RecordKind) -> Result<Snapshot, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DataError::Io {
                path: self.path.clone(),
                source,
            })?;
        let dataset = Dataset::from_toml_str(&content)?;
        Ok(dataset.snapshot(kind))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
