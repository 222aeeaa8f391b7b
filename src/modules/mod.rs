//! Feature modules built on top of the record snapshots
//!
//! - dashboard: stat cards and the trips-per-month series
//! - export: CSV/JSON export of the current filtered list

pub mod dashboard;
pub mod export;
