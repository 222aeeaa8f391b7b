//! Refresh runtime: a Tokio worker behind a synchronous bridge

mod bridge;
mod tracker;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use tracker::FetchTracker;
pub use worker::run_async_worker;
