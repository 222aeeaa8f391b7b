//! Agência: a terminal admin dashboard for a travel agency's vehicles,
//! drivers and trips.

pub mod app;
pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod listview;
pub mod logging;
pub mod modules;
pub mod pages;
pub mod runtime;
pub mod ui;
