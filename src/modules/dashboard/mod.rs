//! Dashboard stat cards derived from the current snapshots

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{Availability, Driver, Trip, TripStatus, Vehicle};

/// Months shown in the trips sparkline
pub const SERIES_MONTHS: usize = 6;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `03/2024`
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub month: Month,
    pub amount: Decimal,
    pub previous: Decimal,
    /// Percentage change against the previous month; `None` when that month
    /// had no revenue
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub trips_in_progress: usize,
    pub vehicles_available: usize,
    pub vehicles_total: usize,
    pub drivers_on_trip: usize,
    pub drivers_total: usize,
    pub expired_licenses: usize,
    pub revenue: Option<MonthlyRevenue>,
    /// Trips started per month, oldest first
    pub trips_per_month: Vec<(Month, u64)>,
}

impl DashboardStats {
    pub fn compute(vehicles: &[Vehicle], drivers: &[Driver], trips: &[Trip], today: NaiveDate) -> Self {
        let reference = trips.iter().map(|t| Month::of(t.start_time.date())).max();

        Self {
            trips_in_progress: trips
                .iter()
                .filter(|t| t.status == TripStatus::InProgress)
                .count(),
            vehicles_available: vehicles
                .iter()
                .filter(|v| v.status == Availability::Available)
                .count(),
            vehicles_total: vehicles.len(),
            drivers_on_trip: drivers
                .iter()
                .filter(|d| d.status == Availability::OnTrip)
                .count(),
            drivers_total: drivers.len(),
            expired_licenses: drivers.iter().filter(|d| d.license_expired(today)).count(),
            revenue: reference.map(|month| monthly_revenue(trips, month)),
            trips_per_month: reference
                .map(|month| trips_series(trips, month))
                .unwrap_or_default(),
        }
    }

    /// Share of the fleet that is available, in `0.0..=1.0`
    pub fn availability_ratio(&self) -> f64 {
        if self.vehicles_total == 0 {
            0.0
        } else {
            self.vehicles_available as f64 / self.vehicles_total as f64
        }
    }

    pub fn series_values(&self) -> Vec<u64> {
        self.trips_per_month.iter().map(|(_, count)| *count).collect()
    }
}

fn revenue_in(trips: &[Trip], month: Month) -> Decimal {
    trips
        .iter()
        .filter(|t| t.status.is_billable() && Month::of(t.start_time.date()) == month)
        .map(|t| t.amount)
        .sum()
}

fn monthly_revenue(trips: &[Trip], month: Month) -> MonthlyRevenue {
    let amount = revenue_in(trips, month);
    let previous = revenue_in(trips, month.previous());
    let delta = if previous.is_zero() {
        None
    } else {
        ((amount - previous) / previous * Decimal::ONE_HUNDRED).to_f64()
    };
    MonthlyRevenue {
        month,
        amount,
        previous,
        delta,
    }
}

fn trips_series(trips: &[Trip], last: Month) -> Vec<(Month, u64)> {
    let mut months = Vec::with_capacity(SERIES_MONTHS);
    let mut month = last;
    for _ in 0..SERIES_MONTHS {
        months.push(month);
        month = month.previous();
    }
    months.reverse();
    months
        .into_iter()
        .map(|month| {
            let count = trips
                .iter()
                .filter(|t| Month::of(t.start_time.date()) == month)
                .count() as u64;
            (month, count)
        })
        .collect()
}
