//! Column schema: how a record field becomes a table cell

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::domain::{Badge, Status};

/// Typed value extracted from a record by a column accessor
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Money(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Status { label: &'static str, badge: Badge },
    /// A value the table should highlight (expired license, ...)
    Flagged(Box<CellValue>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn status(status: impl Status) -> Self {
        CellValue::Status {
            label: status.label(),
            badge: status.badge(),
        }
    }

    pub fn flagged(self, flag: bool) -> Self {
        if flag {
            CellValue::Flagged(Box::new(self))
        } else {
            self
        }
    }

    pub fn badge(&self) -> Option<Badge> {
        match self {
            CellValue::Status { badge, .. } => Some(*badge),
            CellValue::Flagged(inner) => inner.badge(),
            _ => None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, CellValue::Flagged(_))
    }

    /// The value without any highlight wrapper
    pub fn inner(&self) -> &CellValue {
        match self {
            CellValue::Flagged(inner) => inner.inner(),
            other => other,
        }
    }
}

/// Raw representation; columns that need locale formatting supply a formatter.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Money(amount) => write!(f, "{amount}"),
            CellValue::Date(date) => write!(f, "{date}"),
            CellValue::DateTime(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
            CellValue::Status { label, .. } => f.write_str(label),
            CellValue::Flagged(inner) => inner.fmt(f),
        }
    }
}

/// A rendered table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub badge: Option<Badge>,
    pub flagged: bool,
}

type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;
type Formatter = Box<dyn Fn(&CellValue) -> String>;

/// One column of a record list: a label, a preferred width, an accessor and
/// an optional formatter.
pub struct Column<T> {
    label: &'static str,
    width: u16,
    accessor: Accessor<T>,
    formatter: Option<Formatter>,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, width: u16, accessor: impl Fn(&T) -> CellValue + 'static) -> Self {
        Self {
            label,
            width,
            accessor: Box::new(accessor),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: impl Fn(&CellValue) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    pub fn display(&self, value: &CellValue) -> String {
        match self.formatter.as_ref() {
            Some(formatter) => formatter(value),
            None => value.to_string(),
        }
    }

    pub fn cell(&self, record: &T) -> Cell {
        let value = self.value(record);
        Cell {
            text: self.display(&value),
            badge: value.badge(),
            flagged: value.is_flagged(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("width", &self.width)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
