//! Cell values and prescale values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// Tables carry arbitrary extra columns through classification and
/// regeneration verbatim, so cells stay close to whatever the I/O layer
/// handed over: a string, a number, or nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl CellValue {
    /// The cell's text content, if it is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The cell's numeric content. Text cells holding a number parse through.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => Ok(()),
        }
    }
}

/// A seed's prescale value.
///
/// Non-negative; 0 means the seed is effectively disabled and is excluded
/// from backup/signal accounting unless explicitly retained.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Prescale(u64);

impl Prescale {
    pub const DISABLED: Prescale = Prescale(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_disabled(&self) -> bool {
        self.0 == 0
    }

    /// Parse a prescale from a table cell.
    ///
    /// Accepts non-negative integral numbers, numeric strings, and the
    /// `"disabled"` sentinel (case-insensitive, mapped to 0). Anything else
    /// yields `None`; the row is then skipped from classification rather than
    /// failing the run.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64 => {
                Some(Self(*n as u64))
            }
            CellValue::Number(_) => None,
            CellValue::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("disabled") {
                    return Some(Self::DISABLED);
                }
                if let Ok(v) = s.parse::<u64>() {
                    return Some(Self(v));
                }
                match s.parse::<f64>() {
                    Ok(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
                        Some(Self(n as u64))
                    }
                    _ => None,
                }
            }
            CellValue::Empty => None,
        }
    }
}

impl From<u64> for Prescale {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Prescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
