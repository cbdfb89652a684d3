use std::fmt;

use crate::fetch::FetchKind;

/// Errors surfaced by the map state layer.
///
/// None of these reach the user as a message; they are logged and the
/// affected widget stays disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum SnodasError {
    /// A `YYYY-MM-DD` string from the tile-date listing did not parse.
    InvalidDate(String),
    /// An initializer needed the available-dates index and it was missing or empty.
    NoAvailableDates,
    /// Day-of-year picker text such as `"05 April"` did not parse.
    InvalidDayOfYear(String),
    InvalidMonth(String),
    UnknownVariable(String),
    /// A GeoJSON payload could not be decoded.
    GeoJson(String),
    /// The page's JSON config element did not parse.
    InvalidConfig(String),
    /// A fetch completed after a newer request of the same kind was issued.
    StaleResponse(FetchKind),
}

impl fmt::Display for SnodasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnodasError::InvalidDate(s) => write!(f, "Invalid date: {}", s),
            SnodasError::NoAvailableDates => write!(f, "No available SNODAS dates loaded"),
            SnodasError::InvalidDayOfYear(s) => write!(f, "Invalid day of year: {}", s),
            SnodasError::InvalidMonth(s) => write!(f, "Invalid month: {}", s),
            SnodasError::UnknownVariable(s) => write!(f, "Unknown SNODAS variable: {}", s),
            SnodasError::GeoJson(s) => write!(f, "GeoJSON error: {}", s),
            SnodasError::InvalidConfig(s) => write!(f, "Invalid map config: {}", s),
            SnodasError::StaleResponse(kind) => {
                write!(f, "Stale {} response discarded", kind.as_str())
            }
        }
    }
}

impl std::error::Error for SnodasError {}

impl From<serde_json::Error> for SnodasError {
    fn from(e: serde_json::Error) -> Self {
        SnodasError::GeoJson(e.to_string())
    }
}
