//! Index of the dates for which SNODAS tiles exist.
//!
//! The tile-date endpoint returns a flat list of `YYYY-MM-DD` strings. The
//! pickers only need "is this year/month/day selectable" plus the overall
//! bounds, so the list is folded into year → month → days once on load.

use chrono::{Datelike, NaiveDate, TimeDelta};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::SnodasError;

/// Date format used by the tile-date listing and the tile date picker.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default date-range query window, in days (inclusive).
pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// The coarsest part of a picked date that has no tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    Year(i32),
    /// Any day of that month; only year and month matter.
    Month(NaiveDate),
    Day(NaiveDate),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::Year(year) => write!(f, "No SNODAS data for {}", year),
            Unavailable::Month(date) => write!(f, "No SNODAS data for {}", date.format("%B %Y")),
            Unavailable::Day(date) => write!(f, "No SNODAS data for {}", date.format(DATE_FORMAT)),
        }
    }
}

/// Nested year → month → day index of available tile dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableDates(BTreeMap<i32, BTreeMap<u32, BTreeSet<u32>>>);

impl AvailableDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from the raw listing.
    ///
    /// Any unparseable entry fails the whole listing; a partial index would
    /// make the pickers offer dates that have no tiles.
    pub fn from_date_strings<I, S>(dates: I) -> Result<Self, SnodasError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = AvailableDates::new();
        for raw in dates {
            let raw = raw.as_ref().trim();
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| SnodasError::InvalidDate(raw.to_string()))?;
            index.insert(date);
        }
        Ok(index)
    }

    /// Parse the JSON body of the tile-date endpoint.
    pub fn from_json(body: &str) -> Result<Self, SnodasError> {
        let dates: Vec<String> = serde_json::from_str(body)
            .map_err(|e| SnodasError::InvalidDate(e.to_string()))?;
        Self::from_date_strings(dates)
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.0
            .entry(date.year())
            .or_default()
            .entry(date.month())
            .or_default()
            .insert(date.day());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest available date: smallest day of the smallest month of the smallest year.
    pub fn min_date(&self) -> Option<NaiveDate> {
        let (year, months) = self.0.first_key_value()?;
        let (month, days) = months.first_key_value()?;
        let day = days.first()?;
        NaiveDate::from_ymd_opt(*year, *month, *day)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        let (year, months) = self.0.last_key_value()?;
        let (month, days) = months.last_key_value()?;
        let day = days.last()?;
        NaiveDate::from_ymd_opt(*year, *month, *day)
    }

    /// Both bounds, or `NoAvailableDates` when the index is empty.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), SnodasError> {
        match (self.min_date(), self.max_date()) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(SnodasError::NoAvailableDates),
        }
    }

    /// Every year from the first to the last available year, inclusive.
    ///
    /// Gap years are included so the day-of-year dropdowns stay contiguous.
    pub fn year_span(&self) -> Vec<i32> {
        match (self.0.first_key_value(), self.0.last_key_value()) {
            (Some((first, _)), Some((last, _))) => (*first..=*last).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_year_available(&self, year: i32) -> bool {
        self.0.contains_key(&year)
    }

    pub fn is_month_available(&self, year: i32, month: u32) -> bool {
        self.0
            .get(&year)
            .map(|months| months.contains_key(&month))
            .unwrap_or(false)
    }

    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.0
            .get(&date.year())
            .and_then(|months| months.get(&date.month()))
            .map(|days| days.contains(&date.day()))
            .unwrap_or(false)
    }

    /// Check a picked date year first, then month, then day.
    pub fn check(&self, date: NaiveDate) -> Result<(), Unavailable> {
        if !self.is_year_available(date.year()) {
            Err(Unavailable::Year(date.year()))
        } else if !self.is_month_available(date.year(), date.month()) {
            Err(Unavailable::Month(date))
        } else if !self.is_date_available(date) {
            Err(Unavailable::Day(date))
        } else {
            Ok(())
        }
    }

    /// Default range for date-range queries: the week ending on the latest date.
    pub fn default_range(&self) -> Result<(NaiveDate, NaiveDate), SnodasError> {
        let (_, max) = self.bounds()?;
        let start = max - TimeDelta::days(DEFAULT_RANGE_DAYS - 1);
        Ok((start, max))
    }

    /// Available days of one month, ascending.
    pub fn days_in(&self, year: i32, month: u32) -> Vec<u32> {
        self.0
            .get(&year)
            .and_then(|months| months.get(&month))
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of distinct dates in the index.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|months| months.values())
            .map(|days| days.len())
            .sum()
    }
}
