//! SNODAS statistics query panel: mode selection, validation and link building.
//!
//! The panel never issues a request. It only computes the href of the submit
//! link, and keeps that link disabled until the active mode's inputs are
//! complete and consistent.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::available_dates::AvailableDates;
use crate::error::SnodasError;
use crate::feature::{FeatureId, SelectedPourpoint};

/// Date format used in date-range statistics links.
pub const LINK_DATE_FORMAT: &str = "%Y%m%d";

/// Label shown before any mode is chosen.
pub const NO_MODE_LABEL: &str = "Choose Query Type";

pub const DEFAULT_FORECAST_START: u32 = 4;
pub const DEFAULT_FORECAST_END: u32 = 7;

/// One widget group of a query form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PourpointTable,
    DateRange,
    DayOfYear,
    YearSpan,
    ForecastPeriod,
    Variable,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryModeKind {
    DateRange,
    DayOfYear,
    Regression,
}

impl QueryModeKind {
    pub const ALL: [QueryModeKind; 3] = [
        QueryModeKind::DateRange,
        QueryModeKind::DayOfYear,
        QueryModeKind::Regression,
    ];

    /// Stable key used as the `<option>` value of the mode dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryModeKind::DateRange => "date_range",
            QueryModeKind::DayOfYear => "doy",
            QueryModeKind::Regression => "regression",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryModeKind::DateRange => "SNODAS Values - Date Range",
            QueryModeKind::DayOfYear => "SNODAS Values - Doy Range",
            QueryModeKind::Regression => "SNODAS Streamflow Regression Tool",
        }
    }

    /// The form fragment rendered while this mode is active, in display order.
    pub fn fragment(&self) -> &'static [FormField] {
        match self {
            QueryModeKind::DateRange => &[
                FormField::PourpointTable,
                FormField::DateRange,
                FormField::Submit,
            ],
            QueryModeKind::DayOfYear => &[
                FormField::PourpointTable,
                FormField::DayOfYear,
                FormField::YearSpan,
                FormField::Submit,
            ],
            QueryModeKind::Regression => &[
                FormField::ForecastPeriod,
                FormField::Variable,
                FormField::DayOfYear,
                FormField::YearSpan,
                FormField::Submit,
            ],
        }
    }
}

impl FromStr for QueryModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryModeKind::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown query mode: {}", s))
    }
}

/// SNODAS raster variables offered by the regression tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnodasVariable {
    Depth,
    #[default]
    Swe,
    Runoff,
    Sublimation,
    SublimationBlowing,
    PrecipSolid,
    PrecipLiquid,
    AverageTemp,
}

impl SnodasVariable {
    pub const ALL: [SnodasVariable; 8] = [
        SnodasVariable::Depth,
        SnodasVariable::Swe,
        SnodasVariable::Runoff,
        SnodasVariable::Sublimation,
        SnodasVariable::SublimationBlowing,
        SnodasVariable::PrecipSolid,
        SnodasVariable::PrecipLiquid,
        SnodasVariable::AverageTemp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnodasVariable::Depth => "depth",
            SnodasVariable::Swe => "swe",
            SnodasVariable::Runoff => "runoff",
            SnodasVariable::Sublimation => "sublimation",
            SnodasVariable::SublimationBlowing => "sublimation_blowing",
            SnodasVariable::PrecipSolid => "precip_solid",
            SnodasVariable::PrecipLiquid => "precip_liquid",
            SnodasVariable::AverageTemp => "average_temp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SnodasVariable::Depth => "Snow Depth",
            SnodasVariable::Swe => "Snow Water Equivalent",
            SnodasVariable::Runoff => "Runoff",
            SnodasVariable::Sublimation => "Sublimation",
            SnodasVariable::SublimationBlowing => "Sublimation (Blowing)",
            SnodasVariable::PrecipSolid => "Precipitation (Solid)",
            SnodasVariable::PrecipLiquid => "Precipitation (Liquid)",
            SnodasVariable::AverageTemp => "Average Temperature",
        }
    }
}

impl FromStr for SnodasVariable {
    type Err = SnodasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnodasVariable::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| SnodasError::UnknownVariable(s.to_string()))
    }
}

/// Month number (1-12) from a full or abbreviated English month name.
pub fn month_from_name(name: &str) -> Result<u32, SnodasError> {
    Month::from_str(name.trim())
        .map(|m| m.number_from_month())
        .map_err(|_| SnodasError::InvalidMonth(name.to_string()))
}

/// A calendar day independent of year, e.g. April 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayOfYear {
    month: u32,
    day: u32,
}

impl DayOfYear {
    /// Feb 29 is accepted; it exists in some years of any span.
    pub fn new(month: u32, day: u32) -> Result<Self, SnodasError> {
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or_else(|| SnodasError::InvalidDayOfYear(format!("{:02}-{:02}", month, day)))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Parse the day-of-year picker's `"dd MonthName"` text, e.g. `"05 April"`.
    pub fn parse_picker_text(text: &str) -> Result<Self, SnodasError> {
        let invalid = || SnodasError::InvalidDayOfYear(text.to_string());
        let mut parts = text.split_whitespace();
        let day = parts
            .next()
            .and_then(|d| d.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let month = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::new(month_from_name(month)?, day)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn picker_text(&self) -> String {
        let name = Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or_default();
        format!("{:02} {}", self.day, name)
    }

    /// `MM-DD` path segment used in statistics links.
    pub fn link_segment(&self) -> String {
        format!("{:02}-{:02}", self.month, self.day)
    }
}

/// Why the submit link is disabled. Never shown to the user; logged at debug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    NoModeSelected,
    MissingPourpoint,
    MissingRangeStart,
    MissingRangeEnd,
    RangeReversed,
    MissingDayOfYear,
    MissingStartYear,
    MissingEndYear,
    YearsReversed,
    MissingForecastStart,
    MissingForecastEnd,
    ForecastReversed,
    MissingVariable,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Incomplete::NoModeSelected => "no query type selected",
            Incomplete::MissingPourpoint => "no pourpoint selected",
            Incomplete::MissingRangeStart => "start date missing",
            Incomplete::MissingRangeEnd => "end date missing",
            Incomplete::RangeReversed => "start date is after end date",
            Incomplete::MissingDayOfYear => "day of year missing",
            Incomplete::MissingStartYear => "start year missing",
            Incomplete::MissingEndYear => "end year missing",
            Incomplete::YearsReversed => "start year is after end year",
            Incomplete::MissingForecastStart => "forecast start month missing",
            Incomplete::MissingForecastEnd => "forecast end month missing",
            Incomplete::ForecastReversed => "forecast start is after forecast end",
            Incomplete::MissingVariable => "variable missing",
        };
        write!(f, "{}", msg)
    }
}

/// A statistics link path, relative to the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLink(String);

impl QueryLink {
    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn url(&self, api_root: &str) -> String {
        format!("{}{}", api_root, self.0)
    }
}

pub fn date_range_link(pourpoint: FeatureId, start: NaiveDate, end: NaiveDate) -> QueryLink {
    QueryLink(format!(
        "query/pourpoint/polygon/{}/{}/{}/",
        pourpoint,
        start.format(LINK_DATE_FORMAT),
        end.format(LINK_DATE_FORMAT)
    ))
}

pub fn day_of_year_link(
    pourpoint: FeatureId,
    day: DayOfYear,
    start_year: i32,
    end_year: i32,
) -> QueryLink {
    QueryLink(format!(
        "query/pourpoint/polygon/{}/{}/{}/{}/",
        pourpoint,
        day.link_segment(),
        start_year,
        end_year
    ))
}

pub fn regression_link(
    variable: SnodasVariable,
    forecast_start: u32,
    forecast_end: u32,
    day: DayOfYear,
    start_year: i32,
    end_year: i32,
) -> QueryLink {
    QueryLink(format!(
        "analysis/streamflow/{}/{:02}/{:02}/{}/{}/{}/",
        variable.as_str(),
        forecast_start,
        forecast_end,
        day.link_segment(),
        start_year,
        end_year
    ))
}

/// Field values shared by every mode; they survive mode switches.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryInputs {
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
    pub day_of_year: Option<DayOfYear>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    /// Options of both year dropdowns.
    pub year_options: Vec<i32>,
    pub forecast_start: Option<u32>,
    pub forecast_end: Option<u32>,
    pub variable: Option<SnodasVariable>,
}

impl Default for QueryInputs {
    fn default() -> Self {
        Self {
            range_start: None,
            range_end: None,
            day_of_year: None,
            start_year: None,
            end_year: None,
            year_options: Vec::new(),
            forecast_start: Some(DEFAULT_FORECAST_START),
            forecast_end: Some(DEFAULT_FORECAST_END),
            variable: Some(SnodasVariable::default()),
        }
    }
}

/// A single edit to one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldChange {
    RangeStart(Option<NaiveDate>),
    RangeEnd(Option<NaiveDate>),
    DayOfYear(Option<DayOfYear>),
    StartYear(Option<i32>),
    EndYear(Option<i32>),
    ForecastStart(Option<u32>),
    ForecastEnd(Option<u32>),
    Variable(Option<SnodasVariable>),
}

impl QueryInputs {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::RangeStart(v) => self.range_start = v,
            FieldChange::RangeEnd(v) => self.range_end = v,
            FieldChange::DayOfYear(v) => self.day_of_year = v,
            FieldChange::StartYear(v) => self.start_year = v,
            FieldChange::EndYear(v) => self.end_year = v,
            FieldChange::ForecastStart(v) => self.forecast_start = v,
            FieldChange::ForecastEnd(v) => self.forecast_end = v,
            FieldChange::Variable(v) => self.variable = v,
        }
    }

    fn init_date_range(&mut self, dates: &AvailableDates) -> Result<(), SnodasError> {
        let (start, end) = dates.default_range()?;
        self.range_start.get_or_insert(start);
        self.range_end.get_or_insert(end);
        Ok(())
    }

    fn init_day_of_year(&mut self, dates: &AvailableDates) -> Result<(), SnodasError> {
        let (min, max) = dates.bounds()?;
        self.day_of_year.get_or_insert(DayOfYear::from_date(max));
        self.year_options = dates.year_span();
        self.start_year.get_or_insert(min.year());
        self.end_year.get_or_insert(max.year());
        Ok(())
    }

    fn years(&self) -> Result<(i32, i32), Incomplete> {
        let start = self.start_year.ok_or(Incomplete::MissingStartYear)?;
        let end = self.end_year.ok_or(Incomplete::MissingEndYear)?;
        if start > end {
            return Err(Incomplete::YearsReversed);
        }
        Ok((start, end))
    }
}

/// Run the initializer of `kind`, filling unset inputs from the available dates.
pub fn initialize(
    kind: QueryModeKind,
    inputs: &mut QueryInputs,
    dates: Option<&AvailableDates>,
) -> Result<(), SnodasError> {
    let dates = dates.ok_or(SnodasError::NoAvailableDates)?;
    match kind {
        QueryModeKind::DateRange => inputs.init_date_range(dates),
        QueryModeKind::DayOfYear | QueryModeKind::Regression => inputs.init_day_of_year(dates),
    }
}

/// Check the inputs of `kind` and build its link.
pub fn validate(
    kind: QueryModeKind,
    inputs: &QueryInputs,
    pourpoint: Option<&SelectedPourpoint>,
) -> Result<QueryLink, Incomplete> {
    match kind {
        QueryModeKind::DateRange => validate_date_range(inputs, pourpoint),
        QueryModeKind::DayOfYear => validate_day_of_year(inputs, pourpoint),
        QueryModeKind::Regression => validate_regression(inputs),
    }
}

fn validate_date_range(
    inputs: &QueryInputs,
    pourpoint: Option<&SelectedPourpoint>,
) -> Result<QueryLink, Incomplete> {
    let start = inputs.range_start.ok_or(Incomplete::MissingRangeStart)?;
    let end = inputs.range_end.ok_or(Incomplete::MissingRangeEnd)?;
    let pourpoint = pourpoint.ok_or(Incomplete::MissingPourpoint)?;
    if start > end {
        return Err(Incomplete::RangeReversed);
    }
    Ok(date_range_link(pourpoint.pourpoint_id, start, end))
}

fn validate_day_of_year(
    inputs: &QueryInputs,
    pourpoint: Option<&SelectedPourpoint>,
) -> Result<QueryLink, Incomplete> {
    let day = inputs.day_of_year.ok_or(Incomplete::MissingDayOfYear)?;
    let (start, end) = inputs.years()?;
    let pourpoint = pourpoint.ok_or(Incomplete::MissingPourpoint)?;
    Ok(day_of_year_link(pourpoint.pourpoint_id, day, start, end))
}

fn validate_regression(inputs: &QueryInputs) -> Result<QueryLink, Incomplete> {
    let day = inputs.day_of_year.ok_or(Incomplete::MissingDayOfYear)?;
    let (start, end) = inputs.years()?;
    let forecast_start = inputs
        .forecast_start
        .ok_or(Incomplete::MissingForecastStart)?;
    let forecast_end = inputs.forecast_end.ok_or(Incomplete::MissingForecastEnd)?;
    let variable = inputs.variable.ok_or(Incomplete::MissingVariable)?;
    if forecast_start > forecast_end {
        return Err(Incomplete::ForecastReversed);
    }
    Ok(regression_link(
        variable,
        forecast_start,
        forecast_end,
        day,
        start,
        end,
    ))
}

/// State of the submit link: an href enables it, no href disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    href: Option<String>,
}

impl SubmitControl {
    pub fn enabled(&self) -> bool {
        self.href.is_some()
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    NoModeSelected,
    ModeActive(QueryModeKind),
}

/// The query panel of the SNODAS map.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPanel {
    mode: ModeState,
    inputs: QueryInputs,
    pourpoint: Option<SelectedPourpoint>,
    submit: SubmitControl,
    api_root: String,
}

impl QueryPanel {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            mode: ModeState::NoModeSelected,
            inputs: QueryInputs::default(),
            pourpoint: None,
            submit: SubmitControl::default(),
            api_root: api_root.into(),
        }
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    pub fn active(&self) -> Option<QueryModeKind> {
        match self.mode {
            ModeState::NoModeSelected => None,
            ModeState::ModeActive(kind) => Some(kind),
        }
    }

    pub fn label(&self) -> &'static str {
        self.active().map(|k| k.label()).unwrap_or(NO_MODE_LABEL)
    }

    /// The fields currently on screen. Empty until a mode is chosen.
    pub fn visible_fields(&self) -> &'static [FormField] {
        self.active().map(|k| k.fragment()).unwrap_or(&[])
    }

    pub fn inputs(&self) -> &QueryInputs {
        &self.inputs
    }

    pub fn pourpoint(&self) -> Option<&SelectedPourpoint> {
        self.pourpoint.as_ref()
    }

    pub fn submit(&self) -> &SubmitControl {
        &self.submit
    }

    /// Switch to `kind`, initialize it and validate once.
    ///
    /// Re-selecting the active mode does nothing. An initializer error is
    /// returned after validation has run, so the form is left disabled but
    /// the switch still happened.
    pub fn select_mode(
        &mut self,
        kind: QueryModeKind,
        dates: Option<&AvailableDates>,
    ) -> Result<(), SnodasError> {
        if self.active() == Some(kind) {
            return Ok(());
        }
        self.mode = ModeState::ModeActive(kind);
        let init = initialize(kind, &mut self.inputs, dates);
        self.validate();
        init
    }

    /// The date listing arrived after a mode was entered; initialize it now.
    pub fn dates_loaded(&mut self, dates: &AvailableDates) -> Result<(), SnodasError> {
        let Some(kind) = self.active() else {
            return Ok(());
        };
        let init = initialize(kind, &mut self.inputs, Some(dates));
        self.validate();
        init
    }

    pub fn update(&mut self, change: FieldChange) -> bool {
        self.inputs.apply(change);
        self.validate()
    }

    pub fn select_pourpoint(&mut self, pourpoint: SelectedPourpoint) -> bool {
        self.pourpoint = Some(pourpoint);
        self.validate()
    }

    pub fn clear_pourpoint(&mut self) -> bool {
        self.pourpoint = None;
        self.validate()
    }

    /// Run the active mode's validator and update the submit link.
    pub fn validate(&mut self) -> bool {
        let result = match self.active() {
            Some(kind) => validate(kind, &self.inputs, self.pourpoint.as_ref()),
            None => Err(Incomplete::NoModeSelected),
        };
        match result {
            Ok(link) => {
                self.submit.href = Some(link.url(&self.api_root));
                true
            }
            Err(reason) => {
                log::debug!("Query submit disabled: {}", reason);
                self.submit.href = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://api.snodas.geog.pdx.edu/";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pourpoint(id: i64) -> SelectedPourpoint {
        SelectedPourpoint {
            pourpoint_id: FeatureId(id),
            awdb_id: Some("14064500".to_string()),
            name: "Upper Deschutes".to_string(),
            is_polygon: true,
        }
    }

    fn dates() -> AvailableDates {
        AvailableDates::from_date_strings(["2015-10-01", "2019-04-01", "2019-04-10"]).unwrap()
    }

    #[test]
    fn mode_keys_parse_back() {
        for kind in QueryModeKind::ALL {
            assert_eq!(kind.as_str().parse::<QueryModeKind>(), Ok(kind));
        }
        assert!("stats".parse::<QueryModeKind>().is_err());
    }

    #[test]
    fn starts_without_a_mode() {
        let panel = QueryPanel::new(ROOT);
        assert_eq!(panel.mode(), ModeState::NoModeSelected);
        assert_eq!(panel.label(), NO_MODE_LABEL);
        assert!(panel.visible_fields().is_empty());
        assert!(!panel.submit().enabled());
    }

    #[test]
    fn date_range_mode_builds_link_once_pourpoint_selected() {
        let mut panel = QueryPanel::new(ROOT);
        panel
            .select_mode(QueryModeKind::DateRange, Some(&dates()))
            .unwrap();
        assert_eq!(panel.inputs().range_start, Some(ymd(2019, 4, 4)));
        assert_eq!(panel.inputs().range_end, Some(ymd(2019, 4, 10)));
        assert!(!panel.submit().enabled());

        assert!(panel.select_pourpoint(pourpoint(12)));
        assert_eq!(
            panel.submit().href(),
            Some("https://api.snodas.geog.pdx.edu/query/pourpoint/polygon/12/20190404/20190410/")
        );

        assert!(!panel.clear_pourpoint());
        assert_eq!(panel.submit().href(), None);
    }

    #[test]
    fn reversed_range_disables_submit() {
        let mut panel = QueryPanel::new(ROOT);
        panel
            .select_mode(QueryModeKind::DateRange, Some(&dates()))
            .unwrap();
        panel.select_pourpoint(pourpoint(1));
        assert!(!panel.update(FieldChange::RangeStart(Some(ymd(2019, 5, 1)))));
        assert!(panel.update(FieldChange::RangeStart(Some(ymd(2019, 4, 10)))));
    }

    #[test]
    fn day_of_year_years_follow_available_dates() {
        let single =
            AvailableDates::from_date_strings(["2020-01-01", "2020-01-02", "2020-01-03"]).unwrap();
        let mut panel = QueryPanel::new(ROOT);
        panel
            .select_mode(QueryModeKind::DayOfYear, Some(&single))
            .unwrap();
        assert_eq!(panel.inputs().year_options, vec![2020]);
        assert_eq!(panel.inputs().day_of_year, Some(DayOfYear::new(1, 3).unwrap()));

        panel.select_pourpoint(pourpoint(3));
        assert_eq!(
            panel.submit().href(),
            Some("https://api.snodas.geog.pdx.edu/query/pourpoint/polygon/3/01-03/2020/2020/")
        );
    }

    #[test]
    fn start_year_after_end_year_disables_submit() {
        let mut panel = QueryPanel::new(ROOT);
        panel
            .select_mode(QueryModeKind::DayOfYear, Some(&dates()))
            .unwrap();
        panel.select_pourpoint(pourpoint(3));
        assert!(panel.submit().enabled());
        assert!(panel.update(FieldChange::StartYear(Some(2019))));
        assert!(!panel.update(FieldChange::EndYear(Some(2016))));
        assert!(panel.update(FieldChange::EndYear(Some(2019))));
    }

    #[test]
    fn regression_needs_no_pourpoint() {
        let mut panel = QueryPanel::new(ROOT);
        panel
            .select_mode(QueryModeKind::Regression, Some(&dates()))
            .unwrap();
        assert_eq!(
            panel.submit().href(),
            Some("https://api.snodas.geog.pdx.edu/analysis/streamflow/swe/04/07/04-10/2015/2019/")
        );

        assert!(!panel.update(FieldChange::ForecastStart(Some(8))));
        assert!(panel.update(FieldChange::ForecastStart(Some(1))));
        panel.update(FieldChange::Variable(Some(SnodasVariable::PrecipSolid)));
        assert_eq!(
            panel.submit().href(),
            Some("https://api.snodas.geog.pdx.edu/analysis/streamflow/precip_solid/01/07/04-10/2015/2019/")
        );
        assert!(!panel.update(FieldChange::Variable(None)));
    }

    #[test]
    fn switching_mode_replaces_form_and_revalidates_for_new_mode() {
        let mut panel = QueryPanel::new(ROOT);
        let dates = dates();
        panel.select_pourpoint(pourpoint(12));
        panel
            .select_mode(QueryModeKind::DateRange, Some(&dates))
            .unwrap();
        assert_eq!(panel.visible_fields(), QueryModeKind::DateRange.fragment());
        assert!(panel.submit().href().unwrap().contains("/20190404/"));

        panel
            .select_mode(QueryModeKind::Regression, Some(&dates))
            .unwrap();
        assert_eq!(panel.label(), "SNODAS Streamflow Regression Tool");
        assert_eq!(panel.visible_fields(), QueryModeKind::Regression.fragment());
        assert!(!panel.visible_fields().contains(&FormField::PourpointTable));
        assert!(panel.submit().href().unwrap().contains("analysis/streamflow/"));

        // Inputs from the first mode are kept for when it is chosen again.
        panel
            .select_mode(QueryModeKind::DateRange, Some(&dates))
            .unwrap();
        assert_eq!(panel.inputs().range_start, Some(ymd(2019, 4, 4)));
    }

    #[test]
    fn reselecting_active_mode_keeps_edits() {
        let mut panel = QueryPanel::new(ROOT);
        let dates = dates();
        panel
            .select_mode(QueryModeKind::DayOfYear, Some(&dates))
            .unwrap();
        panel.update(FieldChange::StartYear(Some(2017)));
        panel
            .select_mode(QueryModeKind::DayOfYear, Some(&dates))
            .unwrap();
        assert_eq!(panel.inputs().start_year, Some(2017));
    }

    #[test]
    fn missing_dates_leaves_mode_active_but_disabled() {
        let mut panel = QueryPanel::new(ROOT);
        panel.select_pourpoint(pourpoint(12));
        let err = panel.select_mode(QueryModeKind::DateRange, None).unwrap_err();
        assert_eq!(err, SnodasError::NoAvailableDates);
        assert_eq!(panel.active(), Some(QueryModeKind::DateRange));
        assert!(!panel.submit().enabled());

        panel.dates_loaded(&dates()).unwrap();
        assert!(panel.submit().enabled());
    }

    #[test]
    fn picker_text_round_trip() {
        let day = DayOfYear::parse_picker_text("05 April").unwrap();
        assert_eq!(day, DayOfYear::new(4, 5).unwrap());
        assert_eq!(day.picker_text(), "05 April");
        assert_eq!(day.link_segment(), "04-05");
        assert_eq!(
            DayOfYear::parse_picker_text("29 february").unwrap(),
            DayOfYear::new(2, 29).unwrap()
        );
    }

    #[test]
    fn bad_picker_text_is_rejected() {
        assert!(DayOfYear::parse_picker_text("").is_err());
        assert!(DayOfYear::parse_picker_text("31 June").is_err());
        assert!(matches!(
            DayOfYear::parse_picker_text("12 Smarch"),
            Err(SnodasError::InvalidMonth(_))
        ));
    }

    #[test]
    fn variables_parse_from_link_names() {
        for variable in SnodasVariable::ALL {
            assert_eq!(variable.as_str().parse::<SnodasVariable>(), Ok(variable));
        }
        assert!("snowfall".parse::<SnodasVariable>().is_err());
    }
}
