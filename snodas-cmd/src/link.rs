//! Statistics link building from the command line.
//!
//! Arguments are loaded into the same `QueryInputs` the query map edits, and
//! the same validator decides whether the link is complete.

use chrono::NaiveDate;
use clap::Subcommand;
use snodas_core::feature::SelectedPourpoint;
use snodas_core::query::{
    validate, DayOfYear, Incomplete, QueryInputs, QueryLink, QueryModeKind, SnodasVariable,
};
use snodas_core::{FeatureId, SnodasError};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum LinkQuery {
    /// SNODAS values for a pourpoint over a date range
    DateRange {
        /// Pourpoint id
        #[arg(short, long)]
        pourpoint: i64,
        /// First date, YYYY-MM-DD
        #[arg(short, long)]
        start: NaiveDate,
        /// Last date, YYYY-MM-DD
        #[arg(short, long)]
        end: NaiveDate,
    },

    /// SNODAS values for a pourpoint on one day of the year across years
    Doy {
        #[arg(short, long)]
        pourpoint: i64,
        /// Day of year, as MM-DD or "05 April"
        #[arg(short, long, value_parser = parse_day)]
        day: DayOfYear,
        #[arg(long)]
        start_year: i32,
        #[arg(long)]
        end_year: i32,
    },

    /// Streamflow regression over the forecast months
    Regression {
        /// SNODAS variable (depth, swe, runoff, ...)
        #[arg(long, default_value = "swe")]
        variable: SnodasVariable,
        /// First forecast month, 1-12
        #[arg(long, default_value_t = 4)]
        forecast_start: u32,
        /// Last forecast month, 1-12
        #[arg(long, default_value_t = 7)]
        forecast_end: u32,
        #[arg(short, long, value_parser = parse_day)]
        day: DayOfYear,
        #[arg(long)]
        start_year: i32,
        #[arg(long)]
        end_year: i32,
    },
}

/// Accept either the link form `MM-DD` or the picker form `"05 April"`.
pub fn parse_day(text: &str) -> Result<DayOfYear, SnodasError> {
    if let Some((month, day)) = text.trim().split_once('-') {
        let month = month
            .parse()
            .map_err(|_| SnodasError::InvalidDayOfYear(text.to_string()))?;
        let day = day
            .parse()
            .map_err(|_| SnodasError::InvalidDayOfYear(text.to_string()))?;
        return DayOfYear::new(month, day);
    }
    DayOfYear::parse_picker_text(text)
}

fn pourpoint(id: i64) -> SelectedPourpoint {
    SelectedPourpoint {
        pourpoint_id: FeatureId(id),
        awdb_id: None,
        name: String::new(),
        is_polygon: true,
    }
}

pub fn build_link(query: &LinkQuery) -> Result<QueryLink, Incomplete> {
    let mut inputs = QueryInputs::default();
    let (kind, selected) = match query {
        LinkQuery::DateRange {
            pourpoint: id,
            start,
            end,
        } => {
            inputs.range_start = Some(*start);
            inputs.range_end = Some(*end);
            (QueryModeKind::DateRange, Some(pourpoint(*id)))
        }
        LinkQuery::Doy {
            pourpoint: id,
            day,
            start_year,
            end_year,
        } => {
            inputs.day_of_year = Some(*day);
            inputs.start_year = Some(*start_year);
            inputs.end_year = Some(*end_year);
            (QueryModeKind::DayOfYear, Some(pourpoint(*id)))
        }
        LinkQuery::Regression {
            variable,
            forecast_start,
            forecast_end,
            day,
            start_year,
            end_year,
        } => {
            inputs.variable = Some(*variable);
            inputs.forecast_start = Some(*forecast_start);
            inputs.forecast_end = Some(*forecast_end);
            inputs.day_of_year = Some(*day);
            inputs.start_year = Some(*start_year);
            inputs.end_year = Some(*end_year);
            (QueryModeKind::Regression, None)
        }
    };
    log::debug!("Building {} link", kind.label());
    validate(kind, &inputs, selected.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_link() {
        let link = build_link(&LinkQuery::DateRange {
            pourpoint: 12,
            start: ymd(2019, 4, 1),
            end: ymd(2019, 4, 7),
        })
        .unwrap();
        assert_eq!(link.path(), "query/pourpoint/polygon/12/20190401/20190407/");
    }

    #[test]
    fn reversed_range_is_incomplete() {
        let result = build_link(&LinkQuery::DateRange {
            pourpoint: 12,
            start: ymd(2019, 4, 7),
            end: ymd(2019, 4, 1),
        });
        assert_eq!(result, Err(Incomplete::RangeReversed));
    }

    #[test]
    fn doy_link_accepts_both_day_forms() {
        let from_segment = parse_day("04-05").unwrap();
        let from_picker = parse_day("05 April").unwrap();
        assert_eq!(from_segment, from_picker);

        let link = build_link(&LinkQuery::Doy {
            pourpoint: 7,
            day: from_segment,
            start_year: 2004,
            end_year: 2019,
        })
        .unwrap();
        assert_eq!(link.path(), "query/pourpoint/polygon/7/04-05/2004/2019/");
    }

    #[test]
    fn regression_link_needs_no_pourpoint() {
        let link = build_link(&LinkQuery::Regression {
            variable: SnodasVariable::Depth,
            forecast_start: 4,
            forecast_end: 7,
            day: parse_day("04-01").unwrap(),
            start_year: 2004,
            end_year: 2019,
        })
        .unwrap();
        assert_eq!(link.path(), "analysis/streamflow/depth/04/07/04-01/2004/2019/");
    }

    #[test]
    fn bad_day_text_is_rejected() {
        assert!(parse_day("13-01").is_err());
        assert!(parse_day("April").is_err());
    }
}
