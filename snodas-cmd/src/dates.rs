//! Summary of the available SNODAS tile dates.

use chrono::Datelike;
use snodas_core::available_dates::{AvailableDates, DATE_FORMAT};
use snodas_core::config::MapConfig;
use snodas_core::SnodasError;

/// Fetch the tile-date listing and print its bounds and defaults.
pub async fn run_dates(config: &MapConfig) -> anyhow::Result<()> {
    let body = crate::fetch_text(&config.tile_dates_url).await?;
    let dates = AvailableDates::from_json(&body)?;
    log::info!("Parsed {} tile dates", dates.len());
    print!("{}", summarize(&dates)?);
    Ok(())
}

/// Human-readable summary: bounds, year span and the default query range.
pub fn summarize(dates: &AvailableDates) -> Result<String, SnodasError> {
    let (min, max) = dates.bounds()?;
    let (range_start, range_end) = dates.default_range()?;
    let years = dates.year_span();

    Ok(format!(
        "dates:         {}\n\
         earliest:      {}\n\
         latest:        {}\n\
         years:         {}-{} ({} years)\n\
         default range: {} to {}\n",
        dates.len(),
        min.format(DATE_FORMAT),
        max.format(DATE_FORMAT),
        min.year(),
        max.year(),
        years.len(),
        range_start.format(DATE_FORMAT),
        range_end.format(DATE_FORMAT),
    ))
}
