//! Pourpoint listing.

use snodas_core::config::MapConfig;
use snodas_core::feature::{FeatureCollection, PourpointFeature, PourpointProperties};

/// Fetch the pourpoints and print one line per pourpoint, sorted by name.
pub async fn run_pourpoints(config: &MapConfig, filter: Option<&str>) -> anyhow::Result<()> {
    let body = crate::fetch_text(&config.pourpoints_url).await?;
    let collection = FeatureCollection::<PourpointProperties>::from_json(&body)?;
    log::info!("Parsed {} pourpoints", collection.features.len());

    let lines = listing(&collection.features, filter);
    if lines.is_empty() {
        log::warn!("No pourpoints matched");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Tab-separated `id, awdb id, name, source` lines, sorted case-insensitively
/// by name and narrowed by an optional name filter.
pub fn listing(features: &[PourpointFeature], filter: Option<&str>) -> Vec<String> {
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    let mut matched: Vec<&PourpointProperties> = features
        .iter()
        .map(|f| &f.properties)
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect();
    matched.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.pourpoint_id.cmp(&b.pourpoint_id))
    });

    matched
        .into_iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}",
                p.pourpoint_id,
                p.awdb_id.as_deref().unwrap_or("-"),
                p.name,
                p.source.as_deref().unwrap_or("-"),
            )
        })
        .collect()
}
