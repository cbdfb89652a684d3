//! Reusable Dioxus RSX components for the SNODAS map apps.

use chrono::NaiveDate;
use snodas_core::available_dates::DATE_FORMAT;

mod aoi_modal;
mod error_display;
mod feature_list_panel;
mod loading_spinner;
mod panel_header;
mod pourpoint_table;
mod query_panel;
mod tile_date_controls;

pub use aoi_modal::AoiModal;
pub use error_display::ErrorDisplay;
pub use feature_list_panel::FeatureListPanel;
pub use loading_spinner::LoadingSpinner;
pub use panel_header::PanelHeader;
pub use pourpoint_table::PourpointTable;
pub use query_panel::QueryPanelView;
pub use tile_date_controls::TileDateControls;

/// Parse the value of an `<input type="date">`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
