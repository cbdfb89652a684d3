//! Date picker and on/off toggle for the SNODAS raster layer.

use super::{format_date, parse_date};
use crate::state::AppState;
use chrono::Datelike;
use dioxus::prelude::*;
use snodas_core::available_dates::Unavailable;

/// Picks the SNODAS tile date. Only dates with tiles are accepted.
#[component]
pub fn TileDateControls() -> Element {
    let mut state = use_context::<AppState>();
    let mut rejected = use_signal(|| None::<Unavailable>);
    let current = format_date((state.tile_date)());
    let shown = (state.snodas_on)();
    let (min, max) = match state.dates.read().as_ref().and_then(|d| d.bounds().ok()) {
        Some((min, max)) => (format_date(Some(min)), format_date(Some(max))),
        None => (String::new(), String::new()),
    };
    let disabled = min.is_empty();

    let on_date_change = move |evt: Event<FormData>| {
        let Some(date) = parse_date(&evt.value()) else {
            return;
        };
        let checked = match state.dates.peek().as_ref() {
            Some(dates) => dates.check(date),
            None => Err(Unavailable::Day(date)),
        };
        match checked {
            Ok(()) => {
                rejected.set(None);
                state.tile_date.set(Some(date));
            }
            Err(missing) => {
                log::info!("{}", missing);
                rejected.set(Some(missing));
            }
        }
    };

    // Offer the days that do exist when only the day was wrong.
    let other_days = match rejected() {
        Some(Unavailable::Day(date)) => state
            .dates
            .read()
            .as_ref()
            .map(|d| d.days_in(date.year(), date.month()))
            .unwrap_or_default()
            .iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };

    let on_toggle = move |evt: Event<FormData>| {
        state.snodas_on.set(evt.checked());
    };

    rsx! {
        div {
            id: "snodas-tile-controls",
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            label {
                style: "font-weight: bold;",
                "SNODAS Date: "
                input {
                    id: "snodas-tile-date",
                    r#type: "date",
                    min: "{min}",
                    max: "{max}",
                    value: "{current}",
                    disabled: disabled,
                    onchange: on_date_change,
                }
            }
            label {
                style: "font-weight: bold;",
                input {
                    id: "snodas-on",
                    r#type: "checkbox",
                    checked: shown,
                    onchange: on_toggle,
                }
                " Show SNODAS"
            }
            if let Some(missing) = rejected() {
                span {
                    style: "color: #C62828;",
                    "{missing}"
                }
                if !other_days.is_empty() {
                    span {
                        style: "color: #666;",
                        "Available days this month: {other_days}"
                    }
                }
            }
        }
    }
}
