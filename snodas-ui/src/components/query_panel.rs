//! Query type dropdown and the active mode's form.

use super::{format_date, parse_date};
use crate::components::PourpointTable;
use crate::state::AppState;
use chrono::Month;
use dioxus::prelude::*;
use snodas_core::query::{
    DayOfYear, FieldChange, FormField, QueryModeKind, SnodasVariable, NO_MODE_LABEL,
};

const LABEL_STYLE: &str = "font-weight: bold; display: block; margin-top: 8px;";

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// The query panel: mode dropdown, the mode's fields and the submit link.
#[component]
pub fn QueryPanelView() -> Element {
    let mut state = use_context::<AppState>();
    let panel = state.panel.read().clone();
    let active = panel.active();

    let on_mode_change = move |evt: Event<FormData>| match evt.value().parse::<QueryModeKind>() {
        Ok(kind) => {
            let dates = state.dates.peek().clone();
            if let Err(e) = state.panel.write().select_mode(kind, dates.as_ref()) {
                log::warn!("{} form initialization failed: {}", kind.label(), e);
            }
        }
        Err(e) => log::warn!("{}", e),
    };

    rsx! {
        div {
            id: "snodas-query",
            style: "margin: 8px 0;",
            label {
                r#for: "snodas-query-type",
                style: LABEL_STYLE,
                "Query Type"
            }
            select {
                id: "snodas-query-type",
                onchange: on_mode_change,
                option {
                    value: "",
                    disabled: true,
                    selected: active.is_none(),
                    "{NO_MODE_LABEL}"
                }
                for kind in QueryModeKind::ALL {
                    option {
                        value: kind.as_str(),
                        selected: active == Some(kind),
                        "{kind.label()}"
                    }
                }
            }
            {panel.visible_fields().iter().map(|field| render_field(*field))}
        }
    }
}

fn render_field(field: FormField) -> Element {
    match field {
        FormField::PourpointTable => rsx! { PourpointTable {} },
        FormField::DateRange => rsx! { DateRangeFields {} },
        FormField::DayOfYear => rsx! { DayOfYearField {} },
        FormField::YearSpan => rsx! { YearSpanFields {} },
        FormField::ForecastPeriod => rsx! { ForecastFields {} },
        FormField::Variable => rsx! { VariableField {} },
        FormField::Submit => rsx! { SubmitLink {} },
    }
}

#[component]
fn DateRangeFields() -> Element {
    let mut state = use_context::<AppState>();
    let inputs = state.panel.read().inputs().clone();
    let (min, max) = match state.dates.read().as_ref().and_then(|d| d.bounds().ok()) {
        Some((min, max)) => (format_date(Some(min)), format_date(Some(max))),
        None => (String::new(), String::new()),
    };
    let start = format_date(inputs.range_start);
    let end = format_date(inputs.range_end);

    let on_start_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::RangeStart(parse_date(&evt.value())));
    };

    let on_end_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::RangeEnd(parse_date(&evt.value())));
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: end;",
            label {
                style: LABEL_STYLE,
                "Start: "
                input {
                    id: "snodas-range-query-start",
                    r#type: "date",
                    min: "{min}",
                    max: "{max}",
                    value: "{start}",
                    onchange: on_start_change,
                }
            }
            label {
                style: LABEL_STYLE,
                "End: "
                input {
                    id: "snodas-range-query-end",
                    r#type: "date",
                    min: "{min}",
                    max: "{max}",
                    value: "{end}",
                    onchange: on_end_change,
                }
            }
        }
    }
}

/// Day-of-year text input in the `"05 April"` format.
#[component]
fn DayOfYearField() -> Element {
    let mut state = use_context::<AppState>();
    let current = state
        .panel
        .read()
        .inputs()
        .day_of_year
        .map(|d| d.picker_text())
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        let day = match DayOfYear::parse_picker_text(&evt.value()) {
            Ok(day) => Some(day),
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        };
        state.panel.write().update(FieldChange::DayOfYear(day));
    };

    rsx! {
        label {
            style: LABEL_STYLE,
            "Day of Year: "
            input {
                id: "snodas-doy-query-doy",
                r#type: "text",
                placeholder: "05 April",
                value: "{current}",
                onchange: on_change,
            }
        }
    }
}

#[component]
fn YearSpanFields() -> Element {
    let mut state = use_context::<AppState>();
    let inputs = state.panel.read().inputs().clone();
    let years = inputs.year_options.clone();
    let end_years = years.clone();

    let on_start_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::StartYear(evt.value().parse().ok()));
    };

    let on_end_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::EndYear(evt.value().parse().ok()));
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px;",
            label {
                style: LABEL_STYLE,
                "Start Year: "
                select {
                    id: "snodas-doy-query-years-start",
                    onchange: on_start_change,
                    for year in years {
                        option {
                            value: "{year}",
                            selected: inputs.start_year == Some(year),
                            "{year}"
                        }
                    }
                }
            }
            label {
                style: LABEL_STYLE,
                "End Year: "
                select {
                    id: "snodas-doy-query-years-end",
                    onchange: on_end_change,
                    for year in end_years {
                        option {
                            value: "{year}",
                            selected: inputs.end_year == Some(year),
                            "{year}"
                        }
                    }
                }
            }
        }
    }
}

/// Forecast start and end months for the regression tool.
#[component]
fn ForecastFields() -> Element {
    let mut state = use_context::<AppState>();
    let inputs = state.panel.read().inputs().clone();

    let on_start_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::ForecastStart(evt.value().parse().ok()));
    };

    let on_end_change = move |evt: Event<FormData>| {
        state
            .panel
            .write()
            .update(FieldChange::ForecastEnd(evt.value().parse().ok()));
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px;",
            label {
                style: LABEL_STYLE,
                "Forecast Start: "
                select {
                    id: "snodas-query-month-start",
                    onchange: on_start_change,
                    for month in 1..=12u32 {
                        option {
                            value: "{month}",
                            selected: inputs.forecast_start == Some(month),
                            "{month_name(month)}"
                        }
                    }
                }
            }
            label {
                style: LABEL_STYLE,
                "Forecast End: "
                select {
                    id: "snodas-query-month-end",
                    onchange: on_end_change,
                    for month in 1..=12u32 {
                        option {
                            value: "{month}",
                            selected: inputs.forecast_end == Some(month),
                            "{month_name(month)}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn VariableField() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.panel.read().inputs().variable;

    let on_change = move |evt: Event<FormData>| {
        let variable = match evt.value().parse::<SnodasVariable>() {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        state.panel.write().update(FieldChange::Variable(variable));
    };

    rsx! {
        label {
            style: LABEL_STYLE,
            "Variable: "
            select {
                id: "snodas-query-variable",
                onchange: on_change,
                for variable in SnodasVariable::ALL {
                    option {
                        value: variable.as_str(),
                        selected: current == Some(variable),
                        "{variable.label()}"
                    }
                }
            }
        }
    }
}

/// Link to the statistics endpoint. Disabled until the form validates.
#[component]
fn SubmitLink() -> Element {
    let state = use_context::<AppState>();
    let submit = state.panel.read().submit().clone();
    let enabled = submit.enabled();
    let class = if enabled { "btn btn-primary" } else { "btn btn-primary disabled" };
    let style = if enabled {
        "display: inline-block; margin-top: 12px;"
    } else {
        "display: inline-block; margin-top: 12px; pointer-events: none; opacity: 0.5;"
    };

    rsx! {
        a {
            id: "snodas-query-btn",
            class: class,
            style: style,
            href: submit.href().map(|h| h.to_string()),
            target: "_blank",
            "aria-disabled": if enabled { "false" } else { "true" },
            "Submit"
        }
    }
}
