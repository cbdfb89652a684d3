//! What a map event does on each page.
//!
//! The SNODAS map click-selects features for a query. The AOI map opens a
//! popup instead, and the feature under an open popup stays highlighted until
//! the popup closes.

use std::collections::BTreeMap;

use crate::config::MapVariant;
use crate::event::MapEvent;
use crate::feature::{popup_text, FeatureId, PourpointProperties, SelectedPourpoint};
use crate::feature_list::leave_clears_hover;
use crate::highlight::{HighlightCoordinator, MarkerRenderer, OverlayRenderer};
use crate::query::QueryPanel;

/// A change to the query panel's pourpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    Select(SelectedPourpoint),
    Clear,
}

impl PanelAction {
    /// Returns whether the submit link is enabled afterwards.
    pub fn apply(self, panel: &mut QueryPanel) -> bool {
        match self {
            PanelAction::Select(pourpoint) => panel.select_pourpoint(pourpoint),
            PanelAction::Clear => panel.clear_pourpoint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    Open {
        id: FeatureId,
        latlng: [f64; 2],
        text: String,
    },
    /// Close the open popup.
    Close,
    /// The map already closed it; only forget it.
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    pub panel: Option<PanelAction>,
    pub popup: Option<PopupAction>,
}

/// The page an event lands on.
#[derive(Debug, Clone, Copy)]
pub struct MapContext<'a> {
    pub variant: MapVariant,
    pub pourpoints: &'a BTreeMap<FeatureId, PourpointProperties>,
    /// Feature whose popup is open.
    pub popup: Option<FeatureId>,
}

impl MapContext<'_> {
    /// Apply `event` to the highlights and report what else has to change.
    pub fn route<P, M>(
        &self,
        event: &MapEvent,
        coordinator: &mut HighlightCoordinator,
        polygons: &mut P,
        points: &mut M,
    ) -> EventOutcome
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        let selects = self.variant.click_selects();
        let mut outcome = EventOutcome::default();

        match event {
            MapEvent::PolygonOver { id } | MapEvent::PointOver { id } => {
                coordinator.hover(*id, polygons, points);
            }
            MapEvent::PolygonOut { id } | MapEvent::PointOut { id } => {
                end_hover(*id, self.popup, coordinator, polygons, points);
            }
            MapEvent::PolygonClick { id, latlng, .. } => {
                if selects {
                    coordinator.click(*id, polygons, points);
                    outcome.panel = event.selection().map(PanelAction::Select);
                } else {
                    coordinator.hover(*id, polygons, points);
                    outcome.popup = event.popup_text().map(|text| PopupAction::Open {
                        id: *id,
                        latlng: *latlng,
                        text,
                    });
                }
            }
            MapEvent::PointClick { id, latlng } => {
                let Some(props) = self.pourpoints.get(id) else {
                    log::debug!("Clicked pourpoint {} is not loaded", id);
                    return outcome;
                };
                if selects {
                    let is_polygon = polygons.has_feature(*id);
                    coordinator.click(*id, polygons, points);
                    outcome.panel = Some(PanelAction::Select(SelectedPourpoint::from_point(
                        props, is_polygon,
                    )));
                } else {
                    coordinator.hover(*id, polygons, points);
                    outcome.popup = Some(PopupAction::Open {
                        id: *id,
                        latlng: *latlng,
                        text: popup_text(props.awdb_id.as_deref(), &props.name),
                    });
                }
            }
            MapEvent::MapClick => {
                if selects {
                    coordinator.clear_click(polygons, points);
                    outcome.panel = Some(PanelAction::Clear);
                } else {
                    coordinator.clear_hover(polygons, points);
                    outcome.popup = Some(PopupAction::Close);
                }
            }
            MapEvent::ZoomEnd { zoom } => {
                coordinator.set_zoom(*zoom, polygons, points);
            }
            MapEvent::TilesLoaded => {
                coordinator.tiles_loaded(polygons);
            }
            MapEvent::PopupClosed { id } => {
                // Opening a popup closes the previous one first; that close
                // must not drop the new popup.
                if id.is_some() && *id != self.popup {
                    return outcome;
                }
                if self.popup.is_some() && coordinator.state().hover() == self.popup {
                    coordinator.clear_hover(polygons, points);
                }
                outcome.popup = Some(PopupAction::Closed);
            }
        }
        outcome
    }
}

/// The pointer left `id`, on the map or in the sidebar.
///
/// The feature under an open popup keeps its highlight, and gets it back when
/// the pointer leaves some other feature.
pub fn end_hover<P, M>(
    id: FeatureId,
    popup: Option<FeatureId>,
    coordinator: &mut HighlightCoordinator,
    polygons: &mut P,
    points: &mut M,
) where
    P: OverlayRenderer,
    M: MarkerRenderer,
{
    if !leave_clears_hover(id, popup) {
        return;
    }
    match popup {
        Some(open) => coordinator.hover(open, polygons, points),
        None => coordinator.clear_hover(polygons, points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::highlight::fakes::{FakeMarkers, FakePolygons};

    const ROOT: &str = "https://api.snodas.geog.pdx.edu/";

    fn pourpoints() -> BTreeMap<FeatureId, PourpointProperties> {
        [(5, "Bend", "14070500"), (6, "Culver", "14076500")]
            .into_iter()
            .map(|(id, name, awdb)| {
                (
                    FeatureId(id),
                    PourpointProperties {
                        pourpoint_id: FeatureId(id),
                        name: name.to_string(),
                        awdb_id: Some(awdb.to_string()),
                        source: None,
                        area_meters: None,
                    },
                )
            })
            .collect()
    }

    fn polygon_click(id: i64) -> MapEvent {
        MapEvent::PolygonClick {
            id: FeatureId(id),
            name: "Upper Deschutes".to_string(),
            awdb_id: Some("14064500".to_string()),
            latlng: [44.0, -121.5],
        }
    }

    fn coordinator(variant: MapVariant) -> HighlightCoordinator {
        MapConfig::default().coordinator(variant)
    }

    #[test]
    fn snodas_map_click_clears_selection_and_pourpoint() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Snodas,
            pourpoints: &points_data,
            popup: None,
        };
        let mut c = coordinator(MapVariant::Snodas);
        let mut panel = QueryPanel::new(ROOT);
        let mut polys = FakePolygons::with(&[3]);
        let mut points = FakeMarkers::with(&[3]);

        let outcome = ctx.route(&polygon_click(3), &mut c, &mut polys, &mut points);
        assert_eq!(outcome.popup, None);
        outcome.panel.unwrap().apply(&mut panel);
        assert_eq!(c.state().clicked(), Some(FeatureId(3)));
        assert_eq!(panel.pourpoint().map(|p| p.pourpoint_id), Some(FeatureId(3)));

        let outcome = ctx.route(&MapEvent::MapClick, &mut c, &mut polys, &mut points);
        assert_eq!(outcome.panel, Some(PanelAction::Clear));
        outcome.panel.unwrap().apply(&mut panel);
        assert_eq!(c.state().clicked(), None);
        assert!(polys.paths.is_empty());
        assert!(panel.pourpoint().is_none());
    }

    #[test]
    fn aoi_clicks_open_popups_and_never_select() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Aoi,
            pourpoints: &points_data,
            popup: None,
        };
        let mut c = coordinator(MapVariant::Aoi);
        let mut polys = FakePolygons::with(&[3, 5]);
        let mut points = FakeMarkers::with(&[5]);

        let outcome = ctx.route(&polygon_click(3), &mut c, &mut polys, &mut points);
        assert_eq!(outcome.panel, None);
        assert_eq!(
            outcome.popup,
            Some(PopupAction::Open {
                id: FeatureId(3),
                latlng: [44.0, -121.5],
                text: "14064500 Upper Deschutes".to_string(),
            })
        );
        assert_eq!(c.state().clicked(), None);
        assert_eq!(c.state().hover(), Some(FeatureId(3)));

        let click = MapEvent::PointClick {
            id: FeatureId(5),
            latlng: [44.1, -121.3],
        };
        let outcome = ctx.route(&click, &mut c, &mut polys, &mut points);
        assert_eq!(outcome.panel, None);
        assert!(matches!(
            outcome.popup,
            Some(PopupAction::Open { ref text, .. }) if text == "14070500 Bend"
        ));
        assert_eq!(c.state().clicked(), None);

        let outcome = ctx.route(&MapEvent::MapClick, &mut c, &mut polys, &mut points);
        assert_eq!(outcome.popup, Some(PopupAction::Close));
        assert_eq!(c.state().hover(), None);
    }

    #[test]
    fn point_click_reports_whether_a_boundary_tile_is_loaded() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Snodas,
            pourpoints: &points_data,
            popup: None,
        };
        let mut c = coordinator(MapVariant::Snodas);
        let mut polys = FakePolygons::with(&[5]);
        let mut points = FakeMarkers::with(&[5, 6]);

        for (id, expected) in [(5, true), (6, false)] {
            let click = MapEvent::PointClick {
                id: FeatureId(id),
                latlng: [44.0, -121.0],
            };
            match ctx.route(&click, &mut c, &mut polys, &mut points).panel {
                Some(PanelAction::Select(selected)) => {
                    assert_eq!(selected.pourpoint_id, FeatureId(id));
                    assert_eq!(selected.is_polygon, expected);
                }
                other => panic!("expected a selection, got {:?}", other),
            }
            assert_eq!(c.state().clicked(), Some(FeatureId(id)));
        }
    }

    #[test]
    fn unknown_point_click_changes_nothing() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Snodas,
            pourpoints: &points_data,
            popup: None,
        };
        let mut c = coordinator(MapVariant::Snodas);
        let click = MapEvent::PointClick {
            id: FeatureId(99),
            latlng: [0.0, 0.0],
        };
        let outcome = ctx.route(
            &click,
            &mut c,
            &mut FakePolygons::with(&[99]),
            &mut FakeMarkers::default(),
        );
        assert_eq!(outcome, EventOutcome::default());
        assert_eq!(c.state().clicked(), None);
    }

    #[test]
    fn open_popup_keeps_its_feature_highlighted() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Aoi,
            pourpoints: &points_data,
            popup: Some(FeatureId(3)),
        };
        let mut c = coordinator(MapVariant::Aoi);
        let mut polys = FakePolygons::with(&[3, 4]);
        let mut points = FakeMarkers::default();
        c.hover(FeatureId(3), &mut polys, &mut points);

        let out = MapEvent::PolygonOut { id: FeatureId(3) };
        ctx.route(&out, &mut c, &mut polys, &mut points);
        assert_eq!(c.state().hover(), Some(FeatureId(3)));

        ctx.route(&MapEvent::PolygonOver { id: FeatureId(4) }, &mut c, &mut polys, &mut points);
        ctx.route(&MapEvent::PolygonOut { id: FeatureId(4) }, &mut c, &mut polys, &mut points);
        assert_eq!(c.state().hover(), Some(FeatureId(3)));
        assert_eq!(polys.styles_for(3).len(), 1);
        assert!(polys.styles_for(4).is_empty());
    }

    #[test]
    fn closing_a_replaced_popup_keeps_the_new_one() {
        let points_data = pourpoints();
        let ctx = MapContext {
            variant: MapVariant::Aoi,
            pourpoints: &points_data,
            popup: Some(FeatureId(4)),
        };
        let mut c = coordinator(MapVariant::Aoi);
        let mut polys = FakePolygons::with(&[3, 4]);
        let mut points = FakeMarkers::default();
        c.hover(FeatureId(4), &mut polys, &mut points);

        let stale = MapEvent::PopupClosed {
            id: Some(FeatureId(3)),
        };
        assert_eq!(ctx.route(&stale, &mut c, &mut polys, &mut points).popup, None);
        assert_eq!(c.state().hover(), Some(FeatureId(4)));

        let current = MapEvent::PopupClosed {
            id: Some(FeatureId(4)),
        };
        let outcome = ctx.route(&current, &mut c, &mut polys, &mut points);
        assert_eq!(outcome.popup, Some(PopupAction::Closed));
        assert_eq!(c.state().hover(), None);
        assert!(polys.paths.is_empty());
    }

    #[test]
    fn leaving_without_a_popup_clears_hover() {
        let mut c = coordinator(MapVariant::Aoi);
        let mut polys = FakePolygons::with(&[2]);
        let mut points = FakeMarkers::default();
        c.hover(FeatureId(2), &mut polys, &mut points);

        end_hover(FeatureId(2), None, &mut c, &mut polys, &mut points);
        assert_eq!(c.state().hover(), None);
        assert!(polys.paths.is_empty());
    }
}
