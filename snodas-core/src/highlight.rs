//! Hover and click highlighting kept in sync across the boundary polygons and
//! the pourpoint markers.
//!
//! Highlight state is two plain ids. Every interaction recomputes the desired
//! [`OverlaySet`] from that state and diffs it against what each layer has
//! drawn, so the polygon and point renderings can never disagree about which
//! feature is highlighted.

use std::collections::BTreeMap;

use crate::feature::FeatureId;
use crate::style::{PathStyle, PointStyles, PolygonStyles};

/// Which highlight a feature is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStyle {
    Hover,
    Clicked,
    /// The pointer is over the click-selected feature.
    HoverClicked,
}

/// At most one hovered and one click-selected feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightState {
    hover: Option<FeatureId>,
    clicked: Option<FeatureId>,
}

impl HighlightState {
    pub fn hover(&self) -> Option<FeatureId> {
        self.hover
    }

    pub fn clicked(&self) -> Option<FeatureId> {
        self.clicked
    }

    pub fn set_hover(&mut self, id: FeatureId) {
        self.hover = Some(id);
    }

    /// Never touches the click selection.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub fn set_clicked(&mut self, id: FeatureId) {
        self.clicked = Some(id);
    }

    /// Drops the click selection, and the hover too when it pointed at the
    /// same feature.
    pub fn clear_clicked(&mut self) {
        if self.hover.is_some() && self.hover == self.clicked {
            self.hover = None;
        }
        self.clicked = None;
    }

    /// The overlays this state asks each layer to draw.
    ///
    /// A feature that is both hovered and clicked gets exactly one overlay.
    pub fn overlays(&self) -> OverlaySet {
        let mut set = OverlaySet::default();
        match (self.hover, self.clicked) {
            (Some(h), Some(c)) if h == c => {
                set.insert(c, HighlightStyle::HoverClicked);
            }
            (hover, clicked) => {
                if let Some(c) = clicked {
                    set.insert(c, HighlightStyle::Clicked);
                }
                if let Some(h) = hover {
                    set.insert(h, HighlightStyle::Hover);
                }
            }
        }
        set
    }
}

/// Styled overlays keyed by feature id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySet(BTreeMap<FeatureId, HighlightStyle>);

/// Changes needed to turn one overlay set into another. Erasures run first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayDiff {
    pub erase: Vec<FeatureId>,
    pub draw: Vec<(FeatureId, HighlightStyle)>,
}

impl OverlaySet {
    pub fn insert(&mut self, id: FeatureId, style: HighlightStyle) {
        self.0.insert(id, style);
    }

    pub fn remove(&mut self, id: FeatureId) {
        self.0.remove(&id);
    }

    pub fn get(&self, id: FeatureId) -> Option<HighlightStyle> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<FeatureId> {
        self.0.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Restyled features are erased and drawn again.
    pub fn diff(&self, desired: &OverlaySet) -> OverlayDiff {
        let mut diff = OverlayDiff::default();
        for (id, style) in &self.0 {
            if desired.get(*id) != Some(*style) {
                diff.erase.push(*id);
            }
        }
        for (id, style) in &desired.0 {
            if self.get(*id) != Some(*style) {
                diff.draw.push((*id, *style));
            }
        }
        diff
    }
}

/// A layer that can draw a styled overlay on top of a rendered feature.
pub trait OverlayRenderer {
    /// Whether any loaded tile currently renders this feature.
    fn has_feature(&self, id: FeatureId) -> bool;
    fn draw(&mut self, id: FeatureId, style: &PathStyle);
    /// Removing an overlay that is no longer rendered is harmless.
    fn erase(&mut self, id: FeatureId);
}

/// A layer of persistent markers that are restyled in place.
pub trait MarkerRenderer {
    fn has_marker(&self, id: FeatureId) -> bool;
    fn set_marker_style(&mut self, id: FeatureId, style: &PathStyle);
    fn restyle_all(&mut self, style: &PathStyle);
}

/// Owns highlight state and pushes it into both layers.
#[derive(Debug, Clone)]
pub struct HighlightCoordinator {
    state: HighlightState,
    zoom: f64,
    polygon_styles: PolygonStyles,
    point_styles: PointStyles,
    drawn_polygons: OverlaySet,
    drawn_points: OverlaySet,
}

impl HighlightCoordinator {
    pub fn new(polygon_styles: PolygonStyles, point_styles: PointStyles, zoom: f64) -> Self {
        Self {
            state: HighlightState::default(),
            zoom,
            polygon_styles,
            point_styles,
            drawn_polygons: OverlaySet::default(),
            drawn_points: OverlaySet::default(),
        }
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn base_point_style(&self) -> &PathStyle {
        self.point_styles.base(self.zoom)
    }

    pub fn polygon_styles(&self) -> &PolygonStyles {
        &self.polygon_styles
    }

    pub fn drawn_polygons(&self) -> &OverlaySet {
        &self.drawn_polygons
    }

    pub fn hover<P, M>(&mut self, id: FeatureId, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.state.set_hover(id);
        self.sync(polygons, points);
    }

    pub fn clear_hover<P, M>(&mut self, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.state.clear_hover();
        self.sync(polygons, points);
    }

    pub fn click<P, M>(&mut self, id: FeatureId, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.state.set_clicked(id);
        self.sync(polygons, points);
    }

    pub fn clear_click<P, M>(&mut self, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.state.clear_clicked();
        self.sync(polygons, points);
    }

    /// Zoom changes the marker base style, so every marker is restyled and
    /// both layers get their highlights applied again.
    pub fn set_zoom<P, M>(&mut self, zoom: f64, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.zoom = zoom;
        self.reset_points(points);
        self.reset_polygons(polygons);
        self.sync(polygons, points);
    }

    /// Tile loads throw away whatever the affected tiles had drawn.
    pub fn tiles_loaded<P: OverlayRenderer>(&mut self, polygons: &mut P) {
        self.reset_polygons(polygons);
        self.sync_polygons(polygons);
    }

    /// Markers were (re)created from fresh point data.
    pub fn markers_loaded<M: MarkerRenderer>(&mut self, points: &mut M) {
        self.reset_points(points);
        self.sync_points(points);
    }

    pub fn sync<P, M>(&mut self, polygons: &mut P, points: &mut M)
    where
        P: OverlayRenderer,
        M: MarkerRenderer,
    {
        self.sync_polygons(polygons);
        self.sync_points(points);
    }

    fn reset_polygons<P: OverlayRenderer>(&mut self, polygons: &mut P) {
        for id in self.drawn_polygons.ids() {
            polygons.erase(id);
        }
        self.drawn_polygons.clear();
    }

    fn reset_points<M: MarkerRenderer>(&mut self, points: &mut M) {
        points.restyle_all(self.point_styles.base(self.zoom));
        self.drawn_points.clear();
    }

    fn sync_polygons<P: OverlayRenderer>(&mut self, polygons: &mut P) {
        let diff = self.drawn_polygons.diff(&self.state.overlays());
        for id in diff.erase {
            polygons.erase(id);
            self.drawn_polygons.remove(id);
        }
        for (id, highlight) in diff.draw {
            if !polygons.has_feature(id) {
                log::debug!("No loaded tile renders boundary {}; highlight deferred", id);
                continue;
            }
            polygons.draw(id, self.polygon_styles.for_highlight(highlight));
            self.drawn_polygons.insert(id, highlight);
        }
    }

    fn sync_points<M: MarkerRenderer>(&mut self, points: &mut M) {
        let diff = self.drawn_points.diff(&self.state.overlays());
        let base = self.point_styles.base(self.zoom);
        for id in diff.erase {
            if points.has_marker(id) {
                points.set_marker_style(id, base);
            }
            self.drawn_points.remove(id);
        }
        for (id, highlight) in diff.draw {
            if !points.has_marker(id) {
                continue;
            }
            points.set_marker_style(id, self.point_styles.for_highlight(highlight));
            self.drawn_points.insert(id, highlight);
        }
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::collections::HashSet;

    /// Records the styled copies a vector-tile renderer would hold.
    #[derive(Default)]
    pub(crate) struct FakePolygons {
        pub(crate) loaded: HashSet<FeatureId>,
        pub(crate) paths: Vec<(FeatureId, PathStyle)>,
    }

    impl FakePolygons {
        pub(crate) fn with(ids: &[i64]) -> Self {
            Self {
                loaded: ids.iter().map(|i| FeatureId(*i)).collect(),
                paths: Vec::new(),
            }
        }

        pub(crate) fn styles_for(&self, id: i64) -> Vec<&PathStyle> {
            self.paths
                .iter()
                .filter(|(fid, _)| *fid == FeatureId(id))
                .map(|(_, s)| s)
                .collect()
        }
    }

    impl OverlayRenderer for FakePolygons {
        fn has_feature(&self, id: FeatureId) -> bool {
            self.loaded.contains(&id)
        }

        fn draw(&mut self, id: FeatureId, style: &PathStyle) {
            self.paths.push((id, style.clone()));
        }

        fn erase(&mut self, id: FeatureId) {
            self.paths.retain(|(fid, _)| *fid != id);
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeMarkers {
        styles: BTreeMap<FeatureId, PathStyle>,
    }

    impl FakeMarkers {
        pub(crate) fn with(ids: &[i64]) -> Self {
            Self {
                styles: ids
                    .iter()
                    .map(|i| (FeatureId(*i), PathStyle::default()))
                    .collect(),
            }
        }

        pub(crate) fn style(&self, id: i64) -> &PathStyle {
            &self.styles[&FeatureId(id)]
        }
    }

    impl MarkerRenderer for FakeMarkers {
        fn has_marker(&self, id: FeatureId) -> bool {
            self.styles.contains_key(&id)
        }

        fn set_marker_style(&mut self, id: FeatureId, style: &PathStyle) {
            self.styles.insert(id, style.clone());
        }

        fn restyle_all(&mut self, style: &PathStyle) {
            for s in self.styles.values_mut() {
                *s = style.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakeMarkers, FakePolygons};
    use super::*;

    fn coordinator(zoom: f64) -> HighlightCoordinator {
        HighlightCoordinator::new(PolygonStyles::snodas(), PointStyles::new(7.0), zoom)
    }

    #[test]
    fn hover_then_click_leaves_only_the_click_highlight() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[1, 2]);
        let mut points = FakeMarkers::with(&[1, 2]);

        c.hover(FeatureId(1), &mut polys, &mut points);
        c.click(FeatureId(1), &mut polys, &mut points);

        let styles = PolygonStyles::snodas();
        assert_eq!(polys.styles_for(1), vec![&styles.hover_clicked]);
        assert_eq!(points.style(1), &PointStyles::new(7.0).clicked);
        assert_eq!(c.state().clicked(), Some(FeatureId(1)));
        assert_eq!(
            c.state().overlays().get(FeatureId(1)),
            Some(HighlightStyle::HoverClicked)
        );

        // Pointer leaves: plain click style, still exactly one copy.
        c.clear_hover(&mut polys, &mut points);
        assert_eq!(polys.styles_for(1), vec![&styles.clicked]);
    }

    #[test]
    fn clearing_click_under_hover_removes_every_overlay() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[4]);
        let mut points = FakeMarkers::with(&[4]);

        c.hover(FeatureId(4), &mut polys, &mut points);
        c.click(FeatureId(4), &mut polys, &mut points);
        c.clear_click(&mut polys, &mut points);

        assert!(polys.paths.is_empty());
        assert_eq!(points.style(4), &PointStyles::new(7.0).visible);
        assert_eq!(c.state(), HighlightState::default());
    }

    #[test]
    fn clearing_hover_keeps_click_selection() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[1, 2]);
        let mut points = FakeMarkers::with(&[1, 2]);

        c.click(FeatureId(1), &mut polys, &mut points);
        c.hover(FeatureId(2), &mut polys, &mut points);
        assert_eq!(polys.paths.len(), 2);

        c.clear_hover(&mut polys, &mut points);
        assert_eq!(polys.paths.len(), 1);
        assert_eq!(polys.styles_for(1), vec![&PolygonStyles::snodas().clicked]);
        assert_eq!(points.style(2), &PointStyles::new(7.0).visible);
    }

    #[test]
    fn new_hover_replaces_previous_hover() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[1, 2]);
        let mut points = FakeMarkers::with(&[1, 2]);

        c.hover(FeatureId(1), &mut polys, &mut points);
        c.hover(FeatureId(2), &mut polys, &mut points);

        assert!(polys.styles_for(1).is_empty());
        assert_eq!(polys.styles_for(2).len(), 1);
        assert_eq!(points.style(1), &PointStyles::new(7.0).visible);
        assert_eq!(points.style(2), &PointStyles::new(7.0).hover);
    }

    #[test]
    fn new_click_replaces_previous_click() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[1, 2]);
        let mut points = FakeMarkers::with(&[1, 2]);

        c.click(FeatureId(1), &mut polys, &mut points);
        c.click(FeatureId(2), &mut polys, &mut points);

        assert!(polys.styles_for(1).is_empty());
        assert_eq!(points.style(1), &PointStyles::new(7.0).visible);
        assert_eq!(points.style(2), &PointStyles::new(7.0).clicked);
    }

    #[test]
    fn hover_without_loaded_tile_is_a_no_op_until_tiles_arrive() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[]);
        let mut points = FakeMarkers::with(&[9]);

        c.hover(FeatureId(9), &mut polys, &mut points);
        assert!(polys.paths.is_empty());
        assert_eq!(points.style(9), &PointStyles::new(7.0).hover);

        polys.loaded.insert(FeatureId(9));
        c.tiles_loaded(&mut polys);
        assert_eq!(polys.styles_for(9), vec![&PolygonStyles::snodas().hover]);
    }

    #[test]
    fn tile_reload_reapplies_without_duplicates() {
        let mut c = coordinator(8.0);
        let mut polys = FakePolygons::with(&[3]);
        let mut points = FakeMarkers::with(&[3]);

        c.click(FeatureId(3), &mut polys, &mut points);
        // A reload drops the tile's render state.
        polys.paths.clear();
        c.tiles_loaded(&mut polys);
        assert_eq!(polys.styles_for(3).len(), 1);

        // A reload that kept the overlay must not stack a second copy.
        c.tiles_loaded(&mut polys);
        assert_eq!(polys.styles_for(3).len(), 1);
    }

    #[test]
    fn zoom_threshold_toggles_marker_base_style() {
        let styles = PointStyles::new(7.0);
        let mut c = coordinator(5.0);
        let mut polys = FakePolygons::with(&[1, 2]);
        let mut points = FakeMarkers::with(&[1, 2]);
        c.markers_loaded(&mut points);
        c.click(FeatureId(1), &mut polys, &mut points);
        assert_eq!(points.style(2), &styles.hidden);

        c.set_zoom(7.0, &mut polys, &mut points);
        assert_eq!(points.style(2), &styles.visible);
        assert_eq!(points.style(1), &styles.clicked);

        c.set_zoom(6.0, &mut polys, &mut points);
        assert_eq!(points.style(2), &styles.hidden);
        assert_eq!(points.style(1), &styles.clicked);
        assert_eq!(polys.styles_for(1).len(), 1);
    }

    #[test]
    fn diff_erases_restyled_entries_before_drawing() {
        let mut drawn = OverlaySet::default();
        drawn.insert(FeatureId(1), HighlightStyle::Hover);
        drawn.insert(FeatureId(2), HighlightStyle::Clicked);
        let mut desired = OverlaySet::default();
        desired.insert(FeatureId(1), HighlightStyle::HoverClicked);

        let diff = drawn.diff(&desired);
        assert_eq!(diff.erase, vec![FeatureId(1), FeatureId(2)]);
        assert_eq!(diff.draw, vec![(FeatureId(1), HighlightStyle::HoverClicked)]);
    }
}
