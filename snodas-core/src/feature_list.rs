//! Sidebar list mirroring the loaded boundary layer.

use std::cmp::Ordering;

use crate::feature::{Aoi, BoundaryFeature, FeatureId};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: FeatureId,
    pub name: String,
    pub aois: Vec<Aoi>,
}

/// Rows sorted by name, plus a text filter over them.
///
/// The filter only changes what [`FeatureList::visible`] returns; the rows
/// themselves always match the last load one-for-one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureList {
    rows: Vec<FeatureRow>,
    filter: String,
}

fn by_name(a: &FeatureRow, b: &FeatureRow) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

impl FeatureList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every row with one per boundary, re-sort, and clear the filter.
    pub fn populate(&mut self, boundaries: &[BoundaryFeature]) {
        self.rows = boundaries
            .iter()
            .map(|b| FeatureRow {
                id: b.id(),
                name: b.properties.name.clone(),
                aois: b.properties.aois.clone(),
            })
            .collect();
        self.rows.sort_by(by_name);
        self.clear_filter();
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: FeatureId) -> Option<&FeatureRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Rows whose name contains the filter text, ignoring case.
    pub fn visible(&self) -> Vec<&FeatureRow> {
        let needle = self.filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Whether leaving a sidebar row should drop the map hover it started.
///
/// A feature whose popup is open stays highlighted.
pub fn leave_clears_hover(row: FeatureId, open_popup: Option<FeatureId>) -> bool {
    open_popup != Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{BoundaryProperties, Feature};

    fn boundary(id: i64, name: &str) -> BoundaryFeature {
        Feature {
            geometry: serde_json::Value::Null,
            properties: BoundaryProperties {
                pourpoint_id: FeatureId(id),
                name: name.to_string(),
                awdb_id: None,
                aois: Vec::new(),
            },
        }
    }

    fn names(rows: &[&FeatureRow]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn one_row_per_boundary_sorted_by_name() {
        let mut list = FeatureList::new();
        list.populate(&[
            boundary(1, "Umatilla"),
            boundary(2, "applegate"),
            boundary(3, "Klamath"),
        ]);
        assert_eq!(list.len(), 3);
        assert_eq!(names(&list.visible()), vec!["applegate", "Klamath", "Umatilla"]);
    }

    #[test]
    fn filter_narrows_without_dropping_rows() {
        let mut list = FeatureList::new();
        list.populate(&[
            boundary(1, "North Santiam"),
            boundary(2, "South Santiam"),
            boundary(3, "McKenzie"),
        ]);
        list.set_filter("SANTIAM");
        assert_eq!(names(&list.visible()), vec!["North Santiam", "South Santiam"]);
        assert_eq!(list.len(), 3);

        list.clear_filter();
        assert_eq!(list.visible().len(), 3);
    }

    #[test]
    fn repopulating_replaces_rows_and_clears_filter() {
        let mut list = FeatureList::new();
        list.populate(&[boundary(1, "Rogue"), boundary(2, "Illinois")]);
        list.set_filter("rogue");

        list.populate(&[boundary(5, "John Day")]);
        assert_eq!(list.filter(), "");
        assert_eq!(list.len(), 1);
        assert_eq!(list.rows()[0].id, FeatureId(5));
        assert!(list.row(FeatureId(1)).is_none());
    }

    #[test]
    fn open_popup_keeps_row_highlight() {
        assert!(leave_clears_hover(FeatureId(1), None));
        assert!(leave_clears_hover(FeatureId(1), Some(FeatureId(2))));
        assert!(!leave_clears_hover(FeatureId(2), Some(FeatureId(2))));
    }
}
