//! Variable - Process Variable Tree
//!
//! Two-level hierarchy of groups owning measurement points. Groups are held
//! behind `Arc` so a new tree can share every group it did not touch.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Reliability tag on a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Trustworthy, live value
    Good,
    /// Known invalid
    Bad,
    /// Suspect
    Uncertain,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Bad => "bad",
            Quality::Uncertain => "uncertain",
        }
    }

    /// Parse a quality label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "good" => Some(Quality::Good),
            "bad" => Some(Quality::Bad),
            "uncertain" => Some(Quality::Uncertain),
            _ => None,
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Quality::Good)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single measured quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique across the whole tree
    pub id: String,
    /// Display label
    pub name: String,
    /// Current measurement
    pub value: f64,
    /// Display unit (may be empty)
    pub unit: String,
    pub quality: Quality,
    /// Capture time of the last simulation tick
    pub timestamp: Option<DateTime<Local>>,
    /// Shown in the data table
    pub visible: bool,
}

impl Point {
    /// Create a visible point that has not been sampled yet
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        quality: Quality,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            unit: unit.into(),
            quality,
            timestamp: None,
            visible: true,
        }
    }

    /// Builder-style override of the initial visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A named, collapsible container of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Insertion order is display order
    pub children: Vec<Point>,
    /// UI-only, never touched by the simulator
    pub expanded: bool,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>, children: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
            expanded: true,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn point(&self, point_id: &str) -> Option<&Point> {
        self.children.iter().find(|p| p.id == point_id)
    }
}

/// Immutable tree of groups
///
/// Every mutation produces a new tree; groups that were not touched are
/// shared with the previous one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableTree {
    groups: Vec<Arc<Group>>,
    revision: u64,
}

impl VariableTree {
    /// Build a tree, rejecting duplicate group ids and duplicate point ids
    pub fn new(groups: Vec<Group>) -> Result<Self> {
        let mut group_ids = HashSet::new();
        let mut point_ids = HashSet::new();

        for group in &groups {
            if !group_ids.insert(group.id.as_str()) {
                return Err(Error::DuplicateId {
                    kind: "group",
                    id: group.id.clone(),
                });
            }
            for point in &group.children {
                if !point_ids.insert(point.id.as_str()) {
                    return Err(Error::DuplicateId {
                        kind: "point",
                        id: point.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            groups: groups.into_iter().map(Arc::new).collect(),
            revision: 0,
        })
    }

    pub(crate) fn from_shared(groups: Vec<Arc<Group>>, revision: u64) -> Self {
        Self { groups, revision }
    }

    /// Groups in display order
    pub fn groups(&self) -> &[Arc<Group>] {
        &self.groups
    }

    /// Number of published mutations since the tree was built
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id).map(|g| g.as_ref())
    }

    pub fn point(&self, group_id: &str, point_id: &str) -> Option<&Point> {
        self.group(group_id).and_then(|g| g.point(point_id))
    }

    /// All points, group order then child order
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.groups.iter().flat_map(|g| g.children.iter())
    }

    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.children.len()).sum()
    }

    pub(crate) fn position(&self, group_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group_id)
    }
}

/// Fixed start-up data for the variables panel
///
/// `bad` points start at zero by convention only; nothing enforces it.
pub fn seed_tree() -> VariableTree {
    let groups = vec![
        Group::new(
            "temperatures",
            "Temperatures",
            vec![
                Point::new("temp_reactor", "Temperature_1", 23.5, "°C", Quality::Good),
                Point::new("temp_outlet", "Temperature_2", 41.8, "°C", Quality::Good)
                    .with_visible(false),
            ],
        ),
        Group::new(
            "pumps",
            "Pump Station",
            vec![
                Point::new("pump_pressure", "Pump_Pressure", 4.2, "bar", Quality::Good),
                Point::new("motor_speed", "Motor_Speed", 1450.0, "rpm", Quality::Uncertain),
            ],
        ),
        Group::new(
            "tanks",
            "Tank Farm",
            vec![
                Point::new("tank_level", "Tank_Level", 0.0, "%", Quality::Bad),
                Point::new("tank_volume", "Tank_Volume", 12.0, "m³", Quality::Good)
                    .with_visible(false),
            ],
        )
        .with_expanded(false),
    ];

    // Seed ids are literals and unique
    let groups = groups.into_iter().map(Arc::new).collect();
    VariableTree::from_shared(groups, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_tree_has_unique_ids() {
        let tree = seed_tree();
        let groups: Vec<Group> = tree.groups().iter().map(|g| g.as_ref().clone()).collect();
        assert!(VariableTree::new(groups).is_ok());
        assert_eq!(tree.point_count(), 6);
    }

    #[test]
    fn seed_bad_points_start_at_zero() {
        let tree = seed_tree();
        for point in tree.points().filter(|p| p.quality == Quality::Bad) {
            assert_eq!(point.value, 0.0);
        }
    }

    #[test]
    fn duplicate_point_id_across_groups_is_rejected() {
        let groups = vec![
            Group::new("a", "A", vec![Point::new("p", "P", 1.0, "", Quality::Good)]),
            Group::new("b", "B", vec![Point::new("p", "P", 2.0, "", Quality::Good)]),
        ];

        let err = VariableTree::new(groups).expect_err("duplicate point id");
        assert!(matches!(err, Error::DuplicateId { kind: "point", .. }));
    }

    #[test]
    fn duplicate_group_id_is_rejected() {
        let groups = vec![Group::new("a", "A", vec![]), Group::new("a", "A2", vec![])];

        let err = VariableTree::new(groups).expect_err("duplicate group id");
        assert!(matches!(err, Error::DuplicateId { kind: "group", .. }));
    }

    #[test]
    fn quality_parse_is_case_insensitive() {
        assert_eq!(Quality::parse("GOOD"), Some(Quality::Good));
        assert_eq!(Quality::parse(" uncertain "), Some(Quality::Uncertain));
        assert_eq!(Quality::parse("stale"), None);
    }

    #[test]
    fn point_lookup_requires_matching_group() {
        let tree = seed_tree();
        assert!(tree.point("pumps", "pump_pressure").is_some());
        assert!(tree.point("tanks", "pump_pressure").is_none());
        assert!(tree.point("missing", "pump_pressure").is_none());
    }
}
