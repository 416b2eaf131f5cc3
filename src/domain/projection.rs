//! Projection - Rows of the Variables Table

use crate::domain::variable::{Point, VariableTree};

/// Flatten every group's children (group order, then child order) and keep
/// the visible ones.
pub fn visible_points(tree: &VariableTree) -> Vec<&Point> {
    tree.points().filter(|p| p.visible).collect()
}

/// Table content as the presentation layer sees it
#[derive(Debug, PartialEq)]
pub enum TableView<'a> {
    /// Nothing is selected; render the placeholder instead of an empty table
    NoSelection,
    Rows(Vec<&'a Point>),
}

impl<'a> TableView<'a> {
    pub fn from_tree(tree: &'a VariableTree) -> Self {
        let rows = visible_points(tree);
        if rows.is_empty() {
            TableView::NoSelection
        } else {
            TableView::Rows(rows)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableView::NoSelection => 0,
            TableView::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::{Group, Quality};

    fn ids<'a>(points: &[&'a Point]) -> Vec<&'a str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn keeps_group_then_child_order() {
        let tree = VariableTree::new(vec![
            Group::new(
                "g1",
                "G1",
                vec![
                    Point::new("a", "A", 1.0, "", Quality::Good),
                    Point::new("b", "B", 1.0, "", Quality::Bad).with_visible(false),
                    Point::new("c", "C", 1.0, "", Quality::Uncertain),
                ],
            ),
            Group::new(
                "g2",
                "G2",
                vec![Point::new("d", "D", 1.0, "", Quality::Good)],
            )
            .with_expanded(false),
        ])
        .expect("tree");

        assert_eq!(ids(&visible_points(&tree)), vec!["a", "c", "d"]);
    }

    #[test]
    fn every_visible_point_appears_exactly_once() {
        let tree = crate::domain::variable::seed_tree();
        let rows = visible_points(&tree);

        assert!(rows.iter().all(|p| p.visible));
        let expected = tree.points().filter(|p| p.visible).count();
        assert_eq!(rows.len(), expected);
        for point in tree.points().filter(|p| p.visible) {
            assert_eq!(rows.iter().filter(|r| r.id == point.id).count(), 1);
        }
    }

    #[test]
    fn empty_projection_is_no_selection() {
        let tree = VariableTree::new(vec![Group::new(
            "g",
            "G",
            vec![Point::new("p", "P", 1.0, "", Quality::Good).with_visible(false)],
        )])
        .expect("tree");

        assert_eq!(TableView::from_tree(&tree), TableView::NoSelection);
        assert!(TableView::from_tree(&tree).is_empty());
    }
}
