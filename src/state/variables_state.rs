//! VariableStore - Canonical Variable Tree
//!
//! Owns the group/point tree and publishes every change as a new immutable
//! snapshot through a `watch` channel. Mutations are serialized by the
//! channel's write lock, so the simulation task and user toggles never
//! interleave inside one update.
//!
//! ```text
//!  toggle_* / apply_simulation_tick
//!            │  (exclusive, copy-on-write)
//!            ▼
//!   watch::Sender<Snapshot> ──► subscribe() ──► console re-render
//!            │
//!            ▼
//!       snapshot()  (cheap Arc clone, never aliased by later writes)
//! ```

use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::config::NoiseMode;
use crate::domain::projection::visible_points;
use crate::domain::variable::{Point, VariableTree};
use crate::services::{Simulator, TickSummary};

/// Immutable view of the whole tree
pub type Snapshot = Arc<VariableTree>;

/// Shared handle to the variable tree
///
/// Clones refer to the same store.
#[derive(Clone, Debug)]
pub struct VariableStore {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl VariableStore {
    pub fn new(tree: VariableTree) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(tree));
        Self { tx: Arc::new(tx) }
    }

    /// Current tree; later mutations never show through it
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Flip `expanded` on a group. Unknown ids are ignored.
    pub fn toggle_group_expanded(&self, group_id: &str) -> bool {
        self.tx.send_if_modified(|current| {
            let Some(index) = current.position(group_id) else {
                tracing::debug!("toggle_group_expanded: unknown group {}", group_id);
                return false;
            };

            let mut groups = current.groups().to_vec();
            let group = Arc::make_mut(&mut groups[index]);
            group.expanded = !group.expanded;

            *current = Arc::new(VariableTree::from_shared(groups, current.revision() + 1));
            true
        })
    }

    /// Flip `visible` on the point addressed by `(group_id, point_id)`.
    /// Pairs that don't resolve are ignored.
    pub fn toggle_point_visibility(&self, group_id: &str, point_id: &str) -> bool {
        self.tx.send_if_modified(|current| {
            let resolved = current.position(group_id).and_then(|gi| {
                current.groups()[gi]
                    .children
                    .iter()
                    .position(|p| p.id == point_id)
                    .map(|pi| (gi, pi))
            });
            let Some((gi, pi)) = resolved else {
                tracing::debug!(
                    "toggle_point_visibility: no point {}/{}",
                    group_id,
                    point_id
                );
                return false;
            };

            let mut groups = current.groups().to_vec();
            let point = &mut Arc::make_mut(&mut groups[gi]).children[pi];
            point.visible = !point.visible;

            *current = Arc::new(VariableTree::from_shared(groups, current.revision() + 1));
            true
        })
    }

    /// Run one tick with the simulator's configured noise policy
    pub fn apply_simulation_tick(&self, simulator: &mut Simulator, now: DateTime<Local>) -> TickSummary {
        let noise = simulator.noise();
        self.apply_simulation_tick_with(simulator, noise, now)
    }

    /// Run one tick with an explicit noise policy
    pub fn apply_simulation_tick_with(
        &self,
        simulator: &mut Simulator,
        noise: NoiseMode,
        now: DateTime<Local>,
    ) -> TickSummary {
        let mut summary = TickSummary::default();
        self.tx.send_modify(|current| {
            let (next, tick) = simulator.step_with(current, noise, now);
            summary = tick;
            *current = Arc::new(next);
        });
        summary
    }

    /// Rows for the variables table, from the current snapshot
    pub fn visible_points(&self) -> Vec<Point> {
        let snapshot = self.snapshot();
        visible_points(&snapshot).into_iter().cloned().collect()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision()
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new(crate::domain::variable::seed_tree())
    }
}
