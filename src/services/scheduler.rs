//! Simulation Task
//!
//! Runs the update simulator against a [`VariableStore`] once per period on
//! the tokio runtime until cancelled.
//!
//! ## Lifecycle
//!
//! ```text
//! SimulationTask::spawn ──► Started
//!        │
//!        ▼  every period
//!   store.apply_simulation_tick ──► Tick { tick, summary }
//!        │
//!        ▼  stop() / drop
//!     Stopped { ticks }
//! ```
//!
//! Timing comes from `tokio::time`, so tests run it under a paused runtime
//! and advance virtual time; capture times come from the injected [`Clock`].

use crossbeam_channel::Sender;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::clock::Clock;
use crate::services::events::SimulatorEvent;
use crate::services::simulator::Simulator;
use crate::state::variables_state::VariableStore;

/// Handle to a running simulation task
///
/// Dropping the handle cancels the task.
pub struct SimulationTask {
    period: Duration,
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationTask {
    /// Spawn the task on the current tokio runtime
    ///
    /// The first tick fires one full period after spawning.
    pub fn spawn(
        store: VariableStore,
        simulator: Simulator,
        period: Duration,
        clock: Arc<dyn Clock>,
        events: Sender<SimulatorEvent>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(store, simulator, period, clock, events, shutdown_rx));
        tracing::info!("Simulation task started (period {:?})", period);

        Self {
            period,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait until it has exited
    ///
    /// No tick is applied once this returns.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Simulation task ended abnormally: {}", e);
            }
        }
        tracing::info!("Simulation task stopped");
    }
}

impl Drop for SimulationTask {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for SimulationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationTask")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run(
    store: VariableStore,
    mut simulator: Simulator,
    period: Duration,
    clock: Arc<dyn Clock>,
    events: Sender<SimulatorEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let _ = events.send(SimulatorEvent::Started { period });
    let mut ticks: u64 = 0;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        tokio::select! {
            biased;
            changed = shutdown_rx.changed() => {
                // Sender gone means the handle was dropped
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let summary = store.apply_simulation_tick(&mut simulator, clock.now());
                ticks += 1;
                tracing::debug!(
                    "tick {}: {} touched, {} perturbed (revision {})",
                    ticks,
                    summary.touched,
                    summary.perturbed,
                    summary.revision
                );
                let _ = events.send(SimulatorEvent::Tick { tick: ticks, summary });
            }
        }
    }

    let _ = events.send(SimulatorEvent::Stopped { ticks });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::NoiseMode;
    use crate::services::clock::ManualClock;
    use chrono::Local;
    use crossbeam_channel::unbounded;

    fn spawn_task(
        store: &VariableStore,
        clock: Arc<ManualClock>,
    ) -> (SimulationTask, crossbeam_channel::Receiver<SimulatorEvent>) {
        let (tx, rx) = unbounded();
        let task = SimulationTask::spawn(
            store.clone(),
            Simulator::seeded(NoiseMode::fixed(), 1),
            Duration::from_secs(2),
            clock,
            tx,
        );
        (task, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let store = VariableStore::default();
        let clock = Arc::new(ManualClock::new(Local::now()));
        let (task, rx) = spawn_task(&store, clock);

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(store.revision(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.revision(), 1);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(store.revision(), 3);

        task.stop().await;

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events.first(),
            Some(&SimulatorEvent::Started {
                period: Duration::from_secs(2)
            })
        );
        assert_eq!(events.last(), Some(&SimulatorEvent::Stopped { ticks: 3 }));
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_stop() {
        let store = VariableStore::default();
        let clock = Arc::new(ManualClock::new(Local::now()));
        let (task, _rx) = spawn_task(&store, clock);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        task.stop().await;
        let revision = store.revision();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.revision(), revision);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_task() {
        let store = VariableStore::default();
        let clock = Arc::new(ManualClock::new(Local::now()));
        let (task, _rx) = spawn_task(&store, clock);

        drop(task);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timestamps_come_from_injected_clock() {
        let store = VariableStore::default();
        let start = Local::now();
        let clock = Arc::new(ManualClock::new(start));
        let (task, _rx) = spawn_task(&store, clock.clone());

        tokio::time::sleep(Duration::from_millis(2100)).await;
        let first = store.snapshot();
        assert!(first.points().all(|p| p.timestamp == Some(start)));

        clock.advance(chrono::Duration::seconds(2));
        tokio::time::sleep(Duration::from_secs(2)).await;
        let second = store.snapshot();
        assert!(
            second
                .points()
                .all(|p| p.timestamp == Some(start + chrono::Duration::seconds(2)))
        );

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn user_toggles_interleave_with_ticks() {
        let store = VariableStore::default();
        let clock = Arc::new(ManualClock::new(Local::now()));
        let (task, _rx) = spawn_task(&store, clock);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert!(store.toggle_point_visibility("tanks", "tank_volume"));
        tokio::time::sleep(Duration::from_secs(2)).await;

        let snapshot = store.snapshot();
        assert!(snapshot.point("tanks", "tank_volume").expect("point").visible);
        assert_eq!(snapshot.revision(), 3);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn tick_events_report_their_own_revision() {
        let store = VariableStore::default();
        let clock = Arc::new(ManualClock::new(Local::now()));
        let (task, rx) = spawn_task(&store, clock);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        // Toggles between ticks bump the revision but don't belong to a tick
        assert!(store.toggle_group_expanded("tanks"));
        assert!(store.toggle_group_expanded("pumps"));
        tokio::time::sleep(Duration::from_secs(2)).await;
        task.stop().await;

        let revisions: Vec<u64> = rx
            .try_iter()
            .filter_map(|event| match event {
                SimulatorEvent::Tick { summary, .. } => Some(summary.revision),
                _ => None,
            })
            .collect();
        assert_eq!(revisions, vec![1, 4]);
    }
}
