//! Simulator Events
//!
//! Lifecycle and per-tick notifications emitted by the simulation task and
//! consumed by the console log panel.

use std::time::Duration;

/// Outcome of one simulation tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Points whose timestamp was refreshed (all of them)
    pub touched: usize,
    /// Points whose value was perturbed (quality good)
    pub perturbed: usize,
    /// Revision of the tree the tick produced
    pub revision: u64,
}

/// Events emitted by the simulation task
#[derive(Clone, Debug, PartialEq)]
pub enum SimulatorEvent {
    /// Task started with the given period
    Started {
        period: Duration,
    },

    /// One tick was applied to the store
    Tick {
        /// Sequence number of the tick, starting at 1
        tick: u64,
        summary: TickSummary,
    },

    /// Task exited after cancellation
    Stopped {
        /// Ticks applied over the task's lifetime
        ticks: u64,
    },
}
