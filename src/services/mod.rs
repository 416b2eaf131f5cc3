//! Service Layer
//!
//! Background work that mutates the variable store: the update simulator and
//! the task that drives it on a fixed period.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SimulationTask                           │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────┐    │
//! │  │  Simulator  │  │    Clock    │  │ tokio Interval   │    │
//! │  │ (noise/rng) │  │ (timestamps)│  │ (period/cancel)  │    │
//! │  └─────────────┘  └─────────────┘  └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!               │ apply_simulation_tick        │ SimulatorEvent
//!               ▼                              ▼
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │      VariableStore        │   │     LogState (console)    │
//! └───────────────────────────┘   └───────────────────────────┘
//! ```

mod clock;
mod events;
mod scheduler;
mod simulator;

pub use clock::*;
pub use events::*;
pub use scheduler::*;
pub use simulator::*;
