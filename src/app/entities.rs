//! AppEntities - Console State Handles
//!
//! Everything the console reads or mutates is owned here and passed by
//! reference; there are no global singletons, so several dashboards (or
//! tests) can run side by side.

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::actions::{ConsoleAction, usage};
use crate::app::navigation::Section;
use crate::domain::config::AppConfig;
use crate::domain::variable::{VariableTree, seed_tree};
use crate::services::{Clock, Simulator, SimulatorEvent};
use crate::state::{
    connection_state::ConnectionState, log_state::LogLevel, log_state::LogState,
    navigation_state::NavigationState, project_state::ProjectState,
    variables_state::VariableStore,
};
use crate::utils::config_store::save_config_to;

/// ChaCha stream for manual ticks; the simulation task uses stream 0
const MANUAL_TICK_STREAM: u64 = 1;

/// Result of applying a console action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Collection of all console state
pub struct AppEntities {
    /// Loaded configuration
    pub config: AppConfig,
    /// Variable tree shared with the simulation task
    pub store: VariableStore,
    /// Protocol link status
    pub connection: ConnectionState,
    /// Active section
    pub navigation: NavigationState,
    /// Project picker
    pub projects: ProjectState,
    /// Log panel (ring buffer)
    pub logs: LogState,
    /// Simulator for manually requested ticks
    manual: Simulator,
    clock: Arc<dyn Clock>,
    /// Where `w` writes the settings
    config_path: Option<PathBuf>,
}

impl AppEntities {
    /// Initialize with seed data
    pub fn init(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_tree(config, seed_tree(), clock)
    }

    pub fn with_tree(config: AppConfig, tree: VariableTree, clock: Arc<dyn Clock>) -> Self {
        let manual = Simulator::from_config_stream(&config.simulation, MANUAL_TICK_STREAM);
        Self {
            config,
            store: VariableStore::new(tree),
            connection: ConnectionState::default(),
            navigation: NavigationState::default(),
            projects: ProjectState::default(),
            logs: LogState::default(),
            manual,
            clock,
            config_path: None,
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Move pending simulator events into the log panel
    pub fn drain_events(&mut self, events: &crossbeam_channel::Receiver<SimulatorEvent>) -> usize {
        let mut count = 0;
        for event in events.try_iter() {
            self.logs.ingest(&event);
            count += 1;
        }
        count
    }

    /// Apply a parsed console action
    pub fn apply(&mut self, action: ConsoleAction) -> Flow {
        match action {
            ConsoleAction::ToggleGroup { group_id } => {
                if !self.store.toggle_group_expanded(&group_id) {
                    self.logs.push_now(LogLevel::Warn, format!("No group '{group_id}'"));
                }
            }
            ConsoleAction::TogglePoint { group_id, point_id } => {
                if !self.store.toggle_point_visibility(&group_id, &point_id) {
                    self.logs
                        .push_now(LogLevel::Warn, format!("No point '{group_id}/{point_id}'"));
                }
            }
            ConsoleAction::Navigate(section) => {
                self.navigation.set_active(section);
            }
            ConsoleAction::SelectProject { project_id } => {
                if self.projects.select(&project_id) {
                    self.logs
                        .push_now(LogLevel::Info, format!("Opened project '{project_id}'"));
                    self.navigation.set_active(Section::Variables);
                } else {
                    self.logs
                        .push_now(LogLevel::Warn, format!("No project '{project_id}'"));
                }
            }
            ConsoleAction::ClearProject => {
                self.projects.clear();
                self.logs.push_now(LogLevel::Info, "Project closed");
            }
            ConsoleAction::Back => {
                self.navigation.back();
            }
            ConsoleAction::Tick => {
                let summary = self.store.apply_simulation_tick(&mut self.manual, self.clock.now());
                self.logs.push_now(
                    LogLevel::Info,
                    format!(
                        "Manual tick: {}/{} points updated",
                        summary.perturbed, summary.touched
                    ),
                );
            }
            ConsoleAction::SaveConfig => self.save_config(),
            ConsoleAction::Help => {
                self.logs.push_now(LogLevel::Info, usage());
            }
            ConsoleAction::Refresh => {}
            ConsoleAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            self.logs
                .push_now(LogLevel::Warn, "No config directory, settings not saved");
            return;
        };
        match save_config_to(path, &self.config) {
            Ok(()) => {
                tracing::info!("Saved settings to {}", path.display());
                self.logs
                    .push_now(LogLevel::Info, format!("Saved settings to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("Failed to save settings: {}", e);
                self.logs
                    .push_now(LogLevel::Error, format!("Failed to save settings: {e}"));
            }
        }
    }
}
