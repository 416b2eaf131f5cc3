//! Console Actions
//!
//! One-line commands typed into the dashboard's command line, parsed into
//! actions on the app state.
//!
//! | Input              | Action                          |
//! |--------------------|---------------------------------|
//! | `g <group>`        | toggle group expansion          |
//! | `v <group> <point>`| toggle point visibility         |
//! | `s <section>`      | switch section                  |
//! | `p <project>`      | select project                  |
//! | `p`                | clear project selection         |
//! | `b`                | back to previous section        |
//! | `t`                | run one manual tick             |
//! | `w`                | write settings to console.toml  |
//! | `h`                | help                            |
//! | `q`                | quit                            |
//! | *(empty)*          | redraw                          |

use crate::app::navigation::Section;
use crate::error::{Error, Result};

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    ToggleGroup { group_id: String },
    TogglePoint { group_id: String, point_id: String },
    Navigate(Section),
    SelectProject { project_id: String },
    ClearProject,
    Back,
    Tick,
    SaveConfig,
    Help,
    Refresh,
    Quit,
}

impl ConsoleAction {
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(ConsoleAction::Refresh);
        };
        let args: Vec<&str> = parts.collect();
        let unknown = || Error::UnknownCommand {
            input: input.trim().to_string(),
        };

        let action = match (verb, args.as_slice()) {
            ("g", [group]) => ConsoleAction::ToggleGroup {
                group_id: group.to_string(),
            },
            ("v", [group, point]) => ConsoleAction::TogglePoint {
                group_id: group.to_string(),
                point_id: point.to_string(),
            },
            ("s", [section]) => ConsoleAction::Navigate(Section::from_id(section).ok_or_else(unknown)?),
            ("p", [project]) => ConsoleAction::SelectProject {
                project_id: project.to_string(),
            },
            ("p", []) => ConsoleAction::ClearProject,
            ("b", []) => ConsoleAction::Back,
            ("t", []) => ConsoleAction::Tick,
            ("w", []) => ConsoleAction::SaveConfig,
            ("h", []) => ConsoleAction::Help,
            ("q", []) => ConsoleAction::Quit,
            _ => return Err(unknown()),
        };
        Ok(action)
    }
}

/// Short usage text for the help line
pub fn usage() -> &'static str {
    "g <group> | v <group> <point> | s <section> | p [project] | b | t | w | h | q"
}
