//! Navigation - Console Sections
//!
//! Defines the sections reachable from the navigation bar.

use serde::{Deserialize, Serialize};

/// Available sections in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Protocol link status
    #[default]
    Connections,
    /// Variable tree and table
    Variables,
    /// Signal converters
    Converters,
    /// Project picker
    Projects,
    /// Signal routing
    Signals,
    /// Settings panel
    Settings,
}

impl Section {
    /// Stable id used by console commands
    pub fn id(&self) -> &'static str {
        match self {
            Section::Connections => "connections",
            Section::Variables => "variables",
            Section::Converters => "converters",
            Section::Projects => "projects",
            Section::Signals => "signals",
            Section::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Connections => "Connections",
            Section::Variables => "Variables",
            Section::Converters => "Converters",
            Section::Projects => "Projects",
            Section::Signals => "Signals",
            Section::Settings => "Settings",
        }
    }

    /// Icon glyph shown in front of the label in the navigation bar
    pub fn icon(&self) -> &'static str {
        match self {
            Section::Connections => "⇄",
            Section::Variables => "≡",
            Section::Converters => "⟲",
            Section::Projects => "▣",
            Section::Signals => "∿",
            Section::Settings => "⚙",
        }
    }

    /// Sections without a panel render an "under construction" placeholder
    pub fn has_panel(&self) -> bool {
        !matches!(self, Section::Converters | Section::Signals)
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or_default()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.id() == id)
    }

    /// Get all sections in navigation-bar order
    pub fn all() -> &'static [Section] {
        &[
            Section::Connections,
            Section::Variables,
            Section::Converters,
            Section::Projects,
            Section::Signals,
            Section::Settings,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_resolve_back_to_sections() {
        for section in Section::all() {
            assert_eq!(Section::from_id(section.id()), Some(*section));
        }
        assert_eq!(Section::from_id("alarms"), None);
    }

    #[test]
    fn only_converters_and_signals_lack_a_panel() {
        let without: Vec<_> = Section::all().iter().filter(|s| !s.has_panel()).collect();
        assert_eq!(without, vec![&Section::Converters, &Section::Signals]);
        assert_eq!(Section::Settings.index(), 5);
    }
}
