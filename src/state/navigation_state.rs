//! NavigationState - Active Section

use crate::app::navigation::Section;

/// State for section navigation
#[derive(Debug, Default)]
pub struct NavigationState {
    /// Currently active section
    active: Section,
    /// Section shown before the last switch
    previous: Option<Section>,
}

impl NavigationState {
    pub fn active(&self) -> Section {
        self.active
    }

    /// Set the active section (from the navigation bar)
    ///
    /// Returns `false` when the section was already active.
    pub fn set_active(&mut self, section: Section) -> bool {
        if self.active == section {
            return false;
        }
        self.previous = Some(self.active);
        self.active = section;
        tracing::debug!("Navigated to {}", section.id());
        true
    }

    /// Return to the previously shown section, if any
    pub fn back(&mut self) -> bool {
        match self.previous.take() {
            Some(section) => {
                self.previous = Some(self.active);
                self.active = section;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_connections() {
        assert_eq!(NavigationState::default().active(), Section::Connections);
    }

    #[test]
    fn switching_remembers_previous() {
        let mut nav = NavigationState::default();
        assert!(nav.set_active(Section::Variables));
        assert!(!nav.set_active(Section::Variables));

        assert!(nav.back());
        assert_eq!(nav.active(), Section::Connections);
        // Back again toggles between the last two sections
        assert!(nav.back());
        assert_eq!(nav.active(), Section::Variables);
    }

    #[test]
    fn back_without_history_is_a_no_op() {
        let mut nav = NavigationState::default();
        assert!(!nav.back());
        assert_eq!(nav.active(), Section::Connections);
    }
}
