//! ConnectionState - Protocol Link Status Panel

use crate::domain::protocol::{LinkStatus, ProtocolStatus, seed_protocols};

/// State for the connections panel
#[derive(Debug, Clone)]
pub struct ConnectionState {
    statuses: Vec<ProtocolStatus>,
}

impl ConnectionState {
    pub fn new(statuses: Vec<ProtocolStatus>) -> Self {
        Self { statuses }
    }

    /// Set status for a protocol by label. Unknown labels are ignored.
    pub fn set_status(&mut self, label: &str, status: LinkStatus, summary: Option<String>) -> bool {
        let Some(entry) = self.statuses.iter_mut().find(|s| s.label == label) else {
            return false;
        };
        entry.status = status;
        if let Some(summary) = summary {
            entry.summary = summary;
        }
        true
    }

    /// Get status for a protocol
    pub fn get_status(&self, label: &str) -> Option<&ProtocolStatus> {
        self.statuses.iter().find(|s| s.label == label)
    }

    /// Check if a protocol link is online
    pub fn is_online(&self, label: &str) -> bool {
        self.get_status(label)
            .map(|s| s.status == LinkStatus::Online)
            .unwrap_or(false)
    }

    pub fn online_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| s.status == LinkStatus::Online)
            .count()
    }

    /// Check if every link is online
    pub fn all_online(&self) -> bool {
        self.online_count() == self.statuses.len()
    }

    /// Get all statuses in panel order
    pub fn all_statuses(&self) -> &[ProtocolStatus] {
        &self.statuses
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new(seed_protocols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_two_online_links() {
        let state = ConnectionState::default();
        assert_eq!(state.online_count(), 2);
        assert!(state.is_online("Modbus TCP"));
        assert!(!state.is_online("Profinet"));
        assert!(!state.all_online());
    }

    #[test]
    fn set_status_updates_known_label_only() {
        let mut state = ConnectionState::default();
        assert!(state.set_status("Profinet", LinkStatus::Online, Some("1 device".to_string())));
        assert!(!state.set_status("BACnet", LinkStatus::Online, None));

        let profinet = state.get_status("Profinet").expect("status");
        assert_eq!(profinet.status, LinkStatus::Online);
        assert_eq!(profinet.summary, "1 device");
    }
}
