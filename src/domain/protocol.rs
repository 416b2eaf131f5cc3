//! Protocol - Simulated Field-Bus Link Status
//!
//! Labels only; no protocol is actually spoken.

use serde::{Deserialize, Serialize};

/// Link health shown on the connections panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Online,
    Offline,
    Warning,
}

impl LinkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Online => "online",
            LinkStatus::Offline => "offline",
            LinkStatus::Warning => "warning",
        }
    }
}

/// One tile of the connections panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolStatus {
    /// Protocol name (e.g. "Modbus TCP")
    pub label: String,
    /// Short summary (e.g. "5 connections")
    pub summary: String,
    pub status: LinkStatus,
    /// Icon glyph shown next to the label
    pub icon: String,
}

impl ProtocolStatus {
    pub fn new(label: &str, summary: &str, status: LinkStatus, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            summary: summary.to_string(),
            status,
            icon: icon.to_string(),
        }
    }
}

/// Fixed start-up data for the connections panel
pub fn seed_protocols() -> Vec<ProtocolStatus> {
    vec![
        ProtocolStatus::new("Modbus TCP", "5 connections", LinkStatus::Online, "⇌"),
        ProtocolStatus::new("OPC UA", "2 servers", LinkStatus::Online, "▤"),
        ProtocolStatus::new("Profinet", "No link", LinkStatus::Offline, "↯"),
        ProtocolStatus::new("MQTT", "12 topics", LinkStatus::Warning, "≋"),
    ]
}
