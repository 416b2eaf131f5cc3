//! Project - Plant Projects Offered by the Picker

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Inactive,
}

/// A supervised plant project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Last modification, as displayed
    pub last_modified: String,
    pub status: ProjectStatus,
    /// Number of configured device connections
    pub connections_count: u32,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}

/// Fixed start-up data for the project picker
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "refinery".to_string(),
            name: "Oil Refinery".to_string(),
            description: "Process monitoring for the refinery units".to_string(),
            last_modified: "2024-01-15 14:30".to_string(),
            status: ProjectStatus::Active,
            connections_count: 12,
        },
        Project {
            id: "power".to_string(),
            name: "Power Complex".to_string(),
            description: "Distribution grid and generation control".to_string(),
            last_modified: "2024-01-14 09:15".to_string(),
            status: ProjectStatus::Active,
            connections_count: 8,
        },
        Project {
            id: "water".to_string(),
            name: "Water Treatment Plant".to_string(),
            description: "Water quality and process parameter control".to_string(),
            last_modified: "2024-01-10 16:45".to_string(),
            status: ProjectStatus::Inactive,
            connections_count: 5,
        },
    ]
}
