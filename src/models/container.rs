// Docker container models

use serde::{Deserialize, Serialize};

/// Health check outcome; serializes to lowercase JSON (e.g. "healthy").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerHealth {
    Healthy,
    Unhealthy,
    Starting,
    #[default]
    None,
}

impl ContainerHealth {
    /// Parse from the `docker ps` status column, e.g. "Up 2 hours (healthy)".
    ///
    /// Only the first parenthesized group is inspected; anything unrecognized
    /// (including "Exited (0) ...") is `None`.
    pub fn from_status(status: &str) -> Self {
        let Some(open) = status.find('(') else {
            return ContainerHealth::None;
        };
        let rest = &status[open + 1..];
        let inner = rest.find(')').map_or(rest, |close| &rest[..close]);
        match inner {
            "healthy" => ContainerHealth::Healthy,
            "unhealthy" => ContainerHealth::Unhealthy,
            s if s.starts_with("health:") => ContainerHealth::Starting,
            _ => ContainerHealth::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub id: String,
    pub image: String,
    pub names: String,
    pub status: String,
    pub state: String,
    pub health: ContainerHealth,
}
