//! # Dashboard Configuration

use serde::{Deserialize, Serialize};

/// Dashboard configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the web front end, used to print absolute links.
    pub app_url: String,

    /// Route of the dashboard page.
    pub route_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:3000".to_string(),
            route_path: "/blog-page".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self {
            app_url: "http://127.0.0.1:3000".to_string(),
            ..Self::default()
        }
    }
}
