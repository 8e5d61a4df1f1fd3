//! Endpoint configuration for the uptime monitor

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One HTTP endpoint to probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Target URL, also the fallback display name
    pub url: String,

    /// Human-readable name shown in per-endpoint output
    pub name: Option<String>,

    /// HTTP method, upper-cased before dispatch
    #[serde(default = "default_method")]
    pub method: String,

    /// Extra request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Optional JSON request body
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl EndpointSpec {
    /// Name to display for this endpoint, falling back to the URL
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Monitor configuration: the ordered list of endpoints to probe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub endpoints: Vec<EndpointSpec>,
}

impl Config {
    /// Load configuration from a YAML file holding a list of endpoints
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let endpoints: Vec<EndpointSpec> = serde_yaml::from_str(&raw)?;
        Ok(Self { endpoints })
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.endpoints.is_empty() {
            return Err("at least one endpoint must be configured".to_string());
        }

        for endpoint in &self.endpoints {
            if endpoint.url.is_empty() {
                return Err("endpoint url cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
