// Settings module
// Application configuration, loaded from config.toml

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Directory holding index.html and the page assets
    pub static_dir: String,
    pub hebcal_base_url: String,
    /// When false, calendars render without Hebrew dates
    pub lookup_enabled: bool,
    pub lookup_timeout_secs: u64,
    pub max_range_days: i64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: "static".to_string(),
            hebcal_base_url: "https://www.hebcal.com".to_string(),
            lookup_enabled: true,
            lookup_timeout_secs: 20,
            max_range_days: 1096, // three years, leap day included
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }

        if self.static_dir.trim().is_empty() {
            return Err("Static directory cannot be empty".to_string());
        }

        if !self.hebcal_base_url.starts_with("https://")
            && !self.hebcal_base_url.starts_with("http://")
        {
            return Err("Hebcal base URL must be an http(s) URL".to_string());
        }

        if self.lookup_timeout_secs == 0 {
            return Err("Lookup timeout must be greater than 0 seconds".to_string());
        }

        if self.max_range_days <= 0 {
            return Err("Maximum range must be at least one day".to_string());
        }

        match self.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" | "off" => Ok(()),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
