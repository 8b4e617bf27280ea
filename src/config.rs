use crate::error::{Result, TimeError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub transport: String, // "stdio", "http" ("sse" is an alias)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub cors_enabled: bool,
    pub sse_keep_alive_secs: u64,
    /// Outbound messages buffered per SSE session before senders wait.
    pub session_buffer: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    // Overrides the host zone used for "local" renderings
    pub local_timezone: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            transport: "stdio".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_enabled: true,
            sse_keep_alive_secs: 15,
            session_buffer: 32,
        }
    }
}

impl TimeConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TimeError::config_error(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TimeError::config_error(format!("Failed to parse config file: {}", e)))
    }

    /// Applies environment-style overrides. `PORT` is honoured for hosting
    /// platforms; `TIME_MCP_PORT` wins when both are set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["PORT", "TIME_MCP_PORT"] {
            if let Some(port) = lookup(key) {
                self.server.port = port
                    .trim()
                    .parse()
                    .map_err(|_| TimeError::config_error(format!("Invalid {}", key)))?;
            }
        }

        if let Some(host) = lookup("TIME_MCP_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host.trim().to_string();
            }
        }

        if let Some(log_level) = lookup("TIME_MCP_LOG_LEVEL") {
            self.server.log_level = log_level;
        }

        if let Some(transport) = lookup("TIME_MCP_TRANSPORT") {
            self.server.transport = transport;
        }

        if let Some(enabled) = lookup("TIME_MCP_CORS") {
            self.http.cors_enabled =
                matches!(enabled.as_str(), "1" | "true" | "TRUE" | "yes" | "on");
        }

        if let Some(secs) = lookup("TIME_MCP_SSE_KEEP_ALIVE_SECS") {
            self.http.sse_keep_alive_secs = secs.trim().parse().map_err(|_| {
                TimeError::config_error("Invalid TIME_MCP_SSE_KEEP_ALIVE_SECS")
            })?;
        }

        if let Some(zone) = lookup("TIME_MCP_LOCAL_TIMEZONE") {
            let zone = zone.trim();
            self.locale.local_timezone = (!zone.is_empty()).then(|| zone.to_string());
        }

        Ok(())
    }
}
