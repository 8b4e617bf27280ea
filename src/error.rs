use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimeError>;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Timestamp is required")]
    MissingTimestamp,

    #[error("Invalid timestamp")]
    InvalidTimestamp,

    #[error("Invalid time zone specified: {0}")]
    InvalidTimeZone(String),

    #[error("{0}")]
    InvalidOptions(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session {0} is not draining its stream")]
    SessionBacklogged(String),

    #[error("Session {0} is closed")]
    SessionClosed(String),
}

impl TimeError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        TimeError::UnknownTool { name: name.into() }
    }

    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        TimeError::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_options(msg: impl Into<String>) -> Self {
        TimeError::InvalidOptions(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        TimeError::ConfigError(msg.into())
    }
}
