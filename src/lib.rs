pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod intl;
pub mod mcp;
pub mod session;
pub mod stdio;
pub mod tools;

pub use config::TimeConfig;
pub use dispatcher::ToolDispatcher;
pub use error::{Result, TimeError};
