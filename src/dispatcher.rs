use crate::error::{Result, TimeError};
use crate::mcp::dto::{ToolDescriptor, ToolResponse};
use crate::tools::time::{
    format_timestamp, get_current_date, get_current_time, get_datetime_info, TimeTools,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Transport-agnostic entry point: both the stdio loop and the HTTP router
/// only ever call [`ToolDispatcher::list_tools`] and
/// [`ToolDispatcher::call_tool`].
pub struct ToolDispatcher {
    tools: TimeTools,
    descriptors: Vec<ToolDescriptor>,
}

impl ToolDispatcher {
    pub fn new(tools: TimeTools) -> Self {
        Self {
            tools,
            descriptors: tool_descriptors(),
        }
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.descriptors.clone()
    }

    /// Never fails: every error becomes an `isError` response.
    pub fn call_tool(&self, name: &str, arguments: Value) -> ToolResponse {
        tracing::info!("Handling tool call: {}", name);
        match self.dispatch(name, arguments) {
            Ok(text) => ToolResponse::text(text),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                ToolResponse::error(format!("Error: {}", e))
            }
        }
    }

    fn dispatch(&self, name: &str, arguments: Value) -> Result<String> {
        match name {
            "get_current_time" => get_current_time(&self.tools, parse_arguments(name, arguments)?),
            "get_current_date" => get_current_date(&self.tools, parse_arguments(name, arguments)?),
            "get_datetime_info" => {
                get_datetime_info(&self.tools, parse_arguments(name, arguments)?)
            }
            "format_timestamp" => format_timestamp(&self.tools, parse_arguments(name, arguments)?),
            _ => Err(TimeError::unknown_tool(name)),
        }
    }
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new(TimeTools::default())
    }
}

// Missing arguments mean "all defaults". Only a non-object is rejected;
// odd values inside the object are left to the tools.
fn parse_arguments<T: DeserializeOwned + Default>(tool: &str, arguments: Value) -> Result<T> {
    match arguments {
        Value::Null => Ok(T::default()),
        Value::Object(_) => serde_json::from_value(arguments)
            .map_err(|e| TimeError::invalid_arguments(tool, e.to_string())),
        _ => Err(TimeError::invalid_arguments(tool, "arguments must be an object")),
    }
}

fn timezone_property(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "default": "local"
    })
}

fn tool_descriptors() -> Vec<ToolDescriptor> {
    let zone_help = "Timezone (e.g., 'America/New_York', 'Europe/London')";
    vec![
        ToolDescriptor {
            name: "get_current_time".to_string(),
            description: "Get the current time in various formats".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "description": "Time format: 'iso', 'local', 'utc', or 'unix'",
                        "enum": ["iso", "local", "utc", "unix"],
                        "default": "iso"
                    },
                    "timezone": timezone_property(zone_help)
                },
                "required": []
            }),
        },
        ToolDescriptor {
            name: "get_current_date".to_string(),
            description: "Get the current date in various formats".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "description": "Date format: 'iso', 'local', 'short', 'long', or 'custom'",
                        "enum": ["iso", "local", "short", "long", "custom"],
                        "default": "iso"
                    },
                    "customFormat": {
                        "type": "string",
                        "description": "Custom format (when format is 'custom'): a JSON object of date-time options such as {\"weekday\":\"long\",\"month\":\"short\"}"
                    },
                    "timezone": timezone_property(zone_help)
                },
                "required": []
            }),
        },
        ToolDescriptor {
            name: "get_datetime_info".to_string(),
            description: "Get comprehensive date and time information".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timezone": timezone_property(zone_help)
                },
                "required": []
            }),
        },
        ToolDescriptor {
            name: "format_timestamp".to_string(),
            description: "Format a given timestamp".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timestamp": {
                        "type": "number",
                        "description": "Unix timestamp in milliseconds"
                    },
                    "format": {
                        "type": "string",
                        "description": "Output format: 'iso', 'local', 'utc', or 'custom'",
                        "enum": ["iso", "local", "utc", "custom"],
                        "default": "iso"
                    },
                    "timezone": timezone_property("Timezone for formatting")
                },
                "required": ["timestamp"]
            }),
        },
    ]
}
