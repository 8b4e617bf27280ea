pub mod dto;
pub mod handler;

pub use dto::{
    McpError, McpRequest, McpResponse, ToolCall, ToolContent, ToolDescriptor, ToolResponse,
};
pub use handler::handle_request;
