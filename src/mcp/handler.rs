use crate::dispatcher::ToolDispatcher;
use serde_json::json;

use super::dto::{
    McpRequest, McpResponse, ToolCall, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND,
};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "time-server";

/// Routes one JSON-RPC message. Returns `None` for notifications.
pub fn handle_request(dispatcher: &ToolDispatcher, request: McpRequest) -> Option<McpResponse> {
    if request.is_notification() {
        tracing::debug!("Received notification: {}", request.method);
        return None;
    }

    let id = request.id;
    let response = match request.method.as_str() {
        "initialize" => McpResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => McpResponse::success(id, json!({})),
        "tools/list" => McpResponse::success(id, json!({ "tools": dispatcher.list_tools() })),
        "tools/call" => match request.params {
            Some(params) => match serde_json::from_value::<ToolCall>(params) {
                Ok(tool_call) => {
                    let result = dispatcher.call_tool(&tool_call.name, tool_call.arguments);
                    match serde_json::to_value(result) {
                        Ok(value) => McpResponse::success(id, value),
                        Err(e) => McpResponse::failure(
                            id,
                            INTERNAL_ERROR,
                            format!("Failed to encode tool result: {}", e),
                        ),
                    }
                }
                Err(_) => McpResponse::failure(id, INVALID_PARAMS, "Invalid tool call parameters"),
            },
            None => McpResponse::failure(id, INVALID_PARAMS, "Missing parameters"),
        },
        _ => McpResponse::failure(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    };
    Some(response)
}
