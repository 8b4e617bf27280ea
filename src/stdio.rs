use crate::dispatcher::ToolDispatcher;
use crate::mcp::dto::{McpRequest, McpResponse};
use crate::mcp::handler;
use anyhow::Result;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio_server(dispatcher: &ToolDispatcher) -> Result<()> {
    serve(dispatcher, BufReader::new(io::stdin()), io::stdout()).await
}

/// Reads newline-delimited JSON-RPC messages from `reader` until EOF and
/// writes one response line per request to `writer`.
pub async fn serve<R, W>(dispatcher: &ToolDispatcher, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break, // EOF
            Ok(_) => {
                let message = line.trim();
                if message.is_empty() {
                    continue;
                }

                tracing::debug!("Received: {}", message);

                let response = match serde_json::from_str::<McpRequest>(message) {
                    Ok(request) => handler::handle_request(dispatcher, request),
                    Err(e) => {
                        tracing::error!("Failed to parse request: {}", e);
                        Some(McpResponse::parse_error(&e))
                    }
                };

                if let Some(response) = response {
                    write_message(&mut writer, &response).await?;
                }
            }
            Err(e) => {
                tracing::error!("Error reading from stdin: {}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, response: &McpResponse) -> Result<()> {
    let response_json = serde_json::to_string(response)?;
    tracing::debug!("Sending: {}", response_json);

    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
