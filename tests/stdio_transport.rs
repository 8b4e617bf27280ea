use serde_json::Value;
use time_mcp::stdio;
use time_mcp::ToolDispatcher;
use tokio::io::BufReader;

async fn run(input: &str) -> Vec<Value> {
    let dispatcher = ToolDispatcher::default();
    let mut output = Vec::new();
    stdio::serve(&dispatcher, BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn answers_each_request_on_its_own_line() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"format_timestamp","arguments":{"timestamp":0}}}"#,
        "\n",
    );
    let responses = run(input).await;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "time-server");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 4);
    assert_eq!(
        responses[2]["result"]["content"][0]["text"],
        "Formatted timestamp: 1970-01-01T00:00:00.000Z"
    );
}

#[tokio::test]
async fn reports_parse_errors_and_keeps_going() {
    let input = "{oops\n{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"ping\"}\n";
    let responses = run(input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert!(responses[0]["error"]["data"]["details"].is_string());
    assert_eq!(responses[1]["id"], 5);
}

#[test]
fn stops_at_end_of_input() {
    let reader = tokio_test::io::Builder::new()
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .build();
    let dispatcher = ToolDispatcher::default();
    let mut output = Vec::new();
    tokio_test::block_on(stdio::serve(
        &dispatcher,
        BufReader::new(reader),
        &mut output,
    ))
    .unwrap();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));
}
