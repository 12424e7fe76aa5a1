//! MCP stdio server
//!
//! Reads newline-delimited JSON-RPC frames, answers protocol methods inline
//! and runs each `tools/call` as its own task so a slow compiler run never
//! blocks other requests. Every response goes through a single writer task,
//! which keeps frames from interleaving on the output stream.

use super::protocol::{
    CallToolParams, CancelledParams, IncomingMessage, JsonRpcResponse, PROTOCOL_VERSION,
    ReadResourceParams, error_codes, request_key, tool_result,
};
use arclang_mcp_application::{ToolDispatcher, ToolSchemaPort};
use arclang_mcp_domain::{RESOURCES, ToolCall, find_resource};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

/// Errors that end the serving loop
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Writer task failed: {0}")]
    Writer(String),
}

type InFlight = Arc<Mutex<HashMap<String, CancellationToken>>>;

/// Serves the tool catalogue and resources to one client.
pub struct McpServer {
    dispatcher: Arc<ToolDispatcher>,
    schema: Arc<dyn ToolSchemaPort>,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            dispatcher,
            schema,
            name: "arclang-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the name and version reported by `initialize`.
    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Run until the input reaches end of stream.
    ///
    /// Outstanding tool calls are cancelled when input closes; their
    /// subprocesses are killed and no responses are written for them.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_frames(writer, rx));

        let shutdown = CancellationToken::new();
        let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
        let tracker = TaskTracker::new();

        info!(server = %self.name, version = %self.version, "MCP server listening on stdio");

        let mut lines = reader.lines();
        let read_result = loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.handle_line(&line, &tx, &in_flight, &shutdown, &tracker);
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        info!("Input closed, cancelling outstanding tool calls");
        shutdown.cancel();
        tracker.close();
        tracker.wait().await;

        drop(tx);
        match writer_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(ServerError::Io(e)),
            Err(e) => return Err(ServerError::Writer(e.to_string())),
        }

        read_result.map_err(ServerError::from)
    }

    fn handle_line(
        &self,
        line: &str,
        tx: &mpsc::UnboundedSender<String>,
        in_flight: &InFlight,
        shutdown: &CancellationToken,
        tracker: &TaskTracker,
    ) {
        let message: IncomingMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Discarding malformed frame");
                send(
                    tx,
                    JsonRpcResponse::failure(
                        Value::Null,
                        error_codes::PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ),
                );
                return;
            }
        };

        let IncomingMessage {
            id,
            method,
            params,
            ..
        } = message;

        match (id, method) {
            (Some(id), Some(method)) if !id.is_null() => {
                debug!(id = %id, method = %method, "Request");
                if method == "tools/call" {
                    self.spawn_tool_call(id, params, tx, in_flight, shutdown, tracker);
                } else {
                    send(tx, self.handle_request(id, &method, params));
                }
            }
            (None, Some(method)) => handle_notification(&method, params, in_flight),
            (Some(_), None) => debug!("Ignoring response frame from client"),
            (id, _) => send(
                tx,
                JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    error_codes::INVALID_REQUEST,
                    "Invalid request",
                ),
            ),
        }
    }

    fn handle_request(&self, id: Value, method: &str, params: Option<Value>) -> JsonRpcResponse {
        match method {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                let tools = self.schema.all_tools_schema(self.dispatcher.spec());
                JsonRpcResponse::success(id, json!({ "tools": tools }))
            }
            "resources/list" => {
                let resources: Vec<Value> = RESOURCES
                    .iter()
                    .map(|r| {
                        json!({
                            "uri": r.uri,
                            "name": r.name,
                            "description": r.description,
                            "mimeType": r.mime_type,
                        })
                    })
                    .collect();
                JsonRpcResponse::success(id, json!({ "resources": resources }))
            }
            "resources/read" => read_resource(id, params),
            other => {
                debug!(method = other, "Unknown method");
                JsonRpcResponse::failure(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                )
            }
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
            },
            "serverInfo": {
                "name": self.name,
                "version": self.version,
            },
        })
    }

    fn spawn_tool_call(
        &self,
        id: Value,
        params: Option<Value>,
        tx: &mpsc::UnboundedSender<String>,
        in_flight: &InFlight,
        shutdown: &CancellationToken,
        tracker: &TaskTracker,
    ) {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                send(
                    tx,
                    JsonRpcResponse::failure(id, error_codes::INVALID_PARAMS, "Missing params"),
                );
                return;
            }
            Err(e) => {
                send(
                    tx,
                    JsonRpcResponse::failure(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    ),
                );
                return;
            }
        };

        let key = request_key(&id);
        let token = shutdown.child_token();
        lock(in_flight).insert(key.clone(), token.clone());

        let dispatcher = Arc::clone(&self.dispatcher);
        let in_flight = Arc::clone(in_flight);
        let tx = tx.clone();

        tracker.spawn(async move {
            let call = ToolCall::from_json(params.name, params.arguments);
            tokio::select! {
                report = dispatcher.dispatch(&call) => {
                    debug!(request_id = %key, tool = %call.tool_name, is_error = report.is_error, "Tool call finished");
                    send(&tx, JsonRpcResponse::success(id, tool_result(&report.text, report.is_error)));
                }
                _ = token.cancelled() => {
                    info!(request_id = %key, tool = %call.tool_name, "Tool call cancelled");
                }
            }
            lock(&in_flight).remove(&key);
        });
    }
}

fn handle_notification(method: &str, params: Option<Value>, in_flight: &InFlight) {
    match method {
        "notifications/initialized" => debug!("Client initialized"),
        "notifications/cancelled" => {
            let Some(params) =
                params.and_then(|p| serde_json::from_value::<CancelledParams>(p).ok())
            else {
                warn!("Cancellation without a requestId");
                return;
            };
            let key = request_key(&params.request_id);
            match lock(in_flight).get(&key) {
                Some(token) => {
                    info!(request_id = %key, reason = ?params.reason, "Cancelling tool call");
                    token.cancel();
                }
                None => debug!(request_id = %key, "Cancellation for unknown or finished request"),
            }
        }
        other => debug!(method = other, "Ignoring notification"),
    }
}

fn read_resource(id: Value, params: Option<Value>) -> JsonRpcResponse {
    let params: ReadResourceParams = match params.map(serde_json::from_value) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return JsonRpcResponse::failure(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
        None => {
            return JsonRpcResponse::failure(id, error_codes::INVALID_PARAMS, "Missing params");
        }
    };

    match find_resource(&params.uri) {
        Some(resource) => JsonRpcResponse::success(
            id,
            json!({
                "contents": [{
                    "uri": resource.uri,
                    "mimeType": resource.mime_type,
                    "text": resource.content,
                }]
            }),
        ),
        None => JsonRpcResponse::failure(
            id,
            error_codes::INVALID_PARAMS,
            format!("Unknown resource: {}", params.uri),
        ),
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: JsonRpcResponse) {
    match serde_json::to_string(&response) {
        Ok(frame) => {
            if tx.send(frame).is_err() {
                warn!("Output closed, dropping response");
            }
        }
        Err(e) => error!(error = %e, "Failed to serialize response"),
    }
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<String, CancellationToken>> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn write_frames<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<String>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = rx.recv().await {
        writer.write_all(frame.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::JsonSchemaToolConverter;
    use arclang_mcp_application::{
        CompilerFacade, CompilerSettings, GenerationFacade, ProcessRunner,
    };
    use arclang_mcp_domain::{ProcessResult, RequestDefaults};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::io::{BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
    use tokio::task::JoinHandle;

    /// Runner that reports success immediately
    struct InstantRunner;

    #[async_trait]
    impl ProcessRunner for InstantRunner {
        async fn run(&self, _program: &str, _args: &[String], _timeout: Duration) -> ProcessResult {
            ProcessResult::exited(
                0,
                "Compilation successful\n".to_string(),
                String::new(),
                Duration::from_millis(5),
            )
        }
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Runner that never finishes; flags when it starts and when its
    /// future is dropped
    #[derive(Default)]
    struct HangingRunner {
        started: Arc<AtomicBool>,
        dropped: Arc<AtomicBool>,
    }

    async fn wait_for(flag: &AtomicBool) -> bool {
        for _ in 0..200 {
            if flag.load(Ordering::SeqCst) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[async_trait]
    impl ProcessRunner for HangingRunner {
        async fn run(&self, _program: &str, _args: &[String], _timeout: Duration) -> ProcessResult {
            let _guard = SetOnDrop(Arc::clone(&self.dropped));
            self.started.store(true, Ordering::SeqCst);
            std::future::pending::<ProcessResult>().await
        }
    }

    struct Client {
        lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
        server: JoinHandle<Result<(), ServerError>>,
    }

    impl Client {
        fn start(runner: Arc<dyn ProcessRunner>) -> Self {
            let dispatcher = ToolDispatcher::new(
                CompilerFacade::new(runner, CompilerSettings::default()),
                GenerationFacade::fallback_only(),
                RequestDefaults::default(),
            );
            let server = McpServer::new(Arc::new(dispatcher), Arc::new(JsonSchemaToolConverter));

            let (client_io, server_io) = tokio::io::duplex(64 * 1024);
            let (server_read, server_write) = tokio::io::split(server_io);
            let handle = tokio::spawn(async move {
                server
                    .serve(BufReader::new(server_read), server_write)
                    .await
            });

            let (client_read, client_write) = tokio::io::split(client_io);
            Self {
                lines: BufReader::new(client_read).lines(),
                writer: client_write,
                server: handle,
            }
        }

        async fn send(&mut self, frame: Value) {
            let mut raw = frame.to_string();
            raw.push('\n');
            self.writer.write_all(raw.as_bytes()).await.unwrap();
        }

        async fn send_raw(&mut self, raw: &str) {
            self.writer.write_all(raw.as_bytes()).await.unwrap();
        }

        async fn recv(&mut self) -> Value {
            let line = tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("response timed out")
                .unwrap()
                .expect("server closed output");
            serde_json::from_str(&line).unwrap()
        }

        async fn request(&mut self, id: i64, method: &str, params: Value) -> Value {
            self.send(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
                .await;
            self.recv().await
        }

        /// Signal end of input and wait for the server to stop.
        async fn close(mut self) -> Result<(), ServerError> {
            self.writer.shutdown().await.unwrap();
            tokio::time::timeout(Duration::from_secs(5), self.server)
                .await
                .expect("server did not stop")
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_initialize() {
        let mut client = Client::start(Arc::new(InstantRunner));
        let response = client
            .request(1, "initialize", json!({"protocolVersion": "2024-11-05"}))
            .await;

        assert_eq!(response["id"], json!(1));
        assert_eq!(response["result"]["protocolVersion"], json!("2024-11-05"));
        assert_eq!(response["result"]["serverInfo"]["name"], json!("arclang-mcp"));
        assert!(response["result"]["capabilities"]["tools"].is_object());
        assert!(response["result"]["capabilities"]["resources"].is_object());

        client
            .send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        let pong = client.request(2, "ping", json!({})).await;
        assert_eq!(pong["result"], json!({}));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_tools_list() {
        let mut client = Client::start(Arc::new(InstantRunner));
        let response = client.request(1, "tools/list", json!({})).await;

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 12);
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"arclang_compile"));
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == json!("object")));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_call_success() {
        let mut client = Client::start(Arc::new(InstantRunner));
        let response = client
            .request(
                4,
                "tools/call",
                json!({"name": "arclang_compile", "arguments": {"model_path": "m.arc"}}),
            )
            .await;

        assert_eq!(response["id"], json!(4));
        assert_eq!(response["result"]["isError"], json!(false));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Compilation: SUCCESS"));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_call_validation_error_is_tool_result() {
        let mut client = Client::start(Arc::new(InstantRunner));
        let response = client
            .request(5, "tools/call", json!({"name": "arclang_compile", "arguments": {}}))
            .await;

        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], json!(true));
        assert_eq!(
            response["result"]["content"][0]["text"],
            json!("Error: Missing required argument 'model_path'")
        );

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_call_generation_without_backend() {
        let mut client = Client::start(Arc::new(InstantRunner));
        let response = client
            .request(
                6,
                "tools/call",
                json!({
                    "name": "arclang_generate_requirement",
                    "arguments": {"description": "brake pressure must not exceed limit"}
                }),
            )
            .await;

        assert_eq!(response["result"]["isError"], json!(false));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("REQ-BP-001"));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_call_without_params() {
        let mut client = Client::start(Arc::new(InstantRunner));
        client
            .send(json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call"}))
            .await;
        let response = client.recv().await;
        assert_eq!(response["error"]["code"], json!(-32602));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_resources() {
        let mut client = Client::start(Arc::new(InstantRunner));

        let list = client.request(1, "resources/list", json!({})).await;
        let resources = list["result"]["resources"].as_array().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0]["uri"], json!("arclang://syntax-rules"));
        assert_eq!(resources[0]["mimeType"], json!("text/markdown"));

        let read = client
            .request(2, "resources/read", json!({"uri": "arclang://syntax-rules"}))
            .await;
        let text = read["result"]["contents"][0]["text"].as_str().unwrap();
        assert!(text.contains("ArcLang Syntax Rules"));

        let unknown = client
            .request(3, "resources/read", json!({"uri": "arclang://nope"}))
            .await;
        assert_eq!(unknown["error"]["code"], json!(-32602));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut client = Client::start(Arc::new(InstantRunner));

        let unknown = client.request(1, "sampling/createMessage", json!({})).await;
        assert_eq!(unknown["error"]["code"], json!(-32601));

        client.send_raw("{not json\n").await;
        let parse = client.recv().await;
        assert_eq!(parse["id"], Value::Null);
        assert_eq!(parse["error"]["code"], json!(-32700));

        // The server keeps serving after a bad frame
        let pong = client.request(2, "ping", json!({})).await;
        assert_eq!(pong["id"], json!(2));

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_call_sends_no_response() {
        let runner = Arc::new(HangingRunner::default());
        let (started, dropped) = (Arc::clone(&runner.started), Arc::clone(&runner.dropped));
        let mut client = Client::start(runner);

        client
            .send(json!({
                "jsonrpc": "2.0", "id": 7, "method": "tools/call",
                "params": {"name": "arclang_compile", "arguments": {"model_path": "m.arc"}}
            }))
            .await;
        assert!(wait_for(&started).await);
        assert!(!dropped.load(Ordering::SeqCst));

        client
            .send(json!({
                "jsonrpc": "2.0", "method": "notifications/cancelled",
                "params": {"requestId": 7, "reason": "user"}
            }))
            .await;

        let pong = client.request(8, "ping", json!({})).await;
        assert_eq!(pong["id"], json!(8));

        assert!(wait_for(&dropped).await);

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_end_of_input_cancels_outstanding_calls() {
        let runner = Arc::new(HangingRunner::default());
        let (started, dropped) = (Arc::clone(&runner.started), Arc::clone(&runner.dropped));
        let mut client = Client::start(runner);

        client
            .send(json!({
                "jsonrpc": "2.0", "id": "slow", "method": "tools/call",
                "params": {"name": "arclang_validate", "arguments": {"model_path": "m.arc"}}
            }))
            .await;
        assert!(wait_for(&started).await);

        client.close().await.unwrap();
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_concurrent_calls_complete_independently() {
        let mut client = Client::start(Arc::new(InstantRunner));
        for id in 10..15 {
            client
                .send(json!({
                    "jsonrpc": "2.0", "id": id, "method": "tools/call",
                    "params": {"name": "arclang_compile", "arguments": {"model_path": "m.arc"}}
                }))
                .await;
        }

        let mut ids = Vec::new();
        for _ in 10..15 {
            let response = client.recv().await;
            assert_eq!(response["result"]["isError"], json!(false));
            ids.push(response["id"].as_i64().unwrap());
        }
        ids.sort();
        assert_eq!(ids, vec![10, 11, 12, 13, 14]);

        client.close().await.unwrap();
    }
}
