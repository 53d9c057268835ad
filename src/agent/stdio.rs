//! Line-delimited JSON transport over stdio.
//!
//! The host runs the binary as a child process and speaks one JSON value per
//! line. On startup the catalog of operations is announced on stdout; after
//! that each stdin line is a request `{"operation": ..., "arguments": ...}`
//! answered by exactly one response line carrying either a `result` or an
//! `error`. EOF on stdin ends the session cleanly.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::registry::OperationRegistry;

/// One request line from the host.
#[derive(Debug, Deserialize)]
struct Request {
    /// Name of the operation to run.
    operation: String,
    /// Operation arguments. Absent and `null` both mean no arguments.
    #[serde(default)]
    arguments: Value,
}

/// Serves the registry over stdin/stdout until EOF.
pub async fn serve(registry: &OperationRegistry) -> anyhow::Result<()> {
    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    serve_streams(registry, stdin, &mut stdout).await
}

async fn serve_streams<R, W>(
    registry: &OperationRegistry,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_line(writer, &announcement(registry)).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(registry, line).await;
        write_line(writer, &response).await?;
    }

    Ok(())
}

/// The startup line describing every registered operation.
fn announcement(registry: &OperationRegistry) -> Value {
    let operations: Vec<Value> = registry
        .specs()
        .map(|spec| {
            json!({
                "name": spec.name,
                "description": spec.description,
                "inputSchema": spec.input.to_json(),
                "outputSchema": spec.output.to_json(),
            })
        })
        .collect();

    json!({ "operations": operations })
}

/// Turns one request line into one response value.
async fn handle_line(registry: &OperationRegistry, line: &str) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Received unparseable request line");
            return json!({ "error": format!("invalid request: {}", e) });
        }
    };

    let arguments = match request.arguments {
        Value::Null => json!({}),
        other => other,
    };

    tracing::debug!(operation = %request.operation, "Dispatching request");

    match registry.dispatch(&request.operation, arguments).await {
        Ok(result) => json!({ "operation": request.operation, "result": result }),
        Err(e) => json!({ "operation": request.operation, "error": e.to_string() }),
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, value: &Value) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
