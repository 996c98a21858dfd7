//! Line-delimited JSON-RPC session shared by the STDIO and TCP transports.
//!
//! One message per line in each direction. Every inbound line is dispatched
//! on its own task, so a slow tool call never holds up the next request;
//! replies go through a channel to a single writer task, which keeps each
//! reply line whole. Replies are written in completion order and carry the
//! request id for correlation.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::protocol::JsonRpcResponse;

/// Serve one session until `reader` reaches end of input.
///
/// Writes the initialization message first, then answers every request.
/// Returns once all in-flight requests have been answered.
pub async fn serve_lines<R, W>(server: McpServer, reader: R, writer: W) -> TransportResult<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(write_replies(writer, rx));

    // The receiver only goes away if the writer failed; that error surfaces below.
    let _ = tx.send(server.initialization_message());

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf).trim().to_string();
        if line.is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(reply) = server.dispatch(&line).await {
                if tx.send(reply).is_err() {
                    debug!("Session closed before reply could be written");
                }
            }
        });
    }

    info!("End of input, waiting for in-flight requests");
    drop(tx);
    writer_task
        .await
        .map_err(|e| TransportError::task(e.to_string()))?
}

/// Write replies as they arrive until every sender is gone.
async fn write_replies<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
) -> TransportResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = rx.recv().await {
        let mut line = match reply.to_line() {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode reply: {}", e);
                continue;
            }
        };
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
