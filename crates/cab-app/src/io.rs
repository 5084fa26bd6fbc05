use kanal::{AsyncReceiver, AsyncSender};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, Reply};

pub async fn stdin_reader(
    request_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    read_requests(tokio::io::stdin(), request_tx, cancel).await
}

pub async fn stdout_writer(reply_rx: AsyncReceiver<Reply>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    write_replies(&mut stdout, reply_rx).await
}

/// Forward each non-blank line until EOF or cancellation
pub async fn read_requests<R>(
    input: R,
    request_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[IO] reader stopping");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("[IO] stdin closed");
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        request_tx.send(decode_line(&line)).await?;
    }

    Ok(())
}

/// Split the correlation id off a request line
pub fn decode_line(line: &str) -> AppEvent {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(mut message)) => AppEvent::Request {
            id: message.remove("id"),
            message: Value::Object(message),
        },
        Ok(_) => AppEvent::Malformed {
            error: "expected a JSON object".to_string(),
        },
        Err(e) => AppEvent::Malformed {
            error: e.to_string(),
        },
    }
}

/// One compact JSON object per line, flushed as soon as it is written
pub async fn write_replies<W>(out: &mut W, reply_rx: AsyncReceiver<Reply>) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(reply) = reply_rx.recv().await {
        let mut line = serde_json::to_vec(&reply)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        out.flush().await?;
    }

    tracing::debug!("[IO] reply channel closed");
    Ok(())
}
