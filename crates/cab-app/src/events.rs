use std::sync::Arc;

use cab_types::Response;
use kanal::{AsyncReceiver, AsyncSender};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// One decoded stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Request { id: Option<Value>, message: Value },
    Malformed { error: String },
}

/// One stdout line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub id: Option<Value>,
    pub response: Response,
}

/// App's main loop.
///
/// Every request runs in its own task so a slow lookup never holds up the
/// ones behind it; replies carry the request's id and may come back out of
/// order.
pub async fn event_loop(
    state: Arc<AppState>,
    request_rx: AsyncReceiver<AppEvent>,
    reply_tx: AsyncSender<Reply>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut in_flight = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for requests");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] cancelled, dropping {} in-flight requests", in_flight.len());
                in_flight.abort_all();
                break;
            }
            event = request_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] input closed");
                    break;
                };

                let state = state.clone();
                let reply_tx = reply_tx.clone();
                in_flight.spawn(async move {
                    let reply = handle_event(&state, event).await;
                    if let Err(e) = reply_tx.send(reply).await {
                        tracing::warn!("[EVENT_LOOP] reply dropped: {e}");
                    }
                });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!("[EVENT_LOOP] request task failed: {e}");
                }
            }
        }
    }

    // Requests already accepted still get their reply
    while let Some(joined) = in_flight.join_next().await {
        match joined {
            Err(e) if !e.is_cancelled() => {
                tracing::error!("[EVENT_LOOP] request task failed: {e}");
            }
            _ => {}
        }
    }

    Ok(())
}

pub async fn handle_event(state: &AppState, event: AppEvent) -> Reply {
    match event {
        AppEvent::Request { id, message } => {
            tracing::debug!("[EVENT_LOOP] request id={id:?}");
            Reply {
                id,
                response: state.dispatcher.handle_value(message).await,
            }
        }
        AppEvent::Malformed { error } => {
            tracing::warn!("[EVENT_LOOP] unreadable line: {error}");
            Reply {
                id: None,
                response: Response::error(format!("Invalid request: {error}")),
            }
        }
    }
}
