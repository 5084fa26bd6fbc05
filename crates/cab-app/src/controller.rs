use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, Reply, event_loop};
use crate::io::{stdin_reader, stdout_writer};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub requests: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub replies: (AsyncSender<Reply>, AsyncReceiver<Reply>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            requests: kanal::bounded_async(capacity),
            replies: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Reader, event loop and writer.
    ///
    /// Each task owns the only copy of its channel ends, so stdin EOF closes
    /// the request channel, which ends the event loop, which closes the reply
    /// channel and lets the writer finish.
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let ChannelSet {
            requests: (request_tx, request_rx),
            replies: (reply_tx, reply_rx),
        } = ChannelSet::new(self.state.config.channel_capacity.max(1));

        let mut tasks = JoinSet::new();

        tasks.spawn(stdin_reader(request_tx, self.cancel_token.child_token()));

        tasks.spawn(event_loop(
            self.state.clone(),
            request_rx,
            reply_tx,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(stdout_writer(reply_rx));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
