// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! WebSocket uptime feed.
//!
//! Opens one long-lived connection to the server's uptime stream and runs
//! it in a background task. Transport events are reduced through
//! [`state::reduce`] and the resulting effects are executed against the
//! injected panel and the `log` macros. There is no reconnection: once
//! the feed closes or errors, the task ends and the handle only reports
//! the terminal state.

pub mod state;

use std::sync::Arc;

use futures_util::StreamExt;
use log::{error, info, warn};
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

pub use state::{Effect, FeedEvent, FeedState, LogLevel};

use crate::endpoint::Endpoints;
use crate::panel::Panel;

/// Handle to a running uptime feed.
///
/// The connection runs in a background task. Use [`subscribe`](Self::subscribe)
/// to observe state transitions and [`shutdown`](Self::shutdown) to cancel
/// the task. Dropping the handle also cancels it.
pub struct UptimeFeed {
    state_rx: watch::Receiver<FeedState>,
    cancel_token: CancellationToken,
}

impl std::fmt::Debug for UptimeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UptimeFeed")
            .field("state", &*self.state_rx.borrow())
            .finish_non_exhaustive()
    }
}

impl UptimeFeed {
    /// Spawn a feed task connecting to the given server's uptime stream.
    #[must_use]
    pub fn spawn(endpoints: &Endpoints, panel: Arc<dyn Panel>) -> Self {
        let (state_tx, state_rx) = watch::channel(FeedState::Connecting);
        let cancel_token = CancellationToken::new();

        let url = endpoints.uptime_url();
        let task_cancel = cancel_token.clone();
        tokio::spawn(async move {
            feed_loop(url, panel, state_tx, task_cancel).await;
        });

        Self {
            state_rx,
            cancel_token,
        }
    }

    /// Get the current feed state.
    #[must_use]
    pub fn state(&self) -> FeedState {
        *self.state_rx.borrow()
    }

    /// Subscribe to feed state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }

    /// Cancel the feed task.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for UptimeFeed {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn feed_loop(
    url: String,
    panel: Arc<dyn Panel>,
    state_tx: watch::Sender<FeedState>,
    cancel_token: CancellationToken,
) {
    let mut state = FeedState::Connecting;
    info!("Connecting to {}...", url);

    let connect = tokio::select! {
        result = connect_async(url.as_str()) => result,
        () = cancel_token.cancelled() => {
            info!("Uptime feed cancelled during connect");
            return;
        }
    };

    let mut stream = match connect {
        Ok((stream, _response)) => stream,
        Err(e) => {
            apply(&mut state, FeedEvent::TransportError(e.to_string()), panel.as_ref(), &state_tx);
            return;
        }
    };

    apply(&mut state, FeedEvent::Opened, panel.as_ref(), &state_tx);

    loop {
        tokio::select! {
            message = stream.next() => {
                match message {
                    Some(Ok(Message::Text(payload))) => {
                        apply(
                            &mut state,
                            FeedEvent::Message(payload),
                            panel.as_ref(),
                            &state_tx,
                        );
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        apply(&mut state, FeedEvent::Closed, panel.as_ref(), &state_tx);
                        return;
                    }
                    // Ping/pong are answered by the library; binary frames
                    // are not part of the uptime stream.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        apply(
                            &mut state,
                            FeedEvent::TransportError(e.to_string()),
                            panel.as_ref(),
                            &state_tx,
                        );
                        return;
                    }
                }
            }

            () = cancel_token.cancelled() => {
                info!("Uptime feed cancelled");
                return;
            }
        }
    }
}

/// Run one event through the reducer and execute its effects.
fn apply(
    state: &mut FeedState,
    event: FeedEvent,
    panel: &dyn Panel,
    state_tx: &watch::Sender<FeedState>,
) {
    let (next, effects) = state::reduce(*state, event);
    *state = next;
    let _ = state_tx.send(next);

    for effect in effects {
        match effect {
            Effect::Log { level, message } => match level {
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
                LogLevel::Error => error!("{}", message),
            },
            Effect::SetDisplay { id, text } => panel.set_text(id, &text),
        }
    }
}
