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

//! Client library for an httpd's diagnostics endpoints.
//!
//! The server exposes two independent diagnostics channels: a WebSocket
//! stream at `/uptime` pushing JSON uptime messages, and a `/cmd/version`
//! command answering one JSON object with the server's version. This
//! library renders both onto named displays of an injected [`Panel`].
//! The layers can be used independently or composed together:
//!
//! - **Protocol layer**: JSON wire types and display rendering rules
//! - **Feed layer**: the uptime stream as an explicit state machine
//!   (`Connecting, Open, Closed, Errored`) driven by a WebSocket task
//! - **Version layer**: one-shot version fetch over HTTP
//! - **Panel layer**: the display binding hosts implement
//!
//! # Quick Start
//!
//! Use the [`Client`] type to run both channels against one panel:
//!
//! ```no_run
//! use std::sync::Arc;
//! use diag_client::{Client, ClientConfig, MemoryPanel, MESSAGE_DISPLAY};
//!
//! #[tokio::main]
//! async fn main() {
//!     let panel = Arc::new(MemoryPanel::new());
//!     let _client = Client::spawn(
//!         &ClientConfig {
//!             authority: "example.com".to_string(),
//!         },
//!         Arc::clone(&panel) as Arc<dyn diag_client::Panel>,
//!     )
//!     .expect("valid authority");
//!
//!     loop {
//!         if let Some(uptime) = panel.text(MESSAGE_DISPLAY) {
//!             println!("uptime: {}", uptime);
//!         }
//!         tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     }
//! }
//! ```
//!
//! # Using Individual Layers
//!
//! The feed alone, observing state transitions:
//!
//! ```no_run
//! # use std::sync::Arc;
//! use diag_client::{Endpoints, MemoryPanel, UptimeFeed};
//!
//! # async fn example() {
//! let endpoints = Endpoints::from_authority("example.com").unwrap();
//! let panel: Arc<dyn diag_client::Panel> = Arc::new(MemoryPanel::new());
//! let feed = UptimeFeed::spawn(&endpoints, panel);
//! let mut states = feed.subscribe();
//! while states.changed().await.is_ok() {
//!     println!("feed state: {:?}", *states.borrow());
//! }
//! # }
//! ```

pub mod endpoint;
pub mod feed;
pub mod panel;
pub mod protocol;
pub mod version;

use std::sync::Arc;

use tokio::sync::watch;

pub use endpoint::{EndpointError, Endpoints};
pub use feed::{FeedEvent, FeedState, UptimeFeed};
pub use panel::{MemoryPanel, Panel, MESSAGE_DISPLAY, VERSION_DISPLAY};
pub use protocol::{ParseError, UptimeMessage, VersionResponse, UNKNOWN_PLACEHOLDER};
pub use version::FetchError;

/// Configuration for the full client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server authority in `host` or `host:port` format.
    pub authority: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            authority: "localhost:8080".to_string(),
        }
    }
}

/// Full diagnostics client: uptime feed plus one version fetch.
///
/// The two channels are independent and uncoordinated; both write into
/// the same panel, on disjoint displays. The version fetch runs exactly
/// once per spawn, mirroring the page-load semantics of the server's own
/// diagnostics page.
pub struct Client {
    feed: UptimeFeed,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Spawn the feed task and fire the one-shot version fetch.
    pub fn spawn(config: &ClientConfig, panel: Arc<dyn Panel>) -> Result<Self, EndpointError> {
        let endpoints = Endpoints::from_authority(&config.authority)?;

        let feed = UptimeFeed::spawn(&endpoints, Arc::clone(&panel));

        let fetch_endpoints = endpoints.clone();
        tokio::spawn(async move {
            version::run(&fetch_endpoints, panel.as_ref()).await;
        });

        Ok(Self { feed })
    }

    /// Get the current feed state.
    #[must_use]
    pub fn feed_state(&self) -> FeedState {
        self.feed.state()
    }

    /// Subscribe to feed state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.feed.subscribe()
    }

    /// Shut down the feed task.
    pub fn shutdown(&self) {
        self.feed.shutdown();
    }
}
