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

//! Feed connection state machine.
//!
//! The reducer is pure: it maps (state, event) to a new state plus a list
//! of effects, so the feed's logging and display behavior can be exercised
//! without a live connection. The transport layer in the parent module
//! feeds it events and executes the effects.

use crate::panel::MESSAGE_DISPLAY;
use crate::protocol::UptimeMessage;

/// Lifecycle state of the uptime feed.
///
/// There is no edge back to `Connecting`: a feed that closes or errors
/// stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Connection attempt in progress.
    Connecting,
    /// Connected; messages may arrive.
    Open,
    /// Closed by the server or by the stream ending.
    Closed,
    /// Transport failure, before or after open.
    Errored,
}

impl FeedState {
    /// Whether the feed can make no further progress.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

/// Events reported by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The connection handshake completed.
    Opened,
    /// A text payload arrived.
    Message(String),
    /// The connection closed normally.
    Closed,
    /// The transport failed.
    TransportError(String),
}

/// Severity of a log effect, mirroring the `log` crate levels the
/// transport maps them onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit a log record.
    Log { level: LogLevel, message: String },
    /// Set the text of a named display.
    SetDisplay { id: &'static str, text: String },
}

fn log(level: LogLevel, message: impl Into<String>) -> Effect {
    Effect::Log {
        level,
        message: message.into(),
    }
}

/// Advance the state machine by one event.
///
/// Opening and closing each produce exactly one log effect, in that
/// order. A feed that errors before opening produces an error log and
/// neither of those. Events arriving in a terminal state are ignored.
#[must_use]
pub fn reduce(state: FeedState, event: FeedEvent) -> (FeedState, Vec<Effect>) {
    match (state, event) {
        (FeedState::Connecting, FeedEvent::Opened) => (
            FeedState::Open,
            vec![log(LogLevel::Info, "uptime feed open")],
        ),
        (FeedState::Open, FeedEvent::Message(payload)) => {
            let effects = match UptimeMessage::parse(&payload) {
                Ok(message) => vec![Effect::SetDisplay {
                    id: MESSAGE_DISPLAY,
                    text: message.display_text(),
                }],
                Err(e) => vec![log(
                    LogLevel::Warn,
                    format!("discarding malformed uptime payload: {}", e),
                )],
            };
            (FeedState::Open, effects)
        }
        (FeedState::Open, FeedEvent::Closed) => (
            FeedState::Closed,
            vec![log(LogLevel::Info, "uptime feed closed")],
        ),
        (FeedState::Connecting | FeedState::Open, FeedEvent::TransportError(reason)) => (
            FeedState::Errored,
            vec![log(
                LogLevel::Error,
                format!("uptime feed error: {}", reason),
            )],
        ),
        // Messages or close before open, anything after a terminal state.
        (state, _) => (state, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::UNKNOWN_PLACEHOLDER;

    fn run(events: Vec<FeedEvent>) -> (FeedState, Vec<Effect>) {
        let mut state = FeedState::Connecting;
        let mut effects = Vec::new();
        for event in events {
            let (next, mut batch) = reduce(state, event);
            state = next;
            effects.append(&mut batch);
        }
        (state, effects)
    }

    fn log_messages(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Log { message, .. } => Some(message.as_str()),
                Effect::SetDisplay { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_open_then_close_logs_once_each_in_order() {
        let (state, effects) = run(vec![FeedEvent::Opened, FeedEvent::Closed]);
        assert_eq!(state, FeedState::Closed);
        assert_eq!(
            log_messages(&effects),
            vec!["uptime feed open", "uptime feed closed"]
        );
    }

    #[test]
    fn test_error_before_open_logs_no_open_or_close() {
        let (state, effects) = run(vec![FeedEvent::TransportError("refused".to_string())]);
        assert_eq!(state, FeedState::Errored);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Log { level: LogLevel::Error, message }
            if message.contains("refused")
        ));
    }

    #[test]
    fn test_message_with_uptime_updates_display() {
        let (state, effects) = run(vec![
            FeedEvent::Opened,
            FeedEvent::Message(r#"{"uptime": "0:01:30"}"#.to_string()),
        ]);
        assert_eq!(state, FeedState::Open);
        assert!(effects.contains(&Effect::SetDisplay {
            id: MESSAGE_DISPLAY,
            text: "0:01:30".to_string(),
        }));
    }

    #[test]
    fn test_message_without_uptime_renders_placeholder() {
        let (_, effects) = run(vec![
            FeedEvent::Opened,
            FeedEvent::Message("{}".to_string()),
        ]);
        assert!(effects.contains(&Effect::SetDisplay {
            id: MESSAGE_DISPLAY,
            text: UNKNOWN_PLACEHOLDER.to_string(),
        }));
    }

    #[test]
    fn test_malformed_message_warns_and_skips_display() {
        let (state, effects) = run(vec![
            FeedEvent::Opened,
            FeedEvent::Message("{not json".to_string()),
        ]);
        assert_eq!(state, FeedState::Open);
        assert!(effects
            .iter()
            .all(|effect| !matches!(effect, Effect::SetDisplay { .. })));
        assert!(effects
            .iter()
            .any(|effect| matches!(effect, Effect::Log { level: LogLevel::Warn, .. })));
    }

    #[test]
    fn test_message_before_open_is_ignored() {
        let (state, effects) = run(vec![FeedEvent::Message("{}".to_string())]);
        assert_eq!(state, FeedState::Connecting);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_terminal_states_ignore_further_events() {
        for terminal in [FeedState::Closed, FeedState::Errored] {
            for event in [
                FeedEvent::Opened,
                FeedEvent::Message("{}".to_string()),
                FeedEvent::Closed,
                FeedEvent::TransportError("late".to_string()),
            ] {
                let (state, effects) = reduce(terminal, event);
                assert_eq!(state, terminal);
                assert!(effects.is_empty());
            }
        }
    }

    #[test]
    fn test_no_transition_back_to_connecting() {
        for state in [FeedState::Open, FeedState::Closed, FeedState::Errored] {
            for event in [
                FeedEvent::Opened,
                FeedEvent::Message("{}".to_string()),
                FeedEvent::Closed,
                FeedEvent::TransportError("x".to_string()),
            ] {
                let (next, _) = reduce(state, event);
                assert_ne!(next, FeedState::Connecting);
            }
        }
    }
}
