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

//! Wire types for the diagnostics endpoints.
//!
//! The server speaks JSON on both channels: the uptime stream pushes
//! objects with an optional `uptime` key (string or number), and the
//! version command answers with an object carrying a `version` string.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Placeholder text rendered when a value is missing or unavailable.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Errors that can occur while decoding a payload.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One message from the uptime stream.
///
/// The `uptime` key is optional, and its value may be a string or a
/// number; anything the server sends is kept verbatim and rendered by
/// [`display_text`](Self::display_text).
#[derive(Debug, Clone, PartialEq)]
pub struct UptimeMessage {
    uptime: Option<Value>,
}

impl UptimeMessage {
    /// Decode a raw stream payload.
    ///
    /// Payloads that are valid JSON but not objects (or objects without
    /// an `uptime` key) decode successfully and render as the placeholder.
    pub fn parse(payload: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(payload)?;
        Ok(Self {
            uptime: value.get("uptime").cloned(),
        })
    }

    /// Text shown on the message display for this payload.
    ///
    /// Strings render verbatim, other JSON values render in their JSON
    /// text form, and a missing key renders as [`UNKNOWN_PLACEHOLDER`].
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.uptime {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => UNKNOWN_PLACEHOLDER.to_string(),
        }
    }
}

/// Response body of the version command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionResponse {
    /// Version identifier of the running server.
    pub version: String,
}
