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

//! One-shot server version fetch.
//!
//! Issues a single GET against the version command endpoint and renders
//! the result on the `version` display. Failures of any kind (transport,
//! HTTP status, malformed body) are logged and rendered as the same
//! placeholder the uptime path uses for missing data.

use log::{error, info};
use thiserror::Error;

use crate::endpoint::Endpoints;
use crate::panel::{Panel, VERSION_DISPLAY};
use crate::protocol::{VersionResponse, UNKNOWN_PLACEHOLDER};

/// Errors that can occur during the version fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
}

/// Fetch the server version once.
pub async fn fetch_version(endpoints: &Endpoints) -> Result<VersionResponse, FetchError> {
    let response = reqwest::get(endpoints.version_url()).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    Ok(response.json::<VersionResponse>().await?)
}

/// Text shown on the version display for a fetch outcome.
#[must_use]
pub fn display_text(result: &Result<VersionResponse, FetchError>) -> &str {
    match result {
        Ok(response) => &response.version,
        Err(_) => UNKNOWN_PLACEHOLDER,
    }
}

/// Fetch the version once and render the outcome on the panel.
pub async fn run(endpoints: &Endpoints, panel: &dyn Panel) {
    let result = fetch_version(endpoints).await;
    match &result {
        Ok(response) => info!("Server version {}", response.version),
        Err(e) => error!("Version fetch failed: {}", e),
    }
    panel.set_text(VERSION_DISPLAY, display_text(&result));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_on_success_is_the_version() {
        let result = Ok(VersionResponse {
            version: "1.2.3".to_string(),
        });
        assert_eq!(display_text(&result), "1.2.3");
    }

    #[test]
    fn test_display_text_on_failure_is_placeholder() {
        let result = Err(FetchError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ));
        assert_eq!(display_text(&result), UNKNOWN_PLACEHOLDER);
    }
}
