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

//! Endpoint derivation for a diagnostics server.
//!
//! Both targets are derived from a single authority string (`host` or
//! `host:port`) every time a client starts; nothing is persisted between
//! runs. The server exposes its uptime stream over the insecure WebSocket
//! scheme and its version command over plain HTTP.

use thiserror::Error;

/// Path of the uptime stream on the serving host.
pub const UPTIME_PATH: &str = "/uptime";

/// Path of the version command on the serving host.
pub const VERSION_PATH: &str = "/cmd/version";

/// Errors that can occur while resolving endpoints.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("empty server authority")]
    EmptyAuthority,
}

/// Resolved endpoints for one diagnostics server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    authority: String,
}

impl Endpoints {
    /// Resolve endpoints from an authority in `host` or `host:port` format.
    pub fn from_authority(authority: &str) -> Result<Self, EndpointError> {
        let authority = authority.trim();
        if authority.is_empty() {
            return Err(EndpointError::EmptyAuthority);
        }
        Ok(Self {
            authority: authority.to_string(),
        })
    }

    /// The server authority this set of endpoints was derived from.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// URL of the uptime stream: `ws://<authority>/uptime`.
    #[must_use]
    pub fn uptime_url(&self) -> String {
        format!("ws://{}{}", self.authority, UPTIME_PATH)
    }

    /// URL of the version command: `http://<authority>/cmd/version`.
    #[must_use]
    pub fn version_url(&self) -> String {
        format!("http://{}{}", self.authority, VERSION_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_for_bare_host() {
        let endpoints = Endpoints::from_authority("example.com").unwrap();
        assert_eq!(endpoints.uptime_url(), "ws://example.com/uptime");
        assert_eq!(endpoints.version_url(), "http://example.com/cmd/version");
    }

    #[test]
    fn test_urls_for_host_with_port() {
        let endpoints = Endpoints::from_authority("localhost:8080").unwrap();
        assert_eq!(endpoints.uptime_url(), "ws://localhost:8080/uptime");
        assert_eq!(endpoints.version_url(), "http://localhost:8080/cmd/version");
    }

    #[test]
    fn test_authority_is_trimmed() {
        let endpoints = Endpoints::from_authority("  example.com ").unwrap();
        assert_eq!(endpoints.authority(), "example.com");
    }

    #[test]
    fn test_empty_authority_rejected() {
        assert!(matches!(
            Endpoints::from_authority("   "),
            Err(EndpointError::EmptyAuthority)
        ));
    }
}
