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

//! Display panel binding.
//!
//! The client never touches a rendering surface directly; it writes named
//! displays through the [`Panel`] trait. Hosts provide whatever surface
//! they have (terminal, GUI, test buffer), and a panel that lacks a given
//! display simply ignores writes to it.

use std::collections::HashMap;
use std::sync::RwLock;

/// Identifier of the display showing the latest uptime message.
pub const MESSAGE_DISPLAY: &str = "message";

/// Identifier of the display showing the server version.
pub const VERSION_DISPLAY: &str = "version";

/// Narrow binding to the surface that shows diagnostics values.
///
/// Writes address a display by identifier; a panel with no such display
/// ignores the write. Absence is never an error. Implementations are
/// called from the client's background tasks.
pub trait Panel: Send + Sync {
    /// Set the visible text of the display named `id`.
    fn set_text(&self, id: &str, text: &str);
}

/// In-memory panel holding a fixed set of named displays.
///
/// Useful for tests and for embedders that poll values instead of
/// rendering them as they arrive.
#[derive(Debug, Default)]
pub struct MemoryPanel {
    displays: RwLock<HashMap<String, String>>,
}

impl MemoryPanel {
    /// Create a panel with the two standard displays.
    #[must_use]
    pub fn new() -> Self {
        Self::with_displays(&[MESSAGE_DISPLAY, VERSION_DISPLAY])
    }

    /// Create a panel exposing only the given display identifiers.
    #[must_use]
    pub fn with_displays(ids: &[&str]) -> Self {
        let displays = ids
            .iter()
            .map(|id| ((*id).to_string(), String::new()))
            .collect();
        Self {
            displays: RwLock::new(displays),
        }
    }

    /// Current text of a display, or `None` if the panel has no such display.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.displays
            .read()
            .ok()
            .and_then(|displays| displays.get(id).cloned())
    }
}

impl Panel for MemoryPanel {
    fn set_text(&self, id: &str, text: &str) {
        if let Ok(mut displays) = self.displays.write() {
            if let Some(slot) = displays.get_mut(id) {
                *slot = text.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_updates_known_display() {
        let panel = MemoryPanel::new();
        panel.set_text(MESSAGE_DISPLAY, "0:00:05");
        assert_eq!(panel.text(MESSAGE_DISPLAY).as_deref(), Some("0:00:05"));
    }

    #[test]
    fn test_set_text_on_absent_display_is_ignored() {
        let panel = MemoryPanel::with_displays(&[VERSION_DISPLAY]);
        panel.set_text(MESSAGE_DISPLAY, "0:00:05");
        assert_eq!(panel.text(MESSAGE_DISPLAY), None);
        assert_eq!(panel.text(VERSION_DISPLAY).as_deref(), Some(""));
    }

    #[test]
    fn test_last_write_wins() {
        let panel = MemoryPanel::new();
        panel.set_text(VERSION_DISPLAY, "1.0.0");
        panel.set_text(VERSION_DISPLAY, "1.0.1");
        assert_eq!(panel.text(VERSION_DISPLAY).as_deref(), Some("1.0.1"));
    }
}
