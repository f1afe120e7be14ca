// ABOUTME: Quick action presets: named prompts the user can fire at a terminal pane.
// ABOUTME: Includes the built-in defaults seeded on first run.

use mux_core::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-configurable shortcut that sends `prompt` to the focused pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub id: Uuid,
    pub name: String,
    /// Symbolic icon name, resolved by the UI
    pub icon: String,
    pub color_hex: String,
    pub prompt: String,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
    /// Display position; dense 0..N-1 across the store
    #[serde(default)]
    pub sort_order: i32,
}

fn enabled_by_default() -> bool {
    true
}

impl QuickAction {
    /// New enabled action with a fresh id. The store assigns `sort_order` on add.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color_hex: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color_hex: color_hex.into(),
            prompt: prompt.into(),
            is_enabled: true,
            sort_order: 0,
        }
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    /// Parsed display color, or the accent color if the hex is malformed
    pub fn color(&self) -> Color {
        Color::from_hex(&self.color_hex).unwrap_or(Color::ACCENT)
    }

    /// The presets every new install starts with, in display order
    pub fn defaults() -> Vec<QuickAction> {
        let mut run = QuickAction::new(
            "Run App",
            "play.fill",
            "#34C759",
            "Build and run the app, then report any errors.",
        );
        run.sort_order = 0;

        let mut push = QuickAction::new(
            "Commit & Push",
            "arrow.up.circle.fill",
            "#007AFF",
            "Commit all changes with a descriptive message and push to the remote.",
        );
        push.sort_order = 1;

        vec![run, push]
    }
}
