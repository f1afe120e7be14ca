// ABOUTME: Quick action presets for the terminal multiplexer.
// ABOUTME: Data model plus the ordered, persisted store the sidebar list edits.

mod action;
mod store;

pub use action::QuickAction;
pub use store::{
    QuickActionEvent, QuickActionStore, QUICK_ACTIONS_INITIALIZED_KEY, QUICK_ACTIONS_KEY,
};
