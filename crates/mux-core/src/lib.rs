// ABOUTME: Shared types and configuration for muxdeck.
// ABOUTME: Defines colors, config file handling, preference stores, and change plumbing.

pub mod color;
pub mod config;
pub mod debounce;
pub mod notify;
pub mod prefs;

pub use color::Color;
pub use config::{AppConfig, ConfigError, LayoutSettings, StorageSettings};
pub use debounce::Debouncer;
pub use notify::{ChangeNotifier, SubscriptionId};
pub use prefs::{FileStore, MemoryStore, PreferenceStore, PreferenceStoreExt, StoreError};
