// ABOUTME: Panel layout management for the terminal multiplexer.
// ABOUTME: Clamped divider ratios, column width math, and debounced layout persistence.

mod grid;
mod model;
mod panel;
mod ratio;

pub use grid::{pane_rects, PaneRect, Rect};
pub use model::{LayoutEvent, PanelLayoutModel, PANEL_LAYOUT_KEY};
pub use panel::{PanelLayout, PayloadError, MAX_GRID_DIMENSION};
pub use ratio::{clamp_ratio, RatioBounds, DEFAULT_RATIO};
