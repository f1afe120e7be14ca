// ABOUTME: Live panel layout state with debounced persistence.
// ABOUTME: Divider drags mutate it; writes to the preference store are coalesced.

use std::time::Instant;

use mux_core::{ChangeNotifier, Debouncer, LayoutSettings, PreferenceStore, SubscriptionId};

use crate::grid::{self, PaneRect};
use crate::panel::{PanelLayout, MAX_GRID_DIMENSION};
use crate::ratio::{RatioBounds, DEFAULT_RATIO};

/// Preference key the layout payload is stored under
pub const PANEL_LAYOUT_KEY: &str = "panel_layout";

/// Change notifications emitted after each mutation
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    HorizontalSplitChanged(f32),
    VerticalSplitChanged {
        row: usize,
        value: f32,
    },
    MultiColumnSplitChanged {
        row: usize,
        divider: usize,
        value: f32,
    },
    GridReconfigured {
        rows: usize,
        columns_per_row: Vec<usize>,
    },
    Reset,
}

/// Owns the panel ratios for the running application.
///
/// Setters clamp and schedule a write; the owner calls [`poll`](Self::poll)
/// from its event loop so the write happens once the drag has settled.
#[derive(Debug)]
pub struct PanelLayoutModel<S: PreferenceStore> {
    store: S,
    layout: PanelLayout,
    bounds: RatioBounds,
    debouncer: Debouncer,
    notifier: ChangeNotifier<LayoutEvent>,
}

impl<S: PreferenceStore> PanelLayoutModel<S> {
    /// Load the persisted layout, falling back to even splits if it is
    /// missing or unreadable
    pub fn load(store: S, settings: &LayoutSettings) -> Self {
        let bounds = RatioBounds::from_settings(settings);

        let layout = match store.get(PANEL_LAYOUT_KEY) {
            Ok(Some(bytes)) => match PanelLayout::decode(&bytes, bounds) {
                Ok(layout) => layout,
                Err(e) => {
                    tracing::warn!("Discarding stored panel layout: {}", e);
                    PanelLayout::default()
                }
            },
            Ok(None) => PanelLayout::default(),
            Err(e) => {
                tracing::warn!("Failed to read panel layout: {}", e);
                PanelLayout::default()
            }
        };

        Self {
            store,
            layout,
            bounds,
            debouncer: Debouncer::new(settings.persist_debounce()),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn bounds(&self) -> RatioBounds {
        self.bounds
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn horizontal_split(&self) -> f32 {
        self.layout.horizontal_split
    }

    pub fn vertical_split(&self, row: usize) -> f32 {
        self.layout.vertical_split(row)
    }

    pub fn multi_column_splits(&self, row: usize) -> Option<&[f32]> {
        self.layout.multi_column_splits.get(&row).map(Vec::as_slice)
    }

    pub fn set_horizontal_split(&mut self, value: f32) {
        let value = self.bounds.clamp(value);
        if value == self.layout.horizontal_split {
            return;
        }
        self.layout.horizontal_split = value;
        self.changed(LayoutEvent::HorizontalSplitChanged(value));
    }

    /// Move the two-column divider of `row`. Rows past the grid limit are ignored.
    pub fn set_vertical_split(&mut self, row: usize, value: f32) {
        let rows = match row.checked_add(1) {
            Some(rows) if rows <= MAX_GRID_DIMENSION => rows,
            _ => {
                tracing::debug!("Ignoring vertical split for out-of-range row {}", row);
                return;
            }
        };

        let value = self.bounds.clamp(value);
        let grew = self.layout.ensure_rows(rows);
        if !grew && self.layout.vertical_splits[row] == value {
            return;
        }
        self.layout.vertical_splits[row] = value;
        self.changed(LayoutEvent::VerticalSplitChanged { row, value });
    }

    /// Move one divider of a row with three or more columns. A stored entry
    /// sized for a different column count is replaced with even splits first.
    pub fn set_multi_column_split(
        &mut self,
        row: usize,
        column_count: usize,
        divider: usize,
        value: f32,
    ) {
        if column_count < 3
            || column_count > MAX_GRID_DIMENSION
            || row >= MAX_GRID_DIMENSION
            || divider >= column_count - 1
        {
            tracing::debug!(
                "Ignoring divider {} for row {} with {} columns",
                divider,
                row,
                column_count
            );
            return;
        }

        let value = self.bounds.clamp(value);
        let splits = self.layout.multi_column_splits.entry(row).or_default();
        if splits.len() != column_count - 1 {
            *splits = vec![DEFAULT_RATIO; column_count - 1];
        } else if splits[divider] == value {
            return;
        }
        splits[divider] = value;
        self.changed(LayoutEvent::MultiColumnSplitChanged {
            row,
            divider,
            value,
        });
    }

    pub fn column_widths(&self, row: usize, column_count: usize) -> Vec<f32> {
        self.layout.column_widths(row, column_count)
    }

    pub fn row_heights(&self, row_count: usize) -> Vec<f32> {
        self.layout.row_heights(row_count)
    }

    pub fn pane_rects(&self, columns_per_row: &[usize]) -> Vec<PaneRect> {
        grid::pane_rects(&self.layout, columns_per_row)
    }

    /// Adapt stored ratios to a new grid shape. Existing ratios for rows that
    /// still exist are kept. Row counts past the grid limit are ignored.
    pub fn on_grid_reconfigured(&mut self, row_count: usize, columns_per_row: &[usize]) {
        if row_count > MAX_GRID_DIMENSION {
            tracing::debug!("Ignoring grid with {} rows", row_count);
            return;
        }

        let grew = self.layout.ensure_rows(row_count);
        let pruned = self.layout.prune_rows(row_count);
        if pruned > 0 {
            tracing::debug!("Pruned {} multi-column entries beyond row {}", pruned, row_count);
        }

        let event = LayoutEvent::GridReconfigured {
            rows: row_count,
            columns_per_row: columns_per_row.to_vec(),
        };
        if grew || pruned > 0 {
            self.changed(event);
        } else {
            self.notifier.emit(&event);
        }
    }

    /// Even out every divider and write immediately
    pub fn reset(&mut self) {
        self.layout.reset();
        self.debouncer.cancel();
        self.persist();
        self.notifier.emit(&LayoutEvent::Reset);
    }

    /// Write the layout if the quiet period has elapsed. Returns true if a
    /// write was attempted.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debouncer.poll(now) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Write a pending change right away, e.g. on shutdown
    pub fn flush(&mut self) -> bool {
        if self.debouncer.cancel() {
            self.persist();
            true
        } else {
            false
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending write is due, for event loops that sleep until then
    pub fn next_write_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&LayoutEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn changed(&mut self, event: LayoutEvent) {
        self.debouncer.trigger(Instant::now());
        self.notifier.emit(&event);
    }

    fn persist(&self) {
        let bytes = match self.layout.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to encode panel layout: {}", e);
                return;
            }
        };

        match self.store.set(PANEL_LAYOUT_KEY, &bytes) {
            Ok(()) => tracing::debug!("Persisted panel layout"),
            Err(e) => tracing::warn!("Failed to persist panel layout: {}", e),
        }
    }
}
