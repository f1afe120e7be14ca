// ABOUTME: Panel split ratios for a grid of terminal panes, and their persisted form.
// ABOUTME: Column widths are derived here; the payload is versioned JSON with string row keys.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::ratio::{RatioBounds, DEFAULT_RATIO};

/// Largest row or column count the layout will describe. Grids beyond it
/// are treated as out of range.
pub const MAX_GRID_DIMENSION: usize = 64;

/// Split ratios for every divider in the grid.
///
/// `vertical_splits` holds the two-column divider per row and only ever
/// grows. `multi_column_splits` holds the dividers of rows with three or
/// more columns, keyed by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub horizontal_split: f32,
    pub vertical_splits: Vec<f32>,
    pub multi_column_splits: BTreeMap<usize, Vec<f32>>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            horizontal_split: DEFAULT_RATIO,
            vertical_splits: Vec::new(),
            multi_column_splits: BTreeMap::new(),
        }
    }
}

impl PanelLayout {
    pub const CURRENT_VERSION: u32 = 1;

    /// Two-column divider for `row`, or the even split if none is stored
    pub fn vertical_split(&self, row: usize) -> f32 {
        self.vertical_splits
            .get(row)
            .copied()
            .unwrap_or(DEFAULT_RATIO)
    }

    /// Grow `vertical_splits` to at least `len` entries. Returns true if it grew.
    pub fn ensure_rows(&mut self, len: usize) -> bool {
        if self.vertical_splits.len() >= len {
            return false;
        }
        self.vertical_splits.resize(len, DEFAULT_RATIO);
        true
    }

    /// Fractions of the row width taken by each column.
    ///
    /// Rows of three or more columns use their stored dividers only when
    /// there is exactly one per gap; anything else falls back to equal widths.
    /// Counts above [`MAX_GRID_DIMENSION`] give no widths.
    pub fn column_widths(&self, row: usize, column_count: usize) -> Vec<f32> {
        match column_count {
            0 => Vec::new(),
            n if n > MAX_GRID_DIMENSION => {
                tracing::debug!("Ignoring column count {} for row {}", n, row);
                Vec::new()
            }
            1 => vec![1.0],
            2 => {
                let split = self.vertical_split(row);
                vec![split, 1.0 - split]
            }
            n => match self.multi_column_splits.get(&row) {
                Some(splits) if splits.len() == n - 1 => proportional_widths(splits),
                _ => vec![1.0 / n as f32; n],
            },
        }
    }

    /// Fractions of the window height taken by each row.
    ///
    /// Two rows share the horizontal divider. Grids with more rows than the
    /// divider can describe get equal heights.
    pub fn row_heights(&self, row_count: usize) -> Vec<f32> {
        match row_count {
            0 => Vec::new(),
            n if n > MAX_GRID_DIMENSION => {
                tracing::debug!("Ignoring row count {}", n);
                Vec::new()
            }
            1 => vec![1.0],
            2 => vec![self.horizontal_split, 1.0 - self.horizontal_split],
            n => vec![1.0 / n as f32; n],
        }
    }

    /// Set every stored ratio to the even split, keeping the shape
    pub fn reset(&mut self) {
        self.horizontal_split = DEFAULT_RATIO;
        self.vertical_splits.fill(DEFAULT_RATIO);
        for splits in self.multi_column_splits.values_mut() {
            splits.fill(DEFAULT_RATIO);
        }
    }

    /// Pull every ratio into `bounds`
    pub fn clamp_to(&mut self, bounds: RatioBounds) {
        self.horizontal_split = bounds.clamp(self.horizontal_split);
        for value in self.vertical_splits.iter_mut() {
            *value = bounds.clamp(*value);
        }
        for splits in self.multi_column_splits.values_mut() {
            for value in splits.iter_mut() {
                *value = bounds.clamp(*value);
            }
        }
    }

    /// Drop multi-column entries for rows at or beyond `row_count`.
    /// Returns the number of entries removed.
    pub fn prune_rows(&mut self, row_count: usize) -> usize {
        let before = self.multi_column_splits.len();
        self.multi_column_splits.retain(|row, _| *row < row_count);
        before - self.multi_column_splits.len()
    }

    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        let payload = PanelLayoutPayload {
            version: Self::CURRENT_VERSION,
            horizontal_split: self.horizontal_split,
            vertical_splits: self.vertical_splits.clone(),
            multi_column_splits: self
                .multi_column_splits
                .iter()
                .map(|(row, splits)| (row.to_string(), splits.clone()))
                .collect(),
        };
        Ok(serde_json::to_vec(&payload)?)
    }

    /// Parse a stored payload. Row keys that are not canonical integers, or
    /// that name a row past the grid limit, are dropped. Every ratio is
    /// clamped into `bounds`.
    pub fn decode(bytes: &[u8], bounds: RatioBounds) -> Result<Self, PayloadError> {
        let payload: PanelLayoutPayload = serde_json::from_slice(bytes)?;

        if payload.version > Self::CURRENT_VERSION {
            return Err(PayloadError::UnsupportedVersion(payload.version));
        }

        let mut multi_column_splits = BTreeMap::new();
        for (key, splits) in payload.multi_column_splits {
            match key.parse::<usize>() {
                Ok(row) if row < MAX_GRID_DIMENSION && row.to_string() == key => {
                    multi_column_splits.insert(row, splits);
                }
                _ => tracing::debug!("Dropping malformed row key {:?}", key),
            }
        }

        let mut layout = Self {
            horizontal_split: payload.horizontal_split,
            vertical_splits: payload.vertical_splits,
            multi_column_splits,
        };
        layout.clamp_to(bounds);
        Ok(layout)
    }
}

/// Sequential split of the row: each divider takes its fraction of whatever
/// width the earlier columns left over, and the last column gets the rest.
///
/// A divider's value is scaled by the even share of the columns still to be
/// placed, so 0.5 means "this column gets its even share" and a row whose
/// dividers are all 0.5 comes out with equal widths.
fn proportional_widths(splits: &[f32]) -> Vec<f32> {
    let column_count = splits.len() + 1;
    let mut widths = Vec::with_capacity(column_count);
    let mut remaining = 1.0_f32;

    for (index, split) in splits.iter().enumerate() {
        let columns_left = (column_count - index) as f32;
        let width = remaining * split * 2.0 / columns_left;
        widths.push(width);
        remaining -= width;
    }
    widths.push(remaining);
    widths
}

/// On-disk form. Row-indexed maps use string keys since JSON object keys
/// must be text.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PanelLayoutPayload {
    version: u32,
    #[serde(default = "default_ratio")]
    horizontal_split: f32,
    #[serde(default)]
    vertical_splits: Vec<f32>,
    #[serde(default)]
    multi_column_splits: HashMap<String, Vec<f32>>,
}

fn default_ratio() -> f32 {
    DEFAULT_RATIO
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layout version: {0}")]
    UnsupportedVersion(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_widths(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 0.0001, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn single_column_takes_full_width() {
        assert_widths(&PanelLayout::default().column_widths(0, 1), &[1.0]);
        assert!(PanelLayout::default().column_widths(0, 0).is_empty());
    }

    #[test]
    fn two_columns_default_to_even_split() {
        let layout = PanelLayout::default();
        assert_widths(&layout.column_widths(0, 2), &[0.5, 0.5]);
    }

    #[test]
    fn two_columns_use_row_split() {
        let mut layout = PanelLayout::default();
        layout.vertical_splits = vec![0.5, 0.3];
        assert_widths(&layout.column_widths(1, 2), &[0.3, 0.7]);
    }

    #[test]
    fn even_dividers_give_equal_columns() {
        let mut layout = PanelLayout::default();
        layout.multi_column_splits.insert(2, vec![0.5, 0.5, 0.5]);
        assert_widths(&layout.column_widths(2, 4), &[0.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn dividers_consume_remaining_width_in_order() {
        let mut layout = PanelLayout::default();
        layout.multi_column_splits.insert(0, vec![0.75, 0.5]);
        // 0.75 * 2/3 of 1.0, then an even half of the remaining 0.5
        assert_widths(&layout.column_widths(0, 3), &[0.5, 0.25, 0.25]);

        let widths = layout.column_widths(0, 3);
        assert!((widths.iter().sum::<f32>() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn mismatched_divider_count_falls_back_to_equal() {
        let mut layout = PanelLayout::default();
        layout.multi_column_splits.insert(0, vec![0.3, 0.7]);
        let third = 1.0 / 3.0;
        assert_widths(&layout.column_widths(0, 4), &[0.25; 4]);
        assert_widths(&layout.column_widths(1, 3), &[third, third, third]);
    }

    #[test]
    fn row_heights_follow_horizontal_split() {
        let mut layout = PanelLayout::default();
        layout.horizontal_split = 0.7;
        assert_widths(&layout.row_heights(1), &[1.0]);
        assert_widths(&layout.row_heights(2), &[0.7, 0.3]);
        assert_widths(&layout.row_heights(4), &[0.25; 4]);
    }

    #[test]
    fn payload_uses_string_row_keys() {
        let mut layout = PanelLayout::default();
        layout.multi_column_splits.insert(3, vec![0.4, 0.6]);

        let json: serde_json::Value = serde_json::from_slice(&layout.encode().unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert!(json["multiColumnSplits"]["3"].is_array());
        assert!(json["horizontalSplit"].is_number());
    }

    #[test]
    fn decode_roundtrip() {
        let mut layout = PanelLayout::default();
        layout.horizontal_split = 0.25;
        layout.vertical_splits = vec![0.5, 0.75];
        layout.multi_column_splits.insert(1, vec![0.5, 0.2, 0.8]);

        let bytes = layout.encode().unwrap();
        let decoded = PanelLayout::decode(&bytes, RatioBounds::DEFAULT).unwrap();
        assert_eq!(decoded, layout);
    }

    #[test]
    fn decode_drops_malformed_keys_and_clamps() {
        let json = br#"{
            "version": 1,
            "horizontalSplit": 0.99,
            "verticalSplits": [0.0, 0.5],
            "multiColumnSplits": { "0": [0.5, 0.5], "row2": [0.5, 0.5], "-1": [0.5, 0.5] }
        }"#;

        let layout = PanelLayout::decode(json, RatioBounds::DEFAULT).unwrap();
        assert_eq!(layout.horizontal_split, 0.85);
        assert_eq!(layout.vertical_splits, vec![0.15, 0.5]);
        assert_eq!(layout.multi_column_splits.keys().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn decode_ignores_non_canonical_row_keys() {
        let json = br#"{
            "version": 1,
            "multiColumnSplits": {
                "00": [0.2, 0.2],
                " 0": [0.3, 0.3],
                "+0": [0.4, 0.4],
                "0": [0.6, 0.6],
                "1000": [0.5, 0.5]
            }
        }"#;

        let layout = PanelLayout::decode(json, RatioBounds::DEFAULT).unwrap();
        assert_eq!(layout.multi_column_splits.len(), 1);
        assert_eq!(layout.multi_column_splits[&0], vec![0.6, 0.6]);
    }

    #[test]
    fn oversized_grids_have_no_geometry() {
        let layout = PanelLayout::default();
        assert!(layout.column_widths(0, usize::MAX).is_empty());
        assert!(layout.column_widths(0, MAX_GRID_DIMENSION + 1).is_empty());
        assert!(layout.row_heights(usize::MAX).is_empty());
        assert_eq!(layout.column_widths(0, MAX_GRID_DIMENSION).len(), MAX_GRID_DIMENSION);
    }

    #[test]
    fn decode_fills_missing_fields() {
        let layout = PanelLayout::decode(br#"{"version":1}"#, RatioBounds::DEFAULT).unwrap();
        assert_eq!(layout, PanelLayout::default());
    }

    #[test]
    fn decode_rejects_newer_versions() {
        let err = PanelLayout::decode(br#"{"version":2}"#, RatioBounds::DEFAULT).unwrap_err();
        assert!(matches!(err, PayloadError::UnsupportedVersion(2)));
    }

    #[test]
    fn reset_keeps_shape() {
        let mut layout = PanelLayout::default();
        layout.horizontal_split = 0.2;
        layout.vertical_splits = vec![0.3, 0.8];
        layout.multi_column_splits.insert(0, vec![0.2, 0.7]);

        layout.reset();

        assert_eq!(layout.horizontal_split, 0.5);
        assert_eq!(layout.vertical_splits, vec![0.5, 0.5]);
        assert_eq!(layout.multi_column_splits[&0], vec![0.5, 0.5]);
    }
}
