// ABOUTME: Divider ratio bounds and clamping.
// ABOUTME: Every stored split passes through here before it lands in the layout.

use mux_core::config::{LayoutSettings, DEFAULT_MAX_POSITION, DEFAULT_MIN_POSITION};

/// Ratio used for new or reset dividers (an even split)
pub const DEFAULT_RATIO: f32 = 0.5;

/// Inclusive range a divider ratio is kept within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    min: f32,
    max: f32,
}

impl RatioBounds {
    pub const DEFAULT: Self = Self {
        min: DEFAULT_MIN_POSITION,
        max: DEFAULT_MAX_POSITION,
    };

    /// Returns None unless `0 < min <= 0.5 <= max < 1`
    pub fn new(min: f32, max: f32) -> Option<Self> {
        let settings = LayoutSettings {
            min_position: min,
            max_position: max,
            ..LayoutSettings::default()
        };
        settings.is_valid().then_some(Self { min, max })
    }

    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self::new(settings.min_position, settings.max_position).unwrap_or(Self::DEFAULT)
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp into range. NaN maps to the even split.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return DEFAULT_RATIO;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// New ratio after dragging a divider by `delta` along an axis of length `extent`
    pub fn drag(&self, start: f32, delta: f32, extent: f32) -> f32 {
        if extent.is_nan() || extent <= 0.0 {
            return self.clamp(start);
        }
        self.clamp(start + delta / extent)
    }
}

impl Default for RatioBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Clamp with the default bounds
pub fn clamp_ratio(value: f32) -> f32 {
    RatioBounds::DEFAULT.clamp(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_default_bounds() {
        assert_eq!(clamp_ratio(0.0), 0.15);
        assert_eq!(clamp_ratio(1.0), 0.85);
        assert_eq!(clamp_ratio(0.3), 0.3);
        assert_eq!(clamp_ratio(f32::NEG_INFINITY), 0.15);
        assert_eq!(clamp_ratio(f32::NAN), DEFAULT_RATIO);
    }

    #[test]
    fn rejects_unusable_bounds() {
        assert!(RatioBounds::new(0.6, 0.9).is_none());
        assert!(RatioBounds::new(0.0, 0.5).is_none());
        assert!(RatioBounds::new(0.2, 0.8).is_some());
    }

    #[test]
    fn drag_moves_by_fraction_of_extent() {
        let bounds = RatioBounds::DEFAULT;
        assert!((bounds.drag(0.5, 100.0, 1000.0) - 0.6).abs() < 0.0001);
        assert_eq!(bounds.drag(0.5, -900.0, 1000.0), 0.15);
        assert_eq!(bounds.drag(0.4, 10.0, 0.0), 0.4);
    }
}
