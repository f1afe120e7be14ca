// ABOUTME: Color representation and hex conversion utilities.
// ABOUTME: Quick actions store colors as hex strings; this parses them for display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Accent used when an action's stored hex cannot be parsed
    pub const ACCENT: Self = Self::rgb(0.0, 0.478, 1.0);

    /// Parse `#RRGGBB`, `RRGGBB`, `#RRGGBBAA` or `RRGGBBAA`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let well_formed =
            matches!(digits.len(), 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#RRGGBB` (alpha dropped when opaque)
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if to_u8(self.a) == 255 {
            format!("#{:02X}{:02X}{:02X}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                to_u8(self.r),
                to_u8(self.g),
                to_u8(self.b),
                to_u8(self.a)
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::ACCENT
    }
}
