// Hex colour parsing for the Slides/Docs/Sheets `rgbColor` objects.

use serde_json::{json, Value};

use crate::core::workspace::WorkspaceError;

/// An RGB colour with channels in `0.0..=1.0`, as the Google APIs expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl RgbColor {
    /// Parse `#RRGGBB` or `#RGB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, WorkspaceError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || WorkspaceError::InvalidArgument(format!("invalid hex color '{hex}'"));

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |range: std::ops::Range<usize>| -> Result<f32, WorkspaceError> {
            let raw = expanded.get(range).ok_or_else(invalid)?;
            let value = u8::from_str_radix(raw, 16).map_err(|_| invalid())?;
            Ok(f32::from(value) / 255.0)
        };

        Ok(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    pub fn to_json(self) -> Value {
        json!({
            "red": self.red,
            "green": self.green,
            "blue": self.blue,
        })
    }
}

/// `{"rgbColor": {...}}`, the shape used by Slides `OpaqueColor` and Docs `Color`.
pub fn rgb_color(hex: &str) -> Result<Value, WorkspaceError> {
    Ok(json!({ "rgbColor": RgbColor::from_hex(hex)?.to_json() }))
}

/// Docs `OptionalColor`: `{"color": {"rgbColor": {...}}}`.
pub fn optional_color(hex: &str) -> Result<Value, WorkspaceError> {
    Ok(json!({ "color": rgb_color(hex)? }))
}

/// Slides `SolidFill`: `{"color": {"rgbColor": {...}}}`.
pub fn solid_fill(hex: &str) -> Result<Value, WorkspaceError> {
    Ok(json!({ "solidFill": { "color": rgb_color(hex)? } }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_long_form() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor { red: 1.0, green: 0.0, blue: 0.0 });

        let color = RgbColor::from_hex("00ff00").unwrap();
        assert_eq!(color.green, 1.0);
    }

    #[test]
    fn test_parses_short_form() {
        let color = RgbColor::from_hex("#fff").unwrap();
        assert_eq!(color, RgbColor { red: 1.0, green: 1.0, blue: 1.0 });

        let color = RgbColor::from_hex("#08f").unwrap();
        assert_eq!(color.red, 0.0);
        assert!((color.green - 136.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "#12", "#12345", "#GGGGGG", "red", "#ÿÿÿ"] {
            assert!(RgbColor::from_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_json_shapes() {
        let fill = solid_fill("#000000").unwrap();
        assert_eq!(fill["solidFill"]["color"]["rgbColor"]["red"], json!(0.0));

        let color = optional_color("#ffffff").unwrap();
        assert_eq!(color["color"]["rgbColor"]["blue"], json!(1.0));
    }
}
