use crate::foundation::error::{CoverError, CoverResult};
use serde::{Deserialize, Serialize};

/// The ordered color triple driving a cover's visual theme.
///
/// Immutable once resolved. Each field is a `#RRGGBB` hex string, validated
/// at construction and at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    /// Radial gradient center color.
    pub gradient_start: String,
    /// Radial gradient edge color.
    pub gradient_end: String,
    /// Title and subtitle text color.
    pub text_color: String,
}

impl ColorScheme {
    /// Build a scheme from three hex color strings, validating each.
    pub fn new(
        gradient_start: impl Into<String>,
        gradient_end: impl Into<String>,
        text_color: impl Into<String>,
    ) -> CoverResult<Self> {
        let scheme = Self {
            gradient_start: gradient_start.into(),
            gradient_end: gradient_end.into(),
            text_color: text_color.into(),
        };
        scheme.check().map_err(CoverError::configuration)?;
        Ok(scheme)
    }

    fn check(&self) -> Result<(), String> {
        for color in [&self.gradient_start, &self.gradient_end, &self.text_color] {
            check_hex(color)?;
        }
        Ok(())
    }
}

/// Accept `#RRGGBB` (case-insensitive, leading `#` required so the value can
/// be embedded in SVG attributes verbatim).
fn check_hex(s: &str) -> Result<(), String> {
    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| format!("hex color \"{s}\" must start with '#'"))?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("hex color \"{s}\" must be #RRGGBB"));
    }
    Ok(())
}

impl<'de> Deserialize<'de> for ColorScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Triple([String; 3]),
            Fields {
                gradient_start: String,
                gradient_end: String,
                text_color: String,
            },
        }

        let (start, end, text) = match Repr::deserialize(deserializer)? {
            Repr::Triple([start, end, text]) => (start, end, text),
            Repr::Fields {
                gradient_start,
                gradient_end,
                text_color,
            } => (gradient_start, gradient_end, text_color),
        };

        let scheme = ColorScheme {
            gradient_start: start,
            gradient_end: end,
            text_color: text,
        };
        scheme.check().map_err(serde::de::Error::custom)?;
        Ok(scheme)
    }
}
