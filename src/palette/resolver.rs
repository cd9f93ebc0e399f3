use crate::foundation::error::{CoverError, CoverResult};
use crate::palette::scheme::ColorScheme;
use crate::palette::tables::Palette;

/// Theme key used when an artist is supplied but nothing resolves.
pub const FALLBACK_THEME: &str = "energetic";

/// Borrowed view of a request's color inputs.
///
/// At most one resolution path wins; see [`resolve`] for the precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSpec<'a> {
    /// Artist/band name, matched against the artist table after normalization.
    pub artist: Option<&'a str>,
    /// Theme key.
    pub theme: Option<&'a str>,
    /// Genre key.
    pub genre: Option<&'a str>,
    /// Explicit gradient center color.
    pub gradient_start: Option<&'a str>,
    /// Explicit gradient edge color.
    pub gradient_end: Option<&'a str>,
    /// Explicit text color.
    pub text_color: Option<&'a str>,
}

/// Normalize an artist name into its table key: lowercase, then strip all
/// spaces, then strip every occurrence of the substring "the".
///
/// The "the" stripping applies anywhere in the name, so "Theory" normalizes
/// to "ory". Table keys are written against this normalization.
pub fn normalize_artist_key(artist: &str) -> String {
    artist.to_lowercase().replace(' ', "").replace("the", "")
}

/// Resolve a request's color scheme from the preset tables.
///
/// Precedence, first match wins:
///
/// 1. A known artist — even when theme or genre were also supplied.
/// 2. An unknown artist falls through theme, then genre, then the
///    [`FALLBACK_THEME`] preset; an artist request never fails outright.
/// 3. With no artist: theme, then genre, then the explicit custom triple
///    (all three fields must be present).
///
/// Fails with a configuration error when no path succeeds.
pub fn resolve(palette: &Palette, spec: &ColorSpec<'_>) -> CoverResult<ColorScheme> {
    if let Some(artist) = spec.artist {
        let key = normalize_artist_key(artist);
        if let Some(scheme) = palette.artist(&key) {
            tracing::debug!(artist, key = key.as_str(), "resolved colors from artist table");
            return Ok(scheme.clone());
        }
        if let Some(scheme) = spec.theme.and_then(|t| palette.theme(t)) {
            return Ok(scheme.clone());
        }
        if let Some(scheme) = spec.genre.and_then(|g| palette.genre(g)) {
            return Ok(scheme.clone());
        }
        tracing::debug!(artist, "unknown artist, using fallback theme");
        return Ok(palette
            .theme(FALLBACK_THEME)
            .cloned()
            .unwrap_or_else(fallback_scheme));
    }

    if let Some(scheme) = spec.theme.and_then(|t| palette.theme(t)) {
        return Ok(scheme.clone());
    }
    if let Some(scheme) = spec.genre.and_then(|g| palette.genre(g)) {
        return Ok(scheme.clone());
    }
    if let (Some(start), Some(end), Some(text)) =
        (spec.gradient_start, spec.gradient_end, spec.text_color)
    {
        return ColorScheme::new(start, end, text);
    }

    Err(CoverError::configuration(
        "no color scheme resolved: supply artist, theme, or genre, or the full \
         gradient_start/gradient_end/text_color triple",
    ))
}

/// The "energetic" preset, hardcoded so artist fallback survives a palette
/// file that dropped the entry.
fn fallback_scheme() -> ColorScheme {
    ColorScheme {
        gradient_start: "#FF6B35".to_string(),
        gradient_end: "#F72C25".to_string(),
        text_color: "#FFFFFF".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_key_normalization_strips_spaces_and_the() {
        assert_eq!(normalize_artist_key("The Beatles"), "beatles");
        assert_eq!(normalize_artist_key("Led Zeppelin"), "ledzeppelin");
        assert_eq!(normalize_artist_key("AC DC"), "acdc");
        // Every occurrence of "the" goes, even mid-word.
        assert_eq!(normalize_artist_key("Theory"), "ory");
    }

    #[test]
    fn custom_triple_must_be_complete() {
        let palette = Palette::builtin();
        let spec = ColorSpec {
            gradient_start: Some("#101010"),
            gradient_end: Some("#202020"),
            ..Default::default()
        };
        assert!(matches!(
            resolve(palette, &spec),
            Err(CoverError::Configuration(_))
        ));
    }

    #[test]
    fn custom_triple_with_invalid_hex_is_rejected() {
        let palette = Palette::builtin();
        let spec = ColorSpec {
            gradient_start: Some("#101010"),
            gradient_end: Some("#202020"),
            text_color: Some("white"),
            ..Default::default()
        };
        assert!(matches!(
            resolve(palette, &spec),
            Err(CoverError::Configuration(_))
        ));
    }
}
