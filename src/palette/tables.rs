use crate::foundation::error::{CoverError, CoverResult};
use crate::palette::scheme::ColorScheme;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

/// Built-in preset tables, embedded at compile time.
///
/// Adding or changing entries is a data edit; the resolver never needs to
/// change for new keys.
const PRESETS_JSON: &str = include_str!("presets.json");

static BUILTIN: OnceLock<Palette> = OnceLock::new();

/// Three read-only `key -> ColorScheme` tables: artist, genre, theme.
///
/// Loaded once (embedded JSON or a caller-supplied file) and passed by
/// reference into the resolver. Never mutated after load.
#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    /// Artist-key table. Keys are already in normalized form (lowercase,
    /// no spaces) as produced by [`crate::palette::resolver::normalize_artist_key`].
    #[serde(default)]
    pub artists: HashMap<String, ColorScheme>,
    /// Genre-key table.
    #[serde(default)]
    pub genres: HashMap<String, ColorScheme>,
    /// Theme-key table.
    #[serde(default)]
    pub themes: HashMap<String, ColorScheme>,
}

impl Palette {
    /// Borrow the built-in palette shipped with the crate.
    ///
    /// The embedded JSON is parsed once per process; a parse failure here is
    /// a build defect, not a runtime condition.
    pub fn builtin() -> &'static Palette {
        BUILTIN.get_or_init(|| {
            serde_json::from_str(PRESETS_JSON).expect("embedded preset palette must parse")
        })
    }

    /// Parse a palette from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CoverResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CoverError::configuration(format!("parse palette JSON: {e}")))
    }

    /// Parse a palette from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CoverResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CoverError::configuration(format!("open palette JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Look up an artist scheme by normalized key.
    pub fn artist(&self, key: &str) -> Option<&ColorScheme> {
        self.artists.get(key)
    }

    /// Look up a genre scheme.
    pub fn genre(&self, key: &str) -> Option<&ColorScheme> {
        self.genres.get(key)
    }

    /// Look up a theme scheme.
    pub fn theme(&self, key: &str) -> Option<&ColorScheme> {
        self.themes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palette_has_the_preset_tables() {
        let p = Palette::builtin();
        assert_eq!(p.themes.len(), 20);
        assert_eq!(p.genres.len(), 15);
        assert_eq!(p.artists.len(), 10);

        let summer = p.theme("summer").unwrap();
        assert_eq!(summer.gradient_start, "#FFD93D");
        assert_eq!(summer.gradient_end, "#FF6B9D");
        assert_eq!(summer.text_color, "#FFFFFF");

        let beatles = p.artist("beatles").unwrap();
        assert_eq!(beatles.gradient_start, "#FFD700");
        assert_eq!(beatles.gradient_end, "#FF6347");
    }

    #[test]
    fn from_reader_accepts_partial_tables() {
        let p = Palette::from_reader(
            br##"{"themes": {"mono": ["#000000", "#111111", "#FFFFFF"]}}"##.as_slice(),
        )
        .unwrap();
        assert!(p.artists.is_empty());
        assert!(p.genre("rock").is_none());
        assert_eq!(p.theme("mono").unwrap().text_color, "#FFFFFF");
    }

    #[test]
    fn from_reader_rejects_bad_hex_at_load_time() {
        let err = Palette::from_reader(br##"{"themes": {"bad": ["red", "#111111", "#FFFFFF"]}}"##.as_slice());
        assert!(err.is_err());
    }
}
