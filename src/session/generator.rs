use crate::compose::svg::compose_svg;
use crate::encode::optimize::{DEFAULT_BUDGET_KB, optimize_to_budget};
use crate::foundation::error::{CoverError, CoverResult};
use crate::layout::typography::LayoutPlan;
use crate::palette::resolver::{ColorSpec, resolve};
use crate::palette::tables::Palette;
use crate::render::raster::{ArtifactFormat, MAX_CANVAS, RasterArtifact, export_svg};
use crate::upload::uploader::Uploader;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default square canvas edge in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 600;

/// Smallest accepted canvas edge.
const MIN_CANVAS: u32 = 64;

/// One cover-generation request.
///
/// Constructed per call and consumed synchronously; exactly one color
/// resolution path must succeed (see [`crate::palette::resolver::resolve`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverRequest {
    /// Main title text. Required, non-empty.
    pub title: String,
    /// Optional subtitle, rendered below the title block.
    pub subtitle: Option<String>,
    /// Artist/band name for the artist-mood table.
    pub artist: Option<String>,
    /// Preset theme key.
    pub theme: Option<String>,
    /// Preset genre key.
    pub genre: Option<String>,
    /// Explicit gradient center color (requires the other two custom fields).
    pub gradient_start: Option<String>,
    /// Explicit gradient edge color.
    pub gradient_end: Option<String>,
    /// Explicit text color.
    pub text_color: Option<String>,
    /// Square canvas edge in pixels.
    pub canvas_size: u32,
    /// Upload byte budget in KB.
    pub budget_kb: u32,
}

impl Default for CoverRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            artist: None,
            theme: None,
            genre: None,
            gradient_start: None,
            gradient_end: None,
            text_color: None,
            canvas_size: DEFAULT_CANVAS_SIZE,
            budget_kb: DEFAULT_BUDGET_KB,
        }
    }
}

impl CoverRequest {
    /// Start a request with a title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate the request fields that do not depend on the palette.
    pub fn validate(&self) -> CoverResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoverError::configuration("title must be non-empty"));
        }
        if self.canvas_size < MIN_CANVAS || self.canvas_size > MAX_CANVAS {
            return Err(CoverError::configuration(format!(
                "canvas_size {} out of range ({MIN_CANVAS}..={MAX_CANVAS})",
                self.canvas_size
            )));
        }
        if self.budget_kb == 0 {
            return Err(CoverError::configuration("budget_kb must be at least 1"));
        }
        Ok(())
    }

    fn color_spec(&self) -> ColorSpec<'_> {
        ColorSpec {
            artist: self.artist.as_deref(),
            theme: self.theme.as_deref(),
            genre: self.genre.as_deref(),
            gradient_start: self.gradient_start.as_deref(),
            gradient_end: self.gradient_end.as_deref(),
            text_color: self.text_color.as_deref(),
        }
    }
}

/// Synchronous generation facade: resolve colors, lay out typography,
/// compose the SVG, rasterize, and optimize to the byte budget.
///
/// Holds only the read-only palette; one `Generator` serves any number of
/// sequential requests.
pub struct Generator {
    palette: Palette,
}

impl Generator {
    /// Build a generator over a palette.
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Build a generator over the built-in preset palette.
    pub fn with_builtin_palette() -> Self {
        Self::new(Palette::builtin().clone())
    }

    /// Borrow the palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Run the full pipeline for one request, yielding a budget-compliant
    /// artifact.
    pub fn generate(&self, request: &CoverRequest) -> CoverResult<RasterArtifact> {
        request.validate()?;
        let scheme = resolve(&self.palette, &request.color_spec())?;
        let plan = LayoutPlan::compute(
            &request.title,
            request.subtitle.as_deref(),
            request.canvas_size,
        );
        let svg = compose_svg(
            &plan,
            request.subtitle.as_deref(),
            &scheme,
            request.canvas_size,
        )?;
        let artifact = export_svg(&svg, request.canvas_size)?;
        let raw_len = artifact.byte_len();
        let artifact = optimize_to_budget(artifact, request.budget_kb)?;
        tracing::info!(
            title = request.title.as_str(),
            lines = plan.lines.len(),
            raw_len,
            final_len = artifact.byte_len(),
            "generated cover"
        );
        Ok(artifact)
    }

    /// Generate and write the artifact to `out`, or to a per-process temp
    /// path when `out` is `None`. The caller owns (and deletes) the file.
    pub fn generate_to_path(
        &self,
        request: &CoverRequest,
        out: Option<&Path>,
    ) -> CoverResult<PathBuf> {
        let artifact = self.generate(request)?;
        let path = match out {
            Some(p) => p.to_path_buf(),
            None => temp_artifact_path(artifact.format),
        };
        write_artifact(&artifact, &path)?;
        Ok(path)
    }

    /// Generate and hand the artifact to an uploader in one step.
    ///
    /// On an authorization failure the artifact is preserved on disk and the
    /// error message names where, so the upload can be retried without
    /// regenerating.
    pub fn create_and_upload(
        &self,
        request: &CoverRequest,
        playlist_id: &str,
        uploader: &mut dyn Uploader,
    ) -> CoverResult<RasterArtifact> {
        let artifact = self.generate(request)?;
        match uploader.upload(playlist_id, &artifact) {
            Ok(()) => Ok(artifact),
            Err(CoverError::UploadAuthorization(msg)) => {
                let path = temp_artifact_path(artifact.format);
                match write_artifact(&artifact, &path) {
                    Ok(()) => Err(CoverError::upload_authorization(format!(
                        "{msg}; the generated cover was kept at '{}'",
                        path.display()
                    ))),
                    Err(_) => Err(CoverError::upload_authorization(msg)),
                }
            }
            Err(e) => Err(e),
        }
    }
}

fn write_artifact(artifact: &RasterArtifact, path: &Path) -> CoverResult<()> {
    std::fs::write(path, &artifact.bytes)
        .with_context(|| format!("write cover '{}'", path.display()))
        .map_err(CoverError::from)
}

/// At most one temp file exists per call; the caller deletes it once the
/// artifact has been consumed.
fn temp_artifact_path(format: ArtifactFormat) -> PathBuf {
    std::env::temp_dir().join(format!(
        "playcover-{}.{}",
        std::process::id(),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let req = CoverRequest::new("   ");
        assert!(matches!(
            req.validate(),
            Err(CoverError::Configuration(_))
        ));
    }

    #[test]
    fn default_request_carries_documented_defaults() {
        let req = CoverRequest::new("Mix");
        assert_eq!(req.canvas_size, 600);
        assert_eq!(req.budget_kb, 256);
        assert!(req.subtitle.is_none());
    }

    #[test]
    fn canvas_bounds_are_enforced() {
        let mut req = CoverRequest::new("Mix");
        req.canvas_size = 0;
        assert!(req.validate().is_err());
        req.canvas_size = MAX_CANVAS + 1;
        assert!(req.validate().is_err());
        req.canvas_size = DEFAULT_CANVAS_SIZE;
        req.budget_kb = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: CoverRequest =
            serde_json::from_str(r#"{"title": "Night Drive", "theme": "dark"}"#).unwrap();
        assert_eq!(req.title, "Night Drive");
        assert_eq!(req.theme.as_deref(), Some("dark"));
        assert_eq!(req.canvas_size, 600);
        assert_eq!(req.budget_kb, 256);
    }
}
