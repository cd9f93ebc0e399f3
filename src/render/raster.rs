use crate::foundation::error::{CoverError, CoverResult};
use image::RgbImage;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use usvg::fontdb;

/// Directory scanned for extra `.ttf`/`.otf` files on top of system fonts.
const FONTS_DIR: &str = "resources/fonts";

/// Upper bound on the square canvas edge, to avoid pathological pixmap
/// allocations.
pub(crate) const MAX_CANVAS: u32 = 4096;

static FONT_DB: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// Encoded format of a [`RasterArtifact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Lossless PNG (the initial export format).
    Png,
    /// JPEG (produced by the size optimizer's re-encode passes).
    Jpeg,
}

impl ArtifactFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// One encoded cover image: bytes, pixel dimensions, and declared format.
///
/// Produced once per generation request; immutable. Its byte length is the
/// quantity the size optimizer drives toward the upload budget.
#[derive(Debug, Clone)]
pub struct RasterArtifact {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Declared encoding of `bytes`.
    pub format: ArtifactFormat,
}

impl RasterArtifact {
    /// Encoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Wrap already-encoded PNG or JPEG bytes, sniffing format and
    /// dimensions from the data.
    pub fn from_encoded_bytes(bytes: Vec<u8>) -> CoverResult<Self> {
        let format = match image::guess_format(&bytes) {
            Ok(image::ImageFormat::Png) => ArtifactFormat::Png,
            Ok(image::ImageFormat::Jpeg) => ArtifactFormat::Jpeg,
            Ok(other) => {
                return Err(CoverError::encode(format!(
                    "unsupported image format {other:?}, expected PNG or JPEG"
                )));
            }
            Err(e) => return Err(CoverError::encode(format!("sniff image format: {e}"))),
        };
        let img = image::load_from_memory(&bytes)
            .map_err(|e| CoverError::encode(format!("decode image: {e}")))?;
        let (width, height) = img.to_rgb8().dimensions();
        Ok(Self {
            width,
            height,
            bytes,
            format,
        })
    }
}

/// Rasterize an SVG document onto a square canvas and PNG-encode it.
///
/// Deterministic for identical input and size. Any parse or raster failure
/// is fatal and surfaces as a render error; there is no fallback path.
pub fn export_svg(svg: &str, canvas_size: u32) -> CoverResult<RasterArtifact> {
    if canvas_size == 0 || canvas_size > MAX_CANVAS {
        return Err(CoverError::render(format!(
            "canvas size {canvas_size} out of range (1..={MAX_CANVAS})"
        )));
    }

    let opts = usvg::Options {
        fontdb: global_fontdb(),
        font_family: "Arial".to_string(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .map_err(|e| CoverError::render(format!("parse cover svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas_size, canvas_size)
        .ok_or_else(|| CoverError::render("failed to allocate cover pixmap"))?;

    let sx = canvas_size as f32 / tree.size().width();
    let sy = canvas_size as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // The gradient background is opaque, but resvg output is premultiplied
    // RGBA; flatten over white so the encoders see plain RGB.
    let rgb = flatten_premul_to_rgb8(pixmap.data(), [255, 255, 255])?;
    let img = RgbImage::from_raw(canvas_size, canvas_size, rgb)
        .ok_or_else(|| CoverError::render("pixmap length mismatch after flatten"))?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| CoverError::encode(format!("png encode: {e}")))?;
    tracing::debug!(canvas_size, len = bytes.len(), "rasterized cover svg");

    Ok(RasterArtifact {
        bytes,
        width: canvas_size,
        height: canvas_size,
        format: ArtifactFormat::Png,
    })
}

fn global_fontdb() -> Arc<fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            load_fonts_from_dir(&mut db, Path::new(FONTS_DIR));
            Arc::new(db)
        })
        .clone()
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
        if is_font {
            if let Err(e) = db.load_font_file(&path) {
                tracing::warn!("failed to load font '{}': {e}", path.display());
            }
        }
    }
}

fn flatten_premul_to_rgb8(src_premul: &[u8], bg_rgb: [u8; 3]) -> CoverResult<Vec<u8>> {
    if src_premul.len() % 4 != 0 {
        return Err(CoverError::render(
            "flatten_premul_to_rgb8 expects rgba8 input",
        ));
    }

    let bg_r = u16::from(bg_rgb[0]);
    let bg_g = u16::from(bg_rgb[1]);
    let bg_b = u16::from(bg_rgb[2]);

    let mut out = Vec::with_capacity(src_premul.len() / 4 * 3);
    for s in src_premul.chunks_exact(4) {
        let a = u16::from(s[3]);
        if a == 255 {
            out.extend_from_slice(&s[0..3]);
            continue;
        }

        let inv = 255u16 - a;
        out.push((u16::from(s[0]) + mul_div255(bg_r, inv)).min(255) as u8);
        out.push((u16::from(s[1]) + mul_div255(bg_g, inv)).min(255) as u8);
        out.push((u16::from(s[2]) + mul_div255(bg_b, inv)).min(255) as u8);
    }
    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
