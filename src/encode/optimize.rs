use crate::foundation::error::{CoverError, CoverResult};
use crate::render::raster::{ArtifactFormat, RasterArtifact};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Default upload budget in KB.
pub const DEFAULT_BUDGET_KB: u32 = 256;

const QUALITY_START: u8 = 95;
const QUALITY_STEP: u8 = 5;
/// Exclusive lower bound for the quality pass; 20 itself is not attempted.
const QUALITY_FLOOR: u8 = 20;
/// JPEG quality used by the resolution pass.
const RESIZE_QUALITY: u8 = 85;
const SCALE_FACTOR: f64 = 0.9;
/// The cumulative scale never drops to or below this.
const SCALE_FLOOR: f64 = 0.5;
const MAX_SCALE_STEPS: u32 = 5;

/// Drive an artifact's encoded size under `budget_kb`.
///
/// An artifact already within budget is returned unchanged. Otherwise two
/// sequential bounded passes run over the decoded pixels, the quality pass
/// always completing before any scaling begins:
///
/// 1. JPEG re-encode at quality 95, 90, ... while quality stays above 20,
///    stopping at the first encoding within budget.
/// 2. Cumulative x0.9 scaling of both dimensions with Lanczos resampling,
///    re-encoding each step, stopping when the budget is met, the scale
///    reaches the 0.5 floor, or the step counter runs out.
///
/// Each re-encode discards the previous one. When the search exhausts
/// without meeting the budget the smallest artifact seen is returned,
/// never one larger than the unoptimized input.
pub fn optimize_to_budget(artifact: RasterArtifact, budget_kb: u32) -> CoverResult<RasterArtifact> {
    let budget = budget_kb as usize * 1024;
    if artifact.byte_len() <= budget {
        return Ok(artifact);
    }

    let decoded = image::load_from_memory(&artifact.bytes)
        .map_err(|e| CoverError::encode(format!("decode artifact for optimization: {e}")))?
        .to_rgb8();
    let (width, height) = (artifact.width, artifact.height);
    let mut best = artifact;

    // Quality pass.
    let mut quality = QUALITY_START;
    while quality > QUALITY_FLOOR {
        let candidate = encode_jpeg(&decoded, width, height, quality)?;
        tracing::debug!(quality, len = candidate.byte_len(), "quality pass re-encode");
        let met = candidate.byte_len() <= budget;
        if candidate.byte_len() < best.byte_len() {
            best = candidate;
        }
        if met {
            return Ok(best);
        }
        quality -= QUALITY_STEP;
    }

    // Resolution pass.
    let mut scale = 1.0;
    for _ in 0..MAX_SCALE_STEPS {
        scale *= SCALE_FACTOR;
        if scale <= SCALE_FLOOR {
            break;
        }
        let scaled_w = ((f64::from(width) * scale) as u32).max(1);
        let scaled_h = ((f64::from(height) * scale) as u32).max(1);
        let resized = image::imageops::resize(&decoded, scaled_w, scaled_h, FilterType::Lanczos3);
        let candidate = encode_jpeg(&resized, scaled_w, scaled_h, RESIZE_QUALITY)?;
        tracing::debug!(
            scale,
            scaled_w,
            scaled_h,
            len = candidate.byte_len(),
            "resolution pass re-encode"
        );
        let met = candidate.byte_len() <= budget;
        if candidate.byte_len() < best.byte_len() {
            best = candidate;
        }
        if met {
            return Ok(best);
        }
    }

    tracing::debug!(
        budget,
        len = best.byte_len(),
        "budget not met, returning smallest artifact"
    );
    Ok(best)
}

fn encode_jpeg(
    pixels: &RgbImage,
    width: u32,
    height: u32,
    quality: u8,
) -> CoverResult<RasterArtifact> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    pixels
        .write_with_encoder(encoder)
        .map_err(|e| CoverError::encode(format!("jpeg encode at quality {quality}: {e}")))?;
    Ok(RasterArtifact {
        bytes,
        width,
        height,
        format: ArtifactFormat::Jpeg,
    })
}
