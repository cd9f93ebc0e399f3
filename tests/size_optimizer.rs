use std::io::Cursor;

use playcover::{ArtifactFormat, RasterArtifact, optimize_to_budget};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic RGB noise: incompressible for PNG, expensive for JPEG, so
/// the initial encoding is reliably oversized.
fn noise_artifact(size: u32) -> RasterArtifact {
    let img = image::RgbImage::from_fn(size, size, |x, y| {
        let h = mix64((u64::from(x) << 32) | u64::from(y));
        image::Rgb([h as u8, (h >> 8) as u8, (h >> 16) as u8])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    RasterArtifact {
        bytes,
        width: size,
        height: size,
        format: ArtifactFormat::Png,
    }
}

fn flat_artifact(size: u32) -> RasterArtifact {
    let img = image::RgbImage::from_pixel(size, size, image::Rgb([40, 90, 200]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    RasterArtifact {
        bytes,
        width: size,
        height: size,
        format: ArtifactFormat::Png,
    }
}

#[test]
fn artifact_within_budget_is_returned_unchanged() {
    let artifact = flat_artifact(256);
    assert!(artifact.byte_len() <= 256 * 1024);
    let before = artifact.bytes.clone();

    let out = optimize_to_budget(artifact, 256).unwrap();
    assert_eq!(out.bytes, before);
    assert_eq!(out.format, ArtifactFormat::Png);
    assert_eq!((out.width, out.height), (256, 256));
}

#[test]
fn oversized_artifact_is_driven_under_a_reachable_budget() {
    let artifact = noise_artifact(128);
    // Raw noise: the PNG encoding is far above this budget.
    let budget_kb = 24;
    assert!(artifact.byte_len() > budget_kb * 1024);

    let out = optimize_to_budget(artifact, budget_kb as u32).unwrap();
    assert!(out.byte_len() <= budget_kb * 1024);
    assert_eq!(out.format, ArtifactFormat::Jpeg);
}

#[test]
fn exhausted_search_still_returns_no_larger_than_input() {
    let artifact = noise_artifact(128);
    let original_len = artifact.byte_len();

    // 1 KB is unreachable for 128x128 noise; the optimizer must terminate
    // and hand back the smallest encoding it found.
    let out = optimize_to_budget(artifact, 1).unwrap();
    assert!(out.byte_len() <= original_len);
    // The resolution pass never scales below half the original edge.
    assert!(out.width >= 64 && out.height >= 64);
}

#[test]
fn optimization_is_idempotent_once_within_budget() {
    let artifact = noise_artifact(128);
    let once = optimize_to_budget(artifact, 24).unwrap();
    let first = once.bytes.clone();
    let twice = optimize_to_budget(once, 24).unwrap();
    assert_eq!(twice.bytes, first);
}

#[test]
fn decoded_output_keeps_plausible_dimensions() {
    let artifact = noise_artifact(128);
    let out = optimize_to_budget(artifact, 1).unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (out.width, out.height));
}
