use playcover::{
    ArtifactFormat, CoverError, CoverRequest, Generator, InMemoryUploader, RasterArtifact,
    Uploader,
};

fn summer_request() -> CoverRequest {
    let mut req = CoverRequest::new("Summer Vibes");
    req.subtitle = Some("Feel Good Hits".to_string());
    req.theme = Some("summer".to_string());
    req
}

#[test]
fn generates_a_png_within_the_default_budget() {
    let generator = Generator::with_builtin_palette();
    let artifact = generator.generate(&summer_request()).unwrap();

    assert_eq!((artifact.width, artifact.height), (600, 600));
    assert!(artifact.byte_len() <= 256 * 1024);
    assert_eq!(artifact.format, ArtifactFormat::Png);
    assert!(artifact.bytes.starts_with(&[0x89, b'P', b'N', b'G']));

    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (600, 600));
}

#[test]
fn generation_is_deterministic() {
    let generator = Generator::with_builtin_palette();
    let a = generator.generate(&summer_request()).unwrap();
    let b = generator.generate(&summer_request()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn custom_canvas_size_is_honored() {
    let generator = Generator::with_builtin_palette();
    let mut req = summer_request();
    req.canvas_size = 320;
    let artifact = generator.generate(&req).unwrap();
    assert_eq!((artifact.width, artifact.height), (320, 320));
}

#[test]
fn empty_title_fails_before_rendering() {
    let generator = Generator::with_builtin_palette();
    let mut req = summer_request();
    req.title = "  ".to_string();
    assert!(matches!(
        generator.generate(&req),
        Err(CoverError::Configuration(_))
    ));
}

#[test]
fn request_without_any_color_path_fails() {
    let generator = Generator::with_builtin_palette();
    let req = CoverRequest::new("No Colors Here");
    assert!(matches!(
        generator.generate(&req),
        Err(CoverError::Configuration(_))
    ));
}

#[test]
fn generate_to_path_writes_the_artifact() {
    let generator = Generator::with_builtin_palette();
    let out = std::env::temp_dir().join("playcover-smoke-test.png");
    let _ = std::fs::remove_file(&out);

    let path = generator
        .generate_to_path(&summer_request(), Some(&out))
        .unwrap();
    assert_eq!(path, out);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn create_and_upload_hands_the_exact_bytes_to_the_uploader() {
    let generator = Generator::with_builtin_palette();
    let mut uploader = InMemoryUploader::new();
    let artifact = generator
        .create_and_upload(&summer_request(), "37i9dQZF1DXcBWIGoYBM5M", &mut uploader)
        .unwrap();

    let uploads = uploader.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(uploads[0].1, artifact.bytes);
}

/// Uploader double that always reports a missing-scope 401.
struct MissingScopeUploader;

impl Uploader for MissingScopeUploader {
    fn upload(&mut self, _playlist_id: &str, _artifact: &RasterArtifact) -> playcover::CoverResult<()> {
        Err(CoverError::UploadAuthorization(
            "playlist image upload rejected with 401: the access token is missing the \
             'ugc-image-upload' scope"
                .to_string(),
        ))
    }
}

#[test]
fn authorization_failure_preserves_the_artifact_locally() {
    let generator = Generator::with_builtin_palette();
    let err = generator
        .create_and_upload(&summer_request(), "37i9dQZF1DXcBWIGoYBM5M", &mut MissingScopeUploader)
        .unwrap_err();

    let CoverError::UploadAuthorization(msg) = err else {
        panic!("expected an authorization error, got {err}");
    };
    assert!(msg.contains("ugc-image-upload"));
    assert!(msg.contains("kept at"), "message should name the preserved file: {msg}");

    // The preserved file is real; clean it up.
    let path = msg.rsplit('\'').nth(1).expect("path quoted in message");
    let bytes = std::fs::read(path).unwrap();
    assert!(!bytes.is_empty());
    std::fs::remove_file(path).unwrap();
}
