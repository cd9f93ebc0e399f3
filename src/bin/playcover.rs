use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use playcover::{CoverRequest, Generator, Palette, RasterArtifact, SpotifyUploader, Uploader as _};

#[derive(Parser, Debug)]
#[command(name = "playcover", version)]
struct Cli {
    /// Palette JSON overriding the built-in preset tables.
    #[arg(long, global = true)]
    palette: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a cover image and write it to disk.
    Generate(GenerateArgs),
    /// Upload a cover to a playlist, generating it first unless --image is given.
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Cover title.
    #[arg(long)]
    title: Option<String>,

    /// Subtitle rendered below the title.
    #[arg(long)]
    subtitle: Option<String>,

    /// Artist/band name for the artist-mood table.
    #[arg(long)]
    artist: Option<String>,

    /// Preset theme key (e.g. summer, chill, dark).
    #[arg(long)]
    theme: Option<String>,

    /// Preset genre key (e.g. rock, jazz, pop).
    #[arg(long)]
    genre: Option<String>,

    /// Custom gradient center color (#RRGGBB; requires the other two).
    #[arg(long)]
    gradient_start: Option<String>,

    /// Custom gradient edge color.
    #[arg(long)]
    gradient_end: Option<String>,

    /// Custom text color.
    #[arg(long)]
    text_color: Option<String>,

    /// Square canvas size in pixels.
    #[arg(long, default_value_t = playcover::DEFAULT_CANVAS_SIZE)]
    size: u32,

    /// Upload byte budget in KB.
    #[arg(long, default_value_t = playcover::DEFAULT_BUDGET_KB)]
    budget_kb: u32,
}

impl RequestArgs {
    fn into_request(self) -> anyhow::Result<CoverRequest> {
        let title = self.title.context("--title is required")?;
        let mut request = CoverRequest::new(title);
        request.subtitle = self.subtitle;
        request.artist = self.artist;
        request.theme = self.theme;
        request.genre = self.genre;
        request.gradient_start = self.gradient_start;
        request.gradient_end = self.gradient_end;
        request.text_color = self.text_color;
        request.canvas_size = self.size;
        request.budget_kb = self.budget_kb;
        Ok(request)
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// Playlist identifier.
    #[arg(long)]
    playlist: String,

    /// Pre-rendered PNG/JPEG to upload instead of generating one.
    #[arg(long, conflicts_with = "title")]
    image: Option<PathBuf>,

    #[command(flatten)]
    request: RequestArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let generator = match &cli.palette {
        Some(path) => Generator::new(Palette::from_path(path)?),
        None => Generator::with_builtin_palette(),
    };

    match cli.cmd {
        Command::Generate(args) => cmd_generate(&generator, args),
        Command::Upload(args) => cmd_upload(&generator, args),
    }
}

fn cmd_generate(generator: &Generator, args: GenerateArgs) -> anyhow::Result<()> {
    let request = args.request.into_request()?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let path = generator.generate_to_path(&request, Some(&args.out))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_upload(generator: &Generator, args: UploadArgs) -> anyhow::Result<()> {
    let token = std::env::var("SPOTIFY_ACCESS_TOKEN")
        .context("SPOTIFY_ACCESS_TOKEN must be set for uploads")?;
    let mut uploader = SpotifyUploader::new(token);

    if let Some(image) = &args.image {
        let bytes =
            std::fs::read(image).with_context(|| format!("read image '{}'", image.display()))?;
        let artifact = RasterArtifact::from_encoded_bytes(bytes)?;
        uploader.upload(&args.playlist, &artifact)?;
    } else {
        let request = args.request.into_request()?;
        generator.create_and_upload(&request, &args.playlist, &mut uploader)?;
    }

    eprintln!("uploaded cover to playlist {}", args.playlist);
    Ok(())
}
