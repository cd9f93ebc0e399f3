//! Playcover generates square playlist cover art deterministically.
//!
//! Given a title, an optional subtitle, and a color specification (an
//! artist/genre/theme key or an explicit gradient triple), the pipeline
//! resolves a [`ColorScheme`], computes a typography [`LayoutPlan`],
//! composes an SVG document, rasterizes it, and drives the encoded byte
//! size under an upload budget:
//!
//! - Build a [`CoverRequest`] and a [`Generator`]
//! - [`Generator::generate`] yields a budget-compliant [`RasterArtifact`]
//! - Hand the artifact to an [`Uploader`] implementation
//!
//! The engine is synchronous and performs no network I/O of its own; the
//! uploader is an injected capability.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// SVG document assembly.
pub mod compose;
/// Size-budget driven re-encoding.
pub mod encode;
/// Typography layout: font tiers, word wrap, vertical placement.
pub mod layout;
/// Color schemes, preset tables, and resolution precedence.
pub mod palette;
/// Vector-to-raster export.
pub mod render;
/// Request boundary object and the generation facade.
pub mod session;
/// Uploader capability and implementations.
pub mod upload;

pub use crate::foundation::error::{CoverError, CoverResult};

pub use crate::compose::svg::{compose_svg, escape_xml};
pub use crate::encode::optimize::{DEFAULT_BUDGET_KB, optimize_to_budget};
pub use crate::layout::typography::{LayoutPlan, SubtitlePlan, wrap_title};
pub use crate::palette::resolver::{ColorSpec, normalize_artist_key, resolve};
pub use crate::palette::scheme::ColorScheme;
pub use crate::palette::tables::Palette;
pub use crate::render::raster::{ArtifactFormat, RasterArtifact, export_svg};
pub use crate::session::generator::{CoverRequest, DEFAULT_CANVAS_SIZE, Generator};
pub use crate::upload::uploader::{InMemoryUploader, SpotifyUploader, Uploader};
