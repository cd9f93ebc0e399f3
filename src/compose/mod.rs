//! SVG document assembly from a resolved color scheme and a layout plan.

/// Document composition and XML text escaping.
pub mod svg;
