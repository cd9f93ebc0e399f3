use crate::foundation::error::{CoverError, CoverResult};
use crate::layout::typography::LayoutPlan;
use crate::palette::scheme::ColorScheme;
use std::fmt::Write as _;

const TITLE_FONT_FAMILY: &str = "Arial Black, Arial Bold, Arial, sans-serif";
const SUBTITLE_FONT_FAMILY: &str = "Arial, sans-serif";

/// Escape the five XML-reserved characters for embedding in a text node or
/// attribute. Ampersand first, so entities are not double-escaped.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Assemble the cover SVG: radial-gradient background, two decorative
/// translucent circles kept clear of the text-safe zone, one bold centered
/// text element per wrapped title line, and an optional subtitle element.
///
/// All user-supplied text is escaped before embedding.
pub fn compose_svg(
    plan: &LayoutPlan,
    subtitle: Option<&str>,
    scheme: &ColorScheme,
    canvas_size: u32,
) -> CoverResult<String> {
    let fmt_err = |e| CoverError::render(format!("svg formatting error: {e}"));
    let size = f64::from(canvas_size);
    let center = size / 2.0;

    let mut svg = String::new();
    write!(
        svg,
        r#"<svg width="{canvas_size}" height="{canvas_size}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <radialGradient id="grad" cx="50%" cy="50%" r="50%">
      <stop offset="0%" stop-color="{start}" stop-opacity="1"/>
      <stop offset="100%" stop-color="{end}" stop-opacity="1"/>
    </radialGradient>
  </defs>
  <rect width="{canvas_size}" height="{canvas_size}" fill="url(#grad)"/>
  <circle cx="{c1x}" cy="{c1y}" r="{c1r}" fill="{text}" opacity="0.08"/>
  <circle cx="{c2x}" cy="{c2y}" r="{c2r}" fill="{text}" opacity="0.12"/>
"#,
        start = scheme.gradient_start,
        end = scheme.gradient_end,
        text = scheme.text_color,
        c1x = size * 0.85,
        c1y = size * 0.15,
        c1r = size * 0.12,
        c2x = size * 0.15,
        c2y = size * 0.85,
        c2r = size * 0.08,
    )
    .map_err(fmt_err)?;

    for (line, offset_y) in plan.lines.iter().zip(&plan.line_offsets) {
        write!(
            svg,
            r#"  <text x="{center}" y="{offset_y}" font-family="{TITLE_FONT_FAMILY}" font-size="{font_size}" font-weight="900" fill="{fill}" text-anchor="middle" dominant-baseline="middle">{content}</text>
"#,
            font_size = plan.title_font_size,
            fill = scheme.text_color,
            content = escape_xml(line),
        )
        .map_err(fmt_err)?;
    }

    if let (Some(sub_plan), Some(sub_text)) = (&plan.subtitle, subtitle) {
        write!(
            svg,
            r#"  <text x="{center}" y="{offset_y}" font-family="{SUBTITLE_FONT_FAMILY}" font-size="{font_size}" font-weight="600" fill="{fill}" text-anchor="middle" opacity="0.95">{content}</text>
"#,
            offset_y = sub_plan.offset_y,
            font_size = sub_plan.font_size,
            fill = scheme.text_color,
            content = escape_xml(sub_text),
        )
        .map_err(fmt_err)?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}
