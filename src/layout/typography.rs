//! Font sizes are picked from four discrete tiers by title length, expressed
//! as ratios of the canvas size. At the 600px reference canvas the tiers are
//! 96/84/72/60 px, calibrated so text stays inside 80% of the canvas width.

/// Font tiers by title character count: inclusive upper bound, font pixels
/// per 100 canvas pixels. Kept as a rational so the 600px reference canvas
/// yields the exact 96/84/72/60 px sizes.
const TITLE_TIERS: [(usize, f64); 3] = [(10, 16.0), (15, 14.0), (20, 12.0)];
/// Tier for titles longer than every bracket above.
const TITLE_TIER_FLOOR: f64 = 10.0;
/// Subtitle font size as a fraction of the title font size.
const SUBTITLE_RATIO: f64 = 0.45;
/// Line height as a fraction of the title font size.
const LINE_HEIGHT_RATIO: f64 = 1.1;
/// Word-wrap threshold. Independent of the font tier.
pub(crate) const MAX_CHARS_PER_LINE: usize = 20;

/// Subtitle placement within a [`LayoutPlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitlePlan {
    /// Subtitle font size in pixels (45% of the title font size).
    pub font_size: f64,
    /// Subtitle baseline y offset.
    pub offset_y: f64,
}

/// Computed typography for one cover: font sizes, wrapped lines, and
/// vertical offsets. Derived and read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Title font size in pixels.
    pub title_font_size: f64,
    /// Line height in pixels (110% of the title font size).
    pub line_height: f64,
    /// Wrapped title lines, in order.
    pub lines: Vec<String>,
    /// Per-line y offsets (middle baseline), same order as `lines`.
    pub line_offsets: Vec<f64>,
    /// Subtitle placement, absent when the request has no subtitle.
    pub subtitle: Option<SubtitlePlan>,
}

impl LayoutPlan {
    /// Compute the layout for a title and optional subtitle on a square
    /// canvas.
    ///
    /// Without a subtitle the title block is vertically centered; with one,
    /// the block shifts up by half the subtitle font size and the subtitle
    /// sits below it at 1.2x its own font size.
    pub fn compute(title: &str, subtitle: Option<&str>, canvas_size: u32) -> Self {
        let canvas = f64::from(canvas_size);
        let title_font_size = canvas * tier_per_100(title.chars().count()) / 100.0;
        let subtitle_font_size = title_font_size * SUBTITLE_RATIO;

        let lines = wrap_title(title, MAX_CHARS_PER_LINE);
        let line_height = title_font_size * LINE_HEIGHT_RATIO;
        let block_height = line_height * lines.len() as f64;
        let center = canvas / 2.0;

        let has_subtitle = subtitle.is_some_and(|s| !s.trim().is_empty());
        let block_top = if has_subtitle {
            center - block_height / 2.0 - subtitle_font_size * 0.5
        } else {
            center - block_height / 2.0
        };

        let line_offsets = (0..lines.len())
            .map(|i| block_top + i as f64 * line_height)
            .collect();

        let subtitle = has_subtitle.then(|| SubtitlePlan {
            font_size: subtitle_font_size,
            offset_y: block_top + block_height + subtitle_font_size * 1.2,
        });

        Self {
            title_font_size,
            line_height,
            lines,
            line_offsets,
            subtitle,
        }
    }
}

fn tier_per_100(title_chars: usize) -> f64 {
    for (bound, per_100) in TITLE_TIERS {
        if title_chars <= bound {
            return per_100;
        }
    }
    TITLE_TIER_FLOOR
}

/// Greedily pack whitespace-delimited words into lines of at most
/// `max_chars` characters.
///
/// A single word longer than the threshold gets its own line and is never
/// split. A title already at or under the threshold stays one line.
pub fn wrap_title(title: &str, max_chars: usize) -> Vec<String> {
    if title.chars().count() <= max_chars {
        return vec![title.to_string()];
    }

    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in title.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(!current.is_empty());
        if current_len + word_len + sep <= max_chars {
            current.push(word);
            current_len += word_len + usize::from(current.len() > 1);
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}
