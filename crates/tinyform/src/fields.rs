use thiserror::Error;
use tracing::{event, Level};

/// Maximum number of options a single dropdown will render.
pub const MAX_FIELD_OPTIONS: usize = 20;

/// A dropdown declared more options than the renderer accepts.
///
/// The field is still rendered, with the first [`MAX_FIELD_OPTIONS`] options.
#[derive(Error, Debug)]
#[error("dropdown options truncated to {MAX_FIELD_OPTIONS}, {dropped} dropped")]
pub struct OptionsTruncated {
    /// How many options were cut off.
    pub dropped: usize,
}

/// Split a comma-delimited options string into trimmed option texts.
///
/// An empty chunk ends the list. Anything beyond the maximum is dropped and
/// reported back instead of silently overflowing.
pub(crate) fn parse_options(options: &str) -> (Vec<String>, Option<OptionsTruncated>) {
    let mut parsed = Vec::new();
    let mut dropped = 0;

    for chunk in options.split(',') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            break;
        }

        if parsed.len() == MAX_FIELD_OPTIONS {
            dropped += 1;
            continue;
        }
        parsed.push(chunk.to_string());
    }

    let truncated = if dropped > 0 {
        let truncated = OptionsTruncated { dropped };
        event!(Level::WARN, %truncated, "dropdown overflow");
        Some(truncated)
    } else {
        None
    };

    (parsed, truncated)
}

/// Format an integer color as a `#`-prefixed, uppercase hex string.
///
/// Padding is decided by magnitude thresholds at each hex digit boundary,
/// not by the length of the converted string, so stored defaults as small as
/// `0x1` still come out as six digits (`#000001`).
pub(crate) fn format_color(color: u32) -> String {
    let mut hex = String::from("#");
    if color < 0x100000 {
        hex.push('0');
    }
    if color < 0x10000 {
        hex.push('0');
    }
    if color < 0x1000 {
        hex.push('0');
    }
    if color < 0x100 {
        hex.push('0');
    }
    if color < 0x10 {
        hex.push('0');
    }
    hex.push_str(&format!("{color:X}"));
    hex
}
