//! Standard-font text handling: glyph widths, fitting and string encoding.
//!
//! Only the two built-in Type 1 fonts are used, so widths come from the
//! Helvetica and Helvetica-Bold font metrics (units of 1/1000 em) instead of
//! embedded font files.

use std::borrow::Cow;

/// Built-in font a text run is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Helvetica-Bold (`/F1`)
    Bold,
    /// Helvetica (`/F2`)
    Regular,
}

impl Font {
    /// Resource name inside page content streams.
    pub fn resource(self) -> &'static str {
        match self {
            Font::Bold => "F1",
            Font::Regular => "F2",
        }
    }

    /// PostScript base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Bold => "Helvetica-Bold",
            Font::Regular => "Helvetica",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
            Font::Regular => &HELVETICA_WIDTHS,
        }
    }
}

// Advance widths for ' ' (0x20) through '~' (0x7e).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

/// Ellipsis appended to truncated cell text.
pub const ELLIPSIS: &str = "...";

fn glyph_width(font: Font, c: char) -> u16 {
    match c {
        ' '..='~' => font.widths()[c as usize - 0x20],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(font, c))).sum();
    f64::from(units) * size / 1000.0
}

/// Returns `text` unchanged if it fits `max_width`, otherwise the longest
/// prefix that fits once [`ELLIPSIS`] is appended.
pub fn fit_text(text: &str, font: Font, size: f64, max_width: f64) -> Cow<'_, str> {
    if text_width(text, font, size) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - text_width(ELLIPSIS, font, size);
    let mut used = 0.0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let w = f64::from(glyph_width(font, c)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        end = i + c.len_utf8();
    }
    Cow::Owned(format!("{}{}", text[..end].trim_end(), ELLIPSIS))
}

/// Encodes `text` as the body of a PDF literal string in WinAnsiEncoding.
///
/// Delimiters and backslashes are escaped, Latin-1 letters become octal
/// escapes, control characters become spaces and anything the encoding
/// cannot represent becomes `?`.
pub fn pdf_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            c if c.is_control() => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_uses_font_metrics() {
        // Four digits at 1000 units each would be 4.0; Helvetica digits are 556.
        assert!((text_width("1234", Font::Regular, 1.0) - 2.224).abs() < 1e-9);
        assert!(text_width("Name", Font::Bold, 10.0) > text_width("Name", Font::Regular, 10.0));
        assert_eq!(text_width("", Font::Regular, 10.0), 0.0);
    }

    #[test]
    fn test_fit_text_keeps_short_text() {
        assert!(matches!(
            fit_text("Sales", Font::Regular, 10.0, 90.0),
            Cow::Borrowed("Sales")
        ));
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        let long = "christopher.alexander.montgomery@company.com";
        let fitted = fit_text(long, Font::Regular, 10.0, 140.0);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(fitted.len() < long.len());
        assert!(text_width(&fitted, Font::Regular, 10.0) <= 140.0);
        assert!(long.starts_with(fitted.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_fit_text_handles_multibyte_characters() {
        let fitted = fit_text("Zoë Ångström-Øvergård Müller", Font::Regular, 10.0, 60.0);
        assert!(fitted.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_pdf_escape() {
        assert_eq!(pdf_escape("hello"), "hello");
        assert_eq!(pdf_escape("(test)"), "\\(test\\)");
        assert_eq!(pdf_escape("a\\b"), "a\\\\b");
        assert_eq!(pdf_escape("Zoë"), "Zo\\353");
        assert_eq!(pdf_escape("tab\there"), "tab here");
        assert_eq!(pdf_escape("日本"), "??");
    }
}
