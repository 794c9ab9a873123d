//! Text Measurement
//!
//! Layout never measures text itself. Text leaves ask a [`TextMeasure`]
//! collaborator for the bounds of their content, given the effective font
//! face and size.
//!
//! [`CellMeasure`] is the default: it sizes text in terminal cells, one row
//! per line. Widths follow Unicode East Asian Width over grapheme clusters,
//! so fullwidth characters and emoji sequences take two cells and combining
//! marks take none. Font face and size are ignored.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Bounds of a rendered string relative to its drawing origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Horizontal offset from the origin to the ink box.
    pub x: f64,
    /// Vertical offset from the origin (baseline) to the ink box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Font metrics provider consulted by the layout pass.
///
/// Implementations must be synchronous and free of side effects that the
/// layout could observe; measuring the same input twice yields the same bounds.
pub trait TextMeasure {
    fn text_bounds(&self, face: &str, size: f64, text: &str) -> TextBounds;
}

/// Terminal-cell metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn text_bounds(&self, _face: &str, _size: f64, text: &str) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let width = text.split('\n').map(string_width).max().unwrap_or(0);
        let height = text.split('\n').count();
        TextBounds {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }
}

/// Cells one character occupies.
///
/// Follows Unicode East Asian Width, except that emoji presentation blocks
/// are forced to two cells the way terminals render them.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if (0x2600..=0x27BF).contains(&cp)       // Misc Symbols, Dingbats
        || (0x1F300..=0x1F5FF).contains(&cp) // Misc Symbols and Pictographs
        || (0x1F600..=0x1F64F).contains(&cp) // Emoticons
        || (0x1F680..=0x1F6FF).contains(&cp) // Transport and Map
        || (0x1F900..=0x1F9FF).contains(&cp) // Supplemental Symbols
        || (0x1FA70..=0x1FAFF).contains(&cp)
    {
        return 2;
    }
    c.width().unwrap_or(0)
}

/// Cells one grapheme cluster occupies.
///
/// Emoji sequences (ZWJ families, flags, skin tones, keycaps, VS16) render
/// as one double-width glyph. Combining marks add nothing to their base.
pub fn grapheme_width(g: &str) -> usize {
    let mut chars = g.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if chars.as_str().is_empty() {
        return char_width(first);
    }
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }
    let emoji_sequence = chars.any(|c| {
        let cp = c as u32;
        cp == 0x200D || cp == 0xFE0F || cp == 0x20E3 || (0x1F3FB..=0x1F3FF).contains(&cp)
    });
    if emoji_sequence {
        2
    } else {
        char_width(first)
    }
}

/// Display width of a single line in terminal cells.
pub fn string_width(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }
    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..0x7F).contains(b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}
