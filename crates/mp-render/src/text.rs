//! Approximate text metrics.
//!
//! Output SVG names the generic sans family, so exact glyph advances are not
//! available at layout time. Margins and legend sizing only need a close
//! estimate; the per-class advance table below tracks Helvetica metrics to
//! within a few percent for the labels this tool draws.

use crate::primitives::{FontWeight, TextStyle};

/// Measured extent of a text run, in the same units as the font size.
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Advance width of one character as a fraction of the font size.
fn advance(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '|' => 0.23,
        'f' | 't' | 'r' | 'I' | '.' | ',' | ':' | ';' | '!' | '(' | ')' | '[' | ']' | '/' => 0.32,
        ' ' | '-' => 0.30,
        'm' | 'w' | 'M' | 'W' | '@' => 0.86,
        'A'..='Z' | '√' => 0.68,
        '0'..='9' | '+' | '=' | '_' | '^' => 0.56,
        '\u{03B1}'..='\u{03C9}' => 0.55, // greek lowercase
        '\u{2192}' => 0.90,              // arrow
        _ => 0.52,
    }
}

/// Estimate the extent of `text` at `size` points.
pub fn measure_text(text: &str, size: f64, weight: FontWeight) -> TextMetrics {
    let bold_factor = match weight {
        FontWeight::Bold => 1.06,
        FontWeight::Regular => 1.0,
    };
    let width: f64 = text.chars().map(advance).sum::<f64>() * size * bold_factor;
    // Helvetica-like vertical metrics.
    TextMetrics { width, height: size * 1.16, ascent: size * 0.90 }
}

/// Measure with a [`TextStyle`].
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size, style.weight)
}
