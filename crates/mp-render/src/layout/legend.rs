//! In-plot legend with an optional title row.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// One legend row.
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Draw a marker legend in the top-right corner of the plot area.
///
/// `title` is the sample display title, drawn left-aligned above the
/// entries, matching the legend-heading style of the original figures.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    title: &str,
    entries: &[LegendEntry],
    font_size: f64,
) {
    if entries.is_empty() {
        return;
    }

    let row_height = font_size + 4.0;
    let swatch = 10.0;
    let gap = 6.0;
    let padding = 6.0;

    let text_style =
        TextStyle { size: font_size * 0.85, baseline: TextBaseline::Central, ..Default::default() };
    let title_style = TextStyle { size: font_size * 0.9, ..text_style.clone() };

    let max_label_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);
    let title_w = if title.is_empty() { 0.0 } else { canvas.measure_text(title, &title_style).width };

    let legend_w = (padding + swatch + gap + max_label_w + padding).max(padding + title_w + padding);
    let n_rows = entries.len() + usize::from(!title.is_empty());
    let legend_h = padding + n_rows as f64 * row_height + padding;

    let lx = area.right() - legend_w - 5.0;
    let mut row_y = area.top + 5.0 + padding + row_height / 2.0;

    // Translucent backing so the entries stay readable over data points.
    canvas.rect(
        lx,
        area.top + 5.0,
        legend_w,
        legend_h,
        &Style { fill: Some(Color::rgb(255, 255, 255).with_alpha(0.85)), ..Default::default() },
    );

    if !title.is_empty() {
        canvas.text(lx + padding, row_y, title, &title_style);
        row_y += row_height;
    }

    for entry in entries {
        canvas.marker(
            lx + padding + swatch / 2.0,
            row_y,
            &MarkerStyle { color: entry.color, size: 3.0, fill: true },
        );
        canvas.text(lx + padding + swatch + gap, row_y, &entry.label, &text_style);
        row_y += row_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_draws_title_and_rows() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea { left: 40.0, top: 30.0, width: 340.0, height: 240.0 };
        draw_legend(
            &mut canvas,
            &area,
            "tttt",
            &[
                LegendEntry { label: "PF".into(), color: Color::hex("#5790fc") },
                LegendEntry { label: "PUPPI".into(), color: Color::hex("#f89c20") },
            ],
            10.0,
        );
        let svg = canvas.finish_svg();
        assert!(svg.contains("tttt"));
        assert!(svg.contains("PUPPI"));
        assert!(svg.contains("#5790fc"));
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea { left: 40.0, top: 30.0, width: 340.0, height: 240.0 };
        draw_legend(&mut canvas, &area, "tttt", &[], 10.0);
        assert!(!canvas.finish_svg().contains("tttt"));
    }
}
