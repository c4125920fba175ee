//! Plot-area computation from axis labels and config.

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Compute margins that fit the tick labels, axis labels, and header.
    pub fn auto(canvas: &Canvas, x_axis: &Axis, y_axis: &Axis, config: &VizConfig) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
        let label_style = TextStyle { size: config.font.label_size, ..Default::default() };

        let mut left = 15.0;
        let max_tick_w = y_axis
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &tick_style).width)
            .fold(0.0_f64, f64::max);
        left += max_tick_w + 8.0;
        if !y_axis.label.is_empty() {
            left += label_style.size + 6.0;
        }

        let mut bottom = 15.0;
        bottom += tick_style.size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += label_style.size + 6.0;
        }

        let top = if config.experiment.name.is_empty() {
            12.0
        } else {
            config.font.label_size * 1.3 + 20.0
        };
        let right = 15.0;

        let width = canvas.width - left - right;
        let height = canvas.height - top - bottom;
        Self { left, top, width: width.max(50.0), height: height.max(50.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_fit_inside_canvas() {
        let canvas = Canvas::new(460.0, 345.0);
        let x = Axis::auto_linear(0.0, 1000.0, 6).with_label("H_T [GeV]");
        let y = Axis::auto_linear(0.0, 50.0, 5).with_label("resolution");
        let area = PlotArea::auto(&canvas, &x, &y, &VizConfig::default());
        assert!(area.left > 0.0 && area.top > 0.0);
        assert!(area.right() < canvas.width);
        assert!(area.bottom() < canvas.height);
    }
}
