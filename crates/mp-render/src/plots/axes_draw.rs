//! Box frame with ticks, grid, and axis labels.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the frame, major/minor ticks on all four sides, optional grid, and
/// the axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let frame_color = Color::rgb(0, 0, 0);
    let frame = LineStyle::solid(frame_color, 0.8);
    let tick = LineStyle::solid(frame_color, 0.6);
    let minor = LineStyle::solid(frame_color, 0.4);

    let inward = config.axes.tick_direction == "in";
    let tl = config.axes.tick_length;
    let mtl = config.axes.minor_tick_length;

    canvas.line(area.left, area.top, area.right(), area.top, &frame);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &frame);
    canvas.line(area.left, area.top, area.left, area.bottom(), &frame);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &frame);

    let grid_style = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    // X ticks.
    let x_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }
        let dy = if inward { -tl } else { tl };
        canvas.line(px, area.bottom(), px, area.bottom() + dy, &tick);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top - dy, &tick);
        }
        if let Some(label) = x_axis.tick_labels.get(i) {
            let label_y = if inward { area.bottom() + 3.0 } else { area.bottom() + tl + 3.0 };
            canvas.text(px, label_y, label, &x_label_style);
        }
    }
    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        let dy = if inward { -mtl } else { mtl };
        canvas.line(px, area.bottom(), px, area.bottom() + dy, &minor);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top - dy, &minor);
        }
    }

    // Y ticks.
    let y_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }
        let dx = if inward { tl } else { -tl };
        canvas.line(area.left, py, area.left + dx, py, &tick);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - dx, py, &tick);
        }
        if let Some(label) = y_axis.tick_labels.get(i) {
            let label_x = if inward { area.left - 4.0 } else { area.left - tl - 4.0 };
            canvas.text(label_x, py, label, &y_label_style);
        }
    }
    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        let dx = if inward { mtl } else { -mtl };
        canvas.line(area.left, py, area.left + dx, py, &minor);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - dx, py, &minor);
        }
    }

    // Axis labels.
    let label_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    if !x_axis.label.is_empty() {
        let label_y = if inward {
            area.bottom() + config.font.tick_size + 14.0
        } else {
            area.bottom() + tl + config.font.tick_size + 14.0
        };
        canvas.text(area.left + area.width / 2.0, label_y, &x_axis.label, &label_style);
    }
    if !y_axis.label.is_empty() {
        let label_x = area.left - 40.0;
        let label_y = area.top + area.height / 2.0;
        canvas.text_rotated(label_x, label_y, &y_axis.label, &label_style, -90.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_ticks_and_labels_appear() {
        let mut canvas = Canvas::new(460.0, 345.0);
        let x = Axis::auto_linear(0.0, 1000.0, 6).with_label("H_T (generator jets) [GeV]");
        let y = Axis::auto_linear(0.0, 40.0, 5).with_label("p_T^miss resolution [GeV]");
        let area = PlotArea::auto(&canvas, &x, &y, &VizConfig::default());
        draw_axes(&mut canvas, &area, &x, &y, &VizConfig::default());
        let svg = canvas.finish_svg();
        assert!(svg.contains("H_T (generator jets) [GeV]"));
        assert!(svg.contains("p_T^miss resolution [GeV]"));
        assert!(svg.contains("rotate(-90.0"));
        assert!(svg.matches("<line").count() > 20);
    }
}
