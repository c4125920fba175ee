//! The MET resolution comparison plot: one error-bar series per algorithm.

use mp_resolution::ResolutionArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{LegendEntry, draw_legend};
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

const Y_LABEL: &str = "p_T^miss resolution [GeV]";

pub fn render(artifact: &ResolutionArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.series.is_empty() {
        return Ok(empty_svg());
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let (x_lo, x_hi) = artifact.x_range();
    let x_axis = Axis::auto_linear(x_lo, x_hi, 6).with_label(&artifact.x_label);

    // Headroom above the tallest point keeps the legend clear of the data.
    let y_max = (artifact.max_value() * 1.35).max(1.0);
    let y_axis = Axis::auto_linear(0.0, y_max, 5).with_label(Y_LABEL);

    let area = PlotArea::auto(&canvas, &x_axis, &y_axis, config);
    draw_experiment_header(&mut canvas, &area, artifact.year, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let palette = config.palette_colors();

    canvas.push_clip(area.left, area.top, area.width, area.height);
    for (i, series) in artifact.series.iter().enumerate() {
        let color = palette[i % palette.len()];
        let bar = LineStyle::solid(color, 1.2);
        for ((&center, &half_width), &value) in
            series.centers.iter().zip(&series.half_widths).zip(&series.values)
        {
            let px = x_axis.data_to_pixel(center, area.left, area.right());
            let px_lo = x_axis.data_to_pixel(center - half_width, area.left, area.right());
            let px_hi = x_axis.data_to_pixel(center + half_width, area.left, area.right());
            let py = y_axis.data_to_pixel(value, area.bottom(), area.top);

            canvas.error_bar_h(px_lo, px_hi, py, 0.0, &bar);
            canvas.marker(px, py, &MarkerStyle { color, size: 2.6, fill: true });
        }
    }
    canvas.pop_clip();

    let entries: Vec<LegendEntry> = artifact
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry { label: s.label.clone(), color: palette[i % palette.len()] })
        .collect();
    draw_legend(&mut canvas, &area, &artifact.title, &entries, config.font.size);

    Ok(canvas.finish_svg())
}

fn empty_svg() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="30">No series</text></svg>"#.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_resolution::ResolutionSeries;

    fn artifact() -> ResolutionArtifact {
        ResolutionArtifact {
            sample: "TTTT".into(),
            title: "tttt".into(),
            year: 2018,
            variable: "HT".into(),
            x_label: "H_T (generator jets) [GeV]".into(),
            estimator: "std".into(),
            series: vec![
                ResolutionSeries {
                    label: "PF".into(),
                    centers: vec![100.0, 300.0, 500.0],
                    half_widths: vec![50.0, 150.0, 50.0],
                    values: vec![18.0, 22.0, 27.0],
                },
                ResolutionSeries {
                    label: "PUPPI".into(),
                    centers: vec![100.0, 300.0, 500.0],
                    half_widths: vec![50.0, 150.0, 50.0],
                    values: vec![12.0, 15.0, 19.0],
                },
            ],
        }
    }

    #[test]
    fn renders_markers_series_and_legend() {
        let svg = render(&artifact(), &VizConfig::default()).unwrap();
        // 6 data markers + 2 legend swatches.
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(svg.contains("tttt"));
        assert!(svg.contains("PUPPI"));
        assert!(svg.contains("p_T^miss resolution [GeV]"));
        assert!(svg.contains("2018 (13 TeV)"));
        // Two palette colors in use.
        assert!(svg.contains("#5790fc"));
        assert!(svg.contains("#f89c20"));
    }

    #[test]
    fn empty_artifact_renders_placeholder() {
        let mut a = artifact();
        a.series.clear();
        let svg = render(&a, &VizConfig::default()).unwrap();
        assert!(svg.contains("No series"));
    }

    #[test]
    fn zero_bins_still_render() {
        let mut a = artifact();
        for s in &mut a.series {
            s.values = vec![0.0; s.values.len()];
        }
        let svg = render(&a, &VizConfig::default()).unwrap();
        assert_eq!(svg.matches("<circle").count(), 8);
    }
}
