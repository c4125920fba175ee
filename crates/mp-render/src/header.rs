//! Experiment header above the axes frame.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the experiment label (bold name, italic status) and, right-aligned,
/// the data-taking-year line, e.g. `2018 (13 TeV)`.
pub fn draw_experiment_header(
    canvas: &mut Canvas,
    area: &PlotArea,
    year: u16,
    config: &VizConfig,
) {
    if config.experiment.name.is_empty() {
        return;
    }

    let header_size = config.font.label_size * 1.3;
    let x = area.left;
    let y = area.top - 6.0;

    let bold = TextStyle {
        size: header_size,
        weight: FontWeight::Bold,
        ..Default::default()
    };
    canvas.text(x, y, &config.experiment.name, &bold);

    if !config.experiment.status.is_empty() {
        let name_w = canvas.measure_text(&config.experiment.name, &bold).width;
        let italic = TextStyle {
            size: header_size * 0.8,
            style: FontStyle::Italic,
            ..Default::default()
        };
        canvas.text(x + name_w + 5.0, y, &config.experiment.status, &italic);
    }

    let info_style = TextStyle {
        size: config.font.tick_size,
        color: Color::rgb(60, 60, 60),
        anchor: TextAnchor::End,
        ..Default::default()
    };
    canvas.text(area.right(), y, &format!("{year} ({} TeV)", sqrt_s_tev(year)), &info_style);
}

/// Centre-of-mass energy for a data-taking year.
fn sqrt_s_tev(year: u16) -> f64 {
    if year >= 2022 { 13.6 } else { 13.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_header(year: u16, config: &VizConfig) -> String {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea { left: 40.0, top: 30.0, width: 340.0, height: 240.0 };
        draw_experiment_header(&mut canvas, &area, year, config);
        canvas.finish_svg()
    }

    #[test]
    fn header_shows_experiment_and_year() {
        let svg = render_header(2018, &VizConfig::default());
        assert!(svg.contains("CMS"));
        assert!(svg.contains("Simulation"));
        assert!(svg.contains("2018 (13 TeV)"));
    }

    #[test]
    fn run3_years_use_higher_energy() {
        let svg = render_header(2022, &VizConfig::default());
        assert!(svg.contains("2022 (13.6 TeV)"));
    }

    #[test]
    fn empty_experiment_suppresses_header() {
        let mut config = VizConfig::default();
        config.experiment.name.clear();
        let svg = render_header(2018, &config);
        assert!(!svg.contains("TeV"));
    }
}
