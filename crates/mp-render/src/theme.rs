//! Built-in theme presets.

use crate::config::*;

/// Available theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    /// CMS-style figure: box frame, in-facing ticks, Petroff palette.
    Cms,
    /// Sparse frame for quick looks.
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "minimal" => Self::Minimal,
            _ => Self::Cms,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Cms => cms(),
            Self::Minimal => minimal(),
        }
    }
}

fn cms() -> VizConfig {
    VizConfig {
        theme: "cms".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        experiment: ExperimentConfig::default(),
        palette: "cms_petroff6".into(),
        output: OutputConfig::default(),
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        figure: FigureConfig { width: 432.0, height: 302.4 },
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0 },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        experiment: ExperimentConfig { name: String::new(), status: String::new() },
        palette: "tableau10".into(),
        ..cms()
    }
}
