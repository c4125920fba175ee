//! File-output tests: one artifact rendered to all three formats.

use mp_render::config::VizConfig;
use mp_render::{render_svg, render_to_file};
use mp_resolution::{ResolutionArtifact, ResolutionSeries};

fn artifact() -> ResolutionArtifact {
    let centers = vec![60.0, 180.0, 420.0, 900.0];
    let half_widths = vec![40.0, 80.0, 160.0, 320.0];
    ResolutionArtifact {
        sample: "HINV".into(),
        title: "H\u{2192}invisible".into(),
        year: 2018,
        variable: "HT".into(),
        x_label: "H_T (generator jets) [GeV]".into(),
        estimator: "central68".into(),
        series: vec![
            ResolutionSeries {
                label: "PF".into(),
                centers: centers.clone(),
                half_widths: half_widths.clone(),
                values: vec![16.0, 19.5, 24.0, 31.0],
            },
            ResolutionSeries {
                label: "DeepMET".into(),
                centers,
                half_widths,
                values: vec![9.0, 11.0, 14.5, 0.0],
            },
        ],
    }
}

#[test]
fn svg_contains_every_series() {
    let svg = render_svg(&artifact(), &VizConfig::default()).unwrap();
    assert!(svg.contains("DeepMET"));
    assert!(svg.contains("H\u{2192}invisible"));
    // 8 data markers + 2 legend swatches.
    assert_eq!(svg.matches("<circle").count(), 10);
}

#[test]
fn writes_pdf_png_and_svg_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = VizConfig::default();
    let a = artifact();

    for ext in ["pdf", "png", "svg"] {
        let path = dir.path().join(format!("HINV_central68.{ext}"));
        render_to_file(&a, &path, &config).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "{ext} output is empty");
    }
}

#[test]
fn overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("HINV_central68.svg");
    std::fs::write(&path, b"stale").unwrap();

    render_to_file(&artifact(), &path, &VizConfig::default()).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("<svg"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("HINV.bmp");
    assert!(render_to_file(&artifact(), &path, &VizConfig::default()).is_err());
}
