//! Plot-friendly resolution artifact.
//!
//! Flat arrays rather than nested objects, so the artifact serializes to
//! JSON a renderer (or a notebook) can consume directly.

use serde::{Deserialize, Serialize};

/// One error-bar series: a single algorithm's dispersion per bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionSeries {
    /// Legend label of the algorithm.
    pub label: String,
    /// Bin centers along the binning variable.
    pub centers: Vec<f64>,
    /// Half bin-widths (horizontal error bars).
    pub half_widths: Vec<f64>,
    /// Dispersion value per bin; zero for empty bins.
    pub values: Vec<f64>,
}

/// The full payload of one resolution plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionArtifact {
    /// Sample identifier.
    pub sample: String,
    /// Sample display title (legend heading).
    pub title: String,
    /// Data-taking year shown in the header.
    pub year: u16,
    /// Binning-variable identifier.
    pub variable: String,
    /// x-axis label, unit included.
    pub x_label: String,
    /// Estimator selector the values were computed with.
    pub estimator: String,
    /// One series per algorithm.
    pub series: Vec<ResolutionSeries>,
}

impl ResolutionArtifact {
    /// Largest dispersion value across all series (for axis scaling).
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
    }

    /// Span of bin edges across all series (for axis scaling).
    pub fn x_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in &self.series {
            for (&c, &h) in s.centers.iter().zip(&s.half_widths) {
                lo = lo.min(c - h);
                hi = hi.max(c + h);
            }
        }
        if lo.is_finite() && hi.is_finite() { (lo, hi) } else { (0.0, 1.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ResolutionArtifact {
        ResolutionArtifact {
            sample: "TTTT".into(),
            title: "tttt".into(),
            year: 2018,
            variable: "HT".into(),
            x_label: "H_T (generator jets) [GeV]".into(),
            estimator: "std".into(),
            series: vec![ResolutionSeries {
                label: "PF".into(),
                centers: vec![10.0, 30.0],
                half_widths: vec![5.0, 15.0],
                values: vec![12.0, 20.0],
            }],
        }
    }

    #[test]
    fn ranges() {
        let a = artifact();
        assert_eq!(a.max_value(), 20.0);
        assert_eq!(a.x_range(), (5.0, 45.0));
    }

    #[test]
    fn json_round_trip() {
        let a = artifact();
        let json = serde_json::to_string(&a).unwrap();
        let b: ResolutionArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(b.series[0].label, "PF");
        assert_eq!(b.series[0].values, a.series[0].values);
    }
}
