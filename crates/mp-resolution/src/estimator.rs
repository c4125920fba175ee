//! Dispersion estimators.
//!
//! Each estimator reduces the residuals falling in one bin to a single
//! scalar. Bin values start at zero and stay there for empty bins, so a
//! degenerate binning never aborts a plot.

use serde::{Deserialize, Serialize};

use crate::binning::BinEdges;

/// Selectable dispersion estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    /// Population standard deviation.
    Std,
    /// Half the central 68% interval: (P84 − P16) / 2.
    Central68,
    /// Half the central 95% interval: (P97.5 − P2.5) / 2.
    Central95,
    /// Half the central 99% interval: (P99.5 − P0.5) / 2.
    Central99,
    /// Root mean square of the residuals.
    SqrtMse,
}

impl Estimator {
    /// Parse a selector string. Unknown selectors are a warning, not an
    /// error; callers leave the bin values at zero.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "std" => Some(Estimator::Std),
            "central68" => Some(Estimator::Central68),
            "central95" => Some(Estimator::Central95),
            "central99" => Some(Estimator::Central99),
            "sqrt_mse" => Some(Estimator::SqrtMse),
            _ => None,
        }
    }

    /// The selector string, used in output file names.
    pub fn id(&self) -> &'static str {
        match self {
            Estimator::Std => "std",
            Estimator::Central68 => "central68",
            Estimator::Central95 => "central95",
            Estimator::Central99 => "central99",
            Estimator::SqrtMse => "sqrt_mse",
        }
    }

    /// Reduce one bin's residuals to a dispersion scalar.
    pub fn dispersion(&self, residuals: &[f64]) -> f64 {
        if residuals.is_empty() {
            return 0.0;
        }
        match self {
            Estimator::Std => population_std(residuals),
            Estimator::Central68 => half_central_interval(residuals, 16.0, 84.0),
            Estimator::Central95 => half_central_interval(residuals, 2.5, 97.5),
            Estimator::Central99 => half_central_interval(residuals, 0.5, 99.5),
            Estimator::SqrtMse => {
                let mse =
                    residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;
                mse.sqrt()
            }
        }
    }
}

/// One dispersion value per bin.
///
/// `residuals` and `var_values` must be aligned; entries whose variable value
/// falls on an edge, outside the range, or is NaN contribute to no bin.
pub fn dispersion_per_bin(
    residuals: &[f64],
    var_values: &[f64],
    bins: &BinEdges,
    estimator: Estimator,
) -> Vec<f64> {
    debug_assert_eq!(residuals.len(), var_values.len());

    let mut in_bin: Vec<Vec<f64>> = vec![Vec::new(); bins.n_bins()];
    for (&res, &var) in residuals.iter().zip(var_values) {
        if let Some(i) = bins.bin_of(var) {
            in_bin[i].push(res);
        }
    }

    in_bin.iter().map(|sub| estimator.dispersion(sub)).collect()
}

fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

fn half_central_interval(values: &[f64], lo_pct: f64, hi_pct: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    (percentile_sorted(&sorted, hi_pct) - percentile_sorted(&sorted, lo_pct)) / 2.0
}

/// Percentile of sorted data with linear interpolation at fractional rank
/// `q/100 * (n - 1)`, the NumPy default. Pinned because the central
/// interval estimators are sensitive to the interpolation scheme.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let t = pos - i as f64;
    if t == 0.0 || i + 1 >= sorted.len() {
        sorted[i]
    } else {
        (1.0 - t) * sorted[i] + t * sorted[i + 1]
    }
}
