//! Per-event MET residuals.

use mp_core::{Algo, Result, Sample};

use crate::events::EventTable;

/// Residuals of one algorithm against generator MET, aligned with the
/// binning-variable sequence.
#[derive(Debug, Clone)]
pub struct ResidualSeries {
    /// Per-event residuals.
    pub residuals: Vec<f64>,
    /// Binning-variable values, kept pairwise with `residuals` after any
    /// NaN filtering.
    pub var_values: Vec<f64>,
}

/// Compute the residual series for `algo`.
///
/// Standard samples compare MET magnitudes; dilepton Drell-Yan samples
/// compare the momentum x-components instead, because the magnitude
/// comparison is not meaningful for that process class. When the algorithm
/// is flagged `filter_undefined`, events with a NaN residual are dropped
/// together with their binning-variable entry so the pair stays aligned.
pub fn residual_series(
    table: &EventTable,
    sample: &Sample,
    algo: &Algo,
    var_values: &[f64],
) -> Result<ResidualSeries> {
    let gen_pt = table.scalar("GenMET_pt")?;
    let gen_phi = table.scalar("GenMET_phi")?;
    let reco_pt = table.scalar(&format!("{}_pt", algo.branch))?;
    let reco_phi = table.scalar(&format!("{}_phi", algo.branch))?;

    let scale = if algo.halve { 0.5 } else { 1.0 };
    let dilepton = sample.is_dilepton_dy();

    let mut residuals = Vec::with_capacity(gen_pt.len());
    for i in 0..gen_pt.len() {
        let reco = reco_pt[i] * scale;
        let res = if dilepton {
            reco * reco_phi[i].cos() - gen_pt[i] * gen_phi[i].cos()
        } else {
            reco - gen_pt[i]
        };
        residuals.push(res);
    }

    if algo.filter_undefined {
        let (residuals, var_values) = drop_nan_pairs(&residuals, var_values);
        Ok(ResidualSeries { residuals, var_values })
    } else {
        Ok(ResidualSeries { residuals, var_values: var_values.to_vec() })
    }
}

/// Remove entries whose residual is NaN, from both sequences.
fn drop_nan_pairs(residuals: &[f64], var_values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    residuals
        .iter()
        .zip(var_values)
        .filter(|(r, _)| !r.is_nan())
        .map(|(&r, &v)| (r, v))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mp_core::{algos_for_sample, lookup_sample};

    fn table_with(reco_pt: Vec<f64>, reco_phi: Vec<f64>) -> EventTable {
        let n = reco_pt.len();
        let mut t = EventTable::new();
        t.insert_scalar("GenMET_pt", vec![10.0; n]).unwrap();
        t.insert_scalar("GenMET_phi", vec![0.0; n]).unwrap();
        t.insert_scalar("MET_pt", reco_pt).unwrap();
        t.insert_scalar("MET_phi", reco_phi).unwrap();
        t
    }

    fn pf(sample_name: &str) -> (mp_core::Sample, Algo) {
        let sample = lookup_sample(sample_name);
        let algo = algos_for_sample(&sample).into_iter().find(|a| a.label == "PF").unwrap();
        (sample, algo)
    }

    #[test]
    fn magnitude_residual() {
        let (sample, algo) = pf("TTTT");
        let table = table_with(vec![12.0, 9.0], vec![0.3, 0.7]);
        let s = residual_series(&table, &sample, &algo, &[100.0, 200.0]).unwrap();
        assert_relative_eq!(s.residuals[0], 2.0);
        assert_relative_eq!(s.residuals[1], -1.0);
        assert_eq!(s.var_values, vec![100.0, 200.0]);
    }

    #[test]
    fn dilepton_uses_x_component() {
        let (sample, algo) = pf("DY_2018");
        assert!(sample.is_dilepton_dy());
        // gen (10, 0), reco (12, pi/3): 12 cos(pi/3) - 10 cos(0) = -4.
        let table = table_with(vec![12.0], vec![std::f64::consts::FRAC_PI_3]);
        let s = residual_series(&table, &sample, &algo, &[50.0]).unwrap();
        assert_relative_eq!(s.residuals[0], -4.0, epsilon = 1e-12);
    }

    #[test]
    fn halve_scales_reconstructed_magnitude() {
        let (sample, mut algo) = pf("TTTT");
        algo.halve = true;
        let table = table_with(vec![12.0], vec![0.0]);
        let s = residual_series(&table, &sample, &algo, &[50.0]).unwrap();
        assert_relative_eq!(s.residuals[0], -4.0); // 6 - 10
    }

    #[test]
    fn nan_filter_keeps_pairs_aligned() {
        let (sample, mut algo) = pf("TTTT");
        algo.filter_undefined = true;
        let table = table_with(vec![12.0, f64::NAN, 9.0], vec![0.0, 0.0, 0.0]);
        let s = residual_series(&table, &sample, &algo, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.residuals, vec![2.0, -1.0]);
        assert_eq!(s.var_values, vec![1.0, 3.0]);
    }

    #[test]
    fn without_filter_nan_survives() {
        let (sample, algo) = pf("TTTT");
        let table = table_with(vec![f64::NAN, 9.0], vec![0.0, 0.0]);
        let s = residual_series(&table, &sample, &algo, &[1.0, 2.0]).unwrap();
        assert!(s.residuals[0].is_nan());
        assert_eq!(s.var_values.len(), 2);
    }
}
