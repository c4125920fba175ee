//! The per-plot computation: bin, estimate, assemble the artifact.

use mp_core::{Algo, Result, Sample, Variable};

use crate::artifact::{ResolutionArtifact, ResolutionSeries};
use crate::binning::BinEdges;
use crate::estimator::{Estimator, dispersion_per_bin};
use crate::events::EventTable;
use crate::residual::residual_series;

/// Compute the resolution artifact for one (sample, estimator, variable)
/// combination.
///
/// `selector` is the raw estimator string; an unknown selector logs a
/// warning and produces all-zero series rather than failing.
pub fn compute_resolution(
    table: &EventTable,
    sample: &Sample,
    algos: &[Algo],
    var: Variable,
    selector: &str,
) -> Result<ResolutionArtifact> {
    let var_values = table.variable_values(var)?;

    let bins = if var.fixed_width_bins() {
        BinEdges::vertex_count()
    } else {
        BinEdges::quantile(&var_values)?
    };

    let estimator = Estimator::parse(selector);
    if estimator.is_none() {
        log::warn!("no known error estimator '{selector}', bin values stay zero");
    }

    let centers = bins.centers();
    let half_widths = bins.half_widths();

    let mut series = Vec::with_capacity(algos.len());
    for algo in algos {
        let res = residual_series(table, sample, algo, &var_values)?;
        let values = match estimator {
            Some(est) => dispersion_per_bin(&res.residuals, &res.var_values, &bins, est),
            None => vec![0.0; bins.n_bins()],
        };
        series.push(ResolutionSeries {
            label: algo.label.clone(),
            centers: centers.clone(),
            half_widths: half_widths.clone(),
            values,
        });
    }

    Ok(ResolutionArtifact {
        sample: sample.name.clone(),
        title: sample.title.clone(),
        year: sample.year,
        variable: var.id().to_string(),
        x_label: var.axis_label(),
        estimator: selector.to_string(),
        series,
    })
}
