//! MET reconstruction algorithm descriptors.
//!
//! Each algorithm names the branch prefix its MET is stored under
//! (`<prefix>_pt`, `<prefix>_phi`) and the label used in the legend.

use serde::{Deserialize, Serialize};

use crate::sample::Sample;

/// One MET reconstruction algorithm to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Algo {
    /// Branch prefix in the ntuple (e.g. `PuppiMET`).
    pub branch: String,
    /// Legend label (e.g. `PUPPI`).
    pub label: String,
    /// Drop events whose residual is NaN for this algorithm.
    ///
    /// The DeepMET collection may be undefined per-event; those events are
    /// filtered together with their binning-variable values.
    pub filter_undefined: bool,
    /// Divide the reconstructed magnitude by two before the residual.
    ///
    /// A resolution-tuning variant; never enabled implicitly.
    pub halve: bool,
}

impl Algo {
    fn new(branch: &str, label: &str) -> Self {
        Self {
            branch: branch.to_string(),
            label: label.to_string(),
            filter_undefined: false,
            halve: false,
        }
    }

    fn with_nan_filter(mut self) -> Self {
        self.filter_undefined = true;
        self
    }
}

/// The algorithm set available for a sample.
///
/// Pre-ultra-legacy ntuples only carry the PF and PUPPI collections; all
/// others additionally provide DeepMET and the raw PUPPI variant.
pub fn algos_for_sample(sample: &Sample) -> Vec<Algo> {
    if sample.is_pre_ul() {
        vec![
            Algo::new("MET", "PF"),
            Algo::new("PuppiMET", "PUPPI"),
            Algo::new("RawMET", "PF raw"),
        ]
    } else {
        vec![
            Algo::new("MET", "PF"),
            Algo::new("PuppiMET", "PUPPI"),
            Algo::new("DeepMETResolutionTune", "DeepMET").with_nan_filter(),
            Algo::new("RawPuppiMET", "PUPPI raw"),
            Algo::new("RawMET", "PF raw"),
        ]
    }
}
