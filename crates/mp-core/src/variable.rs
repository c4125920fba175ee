//! Binning variables.
//!
//! The set of x-axis variables is closed and known at compile time, so each
//! one is an enum case with its branch names and axis labels resolved by
//! `match` rather than a table of closures.

use serde::{Deserialize, Serialize};

/// A kinematic variable events are binned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Leading photon transverse momentum.
    Photon,
    /// Leading tau transverse momentum.
    Tau,
    /// Leading muon transverse momentum.
    Muon,
    /// Leading electron transverse momentum.
    Electron,
    /// Leading jet transverse momentum.
    Jet,
    /// Number of reconstructed primary vertices.
    Nvtx,
    /// Scalar sum of generator-jet transverse momenta.
    Ht,
}

impl Variable {
    /// All variables, in registry order.
    pub const ALL: [Variable; 7] = [
        Variable::Photon,
        Variable::Tau,
        Variable::Muon,
        Variable::Electron,
        Variable::Jet,
        Variable::Nvtx,
        Variable::Ht,
    ];

    /// Parse a variable identifier as used on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "photon" => Some(Variable::Photon),
            "tau" => Some(Variable::Tau),
            "muon" => Some(Variable::Muon),
            "electron" => Some(Variable::Electron),
            "jet" => Some(Variable::Jet),
            "nvtx" => Some(Variable::Nvtx),
            "HT" | "ht" => Some(Variable::Ht),
            _ => None,
        }
    }

    /// The identifier used in file names and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Variable::Photon => "photon",
            Variable::Tau => "tau",
            Variable::Muon => "muon",
            Variable::Electron => "electron",
            Variable::Jet => "jet",
            Variable::Nvtx => "nvtx",
            Variable::Ht => "HT",
        }
    }

    /// The ntuple branch the values come from.
    pub fn branch(&self) -> &'static str {
        match self {
            Variable::Photon => "Photon_pt",
            Variable::Tau => "Tau_pt",
            Variable::Muon => "Muon_pt",
            Variable::Electron => "Electron_pt",
            Variable::Jet => "Jet_pt",
            Variable::Nvtx => "PV_npvs",
            Variable::Ht => "GenJet_pt",
        }
    }

    /// How per-event values are reduced from the branch.
    pub fn reduction(&self) -> Reduction {
        match self {
            Variable::Nvtx => Reduction::Scalar,
            Variable::Ht => Reduction::Sum,
            _ => Reduction::Max,
        }
    }

    /// Axis title (without the unit).
    pub fn title(&self) -> &'static str {
        match self {
            Variable::Photon => "Leading photon p_T",
            Variable::Tau => "Leading tau p_T",
            Variable::Muon => "Leading muon p_T",
            Variable::Electron => "Leading electron p_T",
            Variable::Jet => "Leading jet p_T",
            Variable::Nvtx => "N_vertex",
            Variable::Ht => "H_T (generator jets)",
        }
    }

    /// Unit string, empty for dimensionless variables.
    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Nvtx => "",
            _ => "GeV",
        }
    }

    /// Full axis label, `title [unit]` when a unit exists.
    pub fn axis_label(&self) -> String {
        if self.unit().is_empty() {
            self.title().to_string()
        } else {
            format!("{} [{}]", self.title(), self.unit())
        }
    }

    /// Whether this variable uses fixed-width rather than quantile bins.
    pub fn fixed_width_bins(&self) -> bool {
        matches!(self, Variable::Nvtx)
    }
}

/// Per-event reduction applied to a branch to obtain the binning value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// The branch is already one value per event.
    Scalar,
    /// Maximum over the per-event collection (NaN when empty).
    Max,
    /// Sum over the per-event collection (zero when empty).
    Sum,
}
