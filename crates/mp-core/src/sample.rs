//! Sample metadata registry.
//!
//! Maps a sample identifier to its display title and data-taking year. The
//! registry is a closed table; an unknown identifier falls back to a default
//! record (title = identifier, year 2018) with a warning, so that ad-hoc
//! ntuples can still be plotted.

use serde::{Deserialize, Serialize};

/// Display metadata for one simulation sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Sample identifier (also the input file stem).
    pub name: String,
    /// Legend title.
    pub title: String,
    /// Data-taking year shown in the plot header.
    pub year: u16,
}

impl Sample {
    /// Default metadata for an unregistered sample.
    pub fn fallback(name: &str) -> Self {
        Self { name: name.to_string(), title: name.to_string(), year: 2018 }
    }

    /// Whether this is a dilepton Drell-Yan sample.
    ///
    /// For this process class the MET magnitude comparison is not meaningful
    /// and residuals are computed on the momentum x-component instead.
    pub fn is_dilepton_dy(&self) -> bool {
        self.name.contains("DY")
    }

    /// Whether the underlying dataset predates the ultra-legacy campaign.
    ///
    /// Pre-UL ntuples carry a reduced set of MET collections.
    pub fn is_pre_ul(&self) -> bool {
        self.name.contains("preUL")
    }
}

/// Look up sample metadata by identifier.
///
/// Unknown identifiers are non-fatal: a warning is logged and a fallback
/// record is returned.
pub fn lookup_sample(name: &str) -> Sample {
    match registry_entry(name) {
        Some((title, year)) => {
            Sample { name: name.to_string(), title: title.to_string(), year }
        }
        None => {
            log::warn!("sample '{name}' not in sample metadata, using defaults");
            Sample::fallback(name)
        }
    }
}

/// The static sample table. Titles are Unicode renditions of the usual
/// process labels.
fn registry_entry(name: &str) -> Option<(&'static str, u16)> {
    let entry = match name {
        "ZMumu_M2300" => ("Z\u{2192}\u{03BC}\u{03BC} (M > 2300 GeV)", 2018),
        "GToHH2B2Tau3000" => ("GToHH2B2Tau3000", 2018),
        "BBAToZhToLLTauTau" => ("BBAToZhToLLTauTau", 2018),
        "GJet" => ("\u{03B3}+jet", 2018),
        "HINV" => ("H\u{2192}invisible", 2018),
        "TTTT" | "TTTT_UL17" | "TTTT_UL16postVFP" | "TTTT_UL16preVFP" => ("tttt", 2018),
        "TTTT_2022" => ("tttt", 2022),
        "DY_2016_preUL_early" | "DY_2016_preUL" | "DY_2016_postvfp" | "DY_2016_prevfp" => {
            ("DY", 2016)
        }
        // Historical quirk kept from the original table: this 2018 pre-UL
        // ntuple was produced with 2016 conditions.
        "DY_2018_preUL" => ("DY", 2016),
        "DY_2018" => ("DY", 2018),
        "DY_2022" => ("DY", 2022),
        "TTdilepton" => ("tt dilepton", 2018),
        "TTdilep_2022" => ("tt dilepton", 2022),
        "TTdilep_2023" => ("tt dilepton", 2023),
        "QCD" => ("QCD", 2018),
        "SMS-T5qqqqHg" => ("SMS T5qqqqHG", 2018),
        "SMS-T2tt-4bd" => ("SMS T2tt-4bd", 2018),
        "SMS-TChiZZ" => ("SMS TChiZZ", 2018),
        "HHBBTT" => ("HH\u{2192}bb\u{03C4}\u{03C4}", 2018),
        "TTHmumu" => ("ttH (H\u{2192}\u{03BC}\u{03BC})", 2018),
        "TTHbbdilep" => ("ttH (H\u{2192}bb) dilepton", 2018),
        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sample() {
        let s = lookup_sample("TTTT_2022");
        assert_eq!(s.title, "tttt");
        assert_eq!(s.year, 2022);
        assert!(!s.is_dilepton_dy());
        assert!(!s.is_pre_ul());
    }

    #[test]
    fn unknown_sample_falls_back() {
        let s = lookup_sample("NotARealSample");
        assert_eq!(s.title, "NotARealSample");
        assert_eq!(s.year, 2018);
    }

    #[test]
    fn dy_and_pre_ul_flags() {
        let s = lookup_sample("DY_2016_preUL");
        assert!(s.is_dilepton_dy());
        assert!(s.is_pre_ul());
        assert_eq!(s.year, 2016);

        let s = lookup_sample("DY_2018");
        assert!(s.is_dilepton_dy());
        assert!(!s.is_pre_ul());
    }
}
