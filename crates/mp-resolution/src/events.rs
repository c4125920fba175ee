//! In-memory event table and the ROOT-backed loader.

use std::collections::BTreeMap;
use std::path::Path;

use mp_core::{Algo, Error, Result, Sample, Variable, variable::Reduction};
use mp_root::{Jagged, RootFile};

/// Name of the event tree inside every sample file.
pub const EVENTS_TREE: &str = "Events";

/// Aligned per-event columns for one sample.
///
/// Invariant: every column holds exactly `n_events` entries, in the same
/// event order; the residual computation relies on element-wise alignment.
#[derive(Debug, Default, Clone)]
pub struct EventTable {
    n_events: Option<usize>,
    scalars: BTreeMap<String, Vec<f64>>,
    jagged: BTreeMap<String, Jagged>,
}

impl EventTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events, zero while the table is empty.
    pub fn n_events(&self) -> usize {
        self.n_events.unwrap_or(0)
    }

    /// Insert a scalar column, enforcing the alignment invariant.
    pub fn insert_scalar(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.check_len(name, values.len())?;
        self.scalars.insert(name.to_string(), values);
        Ok(())
    }

    /// Insert a jagged column, enforcing the alignment invariant.
    pub fn insert_jagged(&mut self, name: &str, values: Jagged) -> Result<()> {
        self.check_len(name, values.n_entries())?;
        self.jagged.insert(name.to_string(), values);
        Ok(())
    }

    /// A scalar column by name; missing columns are fatal for the sample.
    pub fn scalar(&self, name: &str) -> Result<&[f64]> {
        self.scalars
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::Data(format!("scalar column '{name}' not loaded")))
    }

    /// A jagged column by name.
    pub fn jagged(&self, name: &str) -> Result<&Jagged> {
        self.jagged.get(name).ok_or_else(|| Error::Data(format!("jagged column '{name}' not loaded")))
    }

    /// Per-event values of a binning variable, reduced from its column.
    ///
    /// `Max` over an event without objects yields NaN (the event cannot be
    /// binned in that variable); `Sum` over an empty event is zero.
    pub fn variable_values(&self, var: Variable) -> Result<Vec<f64>> {
        match var.reduction() {
            Reduction::Scalar => Ok(self.scalar(var.branch())?.to_vec()),
            Reduction::Max => Ok(self
                .jagged(var.branch())?
                .iter()
                .map(|entry| entry.iter().copied().fold(f64::NAN, f64::max))
                .collect()),
            Reduction::Sum => {
                Ok(self.jagged(var.branch())?.iter().map(|entry| entry.iter().sum()).collect())
            }
        }
    }

    fn check_len(&mut self, name: &str, len: usize) -> Result<()> {
        match self.n_events {
            None => {
                self.n_events = Some(len);
                Ok(())
            }
            Some(expected) if expected == len => Ok(()),
            Some(expected) => Err(Error::ColumnMismatch {
                column: name.to_string(),
                got: len,
                expected,
            }),
        }
    }
}

/// Load the columns a plot needs from `<dir>/<sample>.root`.
///
/// Generator MET, each algorithm's MET (magnitude and azimuth), and the
/// branch behind the binning variable. Any I/O or lookup failure is fatal
/// for the sample.
pub fn load_events(
    dir: &Path,
    sample: &Sample,
    algos: &[Algo],
    var: Variable,
) -> Result<EventTable> {
    let path = dir.join(format!("{}.root", sample.name));
    log::info!("reading {}", path.display());

    let file = RootFile::open(&path).map_err(root_err)?;
    let tree = file.get_tree(EVENTS_TREE).map_err(root_err)?;

    let mut table = EventTable::new();
    for prefix in std::iter::once("GenMET").chain(algos.iter().map(|a| a.branch.as_str())) {
        for suffix in ["pt", "phi"] {
            let name = format!("{prefix}_{suffix}");
            table.insert_scalar(&name, file.scalar_f64(&tree, &name).map_err(root_err)?)?;
        }
    }

    match var.reduction() {
        Reduction::Scalar => {
            table.insert_scalar(var.branch(), file.scalar_f64(&tree, var.branch()).map_err(root_err)?)?;
        }
        Reduction::Max | Reduction::Sum => {
            table.insert_jagged(var.branch(), file.jagged_f64(&tree, var.branch()).map_err(root_err)?)?;
        }
    }

    Ok(table)
}

fn root_err(e: mp_root::RootError) -> Error {
    Error::Data(e.to_string())
}
