//! # mp-root
//!
//! Native reader for the subset of the ROOT file format that flat analysis
//! ntuples use: a top-level directory of TKeys, a TTree of scalar and
//! variable-length ("jagged") branches, and zlib/LZ4/ZSTD-compressed baskets.
//! No Python, no external ROOT libraries.
//!
//! ## Example
//!
//! ```no_run
//! use mp_root::RootFile;
//!
//! let f = RootFile::open("TTTT.root").unwrap();
//! let tree = f.get_tree("Events").unwrap();
//! let genmet = f.scalar_f64(&tree, "GenMET_pt").unwrap();
//! let jet_pt = f.jagged_f64(&tree, "Jet_pt").unwrap();
//! assert_eq!(jet_pt.n_entries(), genmet.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basket;
pub mod branch;
pub mod decompress;
pub mod directory;
pub mod error;
pub mod file;
pub mod key;
pub mod rbuffer;
#[doc(hidden)]
pub mod testdata;
pub mod tree;
pub mod ttree;

pub use branch::Jagged;
pub use error::{Result, RootError};
pub use file::RootFile;
pub use key::{Key, KeyInfo};
pub use tree::{Branch, Leaf, Tree};
