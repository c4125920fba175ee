//! Branch and tree metadata types.

/// Element type of a branch's leaves (from the TLeaf class name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    /// `TLeafF`: 32-bit float.
    F32,
    /// `TLeafD`: 64-bit float.
    F64,
    /// `TLeafI`: 32-bit signed integer.
    I32,
    /// `TLeafL`: 64-bit signed integer.
    I64,
    /// `TLeafS`: 16-bit signed integer.
    I16,
    /// `TLeafB`: 8-bit signed integer.
    I8,
    /// `TLeafO`: boolean stored as one byte.
    Bool,
}

impl Leaf {
    /// Size of one element in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            Leaf::F64 | Leaf::I64 => 8,
            Leaf::F32 | Leaf::I32 => 4,
            Leaf::I16 => 2,
            Leaf::I8 | Leaf::Bool => 1,
        }
    }

    /// Map a TLeaf class name to its element type.
    pub fn from_class(class_name: &str) -> Option<Self> {
        match class_name {
            "TLeafF" => Some(Leaf::F32),
            "TLeafD" => Some(Leaf::F64),
            "TLeafI" => Some(Leaf::I32),
            "TLeafL" => Some(Leaf::I64),
            "TLeafS" => Some(Leaf::I16),
            "TLeafB" => Some(Leaf::I8),
            "TLeafO" => Some(Leaf::Bool),
            _ => None,
        }
    }
}

/// Metadata for one TBranch.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Element type.
    pub leaf: Leaf,
    /// Total entries in the branch.
    pub entries: u64,
    /// Width of the entry-offset table entries in bits; zero for scalar
    /// branches without one.
    pub entry_offset_len: usize,
    /// Entry boundaries per basket (`n_baskets + 1` values).
    pub basket_entry: Vec<u64>,
    /// Absolute file offset of each basket.
    pub basket_seek: Vec<u64>,
    /// Number of written baskets.
    pub n_baskets: usize,
}

impl Branch {
    /// Entries contained in basket `i`.
    pub fn basket_entries(&self, i: usize) -> usize {
        let lo = self.basket_entry.get(i).copied().unwrap_or(0);
        let hi = self.basket_entry.get(i + 1).copied().unwrap_or(self.entries);
        hi.saturating_sub(lo) as usize
    }
}

/// A parsed TTree: name, entry count, flat branch list.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Tree name.
    pub name: String,
    /// Total entries.
    pub entries: u64,
    /// All branches.
    pub branches: Vec<Branch>,
}

impl Tree {
    /// Find a branch by name.
    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// All branch names, in tree order.
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|b| b.name.as_str())
    }
}
