//! TTree / TBranch / TLeaf streamer deserialization.
//!
//! Only the fields needed to locate basket data are retained; everything
//! else is skipped via the byte counts embedded in the stream.

use crate::error::{Result, RootError};
use crate::rbuffer::{BYTE_COUNT_MASK, RBuffer};
use crate::tree::{Branch, Leaf, Tree};

const NEW_CLASS_TAG: u32 = 0xFFFF_FFFF;
const CLASS_REF_MASK: u32 = 0x8000_0000;

/// Parse a TTree from a decompressed TKey payload.
pub fn read_ttree(payload: &[u8]) -> Result<Tree> {
    let mut r = RBuffer::new(payload);

    let (tree_ver, tree_end) = r.read_version()?;
    let tree_end =
        tree_end.ok_or_else(|| RootError::Deserialization("TTree missing byte count".into()))?;

    let (name, _title) = r.read_tnamed()?;

    // TAttLine, TAttFill, TAttMarker.
    r.skip_versioned()?;
    r.skip_versioned()?;
    r.skip_versioned()?;

    let entries = r.read_i64()? as u64;
    let _tot_bytes = r.read_i64()?;
    let _zip_bytes = r.read_i64()?;
    let _saved_bytes = r.read_i64()?;
    if tree_ver >= 18 {
        let _flushed_bytes = r.read_i64()?;
    }

    let _weight = r.read_f64()?;
    let _timer_interval = r.read_i32()?;
    let _scan_field = r.read_i32()?;
    let _update = r.read_i32()?;
    if tree_ver >= 18 {
        let _default_entry_offset_len = r.read_i32()?;
    }
    let n_cluster_range = if tree_ver >= 19 { r.read_i32()? } else { 0 };

    let _max_entries = r.read_i64()?;
    let _max_entry_loop = r.read_i64()?;
    let _max_virtual_size = r.read_i64()?;
    let _auto_save = r.read_i64()?;
    if tree_ver >= 18 {
        let _auto_flush = r.read_i64()?;
    }
    let _estimate = r.read_i64()?;

    // Cluster-range arrays: the count byte is written even when empty.
    if tree_ver >= 19 {
        r.read_u8()?;
        for _ in 0..n_cluster_range {
            r.read_i64()?;
        }
        r.read_u8()?;
        for _ in 0..n_cluster_range {
            r.read_i64()?;
        }
    }

    // fIOBits (TBits) appears from v20.
    if tree_ver >= 20 {
        r.skip_versioned()?;
    }

    let branches = read_branch_array(&mut r)?;

    // Leaf list, friend trees, aliases etc. are irrelevant here.
    r.seek(tree_end);

    Ok(Tree { name, entries, branches })
}

/// Tracker for ROOT's byte-offset class-reference scheme inside TObjArray.
///
/// `kNewClassTag` introduces a class name as a C string; later elements
/// reference it by the byte offset of that tag, OR'd with `kClassMask`.
struct ClassRefs {
    by_offset: Vec<(usize, String)>,
}

impl ClassRefs {
    fn new() -> Self {
        Self { by_offset: Vec::new() }
    }

    /// Read one TObjArray element header.
    ///
    /// Returns `None` for a null entry, otherwise the element class name and
    /// the absolute position where the element's data ends.
    fn next_element(&mut self, r: &mut RBuffer) -> Result<Option<(String, usize)>> {
        let tag = r.read_u32()?;
        if tag == 0 {
            return Ok(None);
        }
        if tag & BYTE_COUNT_MASK == 0 {
            return Err(RootError::Deserialization(format!(
                "TObjArray element without byte count (tag {tag:#010x})"
            )));
        }

        let end = r.pos() - 4 + 4 + (tag & !BYTE_COUNT_MASK) as usize;

        let class_tag_pos = r.pos();
        let class_tag = r.read_u32()?;
        let class_name = if class_tag == NEW_CLASS_TAG {
            let name = r.read_cstring()?;
            self.by_offset.push((class_tag_pos, name.clone()));
            name
        } else if class_tag & CLASS_REF_MASK != 0 {
            let offset = (class_tag & !CLASS_REF_MASK) as usize;
            self.by_offset
                .iter()
                .find(|(off, _)| *off == offset)
                .map(|(_, n)| n.clone())
                .ok_or_else(|| {
                    RootError::Deserialization(format!("dangling class reference {offset:#x}"))
                })?
        } else {
            return Err(RootError::Deserialization(format!(
                "unexpected class tag {class_tag:#010x}"
            )));
        };

        Ok(Some((class_name, end)))
    }
}

/// Read the header of a TObjArray and return `(element_count, array_end)`.
fn read_objarray_header(r: &mut RBuffer) -> Result<(usize, usize)> {
    let (_ver, end) = r.read_version()?;
    let end =
        end.ok_or_else(|| RootError::Deserialization("TObjArray missing byte count".into()))?;
    r.read_tobject()?;
    let _name = r.read_string()?;
    let count = r.read_i32()?;
    let _lower_bound = r.read_i32()?;
    Ok((count as usize, end))
}

/// Read the fBranches TObjArray.
fn read_branch_array(r: &mut RBuffer) -> Result<Vec<Branch>> {
    let (count, array_end) = read_objarray_header(r)?;

    let mut refs = ClassRefs::new();
    let mut branches = Vec::new();
    for _ in 0..count {
        match refs.next_element(r)? {
            None => {}
            Some((class_name, elem_end)) => {
                // Anything branch-like parses with the TBranch layout; a
                // branch class this reader cannot handle is skipped whole.
                match read_tbranch(r) {
                    Ok(branch) => branches.push(branch),
                    Err(e) => {
                        log::debug!("skipping unreadable {class_name} branch: {e}");
                        r.seek(elem_end);
                    }
                }
            }
        }
    }

    r.seek(array_end);
    Ok(branches)
}

/// Read one TBranch streamer.
fn read_tbranch(r: &mut RBuffer) -> Result<Branch> {
    let (branch_ver, branch_end) = r.read_version()?;
    let branch_end = branch_end
        .ok_or_else(|| RootError::Deserialization("TBranch missing byte count".into()))?;

    let (name, _title) = r.read_tnamed()?;

    // TAttFill.
    r.skip_versioned()?;

    let _compress = r.read_i32()?;
    let _basket_size = r.read_i32()?;
    let entry_offset_len = r.read_i32()?.max(0) as usize;
    let write_basket = r.read_i32()?.max(0) as usize;
    let _entry_number = r.read_i64()?;

    // fIOFeatures from v13.
    if branch_ver >= 13 {
        r.skip_versioned()?;
    }

    let _offset = r.read_i32()?;
    let max_baskets = r.read_i32()?.max(0) as usize;
    let _split_level = r.read_i32()?;
    let entries = r.read_i64()? as u64;
    if branch_ver >= 11 {
        let _first_entry = r.read_i64()?;
    }
    let _tot_bytes = r.read_i64()?;
    let _zip_bytes = r.read_i64()?;

    // Sub-branches (split branches are not produced for flat ntuples).
    skip_objarray(r)?;

    let leaf = read_leaf_array(r)?.ok_or_else(|| {
        RootError::Deserialization(format!("branch '{name}' has no recognizable leaf"))
    })?;

    // In-memory fBaskets array.
    skip_objarray(r)?;

    // fBasketBytes / fBasketEntry / fBasketSeek, each a count byte plus
    // fMaxBaskets values of which the first fWriteBasket are meaningful.
    r.read_u8()?;
    for _ in 0..max_baskets {
        r.read_i32()?;
    }

    r.read_u8()?;
    let mut basket_entry = Vec::with_capacity(write_basket + 1);
    for i in 0..max_baskets {
        let v = r.read_i64()? as u64;
        if i <= write_basket {
            basket_entry.push(v);
        }
    }

    r.read_u8()?;
    let mut basket_seek = Vec::with_capacity(write_basket);
    for i in 0..max_baskets {
        let v = r.read_i64()? as u64;
        if i < write_basket {
            basket_seek.push(v);
        }
    }

    if branch_end > r.pos() {
        r.seek(branch_end);
    }

    Ok(Branch {
        name,
        leaf,
        entries,
        entry_offset_len,
        basket_entry,
        basket_seek,
        n_baskets: write_basket,
    })
}

fn skip_objarray(r: &mut RBuffer) -> Result<()> {
    r.skip_versioned()
}

/// Read the fLeaves TObjArray; the first recognized leaf decides the type.
fn read_leaf_array(r: &mut RBuffer) -> Result<Option<Leaf>> {
    let (count, array_end) = read_objarray_header(r)?;

    let mut refs = ClassRefs::new();
    let mut leaf = None;
    for _ in 0..count {
        if let Some((class_name, elem_end)) = refs.next_element(r)? {
            if leaf.is_none() {
                leaf = Leaf::from_class(&class_name);
            }
            r.seek(elem_end);
        }
    }

    r.seek(array_end);
    Ok(leaf)
}
