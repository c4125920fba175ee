//! Synthetic ROOT-file builder backing the integration tests.
//!
//! Writes the same on-disk subset the reader understands: small-file header,
//! top-directory key list, a v20 TTree streamer, and zlib or uncompressed
//! baskets for scalar and jagged branches. Scalar branches with at least
//! four entries are split over two baskets to exercise basket stitching.

use crate::decompress::zlib_block;
use crate::tree::Leaf;

const BEGIN: usize = 100;
const NBYTES_NAME: usize = 36;

/// Declarative fixture for one `Events`-style tree.
#[derive(Default)]
pub struct TreeFixture {
    name: String,
    scalars: Vec<(String, Leaf, Vec<f64>)>,
    jagged: Vec<(String, Vec<Vec<f32>>)>,
}

impl TreeFixture {
    /// Start a fixture for a tree called `name`.
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    /// Add a scalar `f32` branch (zlib-compressed baskets).
    pub fn scalar_f32(mut self, branch: &str, values: &[f64]) -> Self {
        self.scalars.push((branch.to_string(), Leaf::F32, values.to_vec()));
        self
    }

    /// Add a scalar `i32` branch (zlib-compressed baskets).
    pub fn scalar_i32(mut self, branch: &str, values: &[i32]) -> Self {
        self.scalars
            .push((branch.to_string(), Leaf::I32, values.iter().map(|&v| v as f64).collect()));
        self
    }

    /// Add a jagged `f32` branch (one uncompressed basket).
    pub fn jagged_f32(mut self, branch: &str, entries: &[Vec<f32>]) -> Self {
        self.jagged.push((branch.to_string(), entries.to_vec()));
        self
    }

    /// Serialize the complete file.
    pub fn build(&self) -> Vec<u8> {
        let n_entries = self
            .scalars
            .first()
            .map(|(_, _, v)| v.len())
            .or_else(|| self.jagged.first().map(|(_, e)| e.len()))
            .unwrap_or(0);

        let mut file = file_header();

        let mut specs = Vec::new();
        for (name, leaf, values) in &self.scalars {
            assert_eq!(values.len(), n_entries, "misaligned fixture branch '{name}'");
            let mut baskets = Vec::new();
            for (chunk, boundary) in split_in_two(values) {
                let mut raw = Vec::new();
                for &v in chunk {
                    encode_value(&mut raw, *leaf, v);
                }
                let body = zlib_block(&raw);
                let seek = append_object(&mut file, "TBasket", name, raw.len() as u32, &body);
                baskets.push((seek, boundary as u64));
            }
            specs.push(BranchSpec {
                name: name.clone(),
                leaf_class: leaf_class(*leaf),
                entry_offset_len: 0,
                baskets,
                entries: n_entries as u64,
            });
        }

        for (name, entries) in &self.jagged {
            assert_eq!(entries.len(), n_entries, "misaligned fixture branch '{name}'");
            let payload = jagged_payload(key_len_for("TBasket", name), entries);
            let seek = append_object(&mut file, "TBasket", name, payload.len() as u32, &payload);
            specs.push(BranchSpec {
                name: name.clone(),
                leaf_class: "TLeafF",
                entry_offset_len: 32,
                baskets: vec![(seek, n_entries as u64)],
                entries: n_entries as u64,
            });
        }

        let tree_bytes = ttree(&self.name, n_entries as u64, &specs);
        let tree_seek = file.len() as u64;
        let tree_key = tkey(tree_seek, "TTree", &self.name, tree_bytes.len() as u32, tree_bytes.len() as u32);
        file.extend_from_slice(&tree_key);
        file.extend_from_slice(&tree_bytes);

        // Key list: its own TKey, then the directory entries.
        let mut listing = Vec::new();
        listing.extend_from_slice(&1u32.to_be_bytes());
        listing.extend_from_slice(&tree_key);
        let seek_keys = append_object(&mut file, "TFile", "keylist", listing.len() as u32, &listing);

        // Patch the TDirectory's seek_keys slot.
        let slot = BEGIN + NBYTES_NAME + 26;
        file[slot..slot + 4].copy_from_slice(&(seek_keys as u32).to_be_bytes());

        file
    }
}

/// Split values into two baskets when there are enough entries, returning
/// `(chunk, entry boundary after the chunk)` pairs.
fn split_in_two(values: &[f64]) -> Vec<(&[f64], usize)> {
    if values.len() >= 4 {
        let mid = values.len() / 2;
        vec![(&values[..mid], mid), (&values[mid..], values.len())]
    } else {
        vec![(values, values.len())]
    }
}

fn encode_value(out: &mut Vec<u8>, leaf: Leaf, v: f64) {
    match leaf {
        Leaf::F32 => out.extend_from_slice(&(v as f32).to_be_bytes()),
        Leaf::I32 => out.extend_from_slice(&(v as i32).to_be_bytes()),
        other => unimplemented!("fixture encoding for {other:?}"),
    }
}

fn leaf_class(leaf: Leaf) -> &'static str {
    match leaf {
        Leaf::F32 => "TLeafF",
        Leaf::I32 => "TLeafI",
        other => unimplemented!("fixture leaf class for {other:?}"),
    }
}

fn put_str(out: &mut Vec<u8>, s: &str) {
    assert!(s.len() < 255);
    out.push(s.len() as u8);
    out.extend_from_slice(s.as_bytes());
}

/// Wrap `body` in a streamer version header with byte count.
fn versioned(ver: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 6);
    out.extend_from_slice(&(0x4000_0000u32 | (2 + body.len() as u32)).to_be_bytes());
    out.extend_from_slice(&ver.to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// A versioned object with no fields, standing in for attribute classes the
/// reader skips over.
fn empty_versioned() -> Vec<u8> {
    versioned(0, &[])
}

fn tobject() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&0x0300_0000u32.to_be_bytes());
    out
}

fn tnamed(name: &str, title: &str) -> Vec<u8> {
    let mut body = tobject();
    put_str(&mut body, name);
    put_str(&mut body, title);
    versioned(1, &body)
}

/// One TObjArray element introducing its class by name, followed by the
/// streamed object (nothing for leaf objects the reader skips).
fn objarray_element(class: &str, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let byte_count = 4 + class.len() + 1 + content.len();
    out.extend_from_slice(&(0x4000_0000u32 | byte_count as u32).to_be_bytes());
    out.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
    out.extend_from_slice(class.as_bytes());
    out.push(0);
    out.extend_from_slice(content);
    out
}

fn objarray(elements: &[Vec<u8>]) -> Vec<u8> {
    let mut body = tobject();
    put_str(&mut body, "");
    body.extend_from_slice(&(elements.len() as i32).to_be_bytes());
    body.extend_from_slice(&0i32.to_be_bytes());
    for e in elements {
        body.extend_from_slice(e);
    }
    versioned(3, &body)
}

struct BranchSpec {
    name: String,
    leaf_class: &'static str,
    entry_offset_len: i32,
    /// (seek, entry boundary after this basket) per basket.
    baskets: Vec<(u64, u64)>,
    entries: u64,
}

/// Streamed TBranch (version 13).
fn tbranch(spec: &BranchSpec) -> Vec<u8> {
    let n_baskets = spec.baskets.len();
    let max_baskets = n_baskets + 2;

    let mut body = Vec::new();
    body.extend_from_slice(&tnamed(&spec.name, ""));
    body.extend_from_slice(&empty_versioned()); // TAttFill
    body.extend_from_slice(&0i32.to_be_bytes()); // fCompress
    body.extend_from_slice(&32000i32.to_be_bytes()); // fBasketSize
    body.extend_from_slice(&spec.entry_offset_len.to_be_bytes());
    body.extend_from_slice(&(n_baskets as i32).to_be_bytes()); // fWriteBasket
    body.extend_from_slice(&(spec.entries as i64).to_be_bytes()); // fEntryNumber
    body.extend_from_slice(&empty_versioned()); // fIOFeatures
    body.extend_from_slice(&0i32.to_be_bytes()); // fOffset
    body.extend_from_slice(&(max_baskets as i32).to_be_bytes());
    body.extend_from_slice(&0i32.to_be_bytes()); // fSplitLevel
    body.extend_from_slice(&(spec.entries as i64).to_be_bytes());
    body.extend_from_slice(&0i64.to_be_bytes()); // fFirstEntry
    body.extend_from_slice(&0i64.to_be_bytes()); // fTotBytes
    body.extend_from_slice(&0i64.to_be_bytes()); // fZipBytes
    body.extend_from_slice(&empty_versioned()); // sub-branches
    body.extend_from_slice(&objarray(&[objarray_element(spec.leaf_class, &[])]));
    body.extend_from_slice(&empty_versioned()); // fBaskets

    body.push(max_baskets as u8);
    for _ in 0..max_baskets {
        body.extend_from_slice(&0i32.to_be_bytes()); // fBasketBytes (unused)
    }

    body.push(max_baskets as u8);
    for i in 0..max_baskets {
        let boundary =
            if i == 0 { 0 } else { spec.baskets.get(i - 1).map(|&(_, b)| b).unwrap_or(0) };
        body.extend_from_slice(&(boundary as i64).to_be_bytes());
    }

    body.push(max_baskets as u8);
    for i in 0..max_baskets {
        let seek = spec.baskets.get(i).map(|&(s, _)| s).unwrap_or(0);
        body.extend_from_slice(&(seek as i64).to_be_bytes());
    }

    versioned(13, &body)
}

/// Streamed TTree (version 20).
fn ttree(name: &str, entries: u64, branch_specs: &[BranchSpec]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&tnamed(name, ""));
    body.extend_from_slice(&empty_versioned()); // TAttLine
    body.extend_from_slice(&empty_versioned()); // TAttFill
    body.extend_from_slice(&empty_versioned()); // TAttMarker
    body.extend_from_slice(&(entries as i64).to_be_bytes());
    for _ in 0..4 {
        body.extend_from_slice(&0i64.to_be_bytes()); // tot/zip/saved/flushed
    }
    body.extend_from_slice(&1.0f64.to_be_bytes()); // fWeight
    body.extend_from_slice(&0i32.to_be_bytes()); // fTimerInterval
    body.extend_from_slice(&25i32.to_be_bytes()); // fScanField
    body.extend_from_slice(&0i32.to_be_bytes()); // fUpdate
    body.extend_from_slice(&1000i32.to_be_bytes()); // fDefaultEntryOffsetLen
    body.extend_from_slice(&0i32.to_be_bytes()); // fNClusterRange
    body.extend_from_slice(&0i64.to_be_bytes()); // fMaxEntries
    body.extend_from_slice(&0i64.to_be_bytes()); // fMaxEntryLoop
    body.extend_from_slice(&0i64.to_be_bytes()); // fMaxVirtualSize
    body.extend_from_slice(&0i64.to_be_bytes()); // fAutoSave
    body.extend_from_slice(&0i64.to_be_bytes()); // fAutoFlush
    body.extend_from_slice(&1_000_000i64.to_be_bytes()); // fEstimate
    body.push(0); // fClusterRangeEnd count byte
    body.push(0); // fClusterSize count byte
    body.extend_from_slice(&empty_versioned()); // fIOBits
    let elements: Vec<Vec<u8>> =
        branch_specs.iter().map(|s| objarray_element("TBranch", &tbranch(s))).collect();
    body.extend_from_slice(&objarray(&elements));
    versioned(20, &body)
}

/// Serialize a TKey header for an object at `seek` with `body_len` stored
/// bytes and `obj_len` uncompressed bytes.
fn tkey(seek: u64, class: &str, name: &str, obj_len: u32, body_len: u32) -> Vec<u8> {
    let key_len = (29 + class.len() + name.len()) as u16;
    let mut out = Vec::new();
    out.extend_from_slice(&(key_len as u32 + body_len).to_be_bytes());
    out.extend_from_slice(&4u16.to_be_bytes()); // key version (small seeks)
    out.extend_from_slice(&obj_len.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes()); // datime
    out.extend_from_slice(&key_len.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // cycle
    out.extend_from_slice(&(seek as u32).to_be_bytes());
    out.extend_from_slice(&(BEGIN as u32).to_be_bytes()); // parent dir
    put_str(&mut out, class);
    put_str(&mut out, name);
    put_str(&mut out, "");
    assert_eq!(out.len(), key_len as usize);
    out
}

fn key_len_for(class: &str, name: &str) -> usize {
    29 + class.len() + name.len()
}

/// Append an object (TKey + stored body) at the end of `file`, returning its
/// seek position.
fn append_object(file: &mut Vec<u8>, class: &str, name: &str, obj_len: u32, body: &[u8]) -> u64 {
    let seek = file.len() as u64;
    let key = tkey(seek, class, name, obj_len, body.len() as u32);
    file.extend_from_slice(&key);
    file.extend_from_slice(body);
    seek
}

/// Basket payload for a jagged basket: element data followed by the
/// entry-offset table (absolute offsets, base = key header length).
fn jagged_payload(key_len: usize, entries: &[Vec<f32>]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut offsets = vec![key_len];
    for entry in entries {
        for v in entry {
            data.extend_from_slice(&v.to_be_bytes());
        }
        offsets.push(key_len + data.len());
    }
    let mut payload = data;
    payload.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
    for off in offsets {
        payload.extend_from_slice(&(off as u32).to_be_bytes());
    }
    payload
}

/// File header plus the name record and TDirectory streamer; the key-list
/// position is patched in by [`TreeFixture::build`].
fn file_header() -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(b"root");
    file.extend_from_slice(&63200u32.to_be_bytes()); // fVersion
    file.extend_from_slice(&(BEGIN as u32).to_be_bytes());
    file.extend_from_slice(&0u32.to_be_bytes()); // fEND (unused by reader)
    file.extend_from_slice(&0u32.to_be_bytes()); // fSeekFree
    file.extend_from_slice(&0u32.to_be_bytes()); // fNbytesFree
    file.extend_from_slice(&0u32.to_be_bytes()); // nfree
    file.extend_from_slice(&(NBYTES_NAME as u32).to_be_bytes());
    file.push(4); // fUnits
    file.extend_from_slice(&0u32.to_be_bytes()); // fCompress
    file.extend_from_slice(&0u32.to_be_bytes()); // fSeekInfo
    file.extend_from_slice(&0u32.to_be_bytes()); // fNbytesInfo
    file.extend_from_slice(&[0u8; 18]); // fUUID
    debug_assert_eq!(file.len(), 63);
    file.resize(BEGIN, 0);

    // Name record (opaque to the reader), then the TDirectory streamer.
    file.resize(BEGIN + NBYTES_NAME, 0);
    file.extend_from_slice(&5u16.to_be_bytes()); // dir version
    file.extend_from_slice(&0u32.to_be_bytes()); // datime_c
    file.extend_from_slice(&0u32.to_be_bytes()); // datime_m
    file.extend_from_slice(&0u32.to_be_bytes()); // nbytes_keys
    file.extend_from_slice(&0u32.to_be_bytes()); // nbytes_name
    file.extend_from_slice(&(BEGIN as u32).to_be_bytes()); // seek_dir
    file.extend_from_slice(&0u32.to_be_bytes()); // seek_parent
    file.extend_from_slice(&0u32.to_be_bytes()); // seek_keys slot
    file
}
