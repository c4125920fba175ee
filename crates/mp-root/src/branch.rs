//! Column extraction from TTree branches.

use rayon::prelude::*;

use crate::basket::read_basket;
use crate::error::{Result, RootError};
use crate::tree::{Branch, Leaf};

/// A variable-length column: flat values plus per-entry boundaries.
///
/// Entry `i` holds `flat[offsets[i]..offsets[i + 1]]`;
/// `offsets.len() == n_entries + 1`.
#[derive(Debug, Clone)]
pub struct Jagged {
    /// All values across all entries, in entry order.
    pub flat: Vec<f64>,
    /// Entry boundaries into `flat`.
    pub offsets: Vec<usize>,
}

impl Jagged {
    /// Number of entries.
    pub fn n_entries(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// The values of entry `i`.
    pub fn entry(&self, i: usize) -> &[f64] {
        &self.flat[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Iterator over per-entry slices.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_entries()).map(|i| self.entry(i))
    }
}

/// Reads the baskets of one branch into typed columns.
pub struct BranchReader<'a> {
    file_data: &'a [u8],
    branch: &'a Branch,
    large_file: bool,
}

impl<'a> BranchReader<'a> {
    /// Create a reader over `branch` of a file backed by `file_data`.
    pub fn new(file_data: &'a [u8], branch: &'a Branch, large_file: bool) -> Self {
        Self { file_data, branch, large_file }
    }

    /// Read a scalar branch (one value per entry) as `f64`.
    pub fn scalar_f64(&self) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.branch.entries as usize);
        for (i, payload) in self.baskets()?.iter().enumerate() {
            let n = self.branch.basket_entries(i);
            let data = self.entry_data(payload, n)?;
            decode_values(data, self.branch.leaf, n, &mut out)?;
        }
        Ok(out)
    }

    /// Read a jagged branch as flat values plus entry offsets.
    pub fn jagged_f64(&self) -> Result<Jagged> {
        if self.branch.entry_offset_len == 0 {
            return Err(RootError::TypeMismatch(format!(
                "branch '{}' has no entry-offset table; use scalar access",
                self.branch.name
            )));
        }

        let mut flat = Vec::new();
        let mut offsets = vec![0usize];
        for (i, payload) in self.baskets()?.iter().enumerate() {
            let n = self.branch.basket_entries(i);
            if n == 0 {
                continue;
            }
            self.decode_jagged_basket(payload, n, &mut flat, &mut offsets)?;
        }
        Ok(Jagged { flat, offsets })
    }

    /// Read and decompress all baskets, in parallel.
    fn baskets(&self) -> Result<Vec<Vec<u8>>> {
        self.branch
            .basket_seek
            .par_iter()
            .map(|&seek| read_basket(self.file_data, seek, self.large_file))
            .collect()
    }

    /// The element-data prefix of a basket payload (entry-offset table
    /// stripped for branches that carry one).
    fn entry_data<'p>(&self, payload: &'p [u8], n_entries: usize) -> Result<&'p [u8]> {
        if self.branch.entry_offset_len == 0 {
            let expect = n_entries * self.branch.leaf.byte_size();
            if payload.len() < expect {
                return Err(RootError::Deserialization(format!(
                    "basket of '{}' holds {} bytes, {expect} expected",
                    self.branch.name,
                    payload.len()
                )));
            }
            Ok(&payload[..expect])
        } else {
            let (data, _offsets) = self.split_offset_table(payload, n_entries)?;
            Ok(data)
        }
    }

    /// Split a jagged basket payload into element data and the decoded
    /// entry-offset table.
    ///
    /// Layout: `[data][count: u32][offset_0 .. offset_n]`, where offsets are
    /// absolute positions in the on-disk basket buffer (they include the TKey
    /// header length); `offset_0` is the base.
    fn split_offset_table<'p>(
        &self,
        payload: &'p [u8],
        n_entries: usize,
    ) -> Result<(&'p [u8], Vec<usize>)> {
        let width = self.branch.entry_offset_len / 8;
        if self.branch.entry_offset_len % 8 != 0 || !matches!(width, 2 | 4 | 8) {
            return Err(RootError::TypeMismatch(format!(
                "unsupported entry-offset width: {} bits",
                self.branch.entry_offset_len
            )));
        }

        let n_offsets = n_entries + 1;
        let table_bytes = 4 + n_offsets * width;
        if payload.len() < table_bytes {
            return Err(RootError::Deserialization(format!(
                "basket of '{}' too small for its offset table",
                self.branch.name
            )));
        }

        let data = &payload[..payload.len() - table_bytes];
        let table = &payload[payload.len() - table_bytes..];

        let count = u32::from_be_bytes(table[..4].try_into().expect("4-byte slice")) as usize;
        if count != n_offsets {
            return Err(RootError::Deserialization(format!(
                "offset-table count {count} != entries+1 = {n_offsets}"
            )));
        }

        let word = |i: usize| -> usize {
            let b = &table[4 + i * width..4 + (i + 1) * width];
            match width {
                2 => u16::from_be_bytes(b.try_into().expect("2-byte slice")) as usize,
                4 => u32::from_be_bytes(b.try_into().expect("4-byte slice")) as usize,
                _ => u64::from_be_bytes(b.try_into().expect("8-byte slice")) as usize,
            }
        };

        let mut offsets: Vec<usize> = (0..n_offsets).map(word).collect();
        // A zero sentinel in the final slot means "end of data".
        if offsets[n_offsets - 1] == 0 {
            offsets[n_offsets - 1] = offsets[0] + data.len();
        }
        Ok((data, offsets))
    }

    fn decode_jagged_basket(
        &self,
        payload: &[u8],
        n_entries: usize,
        flat: &mut Vec<f64>,
        offsets: &mut Vec<usize>,
    ) -> Result<()> {
        let (data, entry_offsets) = self.split_offset_table(payload, n_entries)?;
        let base = entry_offsets[0];
        let elem = self.branch.leaf.byte_size();

        for i in 0..n_entries {
            let start = entry_offsets[i].saturating_sub(base);
            let end = entry_offsets[i + 1].saturating_sub(base);
            if start > end || end > data.len() || (end - start) % elem != 0 {
                return Err(RootError::Deserialization(format!(
                    "invalid entry offsets in basket of '{}': {start}..{end} (data {})",
                    self.branch.name,
                    data.len()
                )));
            }
            let n = (end - start) / elem;
            decode_values(&data[start..end], self.branch.leaf, n, flat)?;
            offsets.push(flat.len());
        }
        Ok(())
    }
}

/// Decode `n` big-endian elements of type `leaf` from `data` into `out`.
fn decode_values(data: &[u8], leaf: Leaf, n: usize, out: &mut Vec<f64>) -> Result<()> {
    let elem = leaf.byte_size();
    if data.len() < n * elem {
        return Err(RootError::Deserialization(format!(
            "element data truncated: {} bytes for {n} x {elem}",
            data.len()
        )));
    }
    out.reserve(n);
    for chunk in data[..n * elem].chunks_exact(elem) {
        out.push(decode_one(chunk, leaf));
    }
    Ok(())
}

fn decode_one(chunk: &[u8], leaf: Leaf) -> f64 {
    match leaf {
        Leaf::F32 => f32::from_be_bytes(chunk.try_into().expect("f32 chunk")) as f64,
        Leaf::F64 => f64::from_be_bytes(chunk.try_into().expect("f64 chunk")),
        Leaf::I32 => i32::from_be_bytes(chunk.try_into().expect("i32 chunk")) as f64,
        Leaf::I64 => i64::from_be_bytes(chunk.try_into().expect("i64 chunk")) as f64,
        Leaf::I16 => i16::from_be_bytes(chunk.try_into().expect("i16 chunk")) as f64,
        Leaf::I8 => chunk[0] as i8 as f64,
        Leaf::Bool => (chunk[0] != 0) as u8 as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_f32_values() {
        let mut data = Vec::new();
        for v in [1.5f32, -2.0, 0.25] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let mut out = Vec::new();
        decode_values(&data, Leaf::F32, 3, &mut out).unwrap();
        assert_eq!(out, vec![1.5, -2.0, 0.25]);
    }

    #[test]
    fn decode_i32_values() {
        let mut data = Vec::new();
        for v in [42i32, -7] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let mut out = Vec::new();
        decode_values(&data, Leaf::I32, 2, &mut out).unwrap();
        assert_eq!(out, vec![42.0, -7.0]);
    }

    #[test]
    fn truncated_data_rejected() {
        let mut out = Vec::new();
        assert!(decode_values(&[0u8; 6], Leaf::F64, 1, &mut out).is_err());
    }

    #[test]
    fn jagged_accessors() {
        let j = Jagged { flat: vec![1.0, 2.0, 3.0], offsets: vec![0, 2, 2, 3] };
        assert_eq!(j.n_entries(), 3);
        assert_eq!(j.entry(0), &[1.0, 2.0]);
        assert!(j.entry(1).is_empty());
        assert_eq!(j.entry(2), &[3.0]);
        assert_eq!(j.iter().count(), 3);
    }
}
