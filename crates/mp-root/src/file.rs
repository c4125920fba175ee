//! TFile header parsing and the top-level read interface.

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::branch::{BranchReader, Jagged};
use crate::decompress::decompress;
use crate::directory::Directory;
use crate::error::{Result, RootError};
use crate::key::{Key, KeyInfo};
use crate::rbuffer::RBuffer;
use crate::tree::Tree;
use crate::ttree::read_ttree;

const ROOT_MAGIC: &[u8] = b"root";

/// File bytes, owned or memory-mapped.
///
/// Mapping avoids copying multi-GB ntuples into RAM; owned bytes serve
/// `from_bytes()` and the tests.
#[derive(Debug)]
enum Backing {
    Owned(Vec<u8>),
    Mmap(memmap2::Mmap),
}

impl Deref for Backing {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        match self {
            Backing::Owned(v) => v,
            Backing::Mmap(m) => m,
        }
    }
}

/// Parsed file-level header fields.
#[derive(Debug)]
struct FileHeader {
    /// Whether the file uses 64-bit seek pointers (version >= 1000000).
    large_file: bool,
    /// Position of the top directory's key list.
    seek_keys: u64,
}

/// A ROOT file opened for reading.
#[derive(Debug)]
pub struct RootFile {
    data: Backing,
    header: FileHeader,
    path: PathBuf,
}

impl RootFile {
    /// Open and parse a ROOT file from disk via memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = fs::File::open(&path)?;
        // SAFETY: the mapping is only read; concurrent truncation of input
        // ntuples is outside this tool's operating conditions.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Self::from_backing(Backing::Mmap(mmap), path)
    }

    /// Parse a ROOT file from an in-memory byte vector.
    pub fn from_bytes(data: Vec<u8>, path: PathBuf) -> Result<Self> {
        Self::from_backing(Backing::Owned(data), path)
    }

    fn from_backing(data: Backing, path: PathBuf) -> Result<Self> {
        if data.len() < 64 || &data[..4] != ROOT_MAGIC {
            return Err(RootError::BadMagic);
        }
        let header = parse_header(&data)?;
        Ok(Self { data, header, path })
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the keys of the top-level directory.
    pub fn list_keys(&self) -> Result<Vec<KeyInfo>> {
        Ok(self.top_directory()?.keys().iter().map(KeyInfo::from).collect())
    }

    /// Read a TTree by name from the top-level directory.
    pub fn get_tree(&self, name: &str) -> Result<Tree> {
        let dir = self.top_directory()?;
        let key = dir.find(name).ok_or_else(|| RootError::TreeNotFound(name.to_string()))?;
        if key.class_name != "TTree" {
            return Err(RootError::TreeNotFound(format!(
                "'{name}' is a {}, not a TTree",
                key.class_name
            )));
        }
        read_ttree(&self.key_payload(key)?)
    }

    /// Read a scalar branch of `tree` as `f64` values.
    pub fn scalar_f64(&self, tree: &Tree, branch: &str) -> Result<Vec<f64>> {
        self.reader(tree, branch)?.scalar_f64()
    }

    /// Read a jagged branch of `tree`.
    pub fn jagged_f64(&self, tree: &Tree, branch: &str) -> Result<Jagged> {
        self.reader(tree, branch)?.jagged_f64()
    }

    fn reader<'a>(&'a self, tree: &'a Tree, branch: &str) -> Result<BranchReader<'a>> {
        let b = tree
            .branch(branch)
            .ok_or_else(|| RootError::BranchNotFound(branch.to_string()))?;
        Ok(BranchReader::new(&self.data, b, self.header.large_file))
    }

    fn top_directory(&self) -> Result<Directory> {
        Directory::read_key_list(
            &self.data,
            self.header.seek_keys as usize,
            self.header.large_file,
        )
    }

    /// Read and decompress the object payload of a key.
    fn key_payload(&self, key: &Key) -> Result<Vec<u8>> {
        let start = key.seek_key as usize;
        let end = start + key.n_bytes as usize;
        if end > self.data.len() {
            return Err(RootError::Underflow {
                offset: start,
                need: key.n_bytes as usize,
                have: self.data.len().saturating_sub(start),
            });
        }
        let body = &self.data[start + key.key_len as usize..end];
        if body.len() == key.obj_len as usize {
            Ok(body.to_vec())
        } else {
            decompress(body, key.obj_len as usize)
        }
    }
}

/// Parse the fixed file header and locate the top directory's key list.
///
/// Header layout (small-file variant):
///
/// ```text
/// offset  size  field
///    0      4   magic "root"
///    4      4   fVersion
///    8      4   fBEGIN
///   12    4/8   fEND
///   16    4/8   fSeekFree
///         4     fNbytesFree
///         4     nfree
///         4     fNbytesName
///         1     fUnits
///         4     fCompress
///       4/8     fSeekInfo
///         4     fNbytesInfo
///        18     fUUID
/// ```
///
/// The TDirectory streamer sits at `fBEGIN + fNbytesName`; it carries the
/// seek position of the key list.
fn parse_header(data: &[u8]) -> Result<FileHeader> {
    let mut r = RBuffer::new(data);
    r.skip(4)?;

    let version = r.read_u32()?;
    let large_file = version >= 1_000_000;
    let begin = r.read_u32()? as usize;

    if large_file {
        let _end = r.read_u64()?;
        let _seek_free = r.read_u64()?;
    } else {
        let _end = r.read_u32()?;
        let _seek_free = r.read_u32()?;
    }
    let _nbytes_free = r.read_u32()?;
    let _nfree = r.read_u32()?;
    let nbytes_name = r.read_u32()? as usize;

    // fUnits, fCompress, fSeekInfo, fNbytesInfo, fUUID are not needed.

    // TDirectory streamer.
    let dir_pos = begin + nbytes_name;
    if dir_pos >= data.len() {
        return Err(RootError::Deserialization("TDirectory offset past end of file".into()));
    }
    r.seek(dir_pos);

    let dir_version = r.read_u16()?;
    let _datime_c = r.read_u32()?;
    let _datime_m = r.read_u32()?;
    let _nbytes_keys = r.read_u32()?;
    let _nbytes_name = r.read_u32()?;

    let seek_keys = if dir_version > 1000 {
        let _seek_dir = r.read_u64()?;
        let _seek_parent = r.read_u64()?;
        r.read_u64()?
    } else {
        let _seek_dir = r.read_u32()?;
        let _seek_parent = r.read_u32()?;
        r.read_u32()? as u64
    };

    if seek_keys == 0 {
        return Err(RootError::Deserialization("file has no key list".into()));
    }

    Ok(FileHeader { large_file, seek_keys })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_non_root_bytes() {
        let err = RootFile::from_bytes(vec![0u8; 128], PathBuf::from("junk.root")).unwrap_err();
        assert!(matches!(err, RootError::BadMagic));
    }

    #[test]
    fn reject_truncated_file() {
        let err = RootFile::from_bytes(b"root".to_vec(), PathBuf::from("tiny.root")).unwrap_err();
        assert!(matches!(err, RootError::BadMagic));
    }
}
