//! Top-level TDirectory key list.
//!
//! The `Events` tree of an analysis ntuple sits in the file's top directory,
//! so subdirectory recursion is not implemented.

use crate::error::Result;
use crate::key::Key;
use crate::rbuffer::RBuffer;

/// An ordered list of TKeys.
#[derive(Debug, Clone)]
pub struct Directory {
    keys: Vec<Key>,
}

impl Directory {
    /// Read the key list stored at `seek_keys`.
    ///
    /// The list is itself stored under a TKey; its payload is a u32 count
    /// followed by that many TKey records.
    pub fn read_key_list(file_data: &[u8], seek_keys: usize, large_file: bool) -> Result<Self> {
        let mut r = RBuffer::new(file_data);
        r.seek(seek_keys);

        let _list_key = Key::read(&mut r, large_file)?;
        let n_keys = r.read_u32()? as usize;

        let mut keys = Vec::with_capacity(n_keys);
        for _ in 0..n_keys {
            keys.push(Key::read(&mut r, large_file)?);
        }
        Ok(Directory { keys })
    }

    /// All keys, in file order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Find a key by name, preferring the highest cycle.
    pub fn find(&self, name: &str) -> Option<&Key> {
        self.keys.iter().filter(|k| k.name == name).max_by_key(|k| k.cycle)
    }
}
