//! TKey parsing: the record header ROOT uses to locate and describe every
//! stored object.

use crate::error::Result;
use crate::rbuffer::RBuffer;

/// A parsed TKey record.
#[derive(Debug, Clone)]
pub struct Key {
    /// Total bytes of key header plus (possibly compressed) object data.
    pub n_bytes: u32,
    /// Key class version.
    pub version: u16,
    /// Uncompressed object length.
    pub obj_len: u32,
    /// Length of the key header itself.
    pub key_len: u16,
    /// Cycle number within the directory.
    pub cycle: u16,
    /// Absolute file position of this key.
    pub seek_key: u64,
    /// Class name of the stored object.
    pub class_name: String,
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
}

impl Key {
    /// Parse a TKey at the cursor. `large_file` selects 64-bit seek pointers
    /// for files above the 32-bit limit.
    pub fn read(r: &mut RBuffer, large_file: bool) -> Result<Self> {
        let n_bytes = r.read_u32()?;
        let version = r.read_u16()?;
        let obj_len = r.read_u32()?;
        let _datime = r.read_u32()?;
        let key_len = r.read_u16()?;
        let cycle = r.read_u16()?;

        // Key versions above 1000 always use 64-bit seeks.
        let seek_key;
        if version > 1000 || large_file {
            seek_key = r.read_u64()?;
            let _seek_pdir = r.read_u64()?;
        } else {
            seek_key = r.read_u32()? as u64;
            let _seek_pdir = r.read_u32()?;
        }

        let class_name = r.read_string()?;
        let name = r.read_string()?;
        let title = r.read_string()?;

        Ok(Key { n_bytes, version, obj_len, key_len, cycle, seek_key, class_name, name, title })
    }
}

/// Public key summary returned by [`crate::RootFile::list_keys`].
#[derive(Debug, Clone)]
pub struct KeyInfo {
    /// Object name.
    pub name: String,
    /// Object class name (e.g. `TTree`).
    pub class_name: String,
    /// Cycle number.
    pub cycle: u16,
}

impl From<&Key> for KeyInfo {
    fn from(key: &Key) -> Self {
        Self { name: key.name.clone(), class_name: key.class_name.clone(), cycle: key.cycle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_string(out: &mut Vec<u8>, s: &str) {
        out.push(s.len() as u8);
        out.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn parse_small_file_key() {
        let mut data = Vec::new();
        data.extend_from_slice(&120u32.to_be_bytes()); // n_bytes
        data.extend_from_slice(&4u16.to_be_bytes()); // version
        data.extend_from_slice(&80u32.to_be_bytes()); // obj_len
        data.extend_from_slice(&0u32.to_be_bytes()); // datime
        data.extend_from_slice(&46u16.to_be_bytes()); // key_len
        data.extend_from_slice(&1u16.to_be_bytes()); // cycle
        data.extend_from_slice(&4096u32.to_be_bytes()); // seek_key
        data.extend_from_slice(&100u32.to_be_bytes()); // seek_pdir
        put_string(&mut data, "TTree");
        put_string(&mut data, "Events");
        put_string(&mut data, "");

        let mut r = RBuffer::new(&data);
        let key = Key::read(&mut r, false).unwrap();
        assert_eq!(key.n_bytes, 120);
        assert_eq!(key.obj_len, 80);
        assert_eq!(key.seek_key, 4096);
        assert_eq!(key.class_name, "TTree");
        assert_eq!(key.name, "Events");
        assert_eq!(KeyInfo::from(&key).cycle, 1);
    }
}
