//! Basket loading: read a basket's TKey, decompress its payload.

use crate::decompress::decompress;
use crate::error::{Result, RootError};
use crate::key::Key;
use crate::rbuffer::RBuffer;

/// Read and decompress the basket stored at `seek`.
///
/// The returned payload is the basket object bytes: big-endian element data,
/// followed by the entry-offset table for variable-length branches.
pub fn read_basket(file_data: &[u8], seek: u64, large_file: bool) -> Result<Vec<u8>> {
    let pos = seek as usize;
    let mut r = RBuffer::new(file_data);
    r.seek(pos);
    let key = Key::read(&mut r, large_file)?;

    let end = pos + key.n_bytes as usize;
    if end > file_data.len() {
        return Err(RootError::Underflow {
            offset: pos,
            need: key.n_bytes as usize,
            have: file_data.len().saturating_sub(pos),
        });
    }

    let body = &file_data[pos + key.key_len as usize..end];
    if body.len() == key.obj_len as usize {
        // Stored uncompressed.
        Ok(body.to_vec())
    } else {
        decompress(body, key.obj_len as usize)
    }
}
