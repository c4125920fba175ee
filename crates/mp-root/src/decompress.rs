//! ROOT compression-block decoding.
//!
//! Compressed payloads are a sequence of blocks, each with a 9-byte header:
//!
//! ```text
//! bytes 0-1:  algorithm tag ("ZL", "L4", "ZS", "XZ")
//! byte  2:    method byte (ignored)
//! bytes 3-5:  compressed size,   3-byte little-endian
//! bytes 6-8:  uncompressed size, 3-byte little-endian
//! ```
//!
//! Analysis ntuples use zlib, LZ4 or ZSTD; XZ is rejected.

use std::io::Read;

use crate::error::{Result, RootError};

/// Decompress a ROOT block sequence into exactly `expected_len` bytes.
pub fn decompress(src: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected_len);
    let mut offset = 0;

    while out.len() < expected_len && offset + 9 <= src.len() {
        let tag = [src[offset], src[offset + 1]];
        let c_size = le24(&src[offset + 3..offset + 6]);
        let u_size = le24(&src[offset + 6..offset + 9]);
        offset += 9;

        let end = offset.checked_add(c_size).filter(|&e| e <= src.len()).ok_or_else(|| {
            RootError::Decompression(format!(
                "block claims {c_size} compressed bytes but only {} remain",
                src.len() - offset
            ))
        })?;
        let block = &src[offset..end];

        let decoded = match &tag {
            b"ZL" => inflate_zlib(block)?,
            b"L4" => inflate_lz4(block, u_size)?,
            b"ZS" => inflate_zstd(block)?,
            b"XZ" => {
                return Err(RootError::Decompression(
                    "XZ-compressed baskets are not supported by this reader".into(),
                ));
            }
            other => {
                return Err(RootError::Decompression(format!(
                    "unknown compression tag {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };

        if decoded.len() != u_size {
            return Err(RootError::Decompression(format!(
                "block decoded to {} bytes, header said {u_size}",
                decoded.len()
            )));
        }

        out.extend_from_slice(&decoded);
        offset = end;
    }

    if out.len() != expected_len {
        return Err(RootError::Decompression(format!(
            "decompressed {} bytes in total, expected {expected_len}",
            out.len()
        )));
    }

    Ok(out)
}

fn inflate_zlib(block: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(block)
        .read_to_end(&mut out)
        .map_err(|e| RootError::Decompression(format!("zlib: {e}")))?;
    Ok(out)
}

fn inflate_lz4(block: &[u8], expected: usize) -> Result<Vec<u8>> {
    // ROOT prefixes LZ4 payloads with an 8-byte xxhash64 of the uncompressed
    // data; the checksum is not verified here.
    if block.len() < 8 {
        return Err(RootError::Decompression("LZ4 block too small for checksum header".into()));
    }
    lz4_flex::decompress(&block[8..], expected)
        .map_err(|e| RootError::Decompression(format!("lz4: {e}")))
}

fn inflate_zstd(block: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ruzstd::decoding::StreamingDecoder::new(block)
        .map_err(|e| RootError::Decompression(format!("zstd: {e}")))?;
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(|e| RootError::Decompression(format!("zstd: {e}")))?;
    Ok(out)
}

fn le24(b: &[u8]) -> usize {
    b[0] as usize | (b[1] as usize) << 8 | (b[2] as usize) << 16
}

/// Build a ROOT-style block (header + payload) around already-compressed
/// bytes. Shared by the round-trip tests and the synthetic-file fixtures.
#[doc(hidden)]
pub fn frame_block(tag: &[u8; 2], method: u8, compressed: &[u8], uncompressed_len: usize) -> Vec<u8> {
    let mut block = Vec::with_capacity(9 + compressed.len());
    block.extend_from_slice(tag);
    block.push(method);
    for shift in [0u32, 8, 16] {
        block.push(((compressed.len() as u32 >> shift) & 0xFF) as u8);
    }
    for shift in [0u32, 8, 16] {
        block.push(((uncompressed_len as u32 >> shift) & 0xFF) as u8);
    }
    block.extend_from_slice(compressed);
    block
}

/// Compress `data` with zlib and frame it as a ROOT block sequence.
#[doc(hidden)]
pub fn zlib_block(data: &[u8]) -> Vec<u8> {
    use std::io::Write;
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).expect("in-memory zlib write");
    let compressed = encoder.finish().expect("in-memory zlib finish");
    frame_block(b"ZL", 0x08, &compressed, data.len())
}
