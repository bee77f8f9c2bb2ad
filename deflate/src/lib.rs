//! Raw DEFLATE (RFC 1951) encoder restricted to stored blocks.
//!
//! No Huffman coding and no LZ77 matching happen here: input is cut into
//! blocks of at most [`MAX_STORED_LEN`] bytes, each preceded by a 5-byte
//! header. The output is slightly larger than the input but any compliant
//! inflater can read it.
//!
//! ```
//! use deflate::Deflater;
//!
//! let mut deflater = Deflater::new(Vec::new());
//! deflater.put(b"hello").unwrap();
//! let stream = deflater.finish_into_inner().unwrap();
//! assert_eq!(stream, [0x01, 0x05, 0x00, 0xFA, 0xFF, b'h', b'e', b'l', b'l', b'o']);
//! ```

mod buffer;
pub mod deflate;
pub mod error;
pub mod header;
pub mod sink;
pub mod state;

pub use crate::deflate::{AutoFinisher, Deflater};
pub use error::{DeflateError, Result};
pub use header::{BlockHeader, HEADER_LEN};
pub use sink::Sink;
pub use state::State;

/// Largest payload a single stored block can carry.
pub const MAX_STORED_LEN: usize = u16::MAX as usize;

/// Size of the staging buffer: one header plus one full payload.
pub const BUFFER_LEN: usize = HEADER_LEN + MAX_STORED_LEN;

/// Exact size of the stream produced for `input_len` bytes written in one go,
/// or `None` when that size does not fit in a `usize`.
pub const fn stored_len(input_len: usize) -> Option<usize> {
    let blocks = if input_len == 0 {
        1
    } else {
        input_len.div_ceil(MAX_STORED_LEN)
    };
    match blocks.checked_mul(HEADER_LEN) {
        Some(headers) => input_len.checked_add(headers),
        None => None,
    }
}

/// Encodes `data` as a complete stored stream in memory.
///
/// Produces the same bytes as feeding `data` to a [`Deflater`] and finishing it.
pub fn deflate_stored(data: &[u8]) -> Vec<u8> {
    // a slice is at most isize::MAX bytes, so the size always fits
    let mut out = Vec::with_capacity(stored_len(data.len()).unwrap_or(data.len()));
    if data.is_empty() {
        out.extend_from_slice(&BlockHeader::new(true, 0).encode());
        return out;
    }

    let n = data.len().div_ceil(MAX_STORED_LEN);
    for (i, chunk) in data.chunks(MAX_STORED_LEN).enumerate() {
        let header = BlockHeader::new(i + 1 == n, chunk.len() as u16);
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(chunk);
    }
    out
}
