use std::fmt::Debug;

use crate::header::{BlockHeader, HEADER_LEN};
use crate::{BUFFER_LEN, MAX_STORED_LEN};

/// Write position inside a [`BlockBuffer`], always within
/// `[HEADER_LEN, BUFFER_LEN]`.
///
/// Only `reset` and a bounds-checked `advance` can move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor(usize);

impl Cursor {
    fn new() -> Self {
        Cursor(HEADER_LEN)
    }

    pub(crate) fn get(self) -> usize {
        self.0
    }

    fn remaining(self) -> usize {
        BUFFER_LEN - self.0
    }

    fn advance(&mut self, n: usize) {
        assert!(
            n <= self.remaining(),
            "cursor overflow: {} + {} > {}",
            self.0,
            n,
            BUFFER_LEN
        );
        self.0 += n;
    }

    fn reset(&mut self) {
        self.0 = HEADER_LEN;
    }
}

/// Fixed-size staging area for one stored block: a reserved header region
/// followed by up to `MAX_STORED_LEN` payload bytes.
pub(crate) struct BlockBuffer {
    data: Vec<u8>,
    cursor: Cursor,
}

impl Debug for BlockBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockBuffer")
            .field("cursor", &self.cursor.get())
            .field("payload", &self.payload_len())
            .finish()
    }
}

impl BlockBuffer {
    pub(crate) fn new() -> Self {
        Self {
            data: vec![0u8; BUFFER_LEN],
            cursor: Cursor::new(),
        }
    }

    pub(crate) fn payload_len(&self) -> usize {
        self.cursor.get() - HEADER_LEN
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cursor.get() == HEADER_LEN
    }

    pub(crate) fn is_full(&self) -> bool {
        self.cursor.remaining() == 0
    }

    pub(crate) fn push(&mut self, b: u8) {
        let pos = self.cursor.get();
        self.cursor.advance(1);
        self.data[pos] = b;
    }

    /// Copies as much of `src` as fits and returns the number of bytes taken.
    pub(crate) fn fill(&mut self, src: &[u8]) -> usize {
        let n = std::cmp::min(src.len(), self.cursor.remaining());
        let pos = self.cursor.get();
        self.data[pos..pos + n].copy_from_slice(&src[..n]);
        self.cursor.advance(n);
        n
    }

    /// Stamps the header for the pending payload and returns the whole block.
    /// The cursor is left untouched until `clear`.
    pub(crate) fn seal(&mut self, is_final: bool) -> &[u8] {
        let len = self.payload_len();
        debug_assert!(len <= MAX_STORED_LEN);

        let header = BlockHeader::new(is_final, len as u16);
        self.data[..HEADER_LEN].copy_from_slice(&header.encode());
        &self.data[..self.cursor.get()]
    }

    pub(crate) fn clear(&mut self) {
        self.cursor.reset();
    }
}
