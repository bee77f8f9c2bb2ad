/// Size of a stored block header: flag byte, LEN and NLEN.
pub const HEADER_LEN: usize = 5;

/// Header of a stored (BTYPE = 00) block.
///
/// Byte 0 carries BFINAL in its low bit. Since every block this crate writes
/// starts on a byte boundary, the remaining bits of that byte are the padding
/// RFC 1951 discards before LEN, so the byte layout is also a valid bit-level
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub is_final: bool,
    pub len: u16,
}

impl BlockHeader {
    pub fn new(is_final: bool, len: u16) -> Self {
        Self { is_final, len }
    }

    /// One's complement of `len`.
    pub fn nlen(&self) -> u16 {
        !self.len
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let [len_lo, len_hi] = self.len.to_le_bytes();
        let [nlen_lo, nlen_hi] = self.nlen().to_le_bytes();
        [self.is_final as u8, len_lo, len_hi, nlen_lo, nlen_hi]
    }

    /// Parses a header written by [`BlockHeader::encode`]. Returns `None` when
    /// the flag byte is not 0 or 1, or when NLEN does not complement LEN.
    pub fn decode(raw: &[u8; HEADER_LEN]) -> Option<Self> {
        let is_final = match raw[0] {
            0x00 => false,
            0x01 => true,
            _ => return None,
        };
        let len = u16::from_le_bytes([raw[1], raw[2]]);
        let nlen = u16::from_le_bytes([raw[3], raw[4]]);
        if nlen != !len {
            return None;
        }

        Some(Self { is_final, len })
    }
}
