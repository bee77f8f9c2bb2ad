#![allow(dead_code)]

use std::io::{self, Read};

use deflate::{BlockHeader, Sink, HEADER_LEN};
use flate2::read::DeflateDecoder;

/// Splits a stored stream into its blocks, checking framing as it goes.
pub fn split_blocks(stream: &[u8]) -> Result<Vec<(BlockHeader, &[u8])>, String> {
    let mut blocks = Vec::new();
    let mut rest = stream;
    let mut offset = 0;

    while !rest.is_empty() {
        if rest.len() < HEADER_LEN {
            return Err(format!("truncated header at {}", offset));
        }
        let raw = [rest[0], rest[1], rest[2], rest[3], rest[4]];
        let header =
            BlockHeader::decode(&raw).ok_or_else(|| format!("bad header at {}", offset))?;

        let end = HEADER_LEN + header.len as usize;
        if rest.len() < end {
            return Err(format!("truncated payload at {}", offset));
        }
        blocks.push((header, &rest[HEADER_LEN..end]));
        rest = &rest[end..];
        offset += end;

        if header.is_final {
            if !rest.is_empty() {
                return Err(format!("{} bytes after final block", rest.len()));
            }
            return Ok(blocks);
        }
    }

    Err("missing final block".to_string())
}

pub fn payload(blocks: &[(BlockHeader, &[u8])]) -> Vec<u8> {
    blocks.iter().flat_map(|(_, p)| p.iter().copied()).collect()
}

/// Decodes with a general purpose inflater.
pub fn inflate(stream: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(stream).read_to_end(&mut out)?;
    Ok(out)
}

/// Records every call made by the encoder.
#[derive(Debug, Default)]
pub struct Recorder {
    pub data: Vec<u8>,
    pub writes: usize,
    pub flushes: usize,
    pub closes: usize,
}

impl Sink for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.data.extend_from_slice(buf);
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closes += 1;
        Ok(())
    }
}

/// Accepts `budget` writes, then fails every call.
#[derive(Debug)]
pub struct Flaky {
    pub budget: usize,
    pub data: Vec<u8>,
}

impl Sink for Flaky {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "sink gone"));
        }
        self.budget -= 1;
        self.data.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "sink gone"))
    }
}
