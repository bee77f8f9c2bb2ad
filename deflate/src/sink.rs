use std::io::{self, Write};

/// Downstream destination for encoded blocks.
///
/// `write` must either accept every byte or fail. Any failure is terminal for
/// the encoder that owns the sink.
pub trait Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn close(&mut self) -> io::Result<()>;
}

// `io::Write` has no close, so closing a writer only flushes it. The writer
// itself is released when the encoder is dropped or `into_inner` is called.
impl<W: Write> Sink for W {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(self)
    }

    fn close(&mut self) -> io::Result<()> {
        Write::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Sink;
    use rstest::*;
    use std::io::{BufWriter, Cursor};

    #[rstest]
    fn test_vec_sink() {
        let mut v: Vec<u8> = Vec::new();
        Sink::write(&mut v, b"abc").unwrap();
        Sink::write(&mut v, b"").unwrap();
        Sink::close(&mut v).unwrap();
        assert_eq!(v, b"abc");
    }

    #[rstest]
    fn test_buffered_sink_flushes_on_close() {
        let mut w = BufWriter::new(Cursor::new(Vec::new()));
        Sink::write(&mut w, b"stored").unwrap();
        assert!(w.get_ref().get_ref().is_empty());
        Sink::close(&mut w).unwrap();
        assert_eq!(w.get_ref().get_ref(), b"stored");
    }

    #[rstest]
    fn test_short_writer_fails() {
        let mut slot = [0u8; 4];
        let mut w: &mut [u8] = &mut slot;
        let err = Sink::write(&mut w, b"too long").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);
    }
}
