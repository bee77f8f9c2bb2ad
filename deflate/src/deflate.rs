// https://datatracker.ietf.org/doc/html/rfc1951#section-3.2.4
use std::io::{self, Write};

use tracing::{debug, trace, warn};

use crate::{
    buffer::BlockBuffer,
    error::{DeflateError, Result},
    sink::Sink,
    state::State,
};

/// Streaming DEFLATE encoder that emits stored (uncompressed) blocks only.
///
/// Bytes are staged in a fixed 64 KiB block buffer. A block is handed to the
/// sink when the buffer is full and more input arrives, on [`flush`], and on
/// [`finish`], which writes the final block (possibly empty).
///
/// The output is a raw DEFLATE stream, without zlib or gzip framing.
///
/// [`flush`]: Deflater::flush
/// [`finish`]: Deflater::finish
#[derive(Debug)]
pub struct Deflater<S: Sink> {
    sink: S,
    buffer: BlockBuffer,
    state: State,
    total_in: u64,
    total_out: u64,
    blocks: u64,
}

impl<S: Sink> Deflater<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            buffer: BlockBuffer::new(),
            state: State::Open,
            total_in: 0,
            total_out: 0,
            blocks: 0,
        }
    }

    pub fn put_byte(&mut self, b: u8) -> Result<()> {
        self.state.ensure_open("write to")?;
        if self.buffer.is_full() {
            self.emit(false)?;
        }
        self.buffer.push(b);
        self.total_in += 1;
        Ok(())
    }

    /// Appends `bytes[offset..offset + length]`, emitting as many intermediate
    /// blocks as needed. The window is validated before any byte is copied.
    pub fn put_slice(&mut self, bytes: &[u8], offset: usize, length: usize) -> Result<()> {
        self.state.ensure_open("write to")?;
        if offset > bytes.len() || length > bytes.len() - offset {
            return Err(DeflateError::OutOfBounds {
                offset,
                length,
                size: bytes.len(),
            });
        }

        let mut rest = &bytes[offset..offset + length];
        while !rest.is_empty() {
            if self.buffer.is_full() {
                self.emit(false)?;
            }
            let n = self.buffer.fill(rest);
            rest = &rest[n..];
            self.total_in += n as u64;
        }
        Ok(())
    }

    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_slice(bytes, 0, bytes.len())
    }

    /// Emits the pending block, if it holds any payload, as a non-final block
    /// and flushes the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.state.ensure_open("flush")?;
        if !self.buffer.is_empty() {
            self.emit(false)?;
        }
        let res = self.sink.flush();
        self.check(res)
    }

    /// Writes the pending payload as the final block. An empty final block is
    /// written when nothing is pending. Can only be called once.
    pub fn finish(&mut self) -> Result<()> {
        self.state.ensure_open("finish")?;
        self.emit(true)?;
        self.state = State::Finished;
        debug!(
            total_in = self.total_in,
            total_out = self.total_out,
            blocks = self.blocks,
            "finished stored stream"
        );
        Ok(())
    }

    /// Finishes the stream if it is still open, then closes the sink.
    /// Closing an already closed stream does nothing.
    ///
    /// The sink stays owned by the encoder. For [`std::io::Write`] sinks,
    /// closing only flushes, and the writer (a `File`, a socket) is released
    /// when the encoder is dropped. Use [`close_into_inner`] to get it back
    /// straight away.
    ///
    /// [`close_into_inner`]: Deflater::close_into_inner
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            State::Open => self.finish()?,
            State::Finished => {}
            State::Closed => return Ok(()),
            State::Failed => return self.state.ensure_open("close"),
        }
        let res = self.sink.close();
        self.check(res)?;
        self.state = State::Closed;
        debug!("closed sink");
        Ok(())
    }

    /// Closes the stream like [`close`] and hands the sink back.
    ///
    /// [`close`]: Deflater::close
    pub fn close_into_inner(mut self) -> Result<S> {
        self.close()?;
        Ok(self.sink)
    }

    /// Finishes the stream if it is still open and returns the sink without
    /// closing it.
    pub fn finish_into_inner(mut self) -> Result<S> {
        if self.state.is_open() {
            self.finish()?;
        }
        Ok(self.sink)
    }

    /// Returns the sink as is. Pending payload is discarded and no final
    /// block is written unless `finish` already ran.
    pub fn into_inner(self) -> S {
        self.sink
    }

    pub fn auto_finish(self) -> AutoFinisher<S> {
        AutoFinisher(self)
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Writing to the sink directly corrupts the stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished | State::Closed)
    }

    /// Payload bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Bytes handed to the sink so far, headers included.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Blocks handed to the sink so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Payload bytes waiting in the current block.
    pub fn pending(&self) -> usize {
        self.buffer.payload_len()
    }

    fn emit(&mut self, is_final: bool) -> Result<()> {
        debug_assert!(self.state.is_open());

        let len = self.buffer.payload_len();
        let block = self.buffer.seal(is_final);
        let n = block.len();
        let res = self.sink.write(block);
        self.check(res)?;
        self.buffer.clear();

        self.total_out += n as u64;
        self.blocks += 1;
        trace!(len, is_final, total_out = self.total_out, "emitted stored block");
        Ok(())
    }

    /// Moves to `Failed` on a sink error. The sink may hold part of a block,
    /// so the stream cannot be continued or finished after that.
    fn check(&mut self, res: io::Result<()>) -> Result<()> {
        if let Err(err) = res {
            self.state = State::Failed;
            warn!(error = %err, total_out = self.total_out, "sink failed");
            return Err(err.into());
        }
        Ok(())
    }
}

impl<S: Sink> Write for Deflater<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Deflater::flush(self)?;
        Ok(())
    }
}

/// Finishes the wrapped [`Deflater`] when dropped, if it is still open.
///
/// Errors at that point cannot be returned and are logged instead. Call
/// [`Deflater::finish`] explicitly when they matter.
#[derive(Debug)]
pub struct AutoFinisher<S: Sink>(Deflater<S>);

impl<S: Sink> Drop for AutoFinisher<S> {
    fn drop(&mut self) {
        match self.0.state() {
            State::Open => {}
            State::Failed => {
                warn!("dropping stored stream after a sink failure, not finishing");
                return;
            }
            State::Finished | State::Closed => return,
        }
        if let Err(err) = self.0.finish() {
            warn!(error = %err, "failed to finish stored stream on drop");
        }
    }
}

impl<S: Sink> std::ops::Deref for AutoFinisher<S> {
    type Target = Deflater<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Sink> std::ops::DerefMut for AutoFinisher<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
