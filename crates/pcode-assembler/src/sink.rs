//! Output sinks for flushed code.
//!
//! The flush pass needs a seekable byte destination: it writes forward,
//! jumps back to patch earlier label references, then returns to the end.

use std::io::{self, Seek, SeekFrom, Write};

/// Seekable destination for finished instruction bytes.
pub trait OutputSink {
    /// Current write position.
    fn position(&mut self) -> io::Result<u64>;

    /// Move the write position to `offset`.
    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Move the write position to the end of the written data.
    fn seek_end(&mut self) -> io::Result<()>;

    /// Write bytes at the current position.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Write a 4-byte little-endian word.
    fn write_word(&mut self, value: i32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write `count` zero bytes.
    fn fill(&mut self, count: usize) -> io::Result<()> {
        const ZEROS: [u8; 16] = [0; 16];
        let mut left = count;
        while left > 0 {
            let step = left.min(ZEROS.len());
            self.write_bytes(&ZEROS[..step])?;
            left -= step;
        }
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn position(&mut self) -> io::Result<u64> {
        (**self).position()
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        (**self).seek(offset)
    }

    fn seek_end(&mut self) -> io::Result<()> {
        (**self).seek_end()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }

    fn write_word(&mut self, value: i32) -> io::Result<()> {
        (**self).write_word(value)
    }

    fn fill(&mut self, count: usize) -> io::Result<()> {
        (**self).fill(count)
    }
}

// ============================================================================
// In-memory sink
// ============================================================================

/// Growable in-memory buffer. Writes after a seek overwrite existing bytes.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Vec<u8>,
    position: usize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that continues after `prefix`, e.g. an object header.
    pub fn with_prefix(prefix: Vec<u8>) -> Self {
        let position = prefix.len();
        Self {
            buffer: prefix,
            position,
        }
    }

    /// Everything written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the sink and return its buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn position(&mut self) -> io::Result<u64> {
        Ok(self.position as u64)
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        let offset = usize::try_from(offset)
            .ok()
            .filter(|&offset| offset <= self.buffer.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("seek to {} past end of {} byte buffer", offset, self.buffer.len()),
                )
            })?;
        self.position = offset;
        Ok(())
    }

    fn seek_end(&mut self) -> io::Result<()> {
        self.position = self.buffer.len();
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let end = self.position + bytes.len();
        let overlap = end.min(self.buffer.len()).saturating_sub(self.position);
        self.buffer[self.position..self.position + overlap].copy_from_slice(&bytes[..overlap]);
        self.buffer.extend_from_slice(&bytes[overlap..]);
        self.position = end;
        Ok(())
    }
}

// ============================================================================
// Adapter for std::io writers
// ============================================================================

/// Sink over any seekable writer, such as a `File` or an `io::Cursor`.
#[derive(Debug)]
pub struct WriteSink<W> {
    inner: W,
}

impl<W: Write + Seek> WriteSink<W> {
    /// Wrap a writer. Output starts at the writer's current position.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Seek> OutputSink for WriteSink<W> {
    fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn seek_end(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::End(0)).map(|_| ())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }
}
