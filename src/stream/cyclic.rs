//! Cyclic read-only byte source over a replaceable sample buffer.

use std::io;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{AudioFormat, SampleBuffer};

#[derive(Default)]
struct Inner {
    data: Vec<u8>,
    format: Option<AudioFormat>,
    pos: usize,
    open: bool,
}

/// A read-only stream that replays its buffer forever.
///
/// Reads copy bytes from the cursor onward and wrap to the start when they
/// reach the end, so the same content repeats indefinitely. Every read and
/// every buffer replacement takes the same lock: a reader sees either the
/// whole old buffer or the whole new one, never a mix.
///
/// Cloning yields another handle to the same stream, which lets a playback
/// thread read while the owner swaps in new content.
///
/// # Examples
///
/// ```
/// use asktone::{AudioFormat, CyclicSource, synthesize};
///
/// let tone = synthesize(&AudioFormat::cd_mono(), 1_000, 1000.0).unwrap();
/// let source = CyclicSource::from_buffer(tone);
/// source.start();
///
/// let mut out = [0u8; 256];
/// assert_eq!(source.read(&mut out), 256);
/// ```
#[derive(Clone, Default)]
pub struct CyclicSource {
    inner: Arc<Mutex<Inner>>,
}

impl CyclicSource {
    /// Creates a closed source with no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed source over `buffer`.
    pub fn from_buffer(buffer: SampleBuffer) -> Self {
        let source = Self::new();
        source.replace(buffer);
        source
    }

    /// Rewinds to the first byte and opens the stream for reading.
    pub fn start(&self) {
        let mut inner = self.inner.lock();
        inner.pos = 0;
        inner.open = true;
    }

    /// Rewinds to the first byte and closes the stream.
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        inner.pos = 0;
        inner.open = false;
    }

    /// Returns true between `start()` and `stop()`.
    pub fn is_open(&self) -> bool {
        self.inner.lock().open
    }

    /// Fills `out` from the cursor onward, wrapping at the end of the buffer.
    ///
    /// Returns the number of bytes copied: `out.len()` while the stream is
    /// open and has content, 0 when it is closed or empty.
    pub fn read(&self, out: &mut [u8]) -> usize {
        let mut guard = self.inner.lock();
        let Inner { data, pos, open, .. } = &mut *guard;
        if !*open || data.is_empty() {
            return 0;
        }

        let mut total = 0;
        while total < out.len() {
            // One contiguous copy, never past the end of the buffer
            let chunk = (data.len() - *pos).min(out.len() - total);
            out[total..total + chunk].copy_from_slice(&data[*pos..*pos + chunk]);
            *pos = (*pos + chunk) % data.len();
            total += chunk;
        }
        total
    }

    /// Writing is not supported; always returns 0.
    pub fn write(&self, _data: &[u8]) -> usize {
        0
    }

    /// Length of the backing buffer.
    ///
    /// The whole buffer always counts as available since it repeats.
    pub fn bytes_available(&self) -> usize {
        self.inner.lock().data.len()
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.inner.lock().pos
    }

    /// Format of the current content, if any has been set.
    pub fn format(&self) -> Option<AudioFormat> {
        self.inner.lock().format
    }

    /// Swaps in a new buffer and rewinds the cursor.
    ///
    /// The open/closed state is kept, so a running stream continues with the
    /// new content from its first byte.
    pub fn replace(&self, buffer: SampleBuffer) {
        let format = *buffer.format();
        let data = buffer.into_bytes();
        let len = data.len();

        let old = {
            let mut inner = self.inner.lock();
            inner.format = Some(format);
            inner.pos = 0;
            mem::replace(&mut inner.data, data)
        };
        log::debug!("cyclic source: swapped {} bytes for {}", old.len(), len);
    }

    /// Drops the content; reads return 0 until a buffer is set again.
    pub fn clear(&self) {
        let old = {
            let mut inner = self.inner.lock();
            inner.format = None;
            inner.pos = 0;
            mem::take(&mut inner.data)
        };
        drop(old);
    }
}

impl io::Read for CyclicSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(CyclicSource::read(self, buf))
    }
}

/// Writes are accepted and discarded: `Ok(0)`, never an error.
impl io::Write for CyclicSource {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(CyclicSource::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
