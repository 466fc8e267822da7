//! Push-mode playback: a timer moves bytes from the source into a sink.
//!
//! In pull mode the audio backend calls [`CyclicSource::read`] itself. In push
//! mode nothing pulls, so a periodic tick asks the sink how much room it has
//! and writes whole periods into it until the sink is full, a read comes
//! back short, or the sink takes only part of a write.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use super::cyclic::CyclicSource;
use crate::config::PushConfig;

/// The playback side of push mode.
pub trait AudioSink {
    /// Preferred number of bytes per write.
    fn period_size(&self) -> usize;

    /// Bytes the sink can take right now without blocking.
    fn bytes_free(&self) -> usize;

    /// Queues `data` for playback, returning how many bytes were accepted.
    ///
    /// Accepting fewer than `data.len()` bytes is allowed; the caller keeps
    /// the rest and offers it again first.
    fn write(&mut self, data: &[u8]) -> usize;
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn period_size(&self) -> usize {
        (**self).period_size()
    }

    fn bytes_free(&self) -> usize {
        (**self).bytes_free()
    }

    fn write(&mut self, data: &[u8]) -> usize {
        (**self).write(data)
    }
}

/// Scratch space for [`push_tick`], plus any bytes a sink did not take.
///
/// Bytes read from the source but refused by a short write stay here and
/// go out first on the next tick, so the sink never skips stream content.
#[derive(Debug, Clone)]
pub struct PushBuffer {
    data: Vec<u8>,
    pending: Range<usize>,
}

impl PushBuffer {
    /// Creates a buffer moving at most `size` bytes per write.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            pending: 0..0,
        }
    }

    /// Largest period this buffer can carry.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes read from the source and still waiting for the sink.
    pub fn pending(&self) -> &[u8] {
        &self.data[self.pending.clone()]
    }
}

/// Runs one push-mode tick and returns the number of bytes written.
///
/// Bytes left over from an earlier short write go out first. Then the tick
/// writes `bytes_free / period_size` chunks of one period each. A period
/// larger than the buffer is clamped to it. The tick ends early at the
/// first short read, which means the source is closed or empty, and at the
/// first short write, whose unwritten tail is kept in `buffer`.
pub fn push_tick<S: AudioSink + ?Sized>(
    source: &CyclicSource,
    sink: &mut S,
    buffer: &mut PushBuffer,
) -> usize {
    let period = sink.period_size().min(buffer.capacity());
    if period == 0 {
        return 0;
    }

    let mut written = 0;
    if !buffer.pending.is_empty() {
        let accepted = sink.write(buffer.pending());
        written += accepted;
        buffer.pending.start += accepted;
        if !buffer.pending.is_empty() {
            return written;
        }
    }

    let mut chunks = sink.bytes_free() / period;
    while chunks > 0 {
        let len = source.read(&mut buffer.data[..period]);
        if len > 0 {
            let accepted = sink.write(&buffer.data[..len]);
            written += accepted;
            if accepted < len {
                buffer.pending = accepted..len;
                break;
            }
        }
        if len != period {
            break;
        }
        chunks -= 1;
    }
    written
}

/// A background thread running [`push_tick`] at a fixed interval.
///
/// The first tick runs as soon as the thread starts and a final tick runs
/// after a stop request. The pump owns the sink while it runs;
/// [`stop`](Self::stop) hands it back.
/// Dropping the pump stops the thread as well.
pub struct PushPump<S: AudioSink + Send + 'static> {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<S>>,
}

impl<S: AudioSink + Send + 'static> PushPump<S> {
    /// Starts pushing from `source` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from the OS if the thread cannot be spawned.
    pub fn spawn(source: CyclicSource, mut sink: S, config: PushConfig) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::Builder::new()
            .name("asktone-push".to_string())
            .spawn(move || {
                log::debug!("push pump: started, interval {:?}", config.interval);
                let mut buffer = PushBuffer::new(config.scratch_size);
                loop {
                    push_tick(&source, &mut sink, &mut buffer);
                    if !flag.load(Ordering::Acquire) {
                        break;
                    }
                    thread::sleep(config.interval);
                }
                log::debug!("push pump: stopped");
                sink
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Returns true until the pump has been asked to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stops the thread and returns the sink.
    ///
    /// Returns `None` only if the pump thread panicked.
    pub fn stop(mut self) -> Option<S> {
        self.running.store(false, Ordering::Release);
        self.handle.take().and_then(|handle| handle.join().ok())
    }
}

impl<S: AudioSink + Send + 'static> Drop for PushPump<S> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
