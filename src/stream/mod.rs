//! Streaming the generated buffer to a playback driver.
//!
//! Pull mode: the driver calls [`CyclicSource::read`] whenever it needs data.
//! Push mode: [`push_tick`] (or a [`PushPump`] calling it on a timer) writes
//! into an [`AudioSink`].

mod cyclic;
mod push;

pub use cyclic::CyclicSource;
pub use push::{AudioSink, PushBuffer, PushPump, push_tick};
