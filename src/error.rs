//! Error type shared by the synthesizer, the modulator and the generator.
//!
//! Only buffer generation can fail. Streaming never does: reading an empty or
//! closed [`CyclicSource`](crate::CyclicSource) yields zero bytes and writes are
//! a no-op, since playback drivers poll in tight loops.

/// Errors raised while building a sample buffer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The audio format cannot be synthesized.
    #[error("invalid audio format: {reason}")]
    InvalidFormat { reason: String },

    /// A tone or modem parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A transmission was requested with no message bytes.
    #[error("message is empty")]
    EmptyMessage,
}

impl Error {
    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        Error::InvalidFormat {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
