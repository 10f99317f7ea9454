use std::io;

use thiserror::Error;

use crate::debug::TagMismatch;

/// Errors that may occur while writing or reading bit streams.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested number of bits is not supported by the
    /// operation.
    #[error("unsupported bit count: {0}")]
    Width(u32),

    /// A read would exceed the declared length of the stream, or the
    /// underlying octets ran out before it.
    #[error("attempted to read {count} bits past the end of stream at bit {tell}")]
    Eof { count: u32, tell: usize },

    /// Attempted to rewind a writer to a position outside of its
    /// backing buffer.
    #[error("rewind to bit {position} outside of {capacity} bit buffer")]
    RewindOutOfRange { position: usize, capacity: usize },

    /// A write does not fit into the fixed capacity of the writer.
    #[error("buffer capacity of {capacity} bits exhausted")]
    Overflow { capacity: usize },

    /// The target of an octet copy cannot hold all written octets.
    #[error("target buffer too small: need {needed} octets, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// A debug tag did not match the operation being performed.
    #[error("{0}")]
    DebugTag(#[from] TagMismatch),

    /// An I/O error occured in an octet source or sink.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Convenience alias for results with the crate's [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;
