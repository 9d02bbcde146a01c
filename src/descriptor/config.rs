//! Decoder configuration for descriptor streams
//!
//! The decoder is best-effort by design: odd key lengths are substituted and unknown
//! type tags trigger a byte-wise realignment. This module bounds how far that goes.

use crate::file::HEADER_LEN;

/// Configuration for a single descriptor decode
///
/// All bounds are inclusive. A key length announced outside `1..=max_key_len` is
/// treated as suspicious and replaced with `default_key_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Number of leading bytes skipped before the first entry (default: 28)
    pub header_len: usize,

    /// Key length used when the announced length is zero or too large (default: 4)
    pub default_key_len: usize,

    /// Largest announced key length that is taken at face value (default: 256)
    pub max_key_len: u32,

    /// Maximum number of realignment attempts per decode
    /// `None` allows one attempt per byte of input, which bounds the work on any stream
    pub max_resyncs: Option<usize>,

    /// Maximum container nesting depth (default: 64)
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_len: HEADER_LEN,
            default_key_len: 4,
            max_key_len: 256,
            max_resyncs: None,
            max_depth: 64,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration that refuses any realignment
    ///
    /// The first unknown type tag halts the decode. Useful to detect files that only
    /// decode thanks to the recovery heuristic.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_resyncs: Some(0),
            ..Self::default()
        }
    }

    /// Creates a configuration for badly damaged or deeply nested files
    ///
    /// Accepts nesting up to 256 levels; realignment stays bounded by the input size.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_depth: 256,
            max_resyncs: None,
            ..Self::default()
        }
    }

    /// Returns the key length actually consumed for an announced length `announced`.
    #[must_use]
    pub fn effective_key_len(&self, announced: u32) -> usize {
        if announced == 0 || announced > self.max_key_len {
            self.default_key_len
        } else {
            announced as usize
        }
    }

    /// Returns the realignment budget for an input of `buffer_len` bytes.
    #[must_use]
    pub fn resync_limit(&self, buffer_len: usize) -> usize {
        self.max_resyncs.unwrap_or(buffer_len)
    }
}
