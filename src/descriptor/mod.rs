//! Decoder for the tagged descriptor stream of gradient-definition files.
//!
//! A gradient file is a tree of tag-length-value entries. Containers (`Objc`) and lists
//! (`VlLs`) nest further entries; every other entry carries a single typed value. The
//! decoder walks the tree once, captures the values that matter for gradients in a
//! [`ParseContext`] and reports everything it sees to a [`DecodeObserver`].
//!
//! # Key Components
//!
//! - [`DescriptorDecoder`] / [`decode`] - Recursive-descent decoder with realignment
//! - [`TypeTag`] - Closed set of entry types
//! - [`ParseContext`] - Current object tracking and stop accumulation
//! - [`DecoderConfig`] - Key length, realignment and nesting bounds
//! - [`DecodeObserver`] - Structured diagnostics
//!
//! # Examples
//!
//! ```rust
//! use grdscope::descriptor::{decode, DecoderConfig};
//! use grdscope::RecordingObserver;
//!
//! let mut data = b"8BGR\x00\x05".to_vec();
//! data.resize(28, 0);
//! // A single `patt` entry with key `Ptrn`
//! data.extend_from_slice(&[0, 0, 0, 0]);
//! data.extend_from_slice(b"Ptrnpatt");
//!
//! let mut recorder = RecordingObserver::new();
//! let output = decode(&data, DecoderConfig::default(), &mut recorder)?;
//! assert_eq!(output.summary.entries, 1);
//! assert_eq!(recorder.entries().count(), 1);
//! # Ok::<(), grdscope::Error>(())
//! ```

mod config;
mod context;
mod decoder;
mod observer;
mod types;

pub use config::DecoderConfig;
pub use context::{ParseContext, RawGradient, RawStopFields};
pub use decoder::{decode, DecodeOutput, DecodeSummary, DescriptorDecoder, ListItem};
pub use observer::{
    DecodeEvent, DecodeObserver, EntryValue, HaltReason, LogObserver, NullObserver,
    RecordingObserver, SkipReason,
};
pub use types::{keys, tag_text, TypeTag, PERCENT_UNIT};
