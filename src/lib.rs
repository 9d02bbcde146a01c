// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # grdscope
//!
//! A bounds-checked reader for binary gradient-definition (`.grd`) files.
//!
//! Gradient files store their content as a tree of tag-length-value descriptor entries.
//! `grdscope` decodes that tree, picks out the gradients it describes and turns each into
//! an ordered list of points carrying an RGB color and an opacity, ready for rendering.
//!
//! ## Features
//!
//! - **Memory-mapped input** - Files are mapped, not copied, and every read is bounds-checked
//! - **Best-effort decoding** - Misaligned entries are recovered by a bounded realignment
//! - **Color conversion** - CMYK, RGB and HSB stops are converted to 8-bit RGB
//! - **Stop merging** - Independent color and opacity stops become one point sequence
//! - **Structured diagnostics** - Every decoded entry can be observed, no global switches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grdscope::prelude::*;
//!
//! let file = GradientFile::from_file("tests/samples/basic.grd".as_ref())?;
//! for gradient in file.gradients() {
//!     println!("{} ({} points)", gradient.name, gradient.len());
//!     for point in &gradient.points {
//!         println!("  {point}");
//!     }
//! }
//! # Ok::<(), grdscope::Error>(())
//! ```
//!
//! ### Observing a Decode
//!
//! ```rust
//! use grdscope::{DecoderConfig, GradientFile, RecordingObserver};
//!
//! let mut data = b"8BGR\x00\x05".to_vec();
//! data.resize(28, 0);
//!
//! let mut recorder = RecordingObserver::new();
//! let file = GradientFile::from_mem_with_config(data, DecoderConfig::strict(), &mut recorder)?;
//! assert!(file.is_empty());
//! for event in recorder.events() {
//!     println!("{event}");
//! }
//! # Ok::<(), grdscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`descriptor`] - Descriptor stream decoder, field capture and diagnostics
//! - [`gradient`] - Stop normalization, color conversion and merging
//! - [`GradientFile`] - Loads a file and runs the whole pipeline
//! - [`File`] and [`Parser`] - Raw file access and the bounds-checked cursor
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use grdscope::{Error, GradientFile};
//!
//! match GradientFile::from_file(std::path::Path::new("broken.grd")) {
//!     Ok(file) => println!("{} gradients", file.len()),
//!     Err(Error::OutOfBounds) => println!("File is truncated"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run decode --release
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

pub mod descriptor;
pub mod gradient;
mod grdfile;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust,no_run
/// use grdscope::{GradientFile, Result};
///
/// fn load(path: &str) -> Result<GradientFile> {
///     GradientFile::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `grdscope` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

/// Main entry point: a decoded gradient file.
pub use grdfile::GradientFile;

/// Decoder configuration, statistics and observers.
pub use descriptor::{
    DecodeEvent, DecodeObserver, DecodeSummary, DecoderConfig, LogObserver, NullObserver,
    RecordingObserver,
};

/// Gradient model types.
pub use gradient::{GradientDefinition, GradientMap, GradientPoint, Rgb};

/// Low-level file access and the bounds-checked cursor.
///
/// # Example
///
/// ```rust
/// use grdscope::Parser;
///
/// let data = [0x00, 0x00, 0x00, 0x04, b'N', b'm', b' ', b' '];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_be::<u32>()?, 4);
/// assert_eq!(parser.read_bytes(4)?, b"Nm  ");
/// # Ok::<(), grdscope::Error>(())
/// ```
pub use file::{parser::Parser, File, HEADER_LEN};
