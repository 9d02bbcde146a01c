//! Input file abstraction for gradient-definition files.
//!
//! This module supplies the resident byte buffer the descriptor decoder runs over. It
//! abstracts over different data sources (files on disk, memory buffers) and provides
//! bounds-checked access to the raw bytes and to the fixed-size file header.
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Loaded gradient file with header accessors
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//!
//! ## Parsing Infrastructure
//! - [`crate::file::parser::Parser`] - Cursor used by the descriptor decoder
//! - [`crate::file::io`] - Low-level big-endian primitive reads
//!
//! ## Backend Implementations
//! - `Physical` - Memory-mapped file backend for disk access
//! - `Memory` - In-memory buffer backend
//!
//! # File Layout
//!
//! A gradient file starts with a fixed header of [`crate::file::HEADER_LEN`] bytes
//! (signature, format version and the root descriptor preamble). The header is never
//! interpreted by the decoder; [`crate::file::File::signature`] and
//! [`crate::file::File::version`] exist for diagnostics only.
//!
//! # Examples
//!
//! ```rust,no_run
//! use grdscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("tests/samples/basic.grd"))?;
//! println!("{} bytes, signature {:?}", file.len(), file.signature());
//! # Ok::<(), grdscope::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Size of the fixed file header that precedes the descriptor stream.
pub const HEADER_LEN: usize = 28;

/// Backend trait for file data sources.
///
/// This trait abstracts over the source of gradient data, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;
}

/// A loaded gradient-definition file.
///
/// `File` owns the backend holding the raw bytes. It performs no decoding itself; see
/// [`crate::GradientFile`] for the decoded gradients.
///
/// # Examples
///
/// ```rust
/// use grdscope::File;
///
/// let mut data = b"8BGR\x00\x05".to_vec();
/// data.resize(28, 0);
/// let file = File::from_mem(data)?;
///
/// assert_eq!(file.signature(), Some(*b"8BGR"));
/// assert_eq!(file.version(), Some(5));
/// # Ok::<(), grdscope::Error>(())
/// ```
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
}

impl File {
    /// Loads a gradient file from the given path.
    ///
    /// The file is memory-mapped for efficient access.
    ///
    /// # Arguments
    ///
    /// * `file` - Path to the gradient file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped, or if it is empty.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads a gradient file from a memory buffer.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes of the gradient file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Empty`] if the buffer is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    /// Internal loader shared by both constructors.
    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
        })
    }

    /// Returns the total size of the loaded file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the file has a length of zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns the raw data of the loaded file.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns a slice of the file data at the given offset and length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the file.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.data.data_slice(offset, len)
    }

    /// Returns the four signature bytes at the start of the header, if present.
    ///
    /// Well-formed files carry `8BGR`; the decoder does not enforce this.
    #[must_use]
    pub fn signature(&self) -> Option<[u8; 4]> {
        self.data_slice(0, 4).ok()?.try_into().ok()
    }

    /// Returns the big-endian format version stored after the signature, if present.
    #[must_use]
    pub fn version(&self) -> Option<u16> {
        let bytes = self.data_slice(4, 2).ok()?;
        io::read_be::<u16>(bytes).ok()
    }
}
