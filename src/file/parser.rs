//! Low-level byte stream parser for descriptor decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data
//! parser used by the descriptor decoder. It offers bounds-checked access to binary data with
//! big-endian primitive extraction, raw slice extraction and UTF-16 text decoding, both
//! strict and lossy.
//!
//! # Architecture
//!
//! The parser is built around a simple cursor-based model that maintains a position within
//! a byte slice:
//!
//! - **Position tracking** - Maintains current offset for sequential parsing operations
//! - **Bounds checking** - All operations validate data availability before reading
//! - **Peeking** - Values and slices can be inspected without moving the cursor, which the
//!   entry decoder relies on for its length-prefix and key handling
//!
//! # Usage Examples
//!
//! ```rust
//! use grdscope::Parser;
//!
//! let data = [0x00, 0x00, 0x00, 0x00, b'G', b'r', b'a', b'd'];
//! let mut parser = Parser::new(&data);
//!
//! // The length prefix is inspected before anything is consumed
//! let length: u32 = parser.peek_be()?;
//! assert_eq!(length, 0);
//! assert_eq!(parser.pos(), 0);
//!
//! parser.advance_by(4)?;
//! assert_eq!(parser.peek_bytes(4)?, b"Grad");
//! # Ok::<(), grdscope::Error>(())
//! ```

use widestring::U16Str;

use crate::{
    file::io::{read_be_at, GrdIO},
    Result,
};

/// A cursor over a borrowed byte buffer.
///
/// `Parser` is the byte cursor of the decoder: it owns nothing but the read offset and
/// validates every access against the length of the underlying slice, so a truncated
/// file surfaces as [`crate::Error::OutOfBounds`] instead of a panic.
///
/// # Examples
///
/// ```rust
/// use grdscope::Parser;
///
/// let data = [0x00, 0x00, 0x00, 0x2A, 0x3F, 0xF0, 0, 0, 0, 0, 0, 0];
/// let mut parser = Parser::new(&data);
///
/// assert_eq!(parser.read_be::<u32>()?, 42);
/// assert_eq!(parser.read_be::<f64>()?, 1.0);
/// assert!(!parser.has_more_data());
/// # Ok::<(), grdscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// parser.seek(2)?;
    /// assert_eq!(parser.pos(), 2);
    /// assert!(parser.seek(4).is_err());
    /// # Ok::<(), grdscope::Error>(())
    /// ```
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// Advancing to exactly the end of the buffer is allowed; the next read will fail.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        self.position = self.calc_end_position(step)?;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Calculates an end position safely with overflow checking.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the calculation would overflow
    /// or if the resulting position exceeds the data length.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(out_of_bounds_error!())?;

        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        Ok(end)
    }

    /// Peek at a value of type `T` in big-endian format without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    pub fn peek_be<T: GrdIO>(&self) -> Result<T> {
        let mut temp_position = self.position;
        read_be_at::<T>(self.data, &mut temp_position)
    }

    /// Read a type `T` from the current position in big-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_be<T: GrdIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Returns a slice of `length` bytes at the current position without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn peek_bytes(&self, length: usize) -> Result<&'a [u8]> {
        let end = self.calc_end_position(length)?;
        Ok(&self.data[self.position..end])
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `length` bytes would exceed the data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
    /// let mut parser = Parser::new(&data);
    ///
    /// let chunk = parser.read_bytes(3)?;
    /// assert_eq!(chunk, &[0x01, 0x02, 0x03]);
    /// assert_eq!(parser.pos(), 3);
    /// # Ok::<(), grdscope::Error>(())
    /// ```
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(length)?;
        self.position += length;
        Ok(bytes)
    }

    /// Read `units` big-endian UTF-16 code units and decode them.
    ///
    /// The bytes are consumed before decoding, so on a decoding failure the cursor
    /// already sits behind the text and the caller can continue with the next value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `2 * units` bytes are not available or
    /// [`crate::Error::Malformed`] for invalid UTF-16 (e.g. unpaired surrogates).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::Parser;
    ///
    /// let data = [0x00, b'H', 0x00, b'i'];
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_utf16_be(2)?, "Hi");
    /// # Ok::<(), grdscope::Error>(())
    /// ```
    pub fn read_utf16_be(&mut self, units: usize) -> Result<String> {
        let length = units.checked_mul(2).ok_or(out_of_bounds_error!())?;
        let start = self.position;
        let bytes = self.read_bytes(length)?;

        let utf16_chars: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        U16Str::from_slice(&utf16_chars).to_string().map_err(|e| {
            malformed_error!(
                "Invalid UTF-16 str at offset {} - {} units - {}",
                start,
                units,
                e
            )
        })
    }

    /// Read `units` big-endian UTF-16 code units, replacing invalid sequences with
    /// U+FFFD.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `2 * units` bytes are not available.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::Parser;
    ///
    /// let data = [0x00, b'A', 0xD8, 0x00];
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_utf16_be_lossy(2)?, "A\u{FFFD}");
    /// # Ok::<(), grdscope::Error>(())
    /// ```
    pub fn read_utf16_be_lossy(&mut self, units: usize) -> Result<String> {
        let length = units.checked_mul(2).ok_or(out_of_bounds_error!())?;
        let bytes = self.read_bytes(length)?;

        let utf16_chars: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(U16Str::from_slice(&utf16_chars).to_string_lossy())
    }
}
