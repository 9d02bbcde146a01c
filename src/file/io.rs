//! Low-level byte order and safe reading utilities for descriptor decoding.
//!
//! This module provides bounds-checked extraction of primitive values from byte buffers.
//! Gradient descriptor files store every integer and float in big-endian order, so that
//! is the only byte order read here.
//!
//! # Key Components
//!
//! - [`crate::file::io::GrdIO`] - Trait defining big-endian conversion for primitive types
//! - [`crate::file::io::read_be`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_be_at`] - Read a value at an offset and advance the offset
//!
//! ## Supported Types
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`
//! - **Floating point**: `f32`, `f64`
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use grdscope::file::io::read_be_at;
//!
//! // A key-length prefix followed by an IEEE-754 double
//! let data = [0x00, 0x00, 0x00, 0x04, 0x40, 0x59, 0, 0, 0, 0, 0, 0];
//! let mut offset = 0;
//!
//! let length: u32 = read_be_at(&data, &mut offset)?;
//! let value: f64 = read_be_at(&data, &mut offset)?;
//! assert_eq!(length, 4);
//! assert_eq!(value, 100.0);
//! assert_eq!(offset, 12);
//! # Ok::<(), grdscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Result<T>`] and fail with
//! [`crate::Error::OutOfBounds`] when the buffer holds fewer bytes than the type needs.

use crate::{Error::OutOfBounds, Result};

/// Trait for type-specific binary conversion of primitive values.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array required for that particular type (e.g., `[u8; 4]` for `u32`).
pub trait GrdIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_grd_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl GrdIO for $ty {
                type Bytes = [u8; $len];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_grd_io! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Safely reads a value of type `T` in big-endian byte order from the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be<T: GrdIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a value of type `T` in big-endian byte order at a specific offset.
///
/// The offset is advanced by the size of `T` on success and left untouched on failure.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: GrdIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_be_bytes(read))
}
