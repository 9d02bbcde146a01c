use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Decoding a gradient file is best-effort: unrecognized type tags are resolved by the
/// realignment heuristic and never surface here, and malformed items inside a list are
/// skipped. What remains are the conditions that make the whole file unusable.
///
/// # Error Categories
///
/// ## Decoding Errors
/// - [`Error::OutOfBounds`] - A read would have run past the end of the buffer (truncated input)
/// - [`Error::Malformed`] - A value could not be decoded (e.g. invalid UTF-16 text)
/// - [`Error::RecursionLimit`] - Containers were nested deeper than the configured limit
/// - [`Error::Empty`] - Empty input provided
///
/// ## Assembly Errors
/// - [`Error::UnsupportedPalette`] - A color stop uses a color space without a converter
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Error`] - Memory mapping and other miscellaneous failures
///
/// # Examples
///
/// ```rust,no_run
/// use grdscope::{Error, GradientFile};
/// use std::path::Path;
///
/// match GradientFile::from_file(Path::new("gradients.grd")) {
///     Ok(file) => println!("{} gradients", file.len()),
///     Err(Error::OutOfBounds) => eprintln!("File is truncated"),
///     Err(Error::UnsupportedPalette { gradient, palette }) => {
///         eprintln!("Gradient '{}' uses unsupported palette '{}'", gradient, palette);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A value inside the descriptor stream could not be decoded.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while decoding the buffer.
    ///
    /// Every handler reads a fixed or self-described number of bytes; when the buffer
    /// ends before that count is satisfied the input is truncated.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// A color stop was captured with a palette that has no RGB conversion.
    #[error("Gradient '{gradient}' uses an unsupported color palette '{palette}'")]
    UnsupportedPalette {
        /// Name of the gradient owning the offending stop
        gradient: String,
        /// The palette tag as found in the file (e.g. `LbCl`)
        palette: String,
    },

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures, such as a failed memory mapping.
    #[error("{0}")]
    Error(String),

    /// Recursion limit reached.
    ///
    /// Containers nest recursively; to prevent stack exhaustion on crafted input a
    /// maximum nesting depth is enforced. The associated value is the limit.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
