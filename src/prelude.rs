//! # grdscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the grdscope library. Import this module to get quick access to the essential
//! types for reading gradient files.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all grdscope operations
pub use crate::Error;

/// The result type used throughout grdscope
pub use crate::Result;

/// Bounds for decoding a descriptor stream
pub use crate::DecoderConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for reading gradient files
pub use crate::GradientFile;

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Gradient Model
// ================================================================================================

/// Merged gradient points and their colors
pub use crate::gradient::{GradientMap, GradientPoint, Rgb};

/// Normalized stops before merging
pub use crate::gradient::{ColorStop, GradientDefinition, OpacityStop, Palette};

/// Color space conversion
pub use crate::gradient::{cmyk_to_rgb, hsl_to_rgb};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Observers receiving decode events
pub use crate::descriptor::{
    DecodeEvent, DecodeObserver, DecodeSummary, LogObserver, NullObserver, RecordingObserver,
};

/// Entry types of the descriptor stream
pub use crate::descriptor::TypeTag;
