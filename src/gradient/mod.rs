//! Gradient model built from decoded descriptor data.
//!
//! Raw gradients captured by the decoder go through two steps here:
//!
//! 1. [`GradientDefinition::from_raw`] normalizes the stop locations of each list to
//!    `[0, 1]` and converts palette specific colors to [`Rgb`].
//! 2. [`GradientAssembler::merge`] combines color and opacity stops into a single
//!    ordered list of [`GradientPoint`]s.
//!
//! # Examples
//!
//! ```rust
//! use grdscope::descriptor::{RawGradient, RawStopFields};
//! use grdscope::gradient::GradientAssembler;
//! use grdscope::Rgb;
//!
//! let mut start = RawStopFields::with_palette("RGBC");
//! start.insert("Rd", 255.0);
//! start.set_location(0);
//! let mut end = RawStopFields::with_palette("CMYC");
//! end.insert("Blck", 100.0);
//! end.set_location(4096);
//!
//! let raw = RawGradient {
//!     name: "Red to Black".to_string(),
//!     color_stops: vec![start, end],
//!     opacity_stops: Vec::new(),
//! };
//!
//! let definitions = GradientAssembler::definitions(&[raw])?;
//! let map = GradientAssembler::merge(&definitions[0]);
//! assert_eq!(map.points[0].color, Rgb::new(255, 0, 0));
//! assert_eq!(map.points[1].location, 1.0);
//! assert_eq!(map.points[1].opacity, 1.0);
//! # Ok::<(), grdscope::Error>(())
//! ```

mod assembler;
mod color;
mod stops;

pub use assembler::{GradientAssembler, GradientMap, GradientPoint};
pub use color::{cmyk_to_rgb, hsl_to_rgb, Palette, Rgb};
pub use stops::{normalize_locations, ColorStop, GradientDefinition, OpacityStop};
