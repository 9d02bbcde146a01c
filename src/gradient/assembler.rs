//! Merging of color and opacity stops into a single point sequence.
//!
//! Color and opacity stops are placed independently in the file. Renderers want one list
//! of points that each carry both, so the assembler samples both stop lists at the
//! union of their locations, interpolating linearly between neighbouring stops and
//! holding the end values outside a list's range.

use std::{cmp::Ordering, fmt};

use crate::{
    descriptor::RawGradient,
    gradient::{
        color::Rgb,
        stops::{ColorStop, GradientDefinition, OpacityStop},
    },
    Result,
};

/// A point of a merged gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPoint {
    /// Location in `[0, 1]`
    pub location: f64,
    /// Color at the location
    pub color: Rgb,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl fmt::Display for GradientPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}: {} @ {:.3}", self.location, self.color, self.opacity)
    }
}

/// A named gradient as an ordered list of merged points.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMap {
    /// Gradient name
    pub name: String,
    /// Points sorted by non-decreasing location
    pub points: Vec<GradientPoint>,
}

impl GradientMap {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the gradient has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluates the gradient at `t`, clamped to `[0, 1]`.
    ///
    /// Returns `None` for a gradient without points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::{GradientMap, GradientPoint, Rgb};
    ///
    /// let map = GradientMap {
    ///     name: "Fade".to_string(),
    ///     points: vec![
    ///         GradientPoint { location: 0.0, color: Rgb::BLACK, opacity: 1.0 },
    ///         GradientPoint { location: 1.0, color: Rgb::WHITE, opacity: 0.0 },
    ///     ],
    /// };
    ///
    /// let mid = map.sample(0.5).unwrap();
    /// assert_eq!(mid.color, Rgb::new(128, 128, 128));
    /// assert_eq!(mid.opacity, 0.5);
    /// assert_eq!(map.sample(7.0).unwrap().color, Rgb::WHITE);
    /// ```
    #[must_use]
    pub fn sample(&self, t: f64) -> Option<GradientPoint> {
        let location = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (color, opacity) = sample(&self.points, location)?;
        Some(GradientPoint {
            location,
            color,
            opacity,
        })
    }
}

/// Values that can be blended linearly.
trait Interpolate: Copy {
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn lerp(self, other: f64, t: f64) -> f64 {
        self + (other - self) * t
    }
}

impl Interpolate for Rgb {
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb::lerp(self, other, t)
    }
}

impl<A: Interpolate, B: Interpolate> Interpolate for (A, B) {
    fn lerp(self, other: Self, t: f64) -> Self {
        (self.0.lerp(other.0, t), self.1.lerp(other.1, t))
    }
}

/// Anything with a location and an interpolatable value.
trait Stop {
    type Value: Interpolate;

    fn location(&self) -> f64;
    fn value(&self) -> Self::Value;
}

impl Stop for ColorStop {
    type Value = Rgb;

    fn location(&self) -> f64 {
        self.location
    }

    fn value(&self) -> Rgb {
        self.color
    }
}

impl Stop for OpacityStop {
    type Value = f64;

    fn location(&self) -> f64 {
        self.location
    }

    fn value(&self) -> f64 {
        self.opacity
    }
}

impl Stop for GradientPoint {
    type Value = (Rgb, f64);

    fn location(&self) -> f64 {
        self.location
    }

    fn value(&self) -> (Rgb, f64) {
        (self.color, self.opacity)
    }
}

/// Samples location-ordered `stops` at `t`; `None` if there are no stops.
fn sample<S: Stop>(stops: &[S], t: f64) -> Option<S::Value> {
    let first = stops.first()?;
    if t <= first.location() {
        return Some(first.value());
    }

    // `t` lies above the lower stop of every pair reached here
    for pair in stops.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        match t.partial_cmp(&upper.location()) {
            Some(Ordering::Less) => {
                let u = (t - lower.location()) / (upper.location() - lower.location());
                return Some(lower.value().lerp(upper.value(), u));
            }
            Some(Ordering::Equal) => return Some(upper.value()),
            _ => {}
        }
    }

    stops.last().map(Stop::value)
}

/// Turns raw gradients into definitions and merged gradient maps.
pub struct GradientAssembler;

impl GradientAssembler {
    /// Normalizes and converts every raw gradient, in order.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedPalette`] for the first color stop in an
    /// unknown palette.
    pub fn definitions(raw: &[RawGradient]) -> Result<Vec<GradientDefinition>> {
        raw.iter().map(GradientDefinition::from_raw).collect()
    }

    /// Merges the color and opacity stops of `definition` into one point list.
    ///
    /// Points sit at the sorted distinct union of all stop locations. An empty color
    /// list samples as black and an empty opacity list as fully opaque.
    #[must_use]
    pub fn merge(definition: &GradientDefinition) -> GradientMap {
        let mut locations: Vec<f64> = definition
            .color_stops
            .iter()
            .map(|stop| stop.location)
            .chain(definition.opacity_stops.iter().map(|stop| stop.location))
            .collect();
        locations.sort_by(f64::total_cmp);
        locations.dedup();

        let points = locations
            .into_iter()
            .map(|location| GradientPoint {
                location,
                color: sample(&definition.color_stops, location).unwrap_or(Rgb::BLACK),
                opacity: sample(&definition.opacity_stops, location).unwrap_or(1.0),
            })
            .collect();

        GradientMap {
            name: definition.name.clone(),
            points,
        }
    }
}
