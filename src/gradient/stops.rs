//! Normalized color and opacity stops.

use crate::{
    descriptor::{keys, RawGradient, RawStopFields},
    gradient::color::{Palette, Rgb},
    Error, Result,
};

/// A color at a normalized location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Location in `[0, 1]`
    pub location: f64,
    /// Color at the location
    pub color: Rgb,
}

/// An opacity at a normalized location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityStop {
    /// Location in `[0, 1]`
    pub location: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

/// A named gradient with normalized, converted and location-ordered stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDefinition {
    /// Gradient name
    pub name: String,
    /// Color stops ordered by location
    pub color_stops: Vec<ColorStop>,
    /// Opacity stops ordered by location
    pub opacity_stops: Vec<OpacityStop>,
}

impl GradientDefinition {
    /// Normalizes the stop locations of `raw` and converts its colors to RGB.
    ///
    /// Each stop list is normalized on its own. Stops without a location sit at raw
    /// location 0; opacity stops without an opacity are fully opaque.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedPalette`] if a color stop uses a palette
    /// other than `CMYC`, `RGBC` or `HSBC`.
    pub fn from_raw(raw: &RawGradient) -> Result<GradientDefinition> {
        let mut color_stops = normalized(&raw.color_stops)
            .into_iter()
            .map(|(location, fields)| -> Result<ColorStop> {
                let color = fields
                    .palette()
                    .and_then(Palette::from_tag)
                    .ok_or_else(|| Error::UnsupportedPalette {
                        gradient: raw.name.clone(),
                        palette: fields.palette().unwrap_or_default().to_string(),
                    })?
                    .to_rgb(fields);
                Ok(ColorStop { location, color })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut opacity_stops: Vec<OpacityStop> = normalized(&raw.opacity_stops)
            .into_iter()
            .map(|(location, fields)| OpacityStop {
                location,
                opacity: fields.get(keys::OPACITY).unwrap_or(1.0).clamp(0.0, 1.0),
            })
            .collect();

        color_stops.sort_by(|a, b| a.location.total_cmp(&b.location));
        opacity_stops.sort_by(|a, b| a.location.total_cmp(&b.location));

        Ok(GradientDefinition {
            name: raw.name.clone(),
            color_stops,
            opacity_stops,
        })
    }
}

/// Pairs each stop with its normalized location; a degenerate list keeps its first stop.
fn normalized(stops: &[RawStopFields]) -> Vec<(f64, &RawStopFields)> {
    let raw: Vec<i32> = stops
        .iter()
        .map(|stop| stop.location().unwrap_or(0))
        .collect();

    match normalize_locations(&raw) {
        Some(locations) => locations.into_iter().zip(stops).collect(),
        None => stops.first().map(|stop| vec![(0.0, stop)]).unwrap_or_default(),
    }
}

/// Maps raw locations onto `[0, 1]`, rounded to three decimals.
///
/// Returns `None` for an empty list or when all locations are equal.
///
/// # Examples
///
/// ```rust
/// use grdscope::gradient::normalize_locations;
///
/// assert_eq!(normalize_locations(&[0, 1024, 4096]), Some(vec![0.0, 0.25, 1.0]));
/// assert_eq!(normalize_locations(&[-10, 20]), Some(vec![0.0, 1.0]));
/// assert_eq!(normalize_locations(&[7, 7]), None);
/// ```
#[must_use]
pub fn normalize_locations(raw: &[i32]) -> Option<Vec<f64>> {
    let min = i64::from(*raw.iter().min()?);
    let max = i64::from(*raw.iter().max()?);
    if min == max {
        return None;
    }

    let span = (max - min) as f64;
    Some(
        raw.iter()
            .map(|&location| round3((i64::from(location) - min) as f64 / span))
            .collect(),
    )
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
