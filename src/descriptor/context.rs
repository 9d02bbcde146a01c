//! Context-sensitive field capture for the descriptor decoder.
//!
//! The descriptor stream never says "this is a color stop"; the meaning of a value
//! depends on the key of the container it appears in. [`ParseContext`] tracks that
//! container (the current object) and accumulates the stop field sets and gradients
//! that are later handed to the assembler.
//!
//! The current object is a single key, not a stack: leaving a nested container does not
//! restore the parent's key. Values following a nested `Clr` object inside its parent
//! are therefore still attributed to `Clr`, which is how stop locations end up on the
//! color stop in real files.

use std::collections::BTreeMap;

use crate::descriptor::types::{keys, PERCENT_UNIT};

/// Numeric fields recorded for one color or opacity stop before normalization.
///
/// # Examples
///
/// ```rust
/// use grdscope::descriptor::RawStopFields;
///
/// let mut stop = RawStopFields::with_palette("RGBC");
/// assert!(stop.is_empty());
///
/// stop.insert("Rd", 255.0);
/// stop.set_location(2048);
/// assert_eq!(stop.get("Rd"), Some(255.0));
/// assert_eq!(stop.location(), Some(2048));
/// assert_eq!(stop.palette(), Some("RGBC"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStopFields {
    palette: Option<String>,
    fields: BTreeMap<String, f64>,
    location: Option<i32>,
}

impl RawStopFields {
    /// Creates an empty field set without a palette (opacity stops).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty field set for a color stop encoded in `palette`.
    #[must_use]
    pub fn with_palette(palette: &str) -> Self {
        RawStopFields {
            palette: Some(palette.to_string()),
            ..Self::default()
        }
    }

    /// Returns the palette tag of a color stop.
    #[must_use]
    pub fn palette(&self) -> Option<&str> {
        self.palette.as_deref()
    }

    /// Returns the value recorded under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied()
    }

    /// Returns the raw, unnormalized location.
    #[must_use]
    pub fn location(&self) -> Option<i32> {
        self.location
    }

    /// Records `value` under `key`, replacing an earlier value.
    pub fn insert(&mut self, key: &str, value: f64) {
        self.fields.insert(key.to_string(), value);
    }

    /// Records the raw location.
    pub fn set_location(&mut self, location: i32) {
        self.location = Some(location);
    }

    /// Returns `true` if no numeric value (channel, opacity or location) was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.location.is_none()
    }

    /// Iterates the recorded numeric fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// A gradient as captured from the stream, before normalization and color conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGradient {
    /// Name from the `Nm` text field, empty if the gradient carried none
    pub name: String,
    /// Color stops in file order
    pub color_stops: Vec<RawStopFields>,
    /// Opacity stops in file order
    pub opacity_stops: Vec<RawStopFields>,
}

/// Accumulator state of one decode.
#[derive(Debug, Default)]
pub struct ParseContext {
    current_object: Option<String>,
    gradient: Option<RawGradient>,
    color: Option<RawStopFields>,
    opacity: Option<RawStopFields>,
    completed: Vec<RawGradient>,
    dropped_stops: usize,
}

impl ParseContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the most recently entered container.
    #[must_use]
    pub fn current_object(&self) -> Option<&str> {
        self.current_object.as_deref()
    }

    fn in_object(&self, key: &str) -> bool {
        self.current_object.as_deref() == Some(key)
    }

    /// Number of stops that completed while no gradient was active.
    #[must_use]
    pub fn dropped_stops(&self) -> usize {
        self.dropped_stops
    }

    /// Gradients completed so far.
    #[must_use]
    pub fn completed(&self) -> &[RawGradient] {
        &self.completed
    }

    /// Marks entry into a container keyed `key` with class id `class`.
    ///
    /// `Grad` finishes the gradient in progress and starts a new one; `Clr` finishes the
    /// color stop in progress and starts a new field set in palette `class`.
    pub fn enter_object(&mut self, key: &str, class: &str) {
        self.current_object = Some(key.to_string());

        match key {
            keys::GRADIENT => {
                self.flush_gradient();
                self.gradient = Some(RawGradient::default());
            }
            keys::COLOR => {
                self.flush_color_stop();
                self.color = Some(RawStopFields::with_palette(class));
            }
            _ => {}
        }
    }

    /// Captures a `TEXT` value.
    pub fn capture_text(&mut self, key: &str, text: &str) {
        if key == keys::NAME && self.in_object(keys::GRADIENT) {
            self.set_name(text);
        }
    }

    /// Captures a `UntF` value.
    pub fn capture_unit_float(&mut self, key: &str, unit: &str, value: f64) {
        if self.in_object(keys::COLOR) && keys::is_color_channel(key) {
            self.record_color_channel(key, value);
        } else if self.in_object(keys::TRANSPARENCY)
            && key == keys::OPACITY
            && unit == PERCENT_UNIT
        {
            self.flush_opacity_stop();
            self.record_opacity(value / 100.0);
        }
    }

    /// Captures a `doub` value.
    pub fn capture_double(&mut self, key: &str, value: f64) {
        if self.in_object(keys::COLOR) && keys::is_color_channel(key) {
            self.record_color_channel(key, value);
        }
    }

    /// Captures a `long` value.
    pub fn capture_integer(&mut self, key: &str, value: i32) {
        if key == keys::LOCATION
            && (self.in_object(keys::COLOR) || self.in_object(keys::TRANSPARENCY))
        {
            self.record_location(value);
        }
    }

    /// Sets the name of the gradient in progress.
    pub fn set_name(&mut self, name: &str) {
        if let Some(gradient) = self.gradient.as_mut() {
            gradient.name = name.to_string();
        }
    }

    /// Records a color channel on the color stop in progress.
    pub fn record_color_channel(&mut self, key: &str, value: f64) {
        self.color.get_or_insert_with(RawStopFields::new).insert(key, value);
    }

    /// Records the opacity fraction on the opacity stop in progress.
    pub fn record_opacity(&mut self, value: f64) {
        self.opacity
            .get_or_insert_with(RawStopFields::new)
            .insert(keys::OPACITY, value);
    }

    /// Records the raw location on the stop in progress of the current container kind.
    pub fn record_location(&mut self, location: i32) {
        let stop = if self.in_object(keys::COLOR) {
            &mut self.color
        } else if self.in_object(keys::TRANSPARENCY) {
            &mut self.opacity
        } else {
            return;
        };

        stop.get_or_insert_with(RawStopFields::new)
            .set_location(location);
    }

    /// Appends the color stop in progress to the active gradient.
    pub fn flush_color_stop(&mut self) {
        let Some(stop) = self.color.take() else {
            return;
        };
        if stop.is_empty() {
            return;
        }

        match self.gradient.as_mut() {
            Some(gradient) => gradient.color_stops.push(stop),
            None => {
                self.dropped_stops += 1;
                log::debug!("Dropping color stop outside of a gradient - {stop:?}");
            }
        }
    }

    /// Appends the opacity stop in progress to the active gradient.
    pub fn flush_opacity_stop(&mut self) {
        let Some(stop) = self.opacity.take() else {
            return;
        };
        if stop.is_empty() {
            return;
        }

        match self.gradient.as_mut() {
            Some(gradient) => gradient.opacity_stops.push(stop),
            None => {
                self.dropped_stops += 1;
                log::debug!("Dropping opacity stop outside of a gradient - {stop:?}");
            }
        }
    }

    /// Completes the gradient in progress, including its pending stops.
    pub fn flush_gradient(&mut self) {
        self.flush_color_stop();
        self.flush_opacity_stop();

        if let Some(gradient) = self.gradient.take() {
            self.completed.push(gradient);
        }
    }

    /// Flushes all pending state and returns the completed gradients in file order.
    #[must_use]
    pub fn finish(mut self) -> Vec<RawGradient> {
        self.flush_gradient();
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_stop(context: &mut ParseContext, r: f64, g: f64, b: f64, location: i32) {
        context.enter_object("Clr", "RGBC");
        context.capture_double("Rd", r);
        context.capture_double("Grn", g);
        context.capture_double("Bl", b);
        context.capture_integer("Lctn", location);
    }

    #[test]
    fn test_gradient_lifecycle() {
        let mut context = ParseContext::new();

        context.enter_object("Grad", "Grdn");
        context.capture_text("Nm", "Sunset");
        rgb_stop(&mut context, 255.0, 0.0, 0.0, 0);
        rgb_stop(&mut context, 0.0, 0.0, 255.0, 4096);

        context.enter_object("Trns", "TrnS");
        context.capture_unit_float("Opct", "#Prc", 100.0);
        context.capture_integer("Lctn", 0);
        context.capture_unit_float("Opct", "#Prc", 25.0);
        context.capture_integer("Lctn", 4096);

        let gradients = context.finish();
        assert_eq!(gradients.len(), 1);

        let gradient = &gradients[0];
        assert_eq!(gradient.name, "Sunset");
        assert_eq!(gradient.color_stops.len(), 2);
        assert_eq!(gradient.color_stops[0].get("Rd"), Some(255.0));
        assert_eq!(gradient.color_stops[1].location(), Some(4096));
        assert_eq!(gradient.color_stops[1].palette(), Some("RGBC"));

        assert_eq!(gradient.opacity_stops.len(), 2);
        assert_eq!(gradient.opacity_stops[0].get("Opct"), Some(1.0));
        assert_eq!(gradient.opacity_stops[1].get("Opct"), Some(0.25));
        assert_eq!(gradient.opacity_stops[1].location(), Some(4096));
    }

    #[test]
    fn test_new_gradient_flushes_previous() {
        let mut context = ParseContext::new();

        context.enter_object("Grad", "Grdn");
        context.capture_text("Nm", "First");
        rgb_stop(&mut context, 1.0, 2.0, 3.0, 0);

        context.enter_object("Grad", "Grdn");
        context.capture_text("Nm", "Second");

        assert_eq!(context.completed().len(), 1);
        assert_eq!(context.completed()[0].color_stops.len(), 1);

        let gradients = context.finish();
        assert_eq!(gradients.len(), 2);
        assert_eq!(gradients[1].name, "Second");
        assert!(gradients[1].color_stops.is_empty());
    }

    #[test]
    fn test_flush_is_idempotent() {
        let mut context = ParseContext::new();
        context.enter_object("Grad", "Grdn");
        context.enter_object("Clr", "RGBC");

        // Palette alone does not make a stop
        context.flush_color_stop();
        context.flush_color_stop();
        context.flush_opacity_stop();

        let gradients = context.finish();
        assert!(gradients[0].color_stops.is_empty());
        assert!(gradients[0].opacity_stops.is_empty());
    }

    #[test]
    fn test_context_sensitivity() {
        let mut context = ParseContext::new();
        context.enter_object("Grad", "Grdn");

        // Channel keys outside `Clr` and names outside `Grad` are ignored
        context.capture_double("Rd", 12.0);
        context.enter_object("Clrs", "Clrt");
        context.capture_text("Nm", "Ignored");
        context.capture_integer("Lctn", 7);

        // Opacity needs the percent unit
        context.enter_object("Trns", "TrnS");
        context.capture_unit_float("Opct", "#Ang", 50.0);
        context.capture_double("Opct", 50.0);

        let gradients = context.finish();
        assert_eq!(gradients[0].name, "");
        assert!(gradients[0].color_stops.is_empty());
        assert!(gradients[0].opacity_stops.is_empty());
    }

    #[test]
    fn test_location_follows_current_object() {
        let mut context = ParseContext::new();
        context.enter_object("Grad", "Grdn");
        context.enter_object("Clrt", "Clrt");
        context.enter_object("Clr", "HSBC");
        context.capture_unit_float("H", "#Ang", 120.0);

        // Back in the parent `Clrt` nothing is restored, so its `Lctn` lands on the color stop
        context.capture_integer("Lctn", 99);
        assert_eq!(context.current_object(), Some("Clr"));

        context.enter_object("Clrt", "Clrt");
        context.capture_integer("Lctn", 7);
        context.enter_object("Clr", "HSBC");
        context.capture_integer("Lctn", 100);

        let gradients = context.finish();
        assert_eq!(gradients[0].color_stops.len(), 2);
        assert_eq!(gradients[0].color_stops[0].location(), Some(99));
        assert_eq!(gradients[0].color_stops[0].get("H"), Some(120.0));
        assert_eq!(gradients[0].color_stops[1].location(), Some(100));
    }

    #[test]
    fn test_stops_without_gradient_are_dropped() {
        let mut context = ParseContext::new();
        rgb_stop(&mut context, 1.0, 1.0, 1.0, 0);
        context.enter_object("Trns", "TrnS");
        context.capture_unit_float("Opct", "#Prc", 50.0);
        context.flush_opacity_stop();
        context.flush_color_stop();

        assert_eq!(context.dropped_stops(), 2);
        assert!(context.finish().is_empty());
    }
}
