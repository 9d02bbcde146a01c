//! Color spaces used by gradient stops and their conversion to RGB.

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::descriptor::{keys, RawStopFields};

/// An 8-bit per channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black, the color of an empty color stop list.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// White.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Creates a color from unbounded channel values, rounding and clamping each to 0-255.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grdscope::Rgb;
    ///
    /// assert_eq!(Rgb::from_channels(254.6, -3.0, 300.0), Rgb::new(255, 0, 255));
    /// ```
    #[must_use]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Rgb {
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Linear interpolation towards `other`, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        Rgb::from_channels(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Hex notation, e.g. `#ff8000`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // in range after the clamp
    value.round().clamp(0.0, 255.0) as u8
}

/// Converts CMYK percentages (0-100) to RGB.
///
/// # Examples
///
/// ```rust
/// use grdscope::{gradient::cmyk_to_rgb, Rgb};
///
/// assert_eq!(cmyk_to_rgb(0.0, 0.0, 0.0, 0.0), Rgb::WHITE);
/// assert_eq!(cmyk_to_rgb(0.0, 0.0, 0.0, 100.0), Rgb::BLACK);
/// assert_eq!(cmyk_to_rgb(0.0, 100.0, 100.0, 0.0), Rgb::new(255, 0, 0));
/// ```
#[must_use]
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> Rgb {
    let key = 1.0 - k / 100.0;
    let ink = |x: f64| 255.0 * (1.0 - x / 100.0) * key;
    Rgb::from_channels(ink(c), ink(m), ink(y))
}

/// Converts HSL to RGB; `h` in degrees (wrapped), `s` and `l` in `[0, 1]`.
///
/// # Examples
///
/// ```rust
/// use grdscope::{gradient::hsl_to_rgb, Rgb};
///
/// assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
/// assert_eq!(hsl_to_rgb(480.0, 1.0, 0.5), Rgb::new(0, 255, 0));
/// assert_eq!(hsl_to_rgb(75.0, 0.0, 0.5), Rgb::new(128, 128, 128));
/// ```
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::from_channels((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
}

/// Color space of a color stop, named by the class id of its `Clr` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Palette {
    /// `CMYC` - `Cyn`, `Mgnt`, `Ylw`, `Blck` in 0-100
    Cmyk,
    /// `RGBC` - `Rd`, `Grn`, `Bl` in 0-255
    Rgb,
    /// `HSBC` - `H` in degrees, `Strt` and `Brgh` in 0-100
    Hsb,
}

impl Palette {
    /// Returns the class id of the palette.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Palette::Cmyk => "CMYC",
            Palette::Rgb => "RGBC",
            Palette::Hsb => "HSBC",
        }
    }

    /// Maps a class id to its palette.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Palette> {
        match tag {
            "CMYC" => Some(Palette::Cmyk),
            "RGBC" => Some(Palette::Rgb),
            "HSBC" => Some(Palette::Hsb),
            _ => None,
        }
    }

    /// Converts the channels recorded on a color stop to RGB. Missing channels are 0.
    #[must_use]
    pub fn to_rgb(self, fields: &RawStopFields) -> Rgb {
        let value = |key: &str| fields.get(key).unwrap_or(0.0);

        match self {
            Palette::Cmyk => cmyk_to_rgb(
                value(keys::CYAN).round(),
                value(keys::MAGENTA).round(),
                value(keys::YELLOW).round(),
                value(keys::BLACK).round(),
            ),
            Palette::Rgb => Rgb::from_channels(
                value(keys::RED),
                value(keys::GREEN),
                value(keys::BLUE),
            ),
            Palette::Hsb => hsl_to_rgb(
                value(keys::HUE),
                value(keys::SATURATION) / 100.0,
                value(keys::BRIGHTNESS) / 100.0,
            ),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
