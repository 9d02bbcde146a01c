//! Type tags and well-known keys of the descriptor stream.
//!
//! Every entry in a descriptor carries a 4-byte key and a 4-byte type tag. The set of
//! type tags the decoder understands is closed and modelled by [`TypeTag`]; dispatch over
//! it is an exhaustive `match`, so adding or removing a tag is a compile-time change.

use std::fmt;

use strum::{EnumCount, EnumIter};

/// The binary subtype of a descriptor entry.
///
/// # Examples
///
/// ```rust
/// use grdscope::descriptor::TypeTag;
///
/// assert_eq!(TypeTag::from_tag(b"Objc"), Some(TypeTag::Object));
/// assert_eq!(TypeTag::UnitFloat.tag(), b"UntF");
/// assert_eq!(TypeTag::from_tag(b"GlbO"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum TypeTag {
    /// `Objc` - container holding a class id and a counted list of child entries
    Object,
    /// `VlLs` - counted list of untagged values sharing the list's key
    List,
    /// `TEXT` - UTF-16 string
    Text,
    /// `UntF` - 8-byte float with a 4-byte unit tag
    UnitFloat,
    /// `bool` - single byte flag
    Boolean,
    /// `long` - 4-byte signed integer
    Integer,
    /// `doub` - 8-byte float
    Double,
    /// `enum` - pair of tag strings (enumeration type and value)
    Enumerated,
    /// `tdta` - length-prefixed raw bytes
    RawData,
    /// `patt` - pattern data, content format unknown
    Pattern,
}

impl TypeTag {
    /// Returns the 4-byte tag as stored in the file.
    #[must_use]
    pub const fn tag(self) -> &'static [u8; 4] {
        match self {
            TypeTag::Object => b"Objc",
            TypeTag::List => b"VlLs",
            TypeTag::Text => b"TEXT",
            TypeTag::UnitFloat => b"UntF",
            TypeTag::Boolean => b"bool",
            TypeTag::Integer => b"long",
            TypeTag::Double => b"doub",
            TypeTag::Enumerated => b"enum",
            TypeTag::RawData => b"tdta",
            TypeTag::Pattern => b"patt",
        }
    }

    /// Maps a raw 4-byte tag to its [`TypeTag`], or `None` for unrecognized tags.
    #[must_use]
    pub fn from_tag(tag: &[u8]) -> Option<TypeTag> {
        match tag {
            b"Objc" => Some(TypeTag::Object),
            b"VlLs" => Some(TypeTag::List),
            b"TEXT" => Some(TypeTag::Text),
            b"UntF" => Some(TypeTag::UnitFloat),
            b"bool" => Some(TypeTag::Boolean),
            b"long" => Some(TypeTag::Integer),
            b"doub" => Some(TypeTag::Double),
            b"enum" => Some(TypeTag::Enumerated),
            b"tdta" => Some(TypeTag::RawData),
            b"patt" => Some(TypeTag::Pattern),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tag_text(self.tag()))
    }
}

/// Keys with a meaning to the gradient model.
///
/// Keys are stored as 4 bytes padded with spaces; the constants hold the trimmed form
/// produced by [`tag_text`].
pub mod keys {
    /// Gradient container
    pub const GRADIENT: &str = "Grad";
    /// Color stop color container
    pub const COLOR: &str = "Clr";
    /// Opacity stop container
    pub const TRANSPARENCY: &str = "Trns";
    /// Gradient name
    pub const NAME: &str = "Nm";
    /// Raw stop location
    pub const LOCATION: &str = "Lctn";
    /// Stop opacity
    pub const OPACITY: &str = "Opct";

    /// Cyan channel of a `CMYC` color
    pub const CYAN: &str = "Cyn";
    /// Magenta channel of a `CMYC` color
    pub const MAGENTA: &str = "Mgnt";
    /// Yellow channel of a `CMYC` color
    pub const YELLOW: &str = "Ylw";
    /// Black channel of a `CMYC` color
    pub const BLACK: &str = "Blck";

    /// Red channel of an `RGBC` color
    pub const RED: &str = "Rd";
    /// Green channel of an `RGBC` color
    pub const GREEN: &str = "Grn";
    /// Blue channel of an `RGBC` color
    pub const BLUE: &str = "Bl";

    /// Hue of an `HSBC` color, in degrees
    pub const HUE: &str = "H";
    /// Saturation of an `HSBC` color, 0-100
    pub const SATURATION: &str = "Strt";
    /// Brightness of an `HSBC` color, 0-100
    pub const BRIGHTNESS: &str = "Brgh";

    /// All keys that carry a color channel value.
    pub const COLOR_CHANNELS: [&str; 10] = [
        CYAN, MAGENTA, YELLOW, BLACK, RED, GREEN, BLUE, HUE, SATURATION, BRIGHTNESS,
    ];

    /// Returns `true` if `key` names a color channel of any palette.
    #[must_use]
    pub fn is_color_channel(key: &str) -> bool {
        COLOR_CHANNELS.contains(&key)
    }
}

/// Unit tag of a percentage `UntF` value.
pub const PERCENT_UNIT: &str = "#Prc";

/// Converts a stored tag or key into its textual form.
///
/// Trailing padding (spaces and NULs) is removed; bytes that are not valid UTF-8 are
/// replaced, since tags are only ever compared against ASCII constants.
///
/// # Examples
///
/// ```rust
/// use grdscope::descriptor::tag_text;
///
/// assert_eq!(tag_text(b"Clr "), "Clr");
/// assert_eq!(tag_text(b"Nm\0\0"), "Nm");
/// ```
#[must_use]
pub fn tag_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches([' ', '\0'])
        .to_string()
}
