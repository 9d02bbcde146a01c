//! Structured diagnostics emitted while decoding a descriptor stream.
//!
//! The decoder reports every entry it decodes, every realignment and every skipped list
//! item to an injected [`DecodeObserver`]. Observers only watch; nothing they do feeds
//! back into the decode.

use std::fmt;

use crate::descriptor::types::TypeTag;

/// Decoded payload of a single entry, as reported to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    /// `Objc` header
    Object {
        /// Display name, usually empty
        name: String,
        /// Class id (e.g. `Grdn`, `RGBC`)
        class: String,
        /// Number of child entries that follow
        children: u32,
    },
    /// `VlLs` header
    List {
        /// Number of items that follow
        count: u32,
    },
    /// `TEXT` value, trimmed
    Text(String),
    /// `UntF` value
    UnitFloat {
        /// Unit tag, e.g. `#Prc`
        unit: String,
        /// Raw value
        value: f64,
    },
    /// `bool` value
    Boolean(bool),
    /// `long` value
    Integer(i32),
    /// `doub` value
    Double(f64),
    /// `enum` value
    Enumerated {
        /// Enumeration type tag
        type_id: String,
        /// Enumeration value tag
        value: String,
    },
    /// `tdta` payload size
    RawData(usize),
    /// `patt` placeholder, content is not decoded
    Pattern,
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryValue::Object {
                name,
                class,
                children,
            } => write!(f, "'{name}', {class}, {children}"),
            EntryValue::List { count } => write!(f, "{count}"),
            EntryValue::Text(text) => write!(f, "'{text}'"),
            EntryValue::UnitFloat { unit, value } => write!(f, "{unit}, {value}"),
            EntryValue::Boolean(value) => write!(f, "{value}"),
            EntryValue::Integer(value) => write!(f, "{value}"),
            EntryValue::Double(value) => write!(f, "{value}"),
            EntryValue::Enumerated { type_id, value } => write!(f, "{type_id}, {value}"),
            EntryValue::RawData(size) => write!(f, "{size} bytes"),
            EntryValue::Pattern => f.write_str("-"),
        }
    }
}

/// Why a list item was not decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The item's type tag is not known; only the tag was consumed
    UnknownType(String),
    /// The item's value could not be decoded
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownType(tag) => write!(f, "unknown type '{tag}'"),
            SkipReason::Malformed(message) => write!(f, "malformed - {message}"),
        }
    }
}

/// Why a decode stopped before the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An unknown type tag was found in the entry starting at offset 0
    RollbackAtStart,
    /// The realignment budget is spent
    ResyncLimit(usize),
    /// A realigned entry reaches past the end of the buffer
    RollbackPastEnd,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::RollbackAtStart => f.write_str("no earlier offset to realign to"),
            HaltReason::ResyncLimit(limit) => write!(f, "realignment limit of {limit} reached"),
            HaltReason::RollbackPastEnd => f.write_str("realigned entry runs past the end"),
        }
    }
}

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEvent {
    /// An entry or list item was decoded.
    Entry {
        /// Nesting depth, top-level entries are 0
        depth: usize,
        /// Offset of the entry's length prefix, or of the type tag for list items
        offset: usize,
        /// Trimmed key; list items report the list's key
        key: String,
        /// Entry type
        tag: TypeTag,
        /// Decoded payload
        value: EntryValue,
    },
    /// An unknown type tag was found and decoding restarts one byte earlier.
    Resync {
        /// Offset of the entry that failed to decode
        offset: usize,
        /// Offset decoding restarts at
        retry_offset: usize,
        /// The unknown tag, trimmed
        tag: String,
        /// Number of realignments so far, including this one
        count: usize,
    },
    /// A list item was skipped.
    ItemSkipped {
        /// Nesting depth of the item
        depth: usize,
        /// Key of the owning list
        key: String,
        /// Position of the item in the list
        index: u32,
        /// Why the item was skipped
        reason: SkipReason,
    },
    /// Decoding stopped early without an error.
    Halted {
        /// Offset of the entry that could not be realigned
        offset: usize,
        /// Why decoding stopped
        reason: HaltReason,
    },
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeEvent::Entry {
                depth,
                offset,
                key,
                tag,
                value,
            } => write!(f, "{offset:#06x} ({depth}, '{key}', {tag}, {value})"),
            DecodeEvent::Resync {
                offset,
                retry_offset,
                tag,
                count,
            } => write!(
                f,
                "{offset:#06x} unknown type '{tag}', realigning to {retry_offset:#06x} (#{count})"
            ),
            DecodeEvent::ItemSkipped {
                depth,
                key,
                index,
                reason,
            } => write!(f, "({depth}, '{key}') skipped item {index} - {reason}"),
            DecodeEvent::Halted { offset, reason } => {
                write!(f, "{offset:#06x} decoding halted - {reason}")
            }
        }
    }
}

/// Receiver of decode diagnostics.
pub trait DecodeObserver {
    /// Called for every event, in stream order.
    fn on_event(&mut self, event: &DecodeEvent);

    /// Returns `false` if events are discarded, which lets the decoder skip building them.
    fn enabled(&self) -> bool {
        true
    }
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DecodeObserver for NullObserver {
    fn on_event(&mut self, _event: &DecodeEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Observer that forwards events to the `log` facade.
///
/// Entries are logged at `trace`, skipped items and realignments at `debug`, halts at
/// `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecodeObserver for LogObserver {
    fn on_event(&mut self, event: &DecodeEvent) {
        match event {
            DecodeEvent::Entry { .. } => log::trace!("{event}"),
            DecodeEvent::Resync { .. } | DecodeEvent::ItemSkipped { .. } => {
                log::debug!("{event}");
            }
            DecodeEvent::Halted { .. } => log::warn!("{event}"),
        }
    }

    fn enabled(&self) -> bool {
        log::log_enabled!(log::Level::Warn)
    }
}

/// Observer that keeps every event in memory.
///
/// # Examples
///
/// ```rust
/// use grdscope::{DecoderConfig, GradientFile, RecordingObserver};
///
/// let mut data = b"8BGR\x00\x05".to_vec();
/// data.resize(28, 0);
///
/// let mut recorder = RecordingObserver::new();
/// let file = GradientFile::from_mem_with_config(data, DecoderConfig::default(), &mut recorder)?;
/// assert!(file.is_empty());
/// assert!(recorder.events().is_empty());
/// # Ok::<(), grdscope::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<DecodeEvent>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in stream order.
    #[must_use]
    pub fn events(&self) -> &[DecodeEvent] {
        &self.events
    }

    /// Consumes the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<DecodeEvent> {
        self.events
    }

    /// Iterates the recorded entry events only.
    pub fn entries(&self) -> impl Iterator<Item = &DecodeEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, DecodeEvent::Entry { .. }))
    }

    /// Number of recorded realignments.
    #[must_use]
    pub fn resyncs(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DecodeEvent::Resync { .. }))
            .count()
    }
}

impl DecodeObserver for RecordingObserver {
    fn on_event(&mut self, event: &DecodeEvent) {
        self.events.push(event.clone());
    }
}
