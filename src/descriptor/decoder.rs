//! Recursive-descent decoder for descriptor streams.
//!
//! # Entry Layout
//!
//! ```text
//! +-----------+--------------+----------+-----------------+
//! | u32 len L | key (L bytes)| type tag | typed payload   |
//! +-----------+--------------+----------+-----------------+
//! ```
//!
//! `L` is only trusted within `1..=max_key_len`; otherwise four key bytes are assumed.
//! The key is always compared on its first four bytes.
//!
//! # Realignment
//!
//! Some writers emit entries whose length prefix does not match the data, so the cursor
//! ends up mid-entry and the type tag read there is garbage. When that happens the
//! decoder restarts one byte before the failed entry and tries again, until a known tag
//! shows up. Every attempt is counted; once the budget from
//! [`crate::descriptor::DecoderConfig::max_resyncs`] is spent, or there is no earlier
//! byte to restart from, decoding halts without an error and keeps what it has.

use crate::{
    descriptor::{
        config::DecoderConfig,
        context::{ParseContext, RawGradient},
        observer::{DecodeEvent, DecodeObserver, EntryValue, HaltReason, SkipReason},
        types::{tag_text, TypeTag},
    },
    file::parser::Parser,
    Error, Result,
};

/// Whether decoding goes on after a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Outcome of decoding a single list item.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    /// The item was decoded and captured
    Decoded(TypeTag),
    /// The item was not decoded; the list continues with the next item
    Skipped(SkipReason),
    /// Decoding halted inside the item
    Halted,
}

/// Statistics of a finished decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Entries and list items decoded, including those decoded again after a realignment
    pub entries: usize,
    /// Realignment attempts
    pub resyncs: usize,
    /// List items skipped as unknown or malformed
    pub skipped_items: usize,
    /// Stops found outside of any gradient
    pub dropped_stops: usize,
    /// `true` if decoding stopped before the end of the buffer
    pub halted: bool,
    /// Cursor position when decoding ended
    pub end_offset: usize,
}

/// Result of decoding a descriptor stream.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutput {
    /// Gradients in file order
    pub gradients: Vec<RawGradient>,
    /// Decode statistics
    pub summary: DecodeSummary,
}

/// Decoder state for one pass over a buffer.
pub struct DescriptorDecoder<'a, 'o> {
    parser: Parser<'a>,
    config: DecoderConfig,
    observer: &'o mut dyn DecodeObserver,
    context: ParseContext,
    resync_limit: usize,
    summary: DecodeSummary,
}

impl<'a, 'o> DescriptorDecoder<'a, 'o> {
    /// Creates a decoder over a complete file buffer, header included.
    pub fn new(
        data: &'a [u8],
        config: DecoderConfig,
        observer: &'o mut dyn DecodeObserver,
    ) -> Self {
        DescriptorDecoder {
            parser: Parser::new(data),
            config,
            observer,
            context: ParseContext::new(),
            resync_limit: config.resync_limit(data.len()),
            summary: DecodeSummary::default(),
        }
    }

    /// Decodes entries after the header until the buffer is exhausted or decoding halts.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than the header or
    /// an entry is truncated, [`crate::Error::Malformed`] for undecodable values outside
    /// of lists and [`crate::Error::RecursionLimit`] for excessive nesting. A realigned
    /// entry that runs past the end halts decoding instead.
    pub fn decode(mut self) -> Result<DecodeOutput> {
        self.parser.advance_by(self.config.header_len)?;

        while self.parser.has_more_data() {
            if self.decode_entry(0)? == Flow::Halt {
                break;
            }
        }

        self.context.flush_gradient();
        self.summary.end_offset = self.parser.pos();
        self.summary.dropped_stops = self.context.dropped_stops();

        if self.summary.resyncs > 0 {
            log::info!(
                "Resynchronized {} times while decoding {} bytes",
                self.summary.resyncs,
                self.parser.len()
            );
        }

        Ok(DecodeOutput {
            gradients: self.context.finish(),
            summary: self.summary,
        })
    }

    /// Decodes one keyed entry at the cursor, realigning on unknown type tags.
    fn decode_entry(&mut self, depth: usize) -> Result<Flow> {
        let mut realigned = false;
        loop {
            let offset = self.parser.pos();
            let (key, type_tag) = match self.read_entry_head() {
                Ok(head) => head,
                Err(Error::OutOfBounds) if realigned => {
                    self.parser.seek(offset)?;
                    return Ok(self.halt(offset, HaltReason::RollbackPastEnd));
                }
                Err(error) => return Err(error),
            };

            if let Some(tag) = TypeTag::from_tag(type_tag) {
                return self.decode_value(depth, offset, &key, tag);
            }

            let Some(retry_offset) = offset.checked_sub(1) else {
                return Ok(self.halt(offset, HaltReason::RollbackAtStart));
            };
            if self.summary.resyncs >= self.resync_limit {
                return Ok(self.halt(offset, HaltReason::ResyncLimit(self.resync_limit)));
            }

            self.summary.resyncs += 1;
            let count = self.summary.resyncs;
            self.emit(|| DecodeEvent::Resync {
                offset,
                retry_offset,
                tag: tag_text(type_tag),
                count,
            });
            self.parser.seek(retry_offset)?;
            realigned = true;
        }
    }

    /// Reads the length prefix, key and type tag of an entry.
    fn read_entry_head(&mut self) -> Result<(String, &'a [u8])> {
        let key_len = self.config.effective_key_len(self.parser.peek_be::<u32>()?);
        self.parser.advance_by(4)?;
        let key = tag_text(self.parser.peek_bytes(4)?);
        self.parser.advance_by(key_len)?;
        let type_tag = self.parser.read_bytes(4)?;
        Ok((key, type_tag))
    }

    fn decode_value(&mut self, depth: usize, offset: usize, key: &str, tag: TypeTag) -> Result<Flow> {
        if depth > self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }

        match tag {
            TypeTag::Object => return self.decode_object(depth, offset, key),
            TypeTag::List => return self.decode_list(depth, offset, key),
            TypeTag::Text => {
                let text = self.read_text()?;
                self.context.capture_text(key, &text);
                self.report(depth, offset, key, tag, || EntryValue::Text(text));
            }
            TypeTag::UnitFloat => {
                let unit = tag_text(self.parser.read_bytes(4)?);
                let value = self.parser.read_be::<f64>()?;
                self.context.capture_unit_float(key, &unit, value);
                self.report(depth, offset, key, tag, || EntryValue::UnitFloat { unit, value });
            }
            TypeTag::Boolean => {
                let value = self.parser.read_be::<u8>()? != 0;
                self.report(depth, offset, key, tag, || EntryValue::Boolean(value));
            }
            TypeTag::Integer => {
                let value = self.parser.read_be::<i32>()?;
                self.context.capture_integer(key, value);
                self.report(depth, offset, key, tag, || EntryValue::Integer(value));
            }
            TypeTag::Double => {
                let value = self.parser.read_be::<f64>()?;
                self.context.capture_double(key, value);
                self.report(depth, offset, key, tag, || EntryValue::Double(value));
            }
            TypeTag::Enumerated => {
                let type_id = self.read_class()?;
                let value = self.read_class()?;
                self.report(depth, offset, key, tag, || EntryValue::Enumerated {
                    type_id,
                    value,
                });
            }
            TypeTag::RawData => {
                let size = self.parser.read_be::<u32>()? as usize;
                self.parser.advance_by(size)?;
                self.report(depth, offset, key, tag, || EntryValue::RawData(size));
            }
            TypeTag::Pattern => {
                self.report(depth, offset, key, tag, || EntryValue::Pattern);
            }
        }

        Ok(Flow::Continue)
    }

    fn decode_object(&mut self, depth: usize, offset: usize, key: &str) -> Result<Flow> {
        let name = self.read_name()?;
        let class = self.read_class()?;
        let children = self.parser.read_be::<u32>()?;

        self.context.enter_object(key, &class);
        self.report(depth, offset, key, TypeTag::Object, || EntryValue::Object {
            name,
            class,
            children,
        });

        for _ in 0..children {
            if self.decode_entry(depth + 1)? == Flow::Halt {
                return Ok(Flow::Halt);
            }
        }

        Ok(Flow::Continue)
    }

    fn decode_list(&mut self, depth: usize, offset: usize, key: &str) -> Result<Flow> {
        let count = self.parser.read_be::<u32>()?;
        self.report(depth, offset, key, TypeTag::List, || EntryValue::List { count });

        for index in 0..count {
            match self.decode_list_item(depth + 1, key)? {
                ListItem::Decoded(_) => {}
                ListItem::Skipped(reason) => {
                    self.summary.skipped_items += 1;
                    self.emit(|| DecodeEvent::ItemSkipped {
                        depth: depth + 1,
                        key: key.to_string(),
                        index,
                        reason,
                    });
                }
                ListItem::Halted => return Ok(Flow::Halt),
            }
        }

        Ok(Flow::Continue)
    }

    /// Decodes one untagged list item, which shares the key of its list.
    ///
    /// Unknown item types consume only their tag. Malformed values are skipped;
    /// truncation and nesting errors still fail the decode.
    fn decode_list_item(&mut self, depth: usize, key: &str) -> Result<ListItem> {
        let offset = self.parser.pos();
        let type_tag = self.parser.read_bytes(4)?;
        let Some(tag) = TypeTag::from_tag(type_tag) else {
            return Ok(ListItem::Skipped(SkipReason::UnknownType(tag_text(type_tag))));
        };

        match self.decode_value(depth, offset, key, tag) {
            Ok(Flow::Continue) => Ok(ListItem::Decoded(tag)),
            Ok(Flow::Halt) => Ok(ListItem::Halted),
            Err(Error::Malformed { message, .. }) => {
                Ok(ListItem::Skipped(SkipReason::Malformed(message)))
            }
            Err(error) => Err(error),
        }
    }

    /// Reads a unit-count prefixed UTF-16 string, trimmed of whitespace and NULs.
    fn read_text(&mut self) -> Result<String> {
        let units = self.parser.read_be::<u32>()? as usize;
        let text = self.parser.read_utf16_be(units)?;
        Ok(trim_text(&text))
    }

    /// Reads an object's display name; invalid UTF-16 is replaced, never fatal.
    fn read_name(&mut self) -> Result<String> {
        let units = self.parser.read_be::<u32>()? as usize;
        let name = self.parser.read_utf16_be_lossy(units)?;
        Ok(trim_text(&name))
    }

    /// Reads a length prefixed class or enumeration tag, zero meaning the default length.
    fn read_class(&mut self) -> Result<String> {
        let length = match self.parser.read_be::<u32>()? {
            0 => self.config.default_key_len,
            length => length as usize,
        };

        Ok(tag_text(self.parser.read_bytes(length)?))
    }

    fn report(
        &mut self,
        depth: usize,
        offset: usize,
        key: &str,
        tag: TypeTag,
        value: impl FnOnce() -> EntryValue,
    ) {
        self.summary.entries += 1;
        self.emit(|| DecodeEvent::Entry {
            depth,
            offset,
            key: key.to_string(),
            tag,
            value: value(),
        });
    }

    fn emit(&mut self, event: impl FnOnce() -> DecodeEvent) {
        if self.observer.enabled() {
            self.observer.on_event(&event());
        }
    }

    fn halt(&mut self, offset: usize, reason: HaltReason) -> Flow {
        self.summary.halted = true;
        self.emit(|| DecodeEvent::Halted { offset, reason });
        Flow::Halt
    }
}

fn trim_text(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// Decodes a complete file buffer into raw gradients.
///
/// # Errors
/// See [`DescriptorDecoder::decode`].
///
/// # Examples
///
/// ```rust
/// use grdscope::descriptor::{decode, DecoderConfig};
/// use grdscope::NullObserver;
///
/// let mut data = b"8BGR\x00\x05".to_vec();
/// data.resize(28, 0);
///
/// let output = decode(&data, DecoderConfig::default(), &mut NullObserver)?;
/// assert!(output.gradients.is_empty());
/// assert_eq!(output.summary.end_offset, 28);
/// # Ok::<(), grdscope::Error>(())
/// ```
pub fn decode(
    data: &[u8],
    config: DecoderConfig,
    observer: &mut dyn DecodeObserver,
) -> Result<DecodeOutput> {
    DescriptorDecoder::new(data, config, observer).decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::observer::{NullObserver, RecordingObserver},
        test::{gradient_file, DescriptorBuilder, TestColor, TestGradient},
    };

    fn decode_recorded(data: &[u8]) -> (DecodeOutput, RecordingObserver) {
        let mut recorder = RecordingObserver::new();
        let output = decode(data, DecoderConfig::default(), &mut recorder).unwrap();
        (output, recorder)
    }

    fn headerless() -> DecoderConfig {
        DecoderConfig {
            header_len: 0,
            ..DecoderConfig::default()
        }
    }

    #[test]
    fn test_header_only() {
        let data = DescriptorBuilder::new().build();
        let (output, recorder) = decode_recorded(&data);

        assert!(output.gradients.is_empty());
        assert_eq!(output.summary, DecodeSummary {
            end_offset: 28,
            ..DecodeSummary::default()
        });
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_short_header() {
        let result = decode(&[0; 27], DecoderConfig::default(), &mut NullObserver);
        assert!(matches!(result, Err(Error::OutOfBounds)));
    }

    #[test]
    fn test_scalar_entries() {
        let data = DescriptorBuilder::new()
            .text("Nm", "  Blue Sky\0")
            .unit_float("Angl", "#Ang", 90.0)
            .boolean("Rvrs", true)
            .integer("Lctn", -12)
            .double("Intr", 4096.0)
            .enumerated("Type", "GrdT", "Lnr")
            .raw_data("Data", &[1, 2, 3])
            .pattern("Ptrn")
            .build();

        let (output, recorder) = decode_recorded(&data);
        assert_eq!(output.summary.entries, 8);
        assert_eq!(output.summary.end_offset, data.len());
        assert!(!output.summary.halted);

        let values: Vec<(String, EntryValue)> = recorder
            .entries()
            .map(|event| match event {
                DecodeEvent::Entry { key, value, .. } => (key.clone(), value.clone()),
                _ => unreachable!(),
            })
            .collect();

        assert_eq!(values[0], ("Nm".to_string(), EntryValue::Text("Blue Sky".to_string())));
        assert_eq!(
            values[1].1,
            EntryValue::UnitFloat {
                unit: "#Ang".to_string(),
                value: 90.0
            }
        );
        assert_eq!(values[2].1, EntryValue::Boolean(true));
        assert_eq!(values[3].1, EntryValue::Integer(-12));
        assert_eq!(values[4].1, EntryValue::Double(4096.0));
        assert_eq!(
            values[5].1,
            EntryValue::Enumerated {
                type_id: "GrdT".to_string(),
                value: "Lnr".to_string()
            }
        );
        assert_eq!(values[6].1, EntryValue::RawData(3));
        assert_eq!(values[7], ("Ptrn".to_string(), EntryValue::Pattern));
    }

    #[test]
    fn test_entry_offsets_and_depths() {
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 1)
            .text("Nm", "A")
            .build();
        let (_, recorder) = decode_recorded(&data);

        let positions: Vec<(usize, usize)> = recorder
            .entries()
            .map(|event| match event {
                DecodeEvent::Entry { depth, offset, .. } => (*depth, *offset),
                _ => unreachable!(),
            })
            .collect();
        // Objc entry: 4 + 4 + 4 + (4 + 2) + (4 + 4) + 4 bytes
        assert_eq!(positions, vec![(0, 28), (1, 58)]);
    }

    #[test]
    fn test_gradient_stream() {
        let data = gradient_file(&[TestGradient::new("Red to Blue")
            .color(TestColor::Rgb(255.0, 0.0, 0.0), 0)
            .color(TestColor::Rgb(0.0, 0.0, 255.0), 4096)
            .opacity(100.0, 0)
            .opacity(50.0, 4096)]);

        let (output, _) = decode_recorded(&data);
        assert_eq!(output.summary.resyncs, 0);
        assert_eq!(output.gradients.len(), 1);

        let gradient = &output.gradients[0];
        assert_eq!(gradient.name, "Red to Blue");
        assert_eq!(gradient.color_stops.len(), 2);
        assert_eq!(gradient.color_stops[0].get("Rd"), Some(255.0));
        assert_eq!(gradient.color_stops[0].location(), Some(0));
        assert_eq!(gradient.color_stops[1].get("Bl"), Some(255.0));
        assert_eq!(gradient.color_stops[1].location(), Some(4096));
        assert_eq!(gradient.opacity_stops.len(), 2);
        assert_eq!(gradient.opacity_stops[1].get("Opct"), Some(0.5));
        assert_eq!(gradient.opacity_stops[1].location(), Some(4096));
    }

    #[test]
    fn test_key_length_substitution() {
        let tail = DescriptorBuilder::without_header()
            .object_value("Grdn", 1)
            .text("Nm", "Same")
            .build();

        let zero = DescriptorBuilder::new()
            .key_with_len(0, b"Grad")
            .bytes(&tail)
            .build();
        let four = DescriptorBuilder::new()
            .key_with_len(4, b"Grad")
            .bytes(&tail)
            .build();
        let oversized = DescriptorBuilder::new()
            .key_with_len(257, b"Grad")
            .bytes(&tail)
            .build();

        let (zero_output, zero_events) = decode_recorded(&zero);
        let (four_output, four_events) = decode_recorded(&four);
        let (oversized_output, _) = decode_recorded(&oversized);

        assert_eq!(zero_output.gradients, four_output.gradients);
        assert_eq!(zero_output.gradients, oversized_output.gradients);
        assert_eq!(zero_events.events(), four_events.events());
        assert_eq!(zero_output.gradients[0].name, "Same");
    }

    #[test]
    fn test_long_key_is_skipped_whole() {
        let data = DescriptorBuilder::new()
            .key_with_len(9, b"Grad\0\0\0\0\0")
            .object_value("Grdn", 1)
            .text("Nm", "Long")
            .build();

        let (output, recorder) = decode_recorded(&data);
        assert_eq!(output.gradients[0].name, "Long");
        assert_eq!(recorder.resyncs(), 0);
    }

    #[test]
    fn test_realignment_after_misaligned_entry() {
        // `Flag` lacks its value byte, so it swallows the first byte of the next
        // length prefix. Read one byte late, that prefix announces a key of 82 bytes
        // (`R`), which lands the type tag inside the `Rw` payload.
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 4)
            .text("Nm", "Recovered")
            .key("Flag")
            .bytes(b"bool")
            .raw_data("Rw", &[0xEE; 96])
            .list("Clrs", 1)
            .object_value("Clrt", 2)
            .object("Clr", "RGBC", 3)
            .double("Rd", 10.0)
            .double("Grn", 20.0)
            .double("Bl", 30.0)
            .integer("Lctn", 1024)
            .build();

        let (output, recorder) = decode_recorded(&data);

        assert_eq!(output.summary.resyncs, 1);
        assert!(!output.summary.halted);
        assert_eq!(output.summary.end_offset, data.len());

        let resync = recorder
            .events()
            .iter()
            .find(|event| matches!(event, DecodeEvent::Resync { .. }))
            .unwrap();
        let DecodeEvent::Resync {
            offset,
            retry_offset,
            tag,
            count,
        } = resync
        else {
            unreachable!()
        };
        assert_eq!(*offset, retry_offset + 1);
        assert_eq!(tag, "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}");
        assert_eq!(*count, 1);

        assert!(recorder.entries().any(|event| matches!(
            event,
            DecodeEvent::Entry { key, tag: TypeTag::RawData, value: EntryValue::RawData(96), .. } if key == "Rw"
        )));

        let gradient = &output.gradients[0];
        assert_eq!(gradient.name, "Recovered");
        assert_eq!(gradient.color_stops.len(), 1);
        assert_eq!(gradient.color_stops[0].get("Grn"), Some(20.0));
        assert_eq!(gradient.color_stops[0].location(), Some(1024));
    }

    #[test]
    fn test_rollback_at_start_halts() {
        let data = DescriptorBuilder::without_header()
            .key("Junk")
            .bytes(b"zzzz")
            .build();

        let mut recorder = RecordingObserver::new();
        let output = decode(&data, headerless(), &mut recorder).unwrap();

        assert!(output.summary.halted);
        assert_eq!(output.summary.resyncs, 0);
        assert_eq!(
            recorder.events(),
            &[DecodeEvent::Halted {
                offset: 0,
                reason: HaltReason::RollbackAtStart
            }]
        );
    }

    #[test]
    fn test_resync_limit_halts() {
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 2)
            .text("Nm", "Kept")
            .key("Junk")
            .bytes(b"zzzz")
            .text("Nm", "Never")
            .build();

        let mut recorder = RecordingObserver::new();
        let output = decode(&data, DecoderConfig::strict(), &mut recorder).unwrap();

        assert!(output.summary.halted);
        assert_eq!(output.summary.resyncs, 0);
        assert_eq!(output.gradients.len(), 1);
        assert_eq!(output.gradients[0].name, "Kept");
        assert!(matches!(
            recorder.events().last(),
            Some(DecodeEvent::Halted {
                reason: HaltReason::ResyncLimit(0),
                ..
            })
        ));
    }

    #[test]
    fn test_resync_budget_bounds_work() {
        // No byte before `Junk` starts a decodable entry, so every retry fails again
        let data = DescriptorBuilder::without_header()
            .pattern("Pad")
            .key("Junk")
            .bytes(b"zzzz")
            .build();

        let config = DecoderConfig {
            max_resyncs: Some(3),
            ..headerless()
        };
        let mut recorder = RecordingObserver::new();
        let output = decode(&data, config, &mut recorder).unwrap();

        assert!(output.summary.halted);
        assert_eq!(output.summary.resyncs, 3);
        assert_eq!(output.summary.entries, 1);
        assert_eq!(recorder.resyncs(), 3);
        assert!(matches!(
            recorder.events().last(),
            Some(DecodeEvent::Halted {
                offset: 9,
                reason: HaltReason::ResyncLimit(3)
            })
        ));
    }

    #[test]
    fn test_realignment_past_end_halts() {
        // One byte back the payload reads as a 64-byte key length, past the end
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 1)
            .text("Nm", "Kept")
            .raw_data("Data", &[0, 0, 0, 0x40])
            .key("Junk")
            .bytes(b"zzzz")
            .build();

        let (output, recorder) = decode_recorded(&data);

        assert!(output.summary.halted);
        assert_eq!(output.summary.resyncs, 4);
        assert_eq!(output.summary.end_offset, data.len() - 16);
        assert_eq!(output.gradients.len(), 1);
        assert_eq!(output.gradients[0].name, "Kept");
        assert_eq!(
            recorder.events().last(),
            Some(&DecodeEvent::Halted {
                offset: data.len() - 16,
                reason: HaltReason::RollbackPastEnd
            })
        );
    }

    #[test]
    fn test_truncated_entry_head_is_fatal() {
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 2)
            .text("Nm", "Lost")
            .key("Junk")
            .bytes(b"zz")
            .build();

        let result = decode(&data, DecoderConfig::default(), &mut NullObserver);
        assert!(matches!(result, Err(Error::OutOfBounds)));
    }

    #[test]
    fn test_list_items() {
        let data = DescriptorBuilder::new()
            .list("Vals", 5)
            .text_value("first")
            .bytes(b"GlbO")
            .raw_text_value(&[0x0041, 0xD800, 0x0042])
            .integer_value(7)
            .object_value("Clrt", 1)
            .integer("Mdpn", 50)
            .build();

        let (output, recorder) = decode_recorded(&data);
        assert_eq!(output.summary.skipped_items, 2);
        assert_eq!(output.summary.end_offset, data.len());

        let skipped: Vec<(u32, &SkipReason)> = recorder
            .events()
            .iter()
            .filter_map(|event| match event {
                DecodeEvent::ItemSkipped {
                    index, reason, key, depth,
                } => {
                    assert_eq!(key, "Vals");
                    assert_eq!(*depth, 1);
                    Some((*index, reason))
                }
                _ => None,
            })
            .collect();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0], (1, &SkipReason::UnknownType("GlbO".to_string())));
        assert_eq!(skipped[1].0, 2);
        assert!(matches!(skipped[1].1, SkipReason::Malformed(_)));

        // Items report the key of their list, nested entries one level deeper
        let items: Vec<(usize, String, TypeTag)> = recorder
            .entries()
            .map(|event| match event {
                DecodeEvent::Entry { depth, key, tag, .. } => (*depth, key.clone(), *tag),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            items,
            vec![
                (0, "Vals".to_string(), TypeTag::List),
                (1, "Vals".to_string(), TypeTag::Text),
                (1, "Vals".to_string(), TypeTag::Integer),
                (1, "Vals".to_string(), TypeTag::Object),
                (2, "Mdpn".to_string(), TypeTag::Integer),
            ]
        );
    }

    #[test]
    fn test_malformed_outside_list_is_fatal() {
        let data = DescriptorBuilder::new()
            .key("Nm")
            .raw_text_value(&[0xDC00])
            .build();

        let result = decode(&data, DecoderConfig::default(), &mut NullObserver);
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_invalid_object_name_is_replaced() {
        // Objc with the name [U+D800, 'G'], class `Grdn` and one child
        let data = DescriptorBuilder::new()
            .key("Grad")
            .bytes(b"Objc")
            .bytes(&[0, 0, 0, 2, 0xD8, 0x00, 0x00, b'G'])
            .bytes(&[0, 0, 0, 0])
            .bytes(b"Grdn")
            .bytes(&[0, 0, 0, 1])
            .text("Nm", "Survives")
            .build();

        let (output, recorder) = decode_recorded(&data);

        assert_eq!(output.gradients.len(), 1);
        assert_eq!(output.gradients[0].name, "Survives");
        assert!(recorder.entries().any(|event| matches!(
            event,
            DecodeEvent::Entry { value: EntryValue::Object { name, class, children: 1 }, .. }
                if name == "\u{FFFD}G" && class == "Grdn"
        )));
    }

    #[test]
    fn test_truncated_list_is_fatal() {
        let data = DescriptorBuilder::new()
            .list("Vals", 3)
            .integer_value(1)
            .build();

        let result = decode(&data, DecoderConfig::default(), &mut NullObserver);
        assert!(matches!(result, Err(Error::OutOfBounds)));
    }

    #[test]
    fn test_truncated_value_is_fatal() {
        let mut data = DescriptorBuilder::new().double("Intr", 1.0).build();
        data.truncate(data.len() - 3);

        let result = decode(&data, DecoderConfig::default(), &mut NullObserver);
        assert!(matches!(result, Err(Error::OutOfBounds)));
    }

    #[test]
    fn test_recursion_limit() {
        let nested = |levels: u32| {
            let mut builder = DescriptorBuilder::new();
            for _ in 0..levels {
                builder = builder.object("Nest", "Nest", 1);
            }
            builder.pattern("Leaf").build()
        };
        let config = DecoderConfig {
            max_depth: 3,
            ..DecoderConfig::default()
        };

        // Depths 0..=2 for the objects, 3 for the leaf
        let output = decode(&nested(3), config, &mut NullObserver).unwrap();
        assert_eq!(output.summary.entries, 4);

        let result = decode(&nested(4), config, &mut NullObserver);
        assert!(matches!(result, Err(Error::RecursionLimit(3))));
    }

    #[test]
    fn test_nested_lists_hit_recursion_limit() {
        let mut builder = DescriptorBuilder::new().list("Deep", 1);
        for _ in 0..10 {
            builder = builder.list_value(1);
        }
        let data = builder.integer_value(1).build();

        let config = DecoderConfig {
            max_depth: 4,
            ..DecoderConfig::default()
        };
        let result = decode(&data, config, &mut NullObserver);
        assert!(matches!(result, Err(Error::RecursionLimit(4))));
    }

    #[test]
    fn test_current_object_is_not_restored() {
        let data = DescriptorBuilder::new()
            .object("Grad", "Grdn", 1)
            .object("Clr", "RGBC", 1)
            .double("Rd", 1.0)
            .integer("Lctn", 5)
            .build();

        let mut observer = NullObserver;
        let mut decoder = DescriptorDecoder::new(&data, DecoderConfig::default(), &mut observer);
        decoder.parser.advance_by(28).unwrap();
        assert_eq!(decoder.decode_entry(0).unwrap(), Flow::Continue);
        assert_eq!(decoder.context.current_object(), Some("Clr"));

        // The top-level `Lctn` following the gradient still lands on the color stop
        assert_eq!(decoder.decode_entry(0).unwrap(), Flow::Continue);
        let gradients = decoder.context.finish();
        assert_eq!(gradients[0].color_stops[0].location(), Some(5));
    }

    #[test]
    fn test_list_item_outcomes() {
        let data = DescriptorBuilder::without_header()
            .bytes(b"zzzz")
            .double_value(2.0)
            .raw_text_value(&[0xD800])
            .build();

        let mut observer = NullObserver;
        let mut decoder = DescriptorDecoder::new(&data, headerless(), &mut observer);

        assert_eq!(
            decoder.decode_list_item(1, "Item").unwrap(),
            ListItem::Skipped(SkipReason::UnknownType("zzzz".to_string()))
        );
        assert_eq!(
            decoder.decode_list_item(1, "Item").unwrap(),
            ListItem::Decoded(TypeTag::Double)
        );
        assert!(matches!(
            decoder.decode_list_item(1, "Item").unwrap(),
            ListItem::Skipped(SkipReason::Malformed(_))
        ));
        assert!(!decoder.parser.has_more_data());
    }
}
