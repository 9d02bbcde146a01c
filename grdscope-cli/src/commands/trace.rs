use std::path::Path;

use grdscope::{DecodeEvent, RecordingObserver};
use serde::Serialize;

use crate::{
    app::{DecodeOptions, GlobalOptions},
    commands::common::load_observed,
    output::print_output,
};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Entry {
        depth: usize,
        offset: usize,
        key: String,
        tag: String,
        value: String,
    },
    Resync {
        offset: usize,
        retry_offset: usize,
        tag: String,
        count: usize,
    },
    Skipped {
        depth: usize,
        key: String,
        index: u32,
        reason: String,
    },
    Halted {
        offset: usize,
        reason: String,
    },
}

impl From<&DecodeEvent> for TraceEvent {
    fn from(event: &DecodeEvent) -> Self {
        match event {
            DecodeEvent::Entry {
                depth,
                offset,
                key,
                tag,
                value,
            } => TraceEvent::Entry {
                depth: *depth,
                offset: *offset,
                key: key.clone(),
                tag: tag.to_string(),
                value: value.to_string(),
            },
            DecodeEvent::Resync {
                offset,
                retry_offset,
                tag,
                count,
            } => TraceEvent::Resync {
                offset: *offset,
                retry_offset: *retry_offset,
                tag: tag.clone(),
                count: *count,
            },
            DecodeEvent::ItemSkipped {
                depth,
                key,
                index,
                reason,
            } => TraceEvent::Skipped {
                depth: *depth,
                key: key.clone(),
                index: *index,
                reason: reason.to_string(),
            },
            DecodeEvent::Halted { offset, reason } => TraceEvent::Halted {
                offset: *offset,
                reason: reason.to_string(),
            },
        }
    }
}

pub fn run(path: &Path, decode: &DecodeOptions, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut recorder = RecordingObserver::new();
    // a failed load still leaves the events that led up to it
    let loaded = load_observed(path, decode, &mut recorder);

    let events = recorder.events();
    let trace: Vec<TraceEvent> = events.iter().map(TraceEvent::from).collect();

    print_output(&trace, opts, |_| {
        for event in events {
            match event {
                DecodeEvent::Entry { depth, .. } => {
                    println!("{:indent$}{event}", "", indent = depth * 2);
                }
                _ => println!("{event}"),
            }
        }
    })?;

    loaded.map(|_| ())
}
