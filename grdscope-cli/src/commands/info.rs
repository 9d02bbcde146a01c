use std::path::Path;

use serde::Serialize;

use crate::{
    app::{DecodeOptions, GlobalOptions},
    commands::common::{file_display_name, load_gradients},
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub file: String,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    pub gradient_count: usize,
    pub unique_names: usize,
    pub entries: usize,
    pub resyncs: usize,
    pub skipped_items: usize,
    pub dropped_stops: usize,
    pub halted: bool,
    pub end_offset: usize,
}

pub fn run(path: &Path, decode: &DecodeOptions, opts: &GlobalOptions) -> anyhow::Result<()> {
    let gradients = load_gradients(path, decode)?;
    let file = gradients.file();
    let summary = gradients.summary();

    let mut names: Vec<&str> = gradients.names().collect();
    names.sort_unstable();
    names.dedup();

    let info = FileInfo {
        file: file_display_name(path),
        size: file.len(),
        signature: file
            .signature()
            .map(|sig| String::from_utf8_lossy(&sig).into_owned()),
        version: file.version(),
        gradient_count: gradients.len(),
        unique_names: names.len(),
        entries: summary.entries,
        resyncs: summary.resyncs,
        skipped_items: summary.skipped_items,
        dropped_stops: summary.dropped_stops,
        halted: summary.halted,
        end_offset: summary.end_offset,
    };

    print_output(&info, opts, |info| {
        println!("File:           {}", info.file);
        println!("Size:           {} bytes", info.size);
        if let Some(signature) = &info.signature {
            println!("Signature:      {signature}");
        }
        if let Some(version) = info.version {
            println!("Version:        {version}");
        }
        println!("Gradients:      {}", info.gradient_count);
        if info.unique_names != info.gradient_count {
            println!("Unique names:   {}", info.unique_names);
        }
        println!("Entries:        {}", info.entries);
        println!("Realignments:   {}", info.resyncs);
        println!("Skipped items:  {}", info.skipped_items);
        println!("Dropped stops:  {}", info.dropped_stops);
        if info.halted {
            println!(
                "Halted:         at offset {:#x} of {:#x}",
                info.end_offset, info.size
            );
        }
    })
}
