use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grdscope::DecoderConfig;

/// grdscope - inspect gradients stored in binary gradient-definition (.grd) files
#[derive(Debug, Parser)]
#[command(name = "grdscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Bounds applied to the descriptor decoder.
#[derive(Debug, Args)]
pub struct DecodeOptions {
    /// Halt on the first unknown type tag instead of realigning.
    #[arg(long, conflicts_with = "max_resyncs")]
    pub strict: bool,

    /// Maximum number of realignments (default: one per input byte).
    #[arg(long, value_name = "N")]
    pub max_resyncs: Option<usize>,

    /// Maximum container nesting depth.
    #[arg(long, value_name = "N", default_value_t = 64)]
    pub max_depth: usize,
}

impl DecodeOptions {
    pub fn config(&self) -> DecoderConfig {
        let base = if self.strict {
            DecoderConfig::strict()
        } else {
            DecoderConfig::default()
        };

        DecoderConfig {
            max_resyncs: self.max_resyncs.or(base.max_resyncs),
            max_depth: self.max_depth,
            ..base
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display file overview: header, gradient count and decode statistics.
    Info {
        /// Path to the gradient file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        decode: DecodeOptions,
    },

    /// List gradients with their stop and point counts.
    List {
        /// Path to the gradient file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        decode: DecodeOptions,
    },

    /// Dump the merged points of each gradient.
    Dump {
        /// Path to the gradient file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Dump only the gradient with this name.
        #[arg(long)]
        name: Option<String>,

        /// Sample each gradient at N evenly spaced locations instead of its stops.
        #[arg(long, value_name = "N")]
        samples: Option<usize>,

        #[command(flatten)]
        decode: DecodeOptions,
    },

    /// Print every decoded entry, realignment and skipped list item.
    Trace {
        /// Path to the gradient file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        decode: DecodeOptions,
    },
}
