mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })?;

    let cli = Cli::parse();

    // Show grdscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("grdscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Info { path, decode } => commands::info::run(path, decode, &cli.global),
        Command::List { path, decode } => commands::list::run(path, decode, &cli.global),
        Command::Dump {
            path,
            name,
            samples,
            decode,
        } => commands::dump::run(path, name.as_deref(), *samples, decode, &cli.global),
        Command::Trace { path, decode } => commands::trace::run(path, decode, &cli.global),
    }
}
