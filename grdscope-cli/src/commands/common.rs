use std::path::Path;

use anyhow::Context;
use grdscope::{DecodeObserver, GradientFile, NullObserver};

use crate::app::DecodeOptions;

/// Load a gradient file with the decoder bounds given on the command line.
pub fn load_gradients(path: &Path, decode: &DecodeOptions) -> anyhow::Result<GradientFile> {
    load_observed(path, decode, &mut NullObserver)
}

/// Load a gradient file, reporting decode events to `observer`.
pub fn load_observed(
    path: &Path,
    decode: &DecodeOptions,
    observer: &mut dyn DecodeObserver,
) -> anyhow::Result<GradientFile> {
    GradientFile::from_file_with_config(path, decode.config(), observer)
        .with_context(|| format!("failed to load gradient file: {}", path.display()))
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
