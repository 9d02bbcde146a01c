//! Top-level access to the gradients of a gradient-definition file.

use std::{collections::HashMap, path::Path};

use crate::{
    descriptor::{self, DecodeObserver, DecodeSummary, DecoderConfig, NullObserver},
    file::File,
    gradient::{GradientAssembler, GradientDefinition, GradientMap},
    Result,
};

/// A decoded gradient-definition file.
///
/// Loading runs the whole pipeline at once: the descriptor stream is decoded, stop
/// locations are normalized, colors are converted to RGB and color and opacity stops are
/// merged. The file's bytes stay mapped for the lifetime of the value.
///
/// Gradient names are not unique in practice. [`GradientFile::gradients`] lists every
/// gradient in file order, while [`GradientFile::get`] resolves a name to the last
/// gradient carrying it.
///
/// # Examples
///
/// ```rust,no_run
/// use grdscope::GradientFile;
/// use std::path::Path;
///
/// let file = GradientFile::from_file(Path::new("gradients.grd"))?;
/// for gradient in file.gradients() {
///     println!("{}: {} points", gradient.name, gradient.len());
/// }
///
/// if let Some(sunset) = file.get("Sunset") {
///     let middle = sunset.sample(0.5);
///     println!("{middle:?}");
/// }
/// # Ok::<(), grdscope::Error>(())
/// ```
pub struct GradientFile {
    file: File,
    definitions: Vec<GradientDefinition>,
    gradients: Vec<GradientMap>,
    by_name: HashMap<String, usize>,
    summary: DecodeSummary,
}

impl GradientFile {
    /// Loads and decodes a gradient file from disk with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded, see
    /// [`GradientFile::from_file_with_config`].
    pub fn from_file(path: &Path) -> Result<GradientFile> {
        Self::from_file_with_config(path, DecoderConfig::default(), &mut NullObserver)
    }

    /// Loads and decodes a gradient file from disk, reporting to `observer`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] or [`crate::Error::Error`] if the file cannot
    /// be opened or mapped, [`crate::Error::Empty`] for an empty file, and any decoding
    /// or assembly error.
    pub fn from_file_with_config(
        path: &Path,
        config: DecoderConfig,
        observer: &mut dyn DecodeObserver,
    ) -> Result<GradientFile> {
        Self::load(File::from_file(path)?, config, observer)
    }

    /// Decodes a gradient file held in memory with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the data cannot be decoded, see
    /// [`GradientFile::from_mem_with_config`].
    pub fn from_mem(data: Vec<u8>) -> Result<GradientFile> {
        Self::from_mem_with_config(data, DecoderConfig::default(), &mut NullObserver)
    }

    /// Decodes a gradient file held in memory, reporting to `observer`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty data, [`crate::Error::OutOfBounds`] for
    /// data shorter than the header or truncated entries, and any other decoding or
    /// assembly error.
    pub fn from_mem_with_config(
        data: Vec<u8>,
        config: DecoderConfig,
        observer: &mut dyn DecodeObserver,
    ) -> Result<GradientFile> {
        Self::load(File::from_mem(data)?, config, observer)
    }

    fn load(
        file: File,
        config: DecoderConfig,
        observer: &mut dyn DecodeObserver,
    ) -> Result<GradientFile> {
        let output = descriptor::decode(file.data(), config, observer)?;
        let definitions = GradientAssembler::definitions(&output.gradients)?;
        let gradients: Vec<GradientMap> = definitions.iter().map(GradientAssembler::merge).collect();

        let mut by_name = HashMap::with_capacity(gradients.len());
        for (index, gradient) in gradients.iter().enumerate() {
            if let Some(previous) = by_name.insert(gradient.name.clone(), index) {
                log::debug!(
                    "Gradient '{}' at index {} replaces the one at index {}",
                    gradient.name,
                    index,
                    previous
                );
            }
        }

        if output.summary.halted {
            log::warn!(
                "Decoding halted at offset {} of {}, keeping {} gradients",
                output.summary.end_offset,
                file.len(),
                gradients.len()
            );
        }
        log::debug!(
            "Loaded {} gradients from {} bytes ({} entries, {} realignments)",
            gradients.len(),
            file.len(),
            output.summary.entries,
            output.summary.resyncs
        );

        Ok(GradientFile {
            file,
            definitions,
            gradients,
            by_name,
            summary: output.summary,
        })
    }

    /// All gradients in file order.
    #[must_use]
    pub fn gradients(&self) -> &[GradientMap] {
        &self.gradients
    }

    /// The last gradient named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GradientMap> {
        self.by_name
            .get(name)
            .and_then(|&index| self.gradients.get(index))
    }

    /// Gradient names in file order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gradients.iter().map(|gradient| gradient.name.as_str())
    }

    /// Number of gradients, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    /// Returns `true` if the file holds no gradient.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }

    /// Normalized stops before merging, in file order.
    #[must_use]
    pub fn definitions(&self) -> &[GradientDefinition] {
        &self.definitions
    }

    /// Statistics of the decode.
    #[must_use]
    pub fn summary(&self) -> &DecodeSummary {
        &self.summary
    }

    /// The underlying file.
    #[must_use]
    pub fn file(&self) -> &File {
        &self.file
    }
}
