use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{ForecastError, Result};

/// Suffix that marks a serialized model artifact in the models directory.
pub const ARTIFACT_SUFFIX: &str = "_model.json";

/// A single catalog entry: an on-disk artifact and its derived display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub file_name: String,
    pub display_name: String,
}

/// Immutable mapping from display names to artifact files.
///
/// Built once at startup by listing the models directory; treated as
/// configuration thereafter. Two file names that collide after the
/// display-name transform resolve to the same artifact lookup.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    dir: PathBuf,
    descriptors: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// Scan `dir` for files ending in [`ARTIFACT_SUFFIX`].
    ///
    /// Entries without the suffix are ignored. An empty directory yields an
    /// empty catalog, not an error. Entries are sorted by file name so the
    /// catalog order is stable across runs.
    #[instrument]
    pub fn scan(dir: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| ForecastError::CatalogUnavailable(format!("{}: {}", dir.display(), e)))?;

        let mut file_names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(ARTIFACT_SUFFIX))
            .collect();
        file_names.sort();

        let descriptors: Vec<ModelDescriptor> = file_names
            .into_iter()
            .filter_map(|file_name| {
                let display_name = display_name_for_file(&file_name)?;
                Some(ModelDescriptor { file_name, display_name })
            })
            .collect();

        debug!(models = descriptors.len(), dir = %dir.display(), "model catalog scanned");
        Ok(Self { dir: dir.to_path_buf(), descriptors })
    }

    pub fn descriptors(&self) -> &[ModelDescriptor] {
        &self.descriptors
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether `display_name` matches a catalog entry.
    pub fn contains(&self, display_name: &str) -> bool {
        self.descriptors.iter().any(|d| d.display_name == display_name)
    }

    /// Reconstruct the artifact path for a display name using the inverse
    /// of the scan-time transform. The file is not checked for existence
    /// here; loading surfaces `ArtifactNotFound`.
    pub fn artifact_path(&self, display_name: &str) -> PathBuf {
        self.dir.join(file_name_for_display(display_name))
    }

    pub fn models_dir(&self) -> &Path {
        &self.dir
    }
}

/// Derive a display name from an artifact file name: strip the suffix,
/// replace underscores with spaces, title-case each word.
///
/// Returns `None` when the file name does not carry the artifact suffix.
pub fn display_name_for_file(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(ARTIFACT_SUFFIX)?;
    let words: Vec<String> = stem.split('_').map(title_case).collect();
    Some(words.join(" "))
}

/// Inverse of [`display_name_for_file`]: lower-case, replace spaces with
/// underscores, append the suffix. The two transforms must stay exactly
/// inverse for every name the scan can produce.
pub fn file_name_for_display(display_name: &str) -> String {
    format!("{}{}", display_name.to_lowercase().replace(' ', "_"), ARTIFACT_SUFFIX)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
