// 📂 Dataset Loader - raw bytes for the five reference datasets
//
// The registry never touches the file system directly. It asks a loader for
// a logical dataset and gets bytes back (or an error).

use crate::error::DatasetError;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// LOGICAL DATASETS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Bank prefix → branch codes
    Ifsc,

    /// Bank code → display name
    BankNames,

    /// Bank code → bank details record
    Banks,

    /// Full code → bank-code key
    Sublets,

    /// Code prefix → bank-code key
    CustomSublets,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Ifsc,
        Dataset::BankNames,
        Dataset::Banks,
        Dataset::Sublets,
        Dataset::CustomSublets,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Ifsc => "IFSC.json",
            Dataset::BankNames => "banknames.json",
            Dataset::Banks => "banks.json",
            Dataset::Sublets => "sublet.json",
            Dataset::CustomSublets => "custom-sublets.json",
        }
    }

    /// Reverse of `file_name`
    pub fn from_file_name(name: &str) -> Option<Dataset> {
        Dataset::ALL.into_iter().find(|d| d.file_name() == name)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

// ============================================================================
// LOADER TRAIT
// ============================================================================

/// Anything that can hand over the raw bytes of a dataset.
pub trait DatasetLoader: Send + Sync {
    fn load(&self, dataset: Dataset) -> Result<Vec<u8>, DatasetError>;
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for Box<L> {
    fn load(&self, dataset: Dataset) -> Result<Vec<u8>, DatasetError> {
        (**self).load(dataset)
    }
}

// ============================================================================
// DIRECTORY LOADER
// ============================================================================

/// Reads `<dir>/<file_name>` for each dataset.
#[derive(Debug, Clone)]
pub struct DirLoader {
    dir: PathBuf,
}

impl DirLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirLoader { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DatasetLoader for DirLoader {
    fn load(&self, dataset: Dataset) -> Result<Vec<u8>, DatasetError> {
        let path = self.dir.join(dataset.file_name());
        std::fs::read(&path).map_err(|e| DatasetError::Missing {
            dataset,
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

// ============================================================================
// IN-MEMORY LOADER
// ============================================================================

/// Serves payloads registered up front. Handy for embedding and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    payloads: HashMap<Dataset, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a payload
    pub fn with(mut self, dataset: Dataset, bytes: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(dataset, bytes.into());
        self
    }
}

impl DatasetLoader for MemoryLoader {
    fn load(&self, dataset: Dataset) -> Result<Vec<u8>, DatasetError> {
        self.payloads
            .get(&dataset)
            .cloned()
            .ok_or_else(|| DatasetError::Missing {
                dataset,
                reason: "no payload registered".to_string(),
            })
    }
}

// ============================================================================
// FALLBACK LOADER
// ============================================================================

/// Tries `primary` first and reloads from `fallback` when it fails.
///
/// If both fail the error from the fallback is returned.
pub struct FallbackLoader<P, F> {
    primary: P,
    fallback: F,
}

impl<P: DatasetLoader, F: DatasetLoader> FallbackLoader<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        FallbackLoader { primary, fallback }
    }
}

impl<P: DatasetLoader, F: DatasetLoader> DatasetLoader for FallbackLoader<P, F> {
    fn load(&self, dataset: Dataset) -> Result<Vec<u8>, DatasetError> {
        match self.primary.load(dataset) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::warn!(%dataset, error = %e, "primary loader failed, reloading from fallback");
                self.fallback.load(dataset)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
