// ⚠️ Error types for dataset loading and lookups

use crate::loader::Dataset;
use thiserror::Error;

/// Fatal startup error: a reference dataset is missing or malformed.
///
/// The registry cannot serve any query without all five datasets, so callers
/// are expected to abort when they see one of these.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The loader could not produce bytes for the dataset.
    #[error("dataset {dataset} is missing: {reason}")]
    Missing { dataset: Dataset, reason: String },

    /// The payload is not the JSON shape the dataset requires.
    #[error("dataset {dataset} is malformed: {source}")]
    Malformed {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    /// A branch entry is neither an integer nor a string.
    #[error("dataset {dataset} has an invalid branch value for {bank}: {value}")]
    InvalidBranchValue {
        dataset: Dataset,
        bank: String,
        value: String,
    },
}

/// Errors returned by registry queries.
#[derive(Debug, Error)]
pub enum IfscError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The code failed structural or membership validation.
    #[error("invalid bank code: {0}")]
    InvalidCode(String),

    /// No bank in the reverse index carries this name.
    #[error("bank name not found: {0}")]
    BankNameNotFound(String),

    /// Same validation failure as `InvalidCode`, raised on the IFSC-for-bank path.
    #[error("invalid IFSC code format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, IfscError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = IfscError::InvalidCode("XYZ".to_string());
        assert_eq!(err.to_string(), "invalid bank code: XYZ");

        let err = IfscError::BankNameNotFound("Unknown Bank".to_string());
        assert_eq!(err.to_string(), "bank name not found: Unknown Bank");

        let err = DatasetError::Missing {
            dataset: Dataset::Sublets,
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "dataset sublet.json is missing: not found");
    }

    #[test]
    fn test_dataset_error_converts_into_ifsc_error() {
        let err: IfscError = DatasetError::InvalidBranchValue {
            dataset: Dataset::Ifsc,
            bank: "HDFC".to_string(),
            value: "1.5".to_string(),
        }
        .into();

        assert!(matches!(err, IfscError::Dataset(_)));
        assert!(err.to_string().contains("HDFC"));
    }
}
