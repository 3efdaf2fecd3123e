// 🗂️ Index Builder - parse the five datasets into in-memory indexes
//
// Runs once per registry. Any missing or malformed dataset is fatal: the
// registry is useless with a partial view of the data.

use crate::entities::BankDetails;
use crate::error::DatasetError;
use crate::loader::{Dataset, DatasetLoader};
use crate::normalize::normalize_code;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};

// ============================================================================
// DATASET SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStat {
    /// Logical dataset file name
    pub dataset: String,

    /// Number of top-level keys in the payload
    pub entries: usize,

    /// Hex SHA-256 of the raw payload
    pub sha256: String,
}

/// What was loaded, for logs and the summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub datasets: Vec<DatasetStat>,
    pub reverse_names: usize,
}

impl DatasetSummary {
    pub fn get(&self, dataset: Dataset) -> Option<&DatasetStat> {
        self.datasets.iter().find(|s| s.dataset == dataset.file_name())
    }
}

// ============================================================================
// INDEXES
// ============================================================================

/// All lookup structures, immutable once built.
#[derive(Debug, Clone)]
pub struct Indexes {
    /// Bank prefix → normalized branch suffixes
    pub(crate) branches: HashMap<String, HashSet<String>>,

    /// Bank code → display name (ordered so the reverse index is stable)
    pub(crate) bank_names: BTreeMap<String, String>,

    /// Bank code → details record
    pub(crate) bank_details: HashMap<String, BankDetails>,

    /// Full code → bank-code key
    pub(crate) sublets: HashMap<String, String>,

    /// (prefix, bank-code key), longest prefix first, ties lexicographic
    pub(crate) custom_sublets: Vec<(String, String)>,

    /// Lowercase bank name → bank codes
    pub(crate) codes_by_name: HashMap<String, Vec<String>>,

    pub(crate) summary: DatasetSummary,
}

impl Indexes {
    /// Load every dataset through `loader` and build the indexes.
    pub fn build(loader: &dyn DatasetLoader) -> Result<Self, DatasetError> {
        let mut summary = DatasetSummary::default();

        let raw_branches: HashMap<String, Vec<Value>> =
            load_json(loader, Dataset::Ifsc, &mut summary)?;
        let branches = build_branch_index(raw_branches)?;

        let bank_names: BTreeMap<String, String> =
            load_json(loader, Dataset::BankNames, &mut summary)?;
        let bank_details: HashMap<String, BankDetails> =
            load_json(loader, Dataset::Banks, &mut summary)?;
        let sublets: HashMap<String, String> =
            load_json(loader, Dataset::Sublets, &mut summary)?;
        let raw_custom: HashMap<String, String> =
            load_json(loader, Dataset::CustomSublets, &mut summary)?;

        let custom_sublets = order_custom_sublets(raw_custom);
        let codes_by_name = build_reverse_index(&bank_names);
        summary.reverse_names = codes_by_name.len();

        tracing::info!(
            banks = branches.len(),
            bank_names = bank_names.len(),
            sublets = sublets.len(),
            custom_sublets = custom_sublets.len(),
            reverse_names = codes_by_name.len(),
            "reference indexes built"
        );

        Ok(Indexes {
            branches,
            bank_names,
            bank_details,
            sublets,
            custom_sublets,
            codes_by_name,
            summary,
        })
    }
}

fn load_json<T>(
    loader: &dyn DatasetLoader,
    dataset: Dataset,
    summary: &mut DatasetSummary,
) -> Result<T, DatasetError>
where
    T: DeserializeOwned,
{
    let bytes = loader.load(dataset)?;

    // Count entries on the generic shape first so the summary does not
    // depend on the target type.
    let value: serde_json::Map<String, Value> = serde_json::from_slice(&bytes)
        .map_err(|source| DatasetError::Malformed { dataset, source })?;
    let entries = value.len();

    let parsed = serde_json::from_value(Value::Object(value))
        .map_err(|source| DatasetError::Malformed { dataset, source })?;

    let sha256 = format!("{:x}", Sha256::digest(&bytes));
    tracing::debug!(%dataset, entries, %sha256, "dataset loaded");

    summary.datasets.push(DatasetStat {
        dataset: dataset.file_name().to_string(),
        entries,
        sha256,
    });

    Ok(parsed)
}

/// Branch values are JSON integers or strings; both are stored normalized.
fn build_branch_index(
    raw: HashMap<String, Vec<Value>>,
) -> Result<HashMap<String, HashSet<String>>, DatasetError> {
    let mut index = HashMap::with_capacity(raw.len());

    for (bank, values) in raw {
        let mut branches = HashSet::with_capacity(values.len());

        for value in values {
            let canonical = match &value {
                Value::Number(n) => match n.as_i64() {
                    Some(i) => i.to_string(),
                    None => return Err(invalid_branch(&bank, &value)),
                },
                Value::String(s) => normalize_code(s).into_owned(),
                _ => return Err(invalid_branch(&bank, &value)),
            };
            branches.insert(canonical);
        }

        index.insert(bank, branches);
    }

    Ok(index)
}

fn invalid_branch(bank: &str, value: &Value) -> DatasetError {
    DatasetError::InvalidBranchValue {
        dataset: Dataset::Ifsc,
        bank: bank.to_string(),
        value: value.to_string(),
    }
}

fn order_custom_sublets(raw: HashMap<String, String>) -> Vec<(String, String)> {
    let mut ordered: Vec<(String, String)> = raw.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    ordered
}

/// Group bank codes under their lower-cased display name.
fn build_reverse_index(bank_names: &BTreeMap<String, String>) -> HashMap<String, Vec<String>> {
    let mut reverse: HashMap<String, Vec<String>> = HashMap::new();
    for (code, name) in bank_names {
        reverse.entry(name.to_lowercase()).or_default().push(code.clone());
    }
    reverse
}

// ============================================================================
// TESTS
// ============================================================================
