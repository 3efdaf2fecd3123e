// 🏛️ IFSC Registry - validation, name resolution, reverse lookups
//
// Built once from a loader, then shared read-only. Nothing here mutates, so
// `&IfscRegistry` (or `Arc<IfscRegistry>`) can be handed to any number of
// threads without locking.

use crate::entities::BankDetails;
use crate::error::{IfscError, Result};
use crate::index::{DatasetSummary, Indexes};
use crate::loader::DatasetLoader;
use crate::normalize::normalize_code;
use crate::resolver::resolve_name;

/// Length of a full IFSC code
pub const IFSC_LEN: usize = 11;

/// Length of the bank prefix
pub const BANK_CODE_LEN: usize = 4;

pub struct IfscRegistry {
    indexes: Indexes,
}

impl IfscRegistry {
    /// Load all datasets through `loader` and build the registry.
    ///
    /// Fails with `IfscError::Dataset` when any dataset is missing or malformed.
    pub fn load(loader: &dyn DatasetLoader) -> Result<Self> {
        let indexes = Indexes::build(loader)?;
        Ok(IfscRegistry { indexes })
    }

    /// What was loaded: entry counts and fingerprints per dataset
    pub fn summary(&self) -> &DatasetSummary {
        &self.indexes.summary
    }

    // ========================================================================
    // FORMAT VALIDATION
    // ========================================================================

    /// Is `code` a known 11-char IFSC code?
    ///
    /// Shape: 4-char bank prefix, literal '0', 6-char branch suffix. The
    /// suffix must be listed (after normalization) under the prefix.
    /// Letters are matched case-insensitively.
    pub fn validate(&self, code: &str) -> bool {
        if code.len() != IFSC_LEN || code.as_bytes()[BANK_CODE_LEN] != b'0' {
            return false;
        }

        // Byte 4 is ASCII, so both slices fall on char boundaries
        let bank_code = code[..BANK_CODE_LEN].to_uppercase();
        let branch_code = code[BANK_CODE_LEN + 1..].to_uppercase();

        match self.indexes.branches.get(&bank_code) {
            Some(branches) => branches.contains(normalize_code(&branch_code).as_ref()),
            None => false,
        }
    }

    // ========================================================================
    // NAME RESOLUTION
    // ========================================================================

    /// Resolve a code to a bank name.
    ///
    /// A direct hit in the name dataset wins. Otherwise the code must be a
    /// valid IFSC and the sublet → custom sublet → bank prefix chain decides.
    /// A valid code never errors; with no name anywhere the result is "".
    pub fn get_bank_name(&self, code: &str) -> Result<String> {
        if let Some(name) = self.indexes.bank_names.get(code) {
            return Ok(name.clone());
        }

        if !self.validate(code) {
            return Err(IfscError::InvalidCode(code.to_string()));
        }

        let (name, strategy) = resolve_name(&self.indexes, code);
        tracing::debug!(code, strategy = strategy.name(), name = %name, "bank name resolved");
        Ok(name)
    }

    // ========================================================================
    // REVERSE LOOKUP
    // ========================================================================

    /// Is `bank_code` a code with a known bank name?
    pub fn validate_bank_code(&self, bank_code: &str) -> bool {
        self.indexes.bank_names.contains_key(bank_code)
    }

    /// Bank codes registered under `bank_name` (case-insensitive).
    pub fn get_bank_codes(&self, bank_name: &str) -> Result<&[String]> {
        self.indexes
            .codes_by_name
            .get(&bank_name.to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| IfscError::BankNameNotFound(bank_name.to_string()))
    }

    /// Head-office IFSCs of every bank code registered under `bank_name`.
    ///
    /// Codes with no details record or an empty IFSC are skipped.
    pub fn get_ifscs_by_bank_name(&self, bank_name: &str) -> Result<Vec<String>> {
        let codes = self.get_bank_codes(bank_name)?;

        Ok(codes
            .iter()
            .filter_map(|code| self.get_bank_details(code))
            .filter(|details| details.has_ifsc())
            .map(|details| details.ifsc)
            .collect())
    }

    /// Does `ifsc` belong to the bank called `bank_name`?
    pub fn validate_ifsc_for_bank(&self, bank_name: &str, ifsc: &str) -> Result<bool> {
        if !self.validate(ifsc) {
            return Err(IfscError::InvalidFormat(ifsc.to_string()));
        }

        let codes = self.get_bank_codes(bank_name)?;
        let ifsc_bank_code = ifsc[..BANK_CODE_LEN].to_uppercase();

        Ok(codes.iter().any(|code| *code == ifsc_bank_code))
    }

    // ========================================================================
    // BANK DETAILS
    // ========================================================================

    /// Details record for `bank_code`, with its display name attached.
    pub fn get_bank_details(&self, bank_code: &str) -> Option<BankDetails> {
        let details = self.indexes.bank_details.get(bank_code)?;
        let name = self.indexes.bank_names.get(bank_code).cloned().unwrap_or_default();
        Some(details.clone().with_name(name))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Dataset, DirLoader, MemoryLoader};

    fn hdfc_only() -> IfscRegistry {
        let loader = MemoryLoader::new()
            .with(Dataset::Ifsc, r#"{"HDFC": ["0001", "0002"]}"#)
            .with(Dataset::BankNames, r#"{"HDFC": "HDFC Bank"}"#)
            .with(Dataset::Banks, "{}")
            .with(Dataset::Sublets, "{}")
            .with(Dataset::CustomSublets, "{}");
        IfscRegistry::load(&loader).unwrap()
    }

    fn fixture() -> IfscRegistry {
        let loader = MemoryLoader::new()
            .with(
                Dataset::Ifsc,
                r#"{
                    "HDFC": [1, 2, "000060"],
                    "ABCD": ["123456", "0A0001"],
                    "SBIN": [1234, "0005"],
                    "NONM": [1]
                }"#,
            )
            .with(
                Dataset::BankNames,
                r#"{
                    "HDFC": "HDFC Bank",
                    "ABCD": "Alpha Bank",
                    "SBIN": "State Bank of India",
                    "SBHY": "State Bank of India",
                    "SBXX": "State Bank of India",
                    "HDFC0000060": "HDFC Bank Treasury"
                }"#,
            )
            .with(
                Dataset::Banks,
                r#"{
                    "HDFC": {"code": "HDFC", "type": "Private", "ifsc": "HDFC0000001"},
                    "SBIN": {"code": "SBIN", "type": "PSB", "ifsc": "SBIN0001234"},
                    "SBHY": {"code": "SBHY", "type": "PSB", "ifsc": ""}
                }"#,
            )
            .with(Dataset::Sublets, r#"{"SBIN0001234": "HDFC"}"#)
            .with(Dataset::CustomSublets, r#"{"ABCD00A": "UNNAMED"}"#);
        IfscRegistry::load(&loader).unwrap()
    }

    #[test]
    fn test_validate_known_codes() {
        let registry = hdfc_only();
        assert!(registry.validate("HDFC0000001"));
        assert!(registry.validate("HDFC0000002"));
        assert!(!registry.validate("HDFC0000003"));
    }

    #[test]
    fn test_validate_rejects_bad_shape() {
        let registry = hdfc_only();
        assert!(!registry.validate("HDFC1000001"), "5th char must be '0'");
        assert!(!registry.validate("HDFC000001"), "too short");
        assert!(!registry.validate("HDFC00000001"), "too long");
        assert!(!registry.validate(""));
        assert!(!registry.validate("XXXX0000001"), "unknown bank");
    }

    #[test]
    fn test_validate_non_ascii_does_not_panic() {
        let registry = hdfc_only();
        // 11 bytes each
        assert!(!registry.validate("HDFC0é0001"));
        assert!(!registry.validate("HDFé000001"), "byte 4 is inside a multi-byte char");
    }

    #[test]
    fn test_validate_case_insensitive() {
        let registry = fixture();
        assert_eq!(registry.validate("ABCD0123456"), registry.validate("abcd0123456"));
        assert!(registry.validate("abcd0123456"));
        assert!(registry.validate("abcd00a0001"));
    }

    #[test]
    fn test_validate_normalizes_suffix() {
        let registry = fixture();
        // Stored as "000060" → "60"; queried as "000060" → "60"
        assert!(registry.validate("HDFC0000060"));
        // Stored as number 1234
        assert!(registry.validate("SBIN0001234"));
        // Non-numeric suffix compared verbatim
        assert!(registry.validate("ABCD00A0001"));
    }

    #[test]
    fn test_get_bank_name_direct() {
        let registry = hdfc_only();
        assert_eq!(registry.get_bank_name("HDFC0000001").unwrap(), "HDFC Bank");
        assert_eq!(registry.get_bank_name("HDFC").unwrap(), "HDFC Bank");
    }

    #[test]
    fn test_get_bank_name_direct_full_code_wins() {
        let registry = fixture();
        assert_eq!(registry.get_bank_name("HDFC0000060").unwrap(), "HDFC Bank Treasury");
    }

    #[test]
    fn test_get_bank_name_invalid_code() {
        let registry = hdfc_only();
        let err = registry.get_bank_name("HDFC1000001").unwrap_err();
        assert!(matches!(err, IfscError::InvalidCode(ref c) if c == "HDFC1000001"));

        assert!(matches!(
            registry.get_bank_name("NOPE").unwrap_err(),
            IfscError::InvalidCode(_)
        ));
    }

    #[test]
    fn test_get_bank_name_sublet() {
        let registry = fixture();
        assert_eq!(registry.get_bank_name("SBIN0001234").unwrap(), "HDFC Bank");
    }

    #[test]
    fn test_get_bank_name_custom_sublet_raw_target() {
        let registry = fixture();
        // Target has no name of its own, so the raw target comes back
        assert_eq!(registry.get_bank_name("ABCD00A0001").unwrap(), "UNNAMED");
        // Prefix does not match → bare bank prefix
        assert_eq!(registry.get_bank_name("ABCD0123456").unwrap(), "Alpha Bank");
        // Unknown branch: the custom sublet never gets a say
        assert!(registry.get_bank_name("ABCD00A0002").is_err());
    }

    #[test]
    fn test_get_bank_name_bare_prefix_fallback() {
        let registry = fixture();
        assert_eq!(registry.get_bank_name("SBIN0000005").unwrap(), "State Bank of India");
        // Valid but unnamed bank → empty name, no error
        assert_eq!(registry.get_bank_name("NONM0000001").unwrap(), "");
        // Lowercase valid code: prefix lookup is case-sensitive
        assert_eq!(registry.get_bank_name("hdfc0000002").unwrap(), "");
    }

    #[test]
    fn test_validate_bank_code() {
        let registry = fixture();
        assert!(registry.validate_bank_code("HDFC"));
        assert!(registry.validate_bank_code("SBHY"));
        assert!(!registry.validate_bank_code("NONM"));
        assert!(!registry.validate_bank_code("hdfc"));
    }

    #[test]
    fn test_get_bank_codes() {
        let registry = hdfc_only();
        assert_eq!(registry.get_bank_codes("hdfc bank").unwrap(), ["HDFC"]);
        assert_eq!(registry.get_bank_codes("HDFC BANK").unwrap(), ["HDFC"]);

        let registry = fixture();
        assert_eq!(
            registry.get_bank_codes("State Bank of India").unwrap(),
            ["SBHY", "SBIN", "SBXX"]
        );
    }

    #[test]
    fn test_get_bank_codes_unknown() {
        let registry = hdfc_only();
        let err = registry.get_bank_codes("Unknown Bank").unwrap_err();
        assert!(matches!(err, IfscError::BankNameNotFound(ref n) if n == "Unknown Bank"));
    }

    #[test]
    fn test_get_ifscs_by_bank_name() {
        let registry = fixture();

        let ifscs = registry.get_ifscs_by_bank_name("state bank of india").unwrap();
        // SBHY has an empty IFSC, SBXX has no details
        assert_eq!(ifscs, vec!["SBIN0001234"]);

        let codes = registry.get_bank_codes("state bank of india").unwrap();
        for ifsc in &ifscs {
            assert!(codes.contains(&ifsc[..4].to_string()));
        }

        assert!(matches!(
            registry.get_ifscs_by_bank_name("Nowhere Bank"),
            Err(IfscError::BankNameNotFound(_))
        ));
    }

    #[test]
    fn test_validate_ifsc_for_bank() {
        let registry = fixture();

        assert!(registry.validate_ifsc_for_bank("HDFC Bank", "HDFC0000001").unwrap());
        assert!(registry.validate_ifsc_for_bank("hdfc bank", "hdfc0000002").unwrap());
        assert!(!registry.validate_ifsc_for_bank("State Bank of India", "HDFC0000001").unwrap());
    }

    #[test]
    fn test_validate_ifsc_for_bank_errors() {
        let registry = fixture();

        assert!(matches!(
            registry.validate_ifsc_for_bank("HDFC Bank", "HDFC0000999"),
            Err(IfscError::InvalidFormat(_))
        ));

        // Format is checked before the bank name
        assert!(matches!(
            registry.validate_ifsc_for_bank("Nowhere Bank", "bad"),
            Err(IfscError::InvalidFormat(_))
        ));

        assert!(matches!(
            registry.validate_ifsc_for_bank("Nowhere Bank", "HDFC0000001"),
            Err(IfscError::BankNameNotFound(_))
        ));
    }

    #[test]
    fn test_get_bank_details() {
        let registry = fixture();

        let details = registry.get_bank_details("HDFC").unwrap();
        assert_eq!(details.name, "HDFC Bank");
        assert_eq!(details.ifsc, "HDFC0000001");

        assert!(registry.get_bank_details("SBXX").is_none());
    }

    #[test]
    fn test_load_fails_on_missing_dataset() {
        let loader = MemoryLoader::new().with(Dataset::Ifsc, "{}");
        let result = IfscRegistry::load(&loader);
        assert!(matches!(result, Err(IfscError::Dataset(_))));
    }

    #[test]
    fn test_sample_data_directory() {
        let loader = DirLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let registry = IfscRegistry::load(&loader).unwrap();

        assert!(registry.validate("HDFC0000001"));
        assert_eq!(registry.get_bank_name("HDFC0000001").unwrap(), "HDFC Bank");
        assert!(registry.get_bank_codes("HDFC Bank").unwrap().contains(&"HDFC".to_string()));
        assert_eq!(registry.summary().datasets.len(), 5);
    }

    #[test]
    fn test_sample_data_resolution_chain() {
        let loader = DirLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let registry = IfscRegistry::load(&loader).unwrap();

        // Sublet to a bank code with a name
        assert_eq!(registry.get_bank_name("HDFC0000240").unwrap(), "Adarsh Co-operative Urban Bank");
        // Custom sublet, longest prefix wins over "KARB0000"
        assert_eq!(
            registry.get_bank_name("KARB0000245").unwrap(),
            "Andhra Pradesh Grameena Vikas Bank"
        );
        assert_eq!(registry.get_bank_name("KARB0000010").unwrap(), "Karnataka Bank");
        // Non-numeric branch suffix
        assert!(registry.validate("YESB0CMSNOC"));
        assert_eq!(registry.get_bank_name("YESB0CMSNOC").unwrap(), "Yes Bank");
    }

    #[test]
    fn test_sample_data_ifscs_belong_to_bank_codes() {
        let loader = DirLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let registry = IfscRegistry::load(&loader).unwrap();

        for name in ["State Bank of India", "HDFC Bank", "Yes Bank", "Axis Bank"] {
            let codes = registry.get_bank_codes(name).unwrap();
            let ifscs = registry.get_ifscs_by_bank_name(name).unwrap();
            assert!(!ifscs.is_empty(), "{} should have at least one IFSC", name);

            for ifsc in &ifscs {
                assert!(
                    codes.iter().any(|c| *c == ifsc[..4]),
                    "{} prefix should be one of {:?}",
                    ifsc,
                    codes
                );
                assert!(registry.validate_ifsc_for_bank(name, ifsc).unwrap());
            }
        }
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IfscRegistry>();
    }
}
