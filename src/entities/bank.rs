// 🏦 Bank Entity - one record from banks.json
//
// The details dataset carries no display name; the registry fills `name` in
// from banknames.json when it hands a record out.

use serde::{Deserialize, Serialize};

// ============================================================================
// BANK TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BankType {
    /// Public sector bank
    #[serde(rename = "PSB")]
    PublicSector,

    /// Private sector bank
    #[serde(rename = "Private")]
    Private,

    /// Foreign bank operating in India
    #[serde(rename = "Foreign")]
    Foreign,

    #[serde(rename = "Payments Bank", alias = "Payments bank")]
    PaymentsBank,

    #[serde(rename = "Small Finance Bank")]
    SmallFinance,

    /// Regional rural bank
    #[serde(rename = "Regional Rural", alias = "RRB")]
    RegionalRural,

    /// Urban / state / district co-operative bank
    #[serde(rename = "Co-operative", alias = "Co-Operative")]
    Cooperative,

    #[serde(rename = "Local Area Bank")]
    LocalArea,

    /// Unknown / Other
    #[default]
    #[serde(other)]
    Unknown,
}

impl BankType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankType::PublicSector => "PSB",
            BankType::Private => "Private",
            BankType::Foreign => "Foreign",
            BankType::PaymentsBank => "Payments Bank",
            BankType::SmallFinance => "Small Finance Bank",
            BankType::RegionalRural => "Regional Rural",
            BankType::Cooperative => "Co-operative",
            BankType::LocalArea => "Local Area Bank",
            BankType::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// BANK DETAILS
// ============================================================================

/// Bank-level metadata keyed by bank code.
///
/// Every field is optional in the payload: missing strings come back empty,
/// missing flags come back false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    /// Display name (from banknames.json, not banks.json)
    #[serde(skip_deserializing)]
    pub name: String,

    /// Bank code, e.g. "HDFC"
    pub code: String,

    #[serde(rename = "type")]
    pub bank_type: BankType,

    /// Head-office IFSC, empty when the bank has none
    pub ifsc: String,

    pub micr: String,

    /// Issuer identification number
    pub iin: String,

    /// Aadhaar Payment Bridge System participant
    pub apbs: bool,

    pub ach_credit: bool,
    pub ach_debit: bool,
    pub nach_debit: bool,
    pub upi: bool,
}

impl BankDetails {
    /// Does this bank have a head-office IFSC?
    pub fn has_ifsc(&self) -> bool {
        !self.ifsc.is_empty()
    }

    /// Builder: attach the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
