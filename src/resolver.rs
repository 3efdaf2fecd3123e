// 🧭 Name Resolver - fallback chain for codes with no direct name
//
// Only reached once a code has passed validation. Each strategy either
// answers or passes; the last one always answers, possibly with "".

use crate::index::Indexes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exact alias in sublet.json
    Sublet,

    /// Prefix rule in custom-sublets.json
    CustomSublet,

    /// Name of the bare 4-char bank prefix
    BankPrefix,
}

impl Strategy {
    /// Resolution order, first answer wins.
    pub const CHAIN: [Strategy; 3] = [Strategy::Sublet, Strategy::CustomSublet, Strategy::BankPrefix];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sublet => "sublet",
            Strategy::CustomSublet => "custom_sublet",
            Strategy::BankPrefix => "bank_prefix",
        }
    }

    pub fn resolve(&self, indexes: &Indexes, code: &str) -> Option<String> {
        match self {
            Strategy::Sublet => indexes
                .sublets
                .get(code)
                .map(|target| name_or_empty(indexes, target)),

            Strategy::CustomSublet => indexes
                .custom_sublets
                .iter()
                .find(|(prefix, _)| code.starts_with(prefix.as_str()))
                .map(|(_, target)| {
                    indexes
                        .bank_names
                        .get(target)
                        .cloned()
                        // An unnamed target is returned as-is
                        .unwrap_or_else(|| target.clone())
                }),

            Strategy::BankPrefix => {
                let prefix = code.get(0..4).unwrap_or(code);
                Some(name_or_empty(indexes, prefix))
            }
        }
    }
}

fn name_or_empty(indexes: &Indexes, code: &str) -> String {
    indexes.bank_names.get(code).cloned().unwrap_or_default()
}

/// Run the chain, returning the answer and the strategy that produced it.
pub fn resolve_name(indexes: &Indexes, code: &str) -> (String, Strategy) {
    for strategy in Strategy::CHAIN {
        if let Some(name) = strategy.resolve(indexes, code) {
            return (name, strategy);
        }
    }
    // BankPrefix always answers
    (String::new(), Strategy::BankPrefix)
}

// ============================================================================
// TESTS
// ============================================================================
