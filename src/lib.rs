// IFSC Registry - Core Library
// Offline validation of Indian bank branch codes (IFSC) and bank name lookups
// over static reference datasets. Used by the CLI, the API server, and tests.

pub mod config;
pub mod entities;
pub mod error;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use config::Config;
pub use entities::{BankDetails, BankType};
pub use error::{DatasetError, IfscError, Result};
pub use index::{DatasetStat, DatasetSummary, Indexes};
pub use loader::{Dataset, DatasetLoader, DirLoader, FallbackLoader, MemoryLoader};
pub use normalize::normalize_code;
pub use registry::{IfscRegistry, BANK_CODE_LEN, IFSC_LEN};
pub use resolver::Strategy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
