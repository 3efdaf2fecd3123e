// Entity Models
//
// Typed records read from the reference datasets.

pub mod bank;

pub use bank::{BankDetails, BankType};
