//! Rule table input
//!
//! Reads the tabular rule definitions (CSV) consumed by the model builder.

mod errors;
mod reader;
mod row;

pub use errors::{TableError, TableResult};
pub use reader::RuleTable;
pub use row::{RuleRow, REQUIRED_COLUMNS};
