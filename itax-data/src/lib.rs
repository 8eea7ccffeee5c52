//! Input and output around `itax-core`: amount parsing, CSV batches, TOML
//! rule files, report rendering and logging setup for the `itax` binary.

pub mod loader;
pub mod logging;
pub mod parse;
pub mod report;
pub mod rules_file;

pub use loader::CsvLoadError;
pub use parse::{KeyAmount, ParseAmountError, ParseArgError};
pub use rules_file::RulesFileError;
