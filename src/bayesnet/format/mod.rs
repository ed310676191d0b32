pub mod bif;
pub mod json;
pub mod tabular;

pub use bif::{parse, parse_with, Diagnostic, DiagnosticKind, ParseOptions, ParseOutcome};
pub use tabular::{read_tabular, serialize};
