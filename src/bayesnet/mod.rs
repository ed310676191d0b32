pub mod common;
pub mod enumerate;
pub mod format;
pub mod generator;
pub mod model;

// Re-export color printing macros
pub use crate::print_blue;
pub use crate::print_green;
pub use crate::print_red;
pub use crate::print_yellow;

/// Exports the main types for easy access
pub use common::{GeneratorConfig, NetworkError};
pub use format::{parse, read_tabular, serialize};
pub use generator::{generate, MorphologyParams, Topology};
pub use model::{Assignment, ConditionalTable, Network, Precision, Variable};
