pub mod error;
pub mod interface;
#[macro_use]
pub mod logging;
pub mod setup;

// Re-export key types
pub use error::{NetworkError, Result};
pub use interface::TopologyGenerator;
pub use setup::{ConverterOptions, GeneratorConfig, OutputFormat};
