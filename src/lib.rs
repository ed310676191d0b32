#[macro_use]
pub mod bayesnet;

pub use bayesnet::{
    generate, parse, read_tabular, serialize, GeneratorConfig, Network, NetworkError,
};
