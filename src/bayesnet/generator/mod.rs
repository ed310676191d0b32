pub mod cpt;
pub mod factory;
pub mod morphology;
pub mod sort;
pub mod topology;

use log::info;
use rand::RngCore;

use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::common::interface::TopologyGenerator;
use crate::bayesnet::common::setup::GeneratorConfig;
use crate::bayesnet::model::Network;

pub use factory::{MorphologyParams, TopologyFactory};
pub use topology::Topology;

/// Lays out a topology, renames it into parent-first order and fills in
/// random tables.
pub fn generate_with(
    generator: &dyn TopologyGenerator,
    num_vars: usize,
    arity: usize,
    rng: &mut dyn RngCore,
) -> Result<Network> {
    if num_vars == 0 {
        return Err(NetworkError::InvalidParameter(
            "num_vars must be at least 1".to_string(),
        ));
    }
    if arity == 0 {
        return Err(NetworkError::InvalidParameter(
            "arity must be at least 1".to_string(),
        ));
    }
    let topology = generator.generate(num_vars, rng);
    info!(
        "generated {} topology: {} variables, {} edges",
        generator.morphology(),
        topology.len(),
        topology.edge_count()
    );
    let renamed = sort::sort_and_rename(&topology)?;
    cpt::build_network(&renamed.topology, arity, rng)
}

pub fn generate(
    morphology: &str,
    num_vars: usize,
    arity: usize,
    params: &MorphologyParams,
    rng: &mut dyn RngCore,
) -> Result<Network> {
    let generator = TopologyFactory::new_shared(morphology, params)?;
    generate_with(generator.as_ref(), num_vars, arity, rng)
}

pub fn generate_from_config(config: &GeneratorConfig, rng: &mut dyn RngCore) -> Result<Network> {
    generate(
        &config.morphology,
        config.num_vars,
        config.arity,
        &config.params,
        rng,
    )
}
