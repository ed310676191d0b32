use anyhow::{Context, Result};
use bayesgen::bayesnet::common::setup::parse_generator_options;
use bayesgen::bayesnet::format::tabular::serialize;
use bayesgen::bayesnet::generator::generate_from_config;
use bayesgen::print_green;

fn main() -> Result<()> {
    let config = parse_generator_options().context("Failed to load generator settings")?;
    let mut rng = config.rng();

    let network = generate_from_config(&config, &mut rng).with_context(|| {
        format!(
            "Failed to generate {} network with {} variables",
            config.morphology, config.num_vars
        )
    })?;
    println!("{}", serialize(&network).context("Failed to serialize network")?);

    print_green!(
        "Generated {} network: {} variables, arity {}",
        config.morphology,
        network.variable_count(),
        config.arity
    );
    Ok(())
}
