use crate::bayesnet::common::error::Result;
use crate::bayesnet::generator::topology::Topology;
use crate::bayesnet::model::{Assignment, ConditionalTable, Network, Precision, Variable};
use log::trace;
use rand::{Rng, RngCore};

/// Synthetic tables are written with four decimals.
pub const SYNTHETIC_PRECISION: Precision = Precision::Fixed(4);

/// `arity` independent uniform draws in (0, 1), normalized by their sum.
///
/// This is not uniform on the simplex: it favours rows near the centre. That
/// bias is what existing benchmark files were generated with.
pub fn random_distribution(arity: usize, rng: &mut dyn RngCore) -> Vec<f64> {
    let raw: Vec<f64> = (0..arity).map(|_| open_unit(rng)).collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|x| x / total).collect()
}

fn open_unit(rng: &mut dyn RngCore) -> f64 {
    loop {
        let x = rng.r#gen::<f64>();
        if x > 0.0 {
            return x;
        }
    }
}

/// Gives every variable of a parent-ordered topology the domain
/// `"0".."arity-1"` and a random table, rows in canonical order.
pub fn build_network(topology: &Topology, arity: usize, rng: &mut dyn RngCore) -> Result<Network> {
    let mut network = Network::new();
    for name in topology.names() {
        network.add_variable(Variable::with_arity(name.clone(), arity));
    }

    for name in topology.names() {
        let parents = topology.parents(name).to_vec();
        let table = if parents.is_empty() {
            ConditionalTable::unconditional(
                name.clone(),
                random_distribution(arity, rng),
                SYNTHETIC_PRECISION,
            )
        } else {
            let mut table = ConditionalTable::new(name.clone(), parents, SYNTHETIC_PRECISION);
            let assignments: Vec<Assignment> = network.assignments(&table)?.collect();
            trace!("build_network - {} rows for {}", assignments.len(), name);
            for assignment in assignments {
                table.insert_row(assignment, random_distribution(arity, rng));
            }
            table
        };
        network.add_table(table);
    }
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayesnet::generator::morphology::chain;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_distribution_sums_to_one() {
        let mut rng = StdRng::seed_from_u64(42);
        for arity in 1..6 {
            let row = random_distribution(arity, &mut rng);
            assert_eq!(row.len(), arity);
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|p| *p > 0.0 && *p <= 1.0));
        }
    }

    #[test]
    fn test_chain_network_is_complete() {
        let mut rng = StdRng::seed_from_u64(3);
        let network = build_network(&chain(4), 3, &mut rng).expect("build");
        assert_eq!(network.variable_count(), 4);
        assert_eq!(network.domain("X2"), Some(&["0".to_string(), "1".to_string(), "2".to_string()][..]));
        assert_eq!(network.table("X4").map(|t| t.stored_rows()), Some(3));
        assert_eq!(network.table("X1").map(|t| t.precision), Some(SYNTHETIC_PRECISION));
        assert!(network.validate().is_empty(), "{:?}", network.validate());
    }

    #[test]
    fn test_same_seed_same_network() {
        let first = build_network(&chain(3), 2, &mut StdRng::seed_from_u64(9)).expect("build");
        let second = build_network(&chain(3), 2, &mut StdRng::seed_from_u64(9)).expect("build");
        assert_eq!(first.tables(), second.tables());
    }
}
