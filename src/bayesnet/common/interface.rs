use rand::RngCore;

use crate::bayesnet::generator::topology::Topology;

/// A morphology: a strategy that lays out parent lists over the placeholder
/// names `X1..Xn`.
///
/// Every topology returned must be acyclic. Edges need not point from lower
/// to higher numbers; the rename step restores that numbering.
pub trait TopologyGenerator {
    /// Name used on the command line and in configuration files.
    fn morphology(&self) -> &'static str;

    fn generate(&self, num_vars: usize, rng: &mut dyn RngCore) -> Topology;
}
