use crate::bayesnet::common::interface::TopologyGenerator;
use crate::bayesnet::generator::topology::{placeholder, Topology};
use log::trace;
use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// `X1 -> X2 -> ... -> Xn`.
pub fn chain(num_vars: usize) -> Topology {
    let mut topology = Topology::placeholders(num_vars);
    for i in 2..=num_vars {
        topology.set_parents(&placeholder(i), vec![placeholder(i - 1)]);
    }
    topology
}

/// Children given to each expanded tree node. Halves round to even.
pub fn children_per_node(branching: usize, fullness: f64) -> usize {
    (1.0 + fullness * (branching as f64 - 1.0)).round_ties_even() as usize
}

/// Tree grown breadth first from `X1`.
///
/// Nodes below `levels` each receive `children_per_node` new children until
/// the names run out. Nodes that could not be placed because the level cap
/// was reached hang off the last node that received children, or off the
/// root when none did.
pub fn full_tree(num_vars: usize, levels: usize, branching: usize, fullness: f64) -> Topology {
    let mut topology = Topology::placeholders(num_vars);
    if num_vars == 0 {
        return topology;
    }
    let per_node = children_per_node(branching, fullness);
    let mut queue = VecDeque::from([(1usize, 1usize)]);
    let mut next = 2;
    let mut last_assigned: Option<usize> = None;

    while next <= num_vars {
        let Some((current, level)) = queue.pop_front() else {
            break;
        };
        if level >= levels {
            continue;
        }
        let count = per_node.min(num_vars + 1 - next);
        if count > 0 {
            last_assigned = Some(current);
        }
        for _ in 0..count {
            topology.set_parents(&placeholder(next), vec![placeholder(current)]);
            queue.push_back((next, level + 1));
            next += 1;
        }
    }

    if next <= num_vars {
        let mut attach = last_assigned.unwrap_or(1);
        trace!(
            "full_tree - attaching X{}..X{} to X{}",
            next, num_vars, attach
        );
        for i in next..=num_vars {
            if i == attach {
                attach = 1;
            }
            topology.set_parents(&placeholder(i), vec![placeholder(attach)]);
        }
    }
    topology
}

/// `full_tree` with every edge reversed: all paths converge on `X1`.
/// Parent lists are sorted by placeholder number.
pub fn inverse_tree(num_vars: usize, levels: usize, branching: usize, fullness: f64) -> Topology {
    let tree = full_tree(num_vars, levels, branching, fullness);
    let mut inverse = Topology::placeholders(num_vars);
    for child in tree.names() {
        for parent in tree.parents(child) {
            inverse.add_edge(child, parent);
        }
    }
    inverse.sort_parents_by_suffix();
    inverse
}

/// A chain plus each edge `Xi -> Xj` with `j >= i + 2` drawn independently
/// with probability `extra_edge_prob`. Parent lists are sorted by placeholder
/// number.
pub fn random_dag(num_vars: usize, extra_edge_prob: f64, rng: &mut dyn RngCore) -> Topology {
    let mut topology = chain(num_vars);
    for i in 1..=num_vars {
        for j in (i + 2)..=num_vars {
            if rng.r#gen::<f64>() < extra_edge_prob {
                topology.add_edge(&placeholder(i), &placeholder(j));
            }
        }
    }
    topology.sort_parents_by_suffix();
    topology
}

pub struct Chain;

impl TopologyGenerator for Chain {
    fn morphology(&self) -> &'static str {
        "chain"
    }

    fn generate(&self, num_vars: usize, _rng: &mut dyn RngCore) -> Topology {
        chain(num_vars)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FullTree {
    pub levels: usize,
    pub branching: usize,
    pub fullness: f64,
}

impl TopologyGenerator for FullTree {
    fn morphology(&self) -> &'static str {
        "full_tree"
    }

    fn generate(&self, num_vars: usize, _rng: &mut dyn RngCore) -> Topology {
        full_tree(num_vars, self.levels, self.branching, self.fullness)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InverseTree(pub FullTree);

impl TopologyGenerator for InverseTree {
    fn morphology(&self) -> &'static str {
        "inverse_tree"
    }

    fn generate(&self, num_vars: usize, _rng: &mut dyn RngCore) -> Topology {
        let FullTree {
            levels,
            branching,
            fullness,
        } = self.0;
        inverse_tree(num_vars, levels, branching, fullness)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RandomDag {
    pub extra_edge_prob: f64,
}

impl TopologyGenerator for RandomDag {
    fn morphology(&self) -> &'static str {
        "random_dag"
    }

    fn generate(&self, num_vars: usize, rng: &mut dyn RngCore) -> Topology {
        random_dag(num_vars, self.extra_edge_prob, rng)
    }
}
