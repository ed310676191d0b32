use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::generator::topology::{placeholder, suffix, Topology};
use log::{debug, trace};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Kahn's algorithm. Among the variables whose parents are all placed, the one
/// with the lowest placeholder number goes next.
///
/// Fails with `CycleDetected` rather than returning a partial order, and with
/// `UnknownParent` when a parent list names a variable the topology lacks.
pub fn topological_order(topology: &Topology) -> Result<Vec<String>> {
    let names = topology.names();
    let mut in_degree: HashMap<&str, usize> = names.iter().map(|n| (n.as_str(), 0)).collect();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();

    for child in names {
        for parent in topology.parents(child) {
            if !in_degree.contains_key(parent.as_str()) {
                return Err(NetworkError::UnknownParent {
                    child: child.clone(),
                    parent: parent.clone(),
                });
            }
            *in_degree.entry(child.as_str()).or_default() += 1;
            children.entry(parent.as_str()).or_default().push(child.as_str());
        }
    }

    let mut ready = PriorityQueue::new();
    for name in names {
        if in_degree[name.as_str()] == 0 {
            ready.push(name.as_str(), ready_priority(name));
        }
    }

    let mut order = Vec::with_capacity(names.len());
    while let Some((name, _)) = ready.pop() {
        order.push(name.to_string());
        for &child in children.get(name).map(Vec::as_slice).unwrap_or(&[]) {
            let remaining = in_degree.entry(child).or_default();
            *remaining -= 1;
            if *remaining == 0 {
                ready.push(child, ready_priority(child));
            }
        }
    }

    if order.len() != names.len() {
        return Err(NetworkError::CycleDetected {
            sorted: order.len(),
            total: names.len(),
        });
    }
    trace!("topological order: {:?}", order);
    Ok(order)
}

fn ready_priority(name: &str) -> Reverse<(usize, String)> {
    Reverse((suffix(name).unwrap_or(usize::MAX), name.to_string()))
}

/// A topology relabelled so that the i-th variable in topological order is `X(i+1)`.
#[derive(Debug, Clone)]
pub struct Renamed {
    pub topology: Topology,
    /// Old name to new name.
    pub renaming: HashMap<String, String>,
}

/// Relabels `topology` along `order`, which must hold every variable once.
pub fn rename(order: &[String], topology: &Topology) -> Result<Renamed> {
    let renaming: HashMap<String, String> = order
        .iter()
        .enumerate()
        .map(|(i, old)| (old.clone(), placeholder(i + 1)))
        .collect();

    let mut entries = Vec::with_capacity(order.len());
    for old in order {
        let parents = topology
            .parents(old)
            .iter()
            .map(|p| {
                renaming
                    .get(p)
                    .cloned()
                    .ok_or_else(|| NetworkError::UnknownParent {
                        child: old.clone(),
                        parent: p.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.push((renaming[old].clone(), parents));
    }

    Ok(Renamed {
        topology: Topology::from_parents(entries),
        renaming,
    })
}

/// Sorts then renames. Afterwards every parent number is below its child's.
pub fn sort_and_rename(topology: &Topology) -> Result<Renamed> {
    let order = topological_order(topology)?;
    let renamed = rename(&order, topology)?;
    debug!(
        "renamed {} variables with {} edges",
        renamed.topology.len(),
        renamed.topology.edge_count()
    );
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayesnet::generator::morphology::{chain, inverse_tree};

    #[test]
    fn test_ties_break_by_placeholder_number() {
        let topology = Topology::from_parents([
            ("X3", vec![]),
            ("X10", vec![]),
            ("X2", vec!["X10"]),
            ("X1", vec!["X3"]),
        ]);
        let order = topological_order(&topology).expect("acyclic");
        assert_eq!(order, vec!["X3", "X1", "X10", "X2"]);
    }

    #[test]
    fn test_chain_order_is_identity() {
        let topology = chain(5);
        let order = topological_order(&topology).expect("acyclic");
        assert_eq!(order, vec!["X1", "X2", "X3", "X4", "X5"]);
        let renamed = rename(&order, &topology).expect("rename");
        assert_eq!(renamed.topology, topology);
    }

    #[test]
    fn test_two_cycle_is_rejected() {
        let topology = Topology::from_parents([("X1", vec!["X2"]), ("X2", vec!["X1"])]);
        let err = topological_order(&topology).unwrap_err();
        assert!(matches!(err, NetworkError::CycleDetected { sorted: 0, total: 2 }));
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix_is_rejected() {
        let topology = Topology::from_parents([
            ("X1", vec![]),
            ("X2", vec!["X1", "X4"]),
            ("X3", vec!["X2"]),
            ("X4", vec!["X3"]),
        ]);
        assert!(matches!(
            sort_and_rename(&topology),
            Err(NetworkError::CycleDetected { sorted: 1, total: 4 })
        ));
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let topology = Topology::from_parents([("X1", vec!["X9"])]);
        assert!(matches!(
            topological_order(&topology),
            Err(NetworkError::UnknownParent { parent, .. }) if parent == "X9"
        ));
    }

    #[test]
    fn test_inverse_tree_rename_puts_parents_first() {
        let topology = inverse_tree(7, 3, 2, 1.0);
        assert!(!topology.is_parent_ordered());
        let renamed = sort_and_rename(&topology).expect("acyclic");
        assert!(renamed.topology.is_parent_ordered());
        assert_eq!(renamed.renaming["X4"], "X1");
        assert_eq!(renamed.renaming["X1"], "X7");
        assert_eq!(renamed.topology.parents("X7"), &["X3".to_string(), "X6".to_string()]);
    }
}
