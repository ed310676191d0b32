use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::common::interface::TopologyGenerator;

use super::morphology::{Chain, FullTree, InverseTree, RandomDag};

pub const MORPHOLOGIES: [&str; 4] = ["chain", "full_tree", "inverse_tree", "random_dag"];

/// Shape parameters. Each morphology reads only the ones it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyParams {
    /// Maximum depth of `full_tree` / `inverse_tree`, root at level 1.
    pub levels: usize,
    /// Maximum children per tree node.
    pub branching: usize,
    /// 0 grows a chain, 1 a full tree.
    pub fullness: f64,
    /// Probability of each extra `random_dag` edge.
    pub extra_edge_prob: f64,
}

impl Default for MorphologyParams {
    fn default() -> Self {
        MorphologyParams {
            levels: 3,
            branching: 2,
            fullness: 1.0,
            extra_edge_prob: 0.3,
        }
    }
}

impl MorphologyParams {
    fn tree(&self) -> Result<FullTree> {
        if self.branching == 0 {
            return Err(NetworkError::InvalidParameter(
                "branching must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fullness) {
            return Err(NetworkError::InvalidParameter(format!(
                "fullness must be within [0, 1], got {}",
                self.fullness
            )));
        }
        Ok(FullTree {
            levels: self.levels,
            branching: self.branching,
            fullness: self.fullness,
        })
    }

    fn dag(&self) -> Result<RandomDag> {
        if !(0.0..=1.0).contains(&self.extra_edge_prob) {
            return Err(NetworkError::InvalidParameter(format!(
                "extra_edge_prob must be within [0, 1], got {}",
                self.extra_edge_prob
            )));
        }
        Ok(RandomDag {
            extra_edge_prob: self.extra_edge_prob,
        })
    }
}

pub struct TopologyFactory;

impl TopologyFactory {
    pub fn new_shared(
        morphology: &str,
        params: &MorphologyParams,
    ) -> Result<Rc<dyn TopologyGenerator>> {
        match morphology {
            "chain" => Ok(Rc::new(Chain)),
            "full_tree" => Ok(Rc::new(params.tree()?)),
            "inverse_tree" => Ok(Rc::new(InverseTree(params.tree()?))),
            "random_dag" => Ok(Rc::new(params.dag()?)),
            _ => Err(NetworkError::UnknownMorphology(morphology.to_string())),
        }
    }
}
