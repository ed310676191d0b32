use serde::{Deserialize, Serialize};

/// A discrete random variable. The order of `domain` fixes the index of every
/// value in each table that mentions the variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub domain: Vec<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: Vec<String>) -> Self {
        Variable {
            name: name.into(),
            domain,
        }
    }

    /// Domain `"0".."arity-1"`, as used for synthetic networks.
    pub fn with_arity(name: impl Into<String>, arity: usize) -> Self {
        Variable::new(name, (0..arity).map(|i| i.to_string()).collect())
    }

    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }
}
