use std::collections::HashMap;

/// Placeholder name of the `index`-th variable (1-based).
pub fn placeholder(index: usize) -> String {
    format!("X{}", index)
}

/// Numeric part of a placeholder name: everything after the first character.
pub fn suffix(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    chars.next()?;
    chars.as_str().parse().ok()
}

/// Sort key that orders placeholder names by number. Names without a
/// numeric suffix sort last, by name.
pub fn suffix_key(name: &str) -> (usize, &str) {
    (suffix(name).unwrap_or(usize::MAX), name)
}

/// Parent lists keyed by variable name, before any domains or tables exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topology {
    names: Vec<String>,
    parents: HashMap<String, Vec<String>>,
}

impl Topology {
    /// `X1..Xn`, no edges.
    pub fn placeholders(num_vars: usize) -> Self {
        let names: Vec<String> = (1..=num_vars).map(placeholder).collect();
        let parents = names.iter().map(|n| (n.clone(), Vec::new())).collect();
        Topology { names, parents }
    }

    /// Builds a topology from `(name, parents)` pairs; names keep the given order.
    pub fn from_parents<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, Vec<S>)>,
    ) -> Self {
        let mut topology = Topology::default();
        for (name, parents) in entries {
            let name = name.into();
            topology.names.push(name.clone());
            topology
                .parents
                .insert(name, parents.into_iter().map(Into::into).collect());
        }
        topology
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn parents(&self, name: &str) -> &[String] {
        self.parents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_parents(&mut self, name: &str, parents: Vec<String>) {
        self.parents.insert(name.to_string(), parents);
    }

    /// Adds `parent -> child` unless it is already present.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> bool {
        let list = self.parents.entry(child.to_string()).or_default();
        if list.iter().any(|p| p == parent) {
            return false;
        }
        list.push(parent.to_string());
        true
    }

    pub fn edge_count(&self) -> usize {
        self.parents.values().map(Vec::len).sum()
    }

    pub fn sort_parents_by_suffix(&mut self) {
        for list in self.parents.values_mut() {
            list.sort_by(|a, b| suffix_key(a).cmp(&suffix_key(b)));
        }
    }

    /// True when every parent has a lower placeholder number than its child.
    pub fn is_parent_ordered(&self) -> bool {
        self.names.iter().all(|child| {
            let child_key = suffix_key(child);
            self.parents(child)
                .iter()
                .all(|parent| suffix_key(parent) < child_key)
        })
    }
}
