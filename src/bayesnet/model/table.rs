use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One value per parent, in the table's parent order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment(pub Vec<String>);

impl Assignment {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Assignment(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How probabilities are rendered when a table is written out.
///
/// Parsed tables keep the shortest text that reads back to the same float;
/// synthetic tables are written with a fixed number of decimals.
///
/// `Shortest` switches to exponent notation below `1e-4` and from `1e16` up, and
/// writes the exponent bare (`1e-5`, `1e16`), not zero-padded or signed
/// (`1e-05`, `1e+16`). Both read back to the same value, but files are not
/// byte-identical to tools that pad the exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Precision {
    #[default]
    Shortest,
    Fixed(usize),
}

impl Precision {
    pub fn render(&self, probability: f64) -> String {
        match self {
            // Debug keeps the trailing ".0" on whole numbers ("1.0" rather than "1").
            Precision::Shortest => format!("{:?}", probability),
            Precision::Fixed(digits) => format!("{:.*}", digits, probability),
        }
    }

    pub fn render_row(&self, row: &[f64]) -> String {
        row.iter()
            .map(|p| self.render(*p))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// A single distribution over the child's domain.
    Unconditional(Vec<f64>),
    /// One distribution per parent assignment. Lookup only; iteration order
    /// comes from the enumerator, never from the map.
    Conditional(HashMap<Assignment, Vec<f64>>),
}

/// Distribution of `child` given `parents`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalTable {
    pub child: String,
    pub parents: Vec<String>,
    pub rows: Rows,
    pub precision: Precision,
}

impl ConditionalTable {
    pub fn unconditional(child: impl Into<String>, row: Vec<f64>, precision: Precision) -> Self {
        ConditionalTable {
            child: child.into(),
            parents: Vec::new(),
            rows: Rows::Unconditional(row),
            precision,
        }
    }

    /// An empty table. With no parents this is an unconditional table with an empty row.
    pub fn new(child: impl Into<String>, parents: Vec<String>, precision: Precision) -> Self {
        let rows = if parents.is_empty() {
            Rows::Unconditional(Vec::new())
        } else {
            Rows::Conditional(HashMap::new())
        };
        ConditionalTable {
            child: child.into(),
            parents,
            rows,
            precision,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.parents.is_empty()
    }

    /// Replaces the unconditional row. Returns false, leaving the table
    /// untouched, when the table has parents.
    pub fn set_unconditional(&mut self, row: Vec<f64>) -> bool {
        match &mut self.rows {
            Rows::Unconditional(existing) => {
                *existing = row;
                true
            }
            Rows::Conditional(_) => false,
        }
    }

    /// Stores the row for one parent assignment. Returns false when the table
    /// is unconditional or the assignment does not have one value per parent.
    pub fn insert_row(&mut self, assignment: Assignment, row: Vec<f64>) -> bool {
        if assignment.len() != self.parents.len() {
            return false;
        }
        match &mut self.rows {
            Rows::Conditional(map) => {
                map.insert(assignment, row);
                true
            }
            Rows::Unconditional(_) => false,
        }
    }

    /// The row for `assignment`. The unconditional row answers the empty assignment.
    pub fn row(&self, assignment: &Assignment) -> Option<&[f64]> {
        match &self.rows {
            Rows::Unconditional(row) if assignment.is_empty() => Some(row),
            Rows::Unconditional(_) => None,
            Rows::Conditional(map) => map.get(assignment).map(Vec::as_slice),
        }
    }

    /// Number of rows actually stored.
    pub fn stored_rows(&self) -> usize {
        match &self.rows {
            Rows::Unconditional(_) => 1,
            Rows::Conditional(map) => map.len(),
        }
    }

    pub fn stored_row_values(&self) -> Box<dyn Iterator<Item = &Vec<f64>> + '_> {
        match &self.rows {
            Rows::Unconditional(row) => Box::new(std::iter::once(row)),
            Rows::Conditional(map) => Box::new(map.values()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_exponent_is_bare() {
        assert_eq!(Precision::Shortest.render(1e-5), "1e-5");
        assert_eq!(Precision::Shortest.render(1e16), "1e16");
        assert_eq!(Precision::Shortest.render(0.001), "0.001");
    }

    #[test]
    fn test_shortest_precision_keeps_parsed_text() {
        let p = Precision::Shortest;
        assert_eq!(p.render(0.01), "0.01");
        assert_eq!(p.render(1.0), "1.0");
        assert_eq!(p.render(0.123456789), "0.123456789");
    }

    #[test]
    fn test_fixed_precision_rounds() {
        let p = Precision::Fixed(4);
        assert_eq!(p.render(0.123456), "0.1235");
        assert_eq!(p.render_row(&[0.25, 0.75]), "0.2500 0.7500");
    }

    #[test]
    fn test_insert_row_checks_shape() {
        let mut table = ConditionalTable::new("B", vec!["A".to_string()], Precision::Shortest);
        assert!(!table.set_unconditional(vec![0.5, 0.5]));
        assert!(!table.insert_row(Assignment::new(["a1", "extra"]), vec![0.1, 0.9]));
        assert!(table.insert_row(Assignment::new(["a1"]), vec![0.1, 0.9]));
        assert_eq!(table.row(&Assignment::new(["a1"])), Some(&[0.1, 0.9][..]));
        assert_eq!(table.row(&Assignment::new(["a2"])), None);
        assert_eq!(table.stored_rows(), 1);
    }

    #[test]
    fn test_unconditional_row_answers_empty_assignment() {
        let table = ConditionalTable::unconditional("A", vec![0.3, 0.7], Precision::Shortest);
        assert!(table.is_unconditional());
        assert_eq!(table.row(&Assignment::default()), Some(&[0.3, 0.7][..]));
    }
}
