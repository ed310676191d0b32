//! Canonical ordering of parent assignments.
//!
//! Every table is written, read back and synthesized in this order: the
//! Cartesian product of the parent domains with the last parent varying
//! fastest. Rows are stored in a map, so this iterator is the only source of
//! row order anywhere in the crate.

use crate::bayesnet::model::table::Assignment;

/// Iterator over the Cartesian product of `domains`, last domain fastest.
///
/// An empty list of domains yields exactly one empty assignment. If any domain
/// is empty the product is empty.
#[derive(Debug, Clone)]
pub struct Assignments<'a> {
    domains: Vec<&'a [String]>,
    odometer: Vec<usize>,
    exhausted: bool,
}

impl<'a> Assignments<'a> {
    pub fn new(domains: Vec<&'a [String]>) -> Self {
        let exhausted = domains.iter().any(|d| d.is_empty());
        Assignments {
            odometer: vec![0; domains.len()],
            domains,
            exhausted,
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.domains.len()).rev() {
            self.odometer[pos] += 1;
            if self.odometer[pos] < self.domains[pos].len() {
                return;
            }
            self.odometer[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Assignments<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.exhausted {
            return None;
        }
        let current = Assignment(
            self.odometer
                .iter()
                .zip(&self.domains)
                .map(|(&i, domain)| domain[i].clone())
                .collect(),
        );
        self.advance();
        Some(current)
    }
}

/// All assignments of `domains` in canonical order.
pub fn assignments<'a>(domains: Vec<&'a [String]>) -> Assignments<'a> {
    Assignments::new(domains)
}

/// Number of assignments `assignments(domains)` yields.
pub fn assignment_count(domains: &[&[String]]) -> usize {
    domains.iter().map(|d| d.len()).product()
}
