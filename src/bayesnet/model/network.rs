use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::enumerate::{assignment_count, Assignments};
use crate::bayesnet::model::table::{ConditionalTable, Rows};
use crate::bayesnet::model::variable::Variable;
use log::trace;
use std::collections::HashMap;

/// Variables in declaration order plus one conditional table per child.
///
/// Tables are kept in insertion order so that a table whose child was never
/// declared still has a stable place in the output.
#[derive(Debug, Clone, Default)]
pub struct Network {
    variables: Vec<Variable>,
    variable_index: HashMap<String, usize>,
    tables: Vec<ConditionalTable>,
    table_index: HashMap<String, usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a variable, or replaces the domain of an existing variable with
    /// the same name without moving it. Returns true when it replaced one.
    pub fn add_variable(&mut self, variable: Variable) -> bool {
        if let Some(&idx) = self.variable_index.get(&variable.name) {
            trace!("add_variable - replacing domain of {}", variable.name);
            self.variables[idx] = variable;
            return true;
        }
        self.variable_index
            .insert(variable.name.clone(), self.variables.len());
        self.variables.push(variable);
        false
    }

    /// Adds a table, replacing any earlier table for the same child in place.
    /// Returns true when it replaced one.
    pub fn add_table(&mut self, table: ConditionalTable) -> bool {
        if let Some(&idx) = self.table_index.get(&table.child) {
            trace!("add_table - replacing table for {}", table.child);
            self.tables[idx] = table;
            return true;
        }
        self.table_index.insert(table.child.clone(), self.tables.len());
        self.tables.push(table);
        false
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variable_index.get(name).map(|&i| &self.variables[i])
    }

    pub fn domain(&self, name: &str) -> Option<&[String]> {
        self.variable(name).map(|v| v.domain.as_slice())
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> &[ConditionalTable] {
        &self.tables
    }

    pub fn table(&self, child: &str) -> Option<&ConditionalTable> {
        self.table_index.get(child).map(|&i| &self.tables[i])
    }

    /// Tables in variable declaration order, followed by any tables whose
    /// child is not a declared variable, in insertion order.
    pub fn tables_in_order(&self) -> Vec<&ConditionalTable> {
        let mut ordered: Vec<&ConditionalTable> = self
            .variables
            .iter()
            .filter_map(|v| self.table(&v.name))
            .collect();
        ordered.extend(
            self.tables
                .iter()
                .filter(|t| !self.variable_index.contains_key(&t.child)),
        );
        ordered
    }

    /// Domains of `table`'s parents, in parent order.
    pub fn parent_domains(&self, table: &ConditionalTable) -> Result<Vec<&[String]>> {
        table
            .parents
            .iter()
            .map(|p| {
                self.domain(p)
                    .ok_or_else(|| NetworkError::UnknownVariable(p.clone()))
            })
            .collect()
    }

    /// Parent assignments of `table` in canonical order.
    pub fn assignments(&self, table: &ConditionalTable) -> Result<Assignments<'_>> {
        Ok(Assignments::new(self.parent_domains(table)?))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Structural problems the parser lets through: missing tables, tables
    /// for undeclared children, parents without a domain, rows missing or of
    /// the wrong length. Empty when the network is complete.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for variable in &self.variables {
            if variable.domain.is_empty() {
                problems.push(format!("variable {} has an empty domain", variable.name));
            }
            if self.table(&variable.name).is_none() {
                problems.push(format!("variable {} has no table", variable.name));
            }
        }
        for table in &self.tables {
            let Some(child) = self.variable(&table.child) else {
                problems.push(format!("table for undeclared variable {}", table.child));
                continue;
            };
            let domains = match self.parent_domains(table) {
                Ok(domains) => domains,
                Err(e) => {
                    problems.push(format!("table for {}: {}", table.child, e));
                    continue;
                }
            };
            let expected_rows = if table.is_unconditional() {
                1
            } else {
                assignment_count(&domains)
            };
            let missing = match &table.rows {
                Rows::Unconditional(_) => 0,
                Rows::Conditional(map) => Assignments::new(domains)
                    .filter(|a| !map.contains_key(a))
                    .count(),
            };
            if missing > 0 {
                problems.push(format!(
                    "table for {} is missing {} of {} rows",
                    table.child, missing, expected_rows
                ));
            }
            if table.stored_rows() > expected_rows {
                problems.push(format!(
                    "table for {} has {} rows, expected {}",
                    table.child,
                    table.stored_rows(),
                    expected_rows
                ));
            }
            if table
                .stored_row_values()
                .any(|row| row.len() != child.arity())
            {
                problems.push(format!(
                    "table for {} has rows whose length differs from its domain size {}",
                    table.child,
                    child.arity()
                ));
            }
        }
        problems
    }
}
