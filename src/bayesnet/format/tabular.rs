//! The tabular exchange format.
//!
//! ```text
//! <variable count>
//! <name> <value> <value> ...
//! <table count>
//!
//! <child> <parent> <parent> ...
//! <row>
//! ...
//! ```
//!
//! Each table is preceded by a blank line. A conditional table has one row
//! per parent assignment in canonical order; an unconditional table has
//! exactly one row. A row with no stored probabilities is written as an empty
//! line.

use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::enumerate::{assignment_count, Assignments};
use crate::bayesnet::model::{ConditionalTable, Network, Precision, Rows, Variable};
use log::{debug, trace};
use std::path::Path;

/// Renders `network`. Tables follow variable declaration order. Fails only
/// when a table names a parent that was never declared.
pub fn serialize(network: &Network) -> Result<String> {
    let mut lines = Vec::new();
    lines.push(network.variable_count().to_string());
    for variable in network.variables() {
        lines.push(format!("{} {}", variable.name, variable.domain.join(" ")));
    }

    lines.push(network.table_count().to_string());
    for table in network.tables_in_order() {
        lines.push(String::new());
        lines.push(header(table));
        match &table.rows {
            Rows::Unconditional(row) => lines.push(table.precision.render_row(row)),
            Rows::Conditional(_) => {
                for assignment in network.assignments(table)? {
                    let line = table
                        .row(&assignment)
                        .map(|row| table.precision.render_row(row))
                        .unwrap_or_default();
                    lines.push(line);
                }
            }
        }
    }
    debug!(
        "serialized {} variables and {} tables",
        network.variable_count(),
        network.table_count()
    );
    Ok(lines.join("\n"))
}

fn header(table: &ConditionalTable) -> String {
    std::iter::once(table.child.as_str())
        .chain(table.parents.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads the exchange format back into a network. Unlike the BIF reader this
/// is strict: counts must match and every parent must be declared.
pub fn read_tabular(text: &str) -> Result<Network> {
    let mut cursor = Cursor::new(text);
    let mut network = Network::new();

    let variable_count = cursor.count("variable count")?;
    for _ in 0..variable_count {
        let (number, line) = cursor.required("variable declaration")?;
        let mut fields = line.split_whitespace();
        let Some(name) = fields.next() else {
            return Err(NetworkError::tabular(number, "empty variable declaration"));
        };
        let domain = fields.map(str::to_string).collect();
        if network.add_variable(Variable::new(name, domain)) {
            return Err(NetworkError::tabular(
                number,
                format!("variable {} declared twice", name),
            ));
        }
    }

    let table_count = cursor.count("table count")?;
    for _ in 0..table_count {
        cursor.skip_blank();
        let (number, line) = cursor.required("table header")?;
        let mut fields = line.split_whitespace().map(str::to_string);
        let Some(child) = fields.next() else {
            return Err(NetworkError::tabular(number, "empty table header"));
        };
        let parents: Vec<String> = fields.collect();
        let mut table = ConditionalTable::new(child, parents, Precision::Shortest);

        let domains = network
            .parent_domains(&table)
            .map_err(|e| NetworkError::tabular(number, e.to_string()))?;
        if table.is_unconditional() {
            let (number, line) = cursor.required("probability row")?;
            table.set_unconditional(parse_row(number, line)?);
        } else {
            trace!(
                "reading {} rows for {}",
                assignment_count(&domains),
                table.child
            );
            for assignment in Assignments::new(domains) {
                let (number, line) = cursor.required("probability row")?;
                let row = parse_row(number, line)?;
                if !row.is_empty() {
                    table.insert_row(assignment, row);
                }
            }
        }
        if network.add_table(table) {
            return Err(NetworkError::tabular(number, "second table for the same variable"));
        }
    }

    cursor.skip_blank();
    if let Some((number, line)) = cursor.next_line() {
        return Err(NetworkError::tabular(
            number,
            format!("unexpected content after the last table: '{}'", line),
        ));
    }
    debug!(
        "read {} variables and {} tables",
        network.variable_count(),
        network.table_count()
    );
    Ok(network)
}

pub fn load_tabular(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;
    read_tabular(&text)
}

fn parse_row(number: usize, line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|value| {
            value.parse::<f64>().map_err(|_| {
                NetworkError::tabular(number, format!("'{}' is not a probability", value))
            })
        })
        .collect()
}

/// Line reader over the exchange format. Splits on `'\n'` rather than using
/// `str::lines`, which would drop the empty line a missing final row leaves.
struct Cursor<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Split<'a, char>>>,
    last: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor {
            lines: text.split('\n').enumerate().peekable(),
            last: 0,
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.lines.next().map(|(i, line)| {
            self.last = i + 1;
            (i + 1, line.trim())
        })
    }

    fn required(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.next_line().ok_or_else(|| {
            NetworkError::tabular(self.last + 1, format!("unexpected end of input, expected {}", what))
        })
    }

    fn count(&mut self, what: &str) -> Result<usize> {
        self.skip_blank();
        let (number, line) = self.required(what)?;
        line.parse::<usize>()
            .map_err(|_| NetworkError::tabular(number, format!("expected {}, found '{}'", what, line)))
    }

    fn skip_blank(&mut self) {
        while let Some((i, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                break;
            }
            self.last = *i + 1;
            self.lines.next();
        }
    }
}
