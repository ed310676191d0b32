//! Reader for the block-structured BIF notation.
//!
//! The reader is line oriented. Everything after `#` on a line is dropped and
//! blank lines are skipped. Only `variable` and `probability` blocks are
//! interpreted; any other line is ignored. In lenient mode (the default)
//! malformed lines are skipped and recorded as diagnostics, in strict mode the
//! first malformed line fails the parse.

use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::model::{Assignment, ConditionalTable, Network, Precision, Variable};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static VARIABLE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^variable\s+(\w+)\s*\{").expect("valid regex"));
static PROBABILITY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^probability\s*\(\s*(\w+)(?:\s*\|\s*(.*?))?\s*\)\s*\{").expect("valid regex")
});
static BRACED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("valid regex"));
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^table\s+(.*?);").expect("valid regex"));
static CONDITIONAL_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\s*(.*?)\s*\)\s*(.*?);").expect("valid regex"));

const COMMENT_MARKER: char = '#';
const BLOCK_END: &str = "}";

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Fail on the first malformed header or row instead of skipping it.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A line the grammar has no use for.
    Ignored,
    /// `variable` or `probability` keyword without the expected header shape.
    MalformedHeader,
    /// A body line that looks like a row but cannot be stored.
    MalformedRow,
    /// A block that reached the end of input without its closing line.
    UnterminatedBlock,
    /// A `variable` block for a name that was already declared.
    DuplicateVariable,
}

impl DiagnosticKind {
    /// Kinds that fail a strict parse.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::MalformedHeader
                | DiagnosticKind::MalformedRow
                | DiagnosticKind::UnterminatedBlock
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number in the input text.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub text: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub network: Network,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn malformed(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind.is_malformed())
    }
}

/// Parses in lenient mode. Never fails; anything unusable becomes a diagnostic.
pub fn parse(text: &str) -> ParseOutcome {
    let mut parser = BifParser::new(text, ParseOptions::default());
    if let Err(e) = parser.run() {
        // Lenient runs record diagnostics instead of failing.
        debug!("lenient parse stopped early: {}", e);
    }
    parser.finish()
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<ParseOutcome> {
    let mut parser = BifParser::new(text, options.clone());
    parser.run()?;
    Ok(parser.finish())
}

pub fn load_bif(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseOutcome> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;
    parse_with(&text, options)
}

#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// Body of a block together with where scanning resumes.
struct Block<'a> {
    header: &'a str,
    body: Vec<Line<'a>>,
    next: usize,
}

struct BifParser<'a> {
    lines: Vec<Line<'a>>,
    options: ParseOptions,
    network: Network,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BifParser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(i, raw)| {
                let text = raw.split(COMMENT_MARKER).next().unwrap_or("").trim();
                (!text.is_empty()).then_some(Line { number: i + 1, text })
            })
            .collect();
        BifParser {
            lines,
            options,
            network: Network::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> ParseOutcome {
        ParseOutcome {
            network: self.network,
            diagnostics: self.diagnostics,
        }
    }

    fn report(
        &mut self,
        kind: DiagnosticKind,
        line: usize,
        text: &str,
        message: impl Into<String>,
    ) -> Result<()> {
        let message = message.into();
        if kind.is_malformed() {
            if self.options.strict {
                return Err(NetworkError::parse(line, format!("{}: '{}'", message, text)));
            }
            warn!("line {}: {} ('{}'), skipped", line, message, text);
        } else {
            trace!("line {}: {} ('{}')", line, message, text);
        }
        self.diagnostics.push(Diagnostic {
            line,
            kind,
            text: text.to_string(),
            message,
        });
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.lines.len() {
            let Line { number, text } = self.lines[i];
            i = if text.starts_with("network") {
                i + 1
            } else if text.starts_with("variable") {
                self.variable_block(i)?
            } else if text.starts_with("probability") {
                self.probability_block(i)?
            } else {
                self.report(DiagnosticKind::Ignored, number, text, "unrecognized line")?;
                i + 1
            };
        }
        debug!(
            "parsed {} variables and {} tables ({} diagnostics)",
            self.network.variable_count(),
            self.network.table_count(),
            self.diagnostics.len()
        );
        Ok(())
    }

    /// Collects the body of the block opened on line `start`. A header whose
    /// braces balance closes on the same line; its body is the text between
    /// the outer braces.
    fn collect_block(&mut self, start: usize) -> Result<Block<'a>> {
        let Line { number, text } = self.lines[start];
        let opens = text.matches('{').count();
        let closes = text.matches('}').count();
        if closes >= opens {
            let body = match (text.find('{'), text.rfind('}')) {
                (Some(open), Some(close)) if open < close => text[open + 1..close].trim(),
                _ => "",
            };
            let body = if body.is_empty() {
                Vec::new()
            } else {
                vec![Line { number, text: body }]
            };
            return Ok(Block {
                header: text,
                body,
                next: start + 1,
            });
        }

        let mut body = Vec::new();
        let mut i = start + 1;
        while i < self.lines.len() && self.lines[i].text != BLOCK_END {
            body.push(self.lines[i]);
            i += 1;
        }
        if i >= self.lines.len() {
            self.report(
                DiagnosticKind::UnterminatedBlock,
                number,
                text,
                "block has no closing brace",
            )?;
        }
        Ok(Block {
            header: text,
            body,
            // Step past the closing line.
            next: i + 1,
        })
    }

    fn variable_block(&mut self, start: usize) -> Result<usize> {
        let Line { number, text } = self.lines[start];
        let Some(name) = VARIABLE_HEADER
            .captures(text)
            .map(|caps| caps[1].to_string())
        else {
            self.report(
                DiagnosticKind::MalformedHeader,
                number,
                text,
                "expected 'variable <name> {'",
            )?;
            return Ok(start + 1);
        };

        let block = self.collect_block(start)?;
        let single_line = block.next == start + 1;
        let domain = block
            .body
            .iter()
            .find_map(|line| BRACED_LIST.captures(line.text).map(|caps| split_list(&caps[1])))
            .or_else(|| {
                // `variable X { a, b }`: the block body is the list itself.
                block
                    .body
                    .first()
                    .filter(|_| single_line)
                    .map(|line| split_list(line.text))
            })
            .unwrap_or_default();

        trace!("variable {} with domain {:?}", name, domain);
        if self.network.add_variable(Variable::new(name.clone(), domain)) {
            self.report(
                DiagnosticKind::DuplicateVariable,
                number,
                block.header,
                format!("variable {} declared again; domain replaced", name),
            )?;
        }
        Ok(block.next)
    }

    fn probability_block(&mut self, start: usize) -> Result<usize> {
        let Line { number, text } = self.lines[start];
        let Some((child, parents)) = PROBABILITY_HEADER.captures(text).map(|caps| {
            let parents = caps
                .get(2)
                .map(|m| split_list(m.as_str()))
                .unwrap_or_default();
            (caps[1].to_string(), parents)
        }) else {
            self.report(
                DiagnosticKind::MalformedHeader,
                number,
                text,
                "expected 'probability ( <child> [| <parents>] ) {'",
            )?;
            return Ok(start + 1);
        };

        let block = self.collect_block(start)?;
        let mut table = ConditionalTable::new(child, parents, Precision::Shortest);
        for line in &block.body {
            self.table_line(&mut table, line)?;
        }
        trace!(
            "probability block for {} given {:?}: {} rows",
            table.child,
            table.parents,
            table.stored_rows()
        );
        self.network.add_table(table);
        Ok(block.next)
    }

    fn table_line(&mut self, table: &mut ConditionalTable, line: &Line<'a>) -> Result<()> {
        let Line { number, text } = *line;
        if text.starts_with("table") {
            let Some(values) = TABLE_ROW.captures(text).map(|caps| caps[1].to_string()) else {
                return self.report(
                    DiagnosticKind::MalformedRow,
                    number,
                    text,
                    "expected 'table <p>, <p>, ...;'",
                );
            };
            let row = match parse_probabilities(&values) {
                Ok(row) => row,
                Err(message) => {
                    return self.report(DiagnosticKind::MalformedRow, number, text, message);
                }
            };
            if !table.set_unconditional(row) {
                return self.report(
                    DiagnosticKind::MalformedRow,
                    number,
                    text,
                    format!("'table' row in block for {} which has parents", table.child),
                );
            }
            return Ok(());
        }

        let Some((assignment, values)) = CONDITIONAL_ROW
            .captures(text)
            .map(|caps| (split_list(&caps[1]), caps[2].to_string()))
        else {
            return self.report(DiagnosticKind::Ignored, number, text, "unrecognized line");
        };
        let row = match parse_probabilities(&values) {
            Ok(row) => row,
            Err(message) => {
                return self.report(DiagnosticKind::MalformedRow, number, text, message);
            }
        };
        let width = assignment.len();
        if !table.insert_row(Assignment(assignment), row) {
            return self.report(
                DiagnosticKind::MalformedRow,
                number,
                text,
                format!(
                    "assignment of {} values for {} which has {} parents",
                    width,
                    table.child,
                    table.parents.len()
                ),
            );
        }
        Ok(())
    }
}

/// Comma separated, each item trimmed, empty items dropped.
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_probabilities(values: &str) -> std::result::Result<Vec<f64>, String> {
    values
        .split(',')
        .map(|v| {
            let v = v.trim();
            v.parse::<f64>()
                .map_err(|_| format!("'{}' is not a probability", v))
        })
        .collect()
}
