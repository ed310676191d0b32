use anyhow::{Context, Result};
use bayesgen::bayesnet::common::setup::{parse_converter_options, OutputFormat};
use bayesgen::bayesnet::format::bif::{load_bif, ParseOptions};
use bayesgen::bayesnet::format::{json::to_json, tabular::serialize};
use bayesgen::{print_green, print_yellow};
use log::{debug, warn};

fn main() -> Result<()> {
    let options = parse_converter_options();
    let parse_options = ParseOptions {
        strict: options.strict,
    };

    let outcome = load_bif(&options.input, &parse_options)
        .with_context(|| format!("Failed to parse {}", options.input.display()))?;
    for diagnostic in &outcome.diagnostics {
        debug!(
            "line {} {:?}: {}",
            diagnostic.line, diagnostic.kind, diagnostic.message
        );
    }
    let malformed = outcome.malformed().count();
    if malformed > 0 {
        print_yellow!("Skipped {} malformed lines", malformed);
    }
    for problem in outcome.network.validate() {
        warn!("incomplete network: {}", problem);
    }

    let output = match options.format {
        OutputFormat::Tabular => serialize(&outcome.network),
        OutputFormat::Json => to_json(&outcome.network),
    }
    .context("Failed to serialize network")?;
    println!("{}", output);

    print_green!(
        "Converted {} variables and {} tables",
        outcome.network.variable_count(),
        outcome.network.table_count()
    );
    Ok(())
}
