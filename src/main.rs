use anyhow::{Context, Result};
use bayesgen::bayesnet::common::setup::parse_summary_input;
use bayesgen::bayesnet::format::tabular::load_tabular;
use bayesgen::{print_blue, print_red};

fn main() -> Result<()> {
    let input = parse_summary_input();
    let network = load_tabular(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    for variable in network.variables() {
        print_blue!("{} {{ {} }}", variable.name, variable.domain.join(", "));
    }

    for table in network.tables_in_order() {
        if table.is_unconditional() {
            println!("P({})", table.child);
        } else {
            println!("P({} | {})", table.child, table.parents.join(", "));
        }
        for assignment in network.assignments(table)? {
            let row = table
                .row(&assignment)
                .map(|row| table.precision.render_row(row))
                .unwrap_or_else(|| "(missing)".to_string());
            if assignment.is_empty() {
                println!("  {}", row);
            } else {
                println!("  ({}) {}", assignment.values().join(", "), row);
            }
        }
    }

    for problem in network.validate() {
        print_red!("{}", problem);
    }
    Ok(())
}
