use crate::bayesnet::common::error::Result;
use crate::bayesnet::model::{Assignment, Network, Rows, Variable};
use serde::Serialize;

/// JSON view of a network. Rows are listed in canonical assignment order;
/// missing rows are omitted.
#[derive(Debug, Serialize)]
pub struct NetworkView<'a> {
    pub variables: &'a [Variable],
    pub tables: Vec<TableView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TableView<'a> {
    pub child: &'a str,
    pub parents: &'a [String],
    pub rows: Vec<RowView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RowView<'a> {
    pub assignment: Assignment,
    pub probabilities: &'a [f64],
}

impl<'a> NetworkView<'a> {
    pub fn new(network: &'a Network) -> Result<Self> {
        let mut tables = Vec::new();
        for table in network.tables_in_order() {
            let rows = match &table.rows {
                Rows::Unconditional(row) => vec![RowView {
                    assignment: Assignment::default(),
                    probabilities: row,
                }],
                Rows::Conditional(_) => network
                    .assignments(table)?
                    .filter_map(|assignment| {
                        table.row(&assignment).map(|probabilities| RowView {
                            assignment,
                            probabilities,
                        })
                    })
                    .collect(),
            };
            tables.push(TableView {
                child: &table.child,
                parents: &table.parents,
                rows,
            });
        }
        Ok(NetworkView {
            variables: network.variables(),
            tables,
        })
    }
}

pub fn to_json(network: &Network) -> Result<String> {
    let view = NetworkView::new(network)?;
    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayesnet::model::{ConditionalTable, Precision};

    #[test]
    fn test_rows_follow_canonical_order() {
        let mut network = Network::new();
        network.add_variable(Variable::new("A", vec!["a1".into(), "a2".into()]));
        network.add_variable(Variable::new("B", vec!["b1".into(), "b2".into()]));
        network.add_table(ConditionalTable::unconditional("A", vec![0.5, 0.5], Precision::Shortest));
        let mut b = ConditionalTable::new("B", vec!["A".into()], Precision::Shortest);
        b.insert_row(Assignment::new(["a2"]), vec![0.3, 0.7]);
        b.insert_row(Assignment::new(["a1"]), vec![0.6, 0.4]);
        network.add_table(b);

        let json: serde_json::Value =
            serde_json::from_str(&to_json(&network).expect("json")).expect("valid json");
        let rows = &json["tables"][1]["rows"];
        assert_eq!(rows[0]["assignment"], serde_json::json!(["a1"]));
        assert_eq!(rows[1]["probabilities"], serde_json::json!([0.3, 0.7]));
        assert_eq!(json["variables"][1]["domain"], serde_json::json!(["b1", "b2"]));
    }
}
