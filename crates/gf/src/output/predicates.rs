//! Predicate fragment output formatting.

use group_filter_rs::{ColumnConfig, Predicate, PredicateSet};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::format_header;

/// JSON output structure for a compiled predicate set.
#[derive(Serialize)]
pub struct PredicatesOutput<'a> {
    pub predicates: Vec<PredicateOutput<'a>>,
    /// All fragments AND-joined, or null when there are none.
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
}

/// JSON output structure for a single fragment.
#[derive(Serialize)]
pub struct PredicateOutput<'a> {
    pub name: &'static str,
    #[serde(flatten)]
    pub predicate: &'a Predicate,
    pub sql: String,
}

/// Formats predicates as JSON, including each fragment's SQL.
pub fn format_predicates_json(
    predicates: &PredicateSet,
    columns: &ColumnConfig,
) -> Result<String, serde_json::Error> {
    let output = PredicatesOutput {
        predicates: predicates
            .iter()
            .map(|(name, predicate)| PredicateOutput {
                name: name.as_str(),
                predicate,
                sql: predicate.to_sql(columns),
            })
            .collect(),
        where_clause: predicates.joined_sql(columns),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats predicates as a name/SQL table.
pub fn format_predicates_table(
    predicates: &PredicateSet,
    columns: &ColumnConfig,
    use_colors: bool,
) -> String {
    if predicates.is_empty() {
        return "No predicates.\n".to_string();
    }

    let mut output = format_header(&format!("{:<14} {}", "Name", "SQL"), use_colors);

    for (name, predicate) in predicates {
        let label = format!("{:<14}", name.as_str());
        let label = if use_colors {
            label.cyan().to_string()
        } else {
            label
        };
        output.push_str(&format!("{} {}\n", label, predicate.to_sql(columns)));
    }

    output
}
