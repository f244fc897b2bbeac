//! Explain report output formatting.

use std::collections::BTreeMap;

use group_filter_rs::{
    ColumnConfig, Directive, GroupId, PredicateName, PredicateSet, SearchParameters,
};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_ids, format_title};
use super::{format_params_table, format_predicates_table};

/// A token that resolved to no group, with the closest known slug.
#[derive(Debug, Serialize)]
pub struct DroppedToken<'a> {
    pub token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}

/// Everything `gf explain` reports about one request.
#[derive(Serialize)]
pub struct ExplainReport<'a> {
    pub expression: Option<&'a str>,
    pub directive: Directive,
    pub include_ids: &'a [GroupId],
    pub exclude_ids: &'a [GroupId],
    pub dropped: Vec<DroppedToken<'a>>,
    pub params: &'a SearchParameters,
    #[serde(skip)]
    pub predicates: &'a PredicateSet,
    pub sql: BTreeMap<PredicateName, String>,
}

/// Formats an explain report as JSON.
pub fn format_explain_json(report: &ExplainReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Formats an explain report as labelled sections.
pub fn format_explain_table(
    report: &ExplainReport,
    columns: &ColumnConfig,
    use_colors: bool,
) -> String {
    let mut output = format_title("Resolution", use_colors);

    let expression = report
        .expression
        .map(|e| format!("{e:?}"))
        .unwrap_or_else(|| "-".to_string());
    output.push_str(&format!("  Expression: {}\n", expression));
    output.push_str(&format!("  Directive:  {}\n", directive_label(report.directive)));
    output.push_str(&format!("  Include:    {}\n", format_ids(report.include_ids)));
    output.push_str(&format!("  Exclude:    {}\n", format_ids(report.exclude_ids)));

    if !report.dropped.is_empty() {
        output.push_str("  Dropped:\n");
        for dropped in &report.dropped {
            let token = if use_colors {
                dropped.token.yellow().to_string()
            } else {
                dropped.token.to_string()
            };
            match dropped.suggestion {
                Some(slug) => {
                    output.push_str(&format!("    {} (did you mean '{}'?)\n", token, slug))
                }
                None => output.push_str(&format!("    {}\n", token)),
            }
        }
    }

    output.push('\n');
    output.push_str(&format_title("Parameters", use_colors));
    output.push_str(&format_params_table(report.params, use_colors));

    output.push('\n');
    output.push_str(&format_title("Predicates", use_colors));
    output.push_str(&format_predicates_table(report.predicates, columns, use_colors));

    output
}

fn directive_label(directive: Directive) -> &'static str {
    match directive {
        Directive::None => "none",
        Directive::CurrentGroup => "current group",
        Directive::MyGroups => "my groups",
        Directive::NoGroup => "no group",
        Directive::MustHaveGroup => "must have group",
    }
}
