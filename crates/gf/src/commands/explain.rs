//! Explain command implementation.
//!
//! Shows each stage for one request: the resolved expression (with dropped
//! tokens and slug suggestions), the merged search parameters, and the
//! compiled fragments.

use group_filter_rs::{merge, ExpressionParser, PredicateCompiler, StaticDirectory};

use super::config::load_config;
use super::input::RequestInput;
use super::{CommandContext, Result};
use crate::cli::RequestArgs;
use crate::output::{format_explain_json, format_explain_table, DroppedToken, ExplainReport};

/// Executes the explain command.
pub fn execute(ctx: &CommandContext, args: &RequestArgs) -> Result<()> {
    let config = load_config()?;
    let input = RequestInput::from_args(args)?;
    let context = input.context();

    let resolved = ExpressionParser::new(&context, &config)
        .parse(input.request.group.as_ref(), input.request.native.clone());
    let params = merge(input.existing.clone(), &resolved);
    let predicates = PredicateCompiler::new(&context).compile(&params);

    let report = ExplainReport {
        expression: args.group.as_deref(),
        directive: resolved.directive,
        include_ids: &resolved.include_ids,
        exclude_ids: &resolved.exclude_ids,
        dropped: dropped_tokens(&resolved.dropped_tokens, &input.directory),
        params: &params,
        predicates: &predicates,
        sql: predicates.to_sql(&config.columns),
    };

    if ctx.json_output {
        println!("{}", format_explain_json(&report)?);
    } else {
        print!(
            "{}",
            format_explain_table(&report, &config.columns, ctx.use_colors)
        );
    }

    Ok(())
}

/// Pairs each dropped token with the closest known slug.
fn dropped_tokens<'a>(
    tokens: &'a [String],
    directory: &'a StaticDirectory,
) -> Vec<DroppedToken<'a>> {
    tokens
        .iter()
        .map(|token| {
            let slug = token.trim_start_matches('-').trim();
            DroppedToken {
                token,
                suggestion: directory.suggest_slug(slug),
            }
        })
        .collect()
}
