//! Compile command implementation.
//!
//! Normalizes one request, compiles the parameters into predicate fragments,
//! and prints each fragment with its SQL.

use group_filter_rs::{compile_predicates, PredicateName, PredicateSet};

use super::config::load_config;
use super::input::RequestInput;
use super::{CommandContext, Result};
use crate::cli::RequestArgs;
use crate::output::{format_predicates_json, format_predicates_table};

/// Executes the compile command.
pub fn execute(ctx: &CommandContext, args: &RequestArgs, without: &[PredicateName]) -> Result<()> {
    let config = load_config()?;
    let input = RequestInput::from_args(args)?;
    let params = input.normalize(&config);

    let mut predicates = compile_predicates(&params, &input.context());
    drop_fragments(&mut predicates, without);

    if ctx.json_output {
        println!("{}", format_predicates_json(&predicates, &config.columns)?);
    } else {
        print!(
            "{}",
            format_predicates_table(&predicates, &config.columns, ctx.use_colors)
        );
    }

    Ok(())
}

/// Removes the named fragments, as a query layer would for an override.
fn drop_fragments(predicates: &mut PredicateSet, without: &[PredicateName]) {
    for name in without {
        if predicates.remove(*name).is_some() {
            tracing::debug!(fragment = %name, "dropped fragment on request");
        }
    }
}
