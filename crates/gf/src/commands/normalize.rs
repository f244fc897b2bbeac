//! Normalize command implementation.
//!
//! Runs one request through `normalize_search` and prints the resulting
//! search parameters.

use super::config::load_config;
use super::input::RequestInput;
use super::{CommandContext, Result};
use crate::cli::RequestArgs;
use crate::output::{format_params_json, format_params_table};

/// Executes the normalize command.
pub fn execute(ctx: &CommandContext, args: &RequestArgs) -> Result<()> {
    let config = load_config()?;
    let input = RequestInput::from_args(args)?;
    let params = input.normalize(&config);

    if ctx.json_output {
        println!("{}", format_params_json(&params)?);
    } else {
        print!("{}", format_params_table(&params, ctx.use_colors));
    }

    Ok(())
}
