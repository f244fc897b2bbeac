//! Output formatting utilities for the gf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is being printed:
//!
//! - [`params`] - Normalized search parameters
//! - [`predicates`] - Compiled predicate fragments and their SQL
//! - [`explain`] - Step-by-step resolution reports
//! - [`helpers`] - Common formatting utilities (id lists, headers)

mod explain;
pub mod helpers;
mod params;
mod predicates;

pub use explain::{format_explain_json, format_explain_table, DroppedToken, ExplainReport};
pub use params::{format_params_json, format_params_table};
pub use predicates::{format_predicates_json, format_predicates_table};
