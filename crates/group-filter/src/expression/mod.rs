//! Group filter expression parsing.
//!
//! A group expression is a comma-separated list of group references used to
//! narrow a search to items owned by particular groups.
//!
//! # Supported Syntax
//!
//! ## Items
//! - `12` - Items in group 12
//! - `book-club` - Items in the group with slug `book-club`
//! - `-12`, `-book-club` - Exclude that group
//!
//! ## Keywords
//! - `this` - The group whose page the request comes from
//! - `my` - Every group the logged-in viewer belongs to
//! - `0` - Items that belong to no group
//!
//! An expression with exclusions but no inclusions (`-3,-4`) matches items
//! that belong to some group other than the excluded ones.
//!
//! # Example
//!
//! ```
//! use group_filter_rs::expression::{Directive, ExpressionParser, FilterExpression, NativeGroupIds};
//! use group_filter_rs::{FilterConfig, StaticDirectory, ViewerContext};
//!
//! let directory = StaticDirectory::new();
//! let context = ViewerContext::anonymous(&directory);
//! let config = FilterConfig::default();
//! let parser = ExpressionParser::new(&context, &config);
//!
//! let state = parser.parse(Some(&FilterExpression::text("-3,-4")), NativeGroupIds::default());
//! assert_eq!(state.directive, Directive::MustHaveGroup);
//! assert_eq!(state.exclude_ids, vec![3, 4]);
//! ```

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{Directive, FilterExpression, ListItem, NativeGroupIds, ResolvedFilterState};
pub(crate) use ast::describe_value;
pub use error::{FilterError, FilterResult};
pub use lexer::{GroupToken, ItemToken, Lexer};
pub(crate) use lexer::{is_numeric, numeric_id};
pub use parser::ExpressionParser;
