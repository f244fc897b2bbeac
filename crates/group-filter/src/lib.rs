//! Group-aware search filtering.
//!
//! This crate turns a user-supplied group expression (`"5,-7,book-club"`,
//! `"my"`, `"this"`, `"0"`) into normalized search parameters, and those
//! parameters into named boolean predicate fragments that a query builder can
//! AND together.
//!
//! Processing happens in two stages that mirror a host's hook points:
//!
//! 1. [`normalize_search`] runs once per search request. It parses the raw
//!    `group` attribute with an [`ExpressionParser`] and folds the result into
//!    [`SearchParameters`] with [`merge()`].
//! 2. [`compile_predicates`] runs once per query build. It compiles the
//!    parameters into a [`PredicateSet`] keyed by [`PredicateName`].
//!
//! Group slugs and memberships come from a [`GroupDirectory`], reached through
//! a per-request [`ViewerContext`]. Lookup failures never fail a search; they
//! are logged and treated as misses.
//!
//! # Example
//!
//! ```
//! use group_filter_rs::{
//!     compile_predicates, normalize_search, ColumnConfig, FilterConfig, FilterExpression,
//!     PredicateName, RawRequestAttributes, SearchParameters, StaticDirectory, ViewerContext,
//! };
//!
//! let directory = StaticDirectory::new().with_group("book-club", 9);
//! let context = ViewerContext::anonymous(&directory);
//!
//! let request = RawRequestAttributes::new().with_group(FilterExpression::text("5,-7,book-club"));
//! let params = normalize_search(
//!     SearchParameters::default(),
//!     &request,
//!     &context,
//!     &FilterConfig::default(),
//! );
//! assert_eq!(params.group_in, Some(vec![5, 9]));
//! assert_eq!(params.group_notin, Some(vec![7]));
//! assert!(params.group.is_none());
//!
//! let predicates = compile_predicates(&params, &context);
//! let columns = ColumnConfig::default();
//! assert_eq!(
//!     predicates.get(PredicateName::Group).unwrap().to_sql(&columns),
//!     "( `group_id` IN (5,9) )"
//! );
//! ```

use serde_json::Value;

pub mod config;
pub mod directory;
pub mod expression;
pub mod merge;
pub mod predicate;
pub mod request;
pub mod search;

pub use config::{ColumnConfig, ConfigError, FilterConfig, CONFIG_VERSION};
pub use directory::{
    GroupDirectory, GroupId, LookupError, LookupResult, StaticDirectory, UserId, Viewer,
    ViewerContext,
};
pub use expression::{
    Directive, ExpressionParser, FilterError, FilterExpression, FilterResult, NativeGroupIds,
    ResolvedFilterState,
};
pub use merge::merge;
pub use predicate::{Predicate, PredicateCompiler, PredicateName, PredicateSet};
pub use request::RawRequestAttributes;
pub use search::{GroupMarker, GroupParam, SearchParameters};

/// Normalizes the group attributes of one search request.
///
/// Resolves the request's raw `group` expression against the viewer context
/// and merges the outcome into `existing`. Native `group__in` /
/// `group__not_in` lists from the request are carried over only when
/// `existing` does not already have them.
pub fn normalize_search(
    existing: SearchParameters,
    request: &RawRequestAttributes,
    context: &ViewerContext<'_>,
    config: &FilterConfig,
) -> SearchParameters {
    let parser = ExpressionParser::new(context, config);
    let resolved = parser.parse(request.group.as_ref(), request.native.clone());
    merge(existing, &resolved)
}

/// Like [`normalize_search`], but decodes both sides from the host's JSON maps.
///
/// # Errors
///
/// Returns `FilterError::InvalidRequest` if either map has an unsupported
/// shape, and `FilterError::InvalidFilterInput` if the request's `group`
/// attribute is neither a string, an integer, nor a flat list.
pub fn normalize_search_json(
    existing: &Value,
    request: &Value,
    context: &ViewerContext<'_>,
    config: &FilterConfig,
) -> FilterResult<SearchParameters> {
    let existing = SearchParameters::from_json(existing)?;
    let request = RawRequestAttributes::from_json(request)?;
    Ok(normalize_search(existing, &request, context, config))
}

/// Compiles normalized search parameters into named predicate fragments.
pub fn compile_predicates(params: &SearchParameters, context: &ViewerContext<'_>) -> PredicateSet {
    PredicateCompiler::new(context).compile(params)
}
