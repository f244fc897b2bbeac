//! Predicate compilation for group filtering.
//!
//! Normalized [`SearchParameters`](crate::SearchParameters) are compiled into a
//! [`PredicateSet`]: a map from a stable fragment name to one boolean
//! condition. Fragments stay separate so a query layer can drop or override
//! one (for example `group_privacy` for administrators) without re-parsing.
//!
//! | Name            | Meaning                                           |
//! |-----------------|---------------------------------------------------|
//! | `group`         | inclusion, no-group, or my-groups constraint      |
//! | `group_exclude` | exclusion constraint                              |
//! | `group_exists`  | item must belong to some group                    |
//! | `group_privacy` | private items visible only to their group members |
//!
//! # Example
//!
//! ```
//! use group_filter_rs::predicate::{Predicate, PredicateCompiler, PredicateName};
//! use group_filter_rs::{ColumnConfig, SearchParameters, StaticDirectory, ViewerContext};
//!
//! let directory = StaticDirectory::new();
//! let context = ViewerContext::anonymous(&directory);
//!
//! let params = SearchParameters {
//!     group_in: Some(vec![5, 9]),
//!     ..SearchParameters::default()
//! };
//!
//! let predicates = PredicateCompiler::new(&context).compile(&params);
//! assert_eq!(predicates.names(), vec![PredicateName::Group]);
//!
//! let sql = predicates.get(PredicateName::Group).unwrap().to_sql(&ColumnConfig::default());
//! assert_eq!(sql, "( `group_id` IN (5,9) )");
//! ```

mod compiler;
mod sql;
mod types;

pub use compiler::PredicateCompiler;
pub use types::{Predicate, PredicateName, PredicateSet};

#[cfg(test)]
mod tests;
