//! SQL rendering of predicate fragments.
//!
//! Fragments render as MySQL-style boolean clauses with backtick-quoted
//! column names. Group ids are integers and are inlined, so a fragment never
//! carries bound parameters.

use std::collections::BTreeMap;

use super::types::{Predicate, PredicateName, PredicateSet};
use crate::config::ColumnConfig;
use crate::directory::GroupId;

impl Predicate {
    /// Renders this fragment as a SQL boolean clause.
    pub fn to_sql(&self, columns: &ColumnConfig) -> String {
        let group = quote(&columns.group);
        match self {
            Predicate::NoGroup => format!("( {group} = 0 OR {group} IS NULL )"),
            Predicate::HasGroup => format!("( {group} IS NOT NULL AND {group} != 0 )"),
            Predicate::InGroups { ids } => format!("( {group} IN ({}) )", join_ids(ids)),
            Predicate::NotInGroups { ids } => format!("( {group} NOT IN ({}) )", join_ids(ids)),
            Predicate::Visible { member_of } => {
                let private = quote(&columns.private);
                let public_or_groupless = format!(
                    "{private}=0 OR ({private}=1 AND ({group} IS NULL OR {group} = 0))"
                );
                if member_of.is_empty() {
                    format!("({public_or_groupless})")
                } else {
                    format!(
                        "({public_or_groupless} OR ({private}=1 AND {group} IN ({})))",
                        join_ids(member_of)
                    )
                }
            }
        }
    }
}

impl PredicateSet {
    /// Renders every fragment, keyed by its stable name.
    pub fn to_sql(&self, columns: &ColumnConfig) -> BTreeMap<PredicateName, String> {
        self.iter()
            .map(|(name, predicate)| (name, predicate.to_sql(columns)))
            .collect()
    }

    /// Renders all fragments AND-joined in name order.
    ///
    /// Returns `None` when the set is empty.
    pub fn joined_sql(&self, columns: &ColumnConfig) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let clauses: Vec<String> = self
            .iter()
            .map(|(_, predicate)| predicate.to_sql(columns))
            .collect();
        Some(clauses.join(" AND "))
    }
}

fn quote(column: &str) -> String {
    format!("`{column}`")
}

fn join_ids(ids: &[GroupId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
