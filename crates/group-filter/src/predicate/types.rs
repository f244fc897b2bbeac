//! Named predicate fragments.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::directory::GroupId;
use crate::expression::FilterError;

/// Stable fragment names.
///
/// Callers toggle fragments by these names, so renaming one is a breaking
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateName {
    /// Inclusion, no-group, and my-groups constraints.
    Group,
    /// Exclusion constraint.
    GroupExclude,
    /// Item must belong to some group.
    GroupExists,
    /// Visibility of private items.
    GroupPrivacy,
}

impl PredicateName {
    /// All names in their stable order.
    pub const ALL: [PredicateName; 4] = [
        PredicateName::Group,
        PredicateName::GroupExclude,
        PredicateName::GroupExists,
        PredicateName::GroupPrivacy,
    ];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateName::Group => "group",
            PredicateName::GroupExclude => "group_exclude",
            PredicateName::GroupExists => "group_exists",
            PredicateName::GroupPrivacy => "group_privacy",
        }
    }
}

impl fmt::Display for PredicateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredicateName {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PredicateName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FilterError::unknown_predicate(s))
    }
}

/// A boolean condition over the membership and privacy columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Membership column is NULL or 0.
    NoGroup,

    /// Membership column is neither NULL nor 0.
    HasGroup,

    /// Membership column is one of `ids`.
    InGroups {
        /// Allowed group ids.
        ids: Vec<GroupId>,
    },

    /// Membership column is none of `ids`.
    NotInGroups {
        /// Rejected group ids.
        ids: Vec<GroupId>,
    },

    /// Item is public, or private and groupless, or private in one of
    /// `member_of`.
    Visible {
        /// Groups the viewer belongs to.
        member_of: Vec<GroupId>,
    },
}

/// A set of named predicate fragments, AND-combined by the consumer.
///
/// At most one fragment exists per name; inserting under an existing name
/// replaces it. Iteration follows the stable name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateSet {
    fragments: BTreeMap<PredicateName, Predicate>,
}

impl PredicateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fragment, returning the one it replaced.
    pub fn insert(&mut self, name: PredicateName, predicate: Predicate) -> Option<Predicate> {
        self.fragments.insert(name, predicate)
    }

    /// Removes a fragment, e.g. to bypass privacy for administrators.
    pub fn remove(&mut self, name: PredicateName) -> Option<Predicate> {
        self.fragments.remove(&name)
    }

    /// Returns the fragment stored under `name`.
    pub fn get(&self, name: PredicateName) -> Option<&Predicate> {
        self.fragments.get(&name)
    }

    /// Returns true if a fragment is stored under `name`.
    pub fn contains(&self, name: PredicateName) -> bool {
        self.fragments.contains_key(&name)
    }

    /// Returns the names present, in stable order.
    pub fn names(&self) -> Vec<PredicateName> {
        self.fragments.keys().copied().collect()
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterates over fragments in stable name order.
    pub fn iter(&self) -> impl Iterator<Item = (PredicateName, &Predicate)> {
        self.fragments.iter().map(|(name, p)| (*name, p))
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = (&'a PredicateName, &'a Predicate);
    type IntoIter = std::collections::btree_map::Iter<'a, PredicateName, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
