//! Compilation of search parameters into named predicate fragments.

use super::types::{Predicate, PredicateName, PredicateSet};
use crate::directory::{GroupId, ViewerContext};
use crate::search::SearchParameters;

/// Compiles normalized search parameters into a [`PredicateSet`].
///
/// Fragments are computed independently and inserted in a fixed order; a
/// later fragment replaces an earlier one with the same name:
///
/// 1. `group_is_none` → `group`: no group
/// 2. `group_must_exist` → `group_exists`: some group
/// 3. inclusion ids (derived, else native) → `group`: one of the ids
/// 4. exclusion ids (derived, else native) → `group_exclude`: none of the ids
/// 5. `"my"` marker, logged-in viewer → `group`: one of the viewer's groups,
///    or no group when the viewer has none
/// 6. logged-in viewer → `group_privacy`: visibility of private items
///
/// Anonymous viewers get no `group_privacy` fragment; a public-only policy
/// has to come from the query layer.
pub struct PredicateCompiler<'a> {
    context: &'a ViewerContext<'a>,
}

impl<'a> PredicateCompiler<'a> {
    /// Creates a compiler for one request's viewer.
    pub fn new(context: &'a ViewerContext<'a>) -> Self {
        Self { context }
    }

    /// Builds the predicate set for `params`.
    pub fn compile(&self, params: &SearchParameters) -> PredicateSet {
        let mut set = PredicateSet::new();

        if params.group_is_none {
            insert(&mut set, PredicateName::Group, Predicate::NoGroup);
        }

        if params.group_must_exist {
            insert(&mut set, PredicateName::GroupExists, Predicate::HasGroup);
        }

        let include = sanitize_ids(params.effective_include());
        if !include.is_empty() {
            insert(&mut set, PredicateName::Group, Predicate::InGroups { ids: include });
        }

        let exclude = sanitize_ids(params.effective_exclude());
        if !exclude.is_empty() {
            insert(
                &mut set,
                PredicateName::GroupExclude,
                Predicate::NotInGroups { ids: exclude },
            );
        }

        // Only logged-in viewers have memberships to look up
        let memberships = self.context.viewer_groups();

        if params.is_my_groups() {
            match &memberships {
                Some(groups) if !groups.is_empty() => insert(
                    &mut set,
                    PredicateName::Group,
                    Predicate::InGroups {
                        ids: groups.clone(),
                    },
                ),
                Some(_) => insert(&mut set, PredicateName::Group, Predicate::NoGroup),
                None => tracing::debug!("ignoring my-groups marker for anonymous viewer"),
            }
        }

        if let Some(member_of) = memberships {
            insert(
                &mut set,
                PredicateName::GroupPrivacy,
                Predicate::Visible { member_of },
            );
        }

        set
    }
}

fn insert(set: &mut PredicateSet, name: PredicateName, predicate: Predicate) {
    tracing::trace!(%name, ?predicate, "adding predicate fragment");
    if let Some(replaced) = set.insert(name, predicate) {
        tracing::trace!(%name, ?replaced, "replaced earlier fragment");
    }
}

/// Keeps ids within the signed 64-bit range. 0 stays and matches groupless items.
fn sanitize_ids(ids: &[GroupId]) -> Vec<GroupId> {
    ids.iter()
        .copied()
        .filter(|id| *id <= i64::MAX as GroupId)
        .collect()
}
