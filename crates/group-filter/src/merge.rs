//! Merge logic for folding a resolved expression into search parameters.
//!
//! Native keys already present are never overwritten, and the raw `group`
//! expression never survives next to derived keys, whether those were just
//! produced or were already in the existing parameters.

use crate::expression::{Directive, ResolvedFilterState};
use crate::search::{GroupParam, SearchParameters};

/// Applies a resolved filter state to search parameters.
///
/// Takes the existing parameters by value and returns the updated set:
/// - Copies native `group__in` / `group__not_in` lists in unless already set
/// - Applies the directive (current group, my groups, no group, must have group)
/// - Stores derived inclusion/exclusion lists and drops the raw expression
pub fn merge(mut params: SearchParameters, resolved: &ResolvedFilterState) -> SearchParameters {
    if params.native_in.is_none() {
        params.native_in = resolved.native.include.clone();
    }
    if params.native_not_in.is_none() {
        params.native_not_in = resolved.native.exclude.clone();
    }

    match resolved.directive {
        Directive::CurrentGroup => {
            params.group_in = Some(resolved.include_ids.clone());
            params.group = None;
            return params;
        }
        Directive::MyGroups => {
            params.group = Some(GroupParam::my());
            return params;
        }
        Directive::NoGroup => {
            params.group_is_none = true;
            params.group = None;
            return params;
        }
        Directive::MustHaveGroup => params.group_must_exist = true,
        Directive::None => {}
    }

    if !resolved.include_ids.is_empty() {
        params.group_in = Some(resolved.include_ids.clone());
    }
    if !resolved.exclude_ids.is_empty() {
        params.group_notin = Some(resolved.exclude_ids.clone());
    }
    let derived_now = !resolved.include_ids.is_empty() || !resolved.exclude_ids.is_empty();
    // Derived keys may also come from `existing`
    if derived_now || (params.has_raw_group() && params.has_derived_ids()) {
        params.group = None;
    }

    params
}
