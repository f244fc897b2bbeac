//! Tests for predicate compilation and rendering.

use super::*;
use crate::config::ColumnConfig;
use crate::directory::{StaticDirectory, Viewer, ViewerContext};
use crate::search::{GroupParam, SearchParameters};

const MEMBER: u64 = 3;
const LONER: u64 = 4;

fn directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_group("book-club", 9)
        .with_member(MEMBER, vec![9, 12])
        .with_member(LONER, vec![])
}

fn compile_as(viewer: Viewer, params: &SearchParameters) -> PredicateSet {
    let dir = directory();
    let context = ViewerContext::new(viewer, &dir);
    PredicateCompiler::new(&context).compile(params)
}

fn compile_anonymous(params: &SearchParameters) -> PredicateSet {
    compile_as(Viewer::Anonymous, params)
}

fn sql(set: &PredicateSet, name: PredicateName) -> String {
    set.get(name)
        .expect("fragment should be present")
        .to_sql(&ColumnConfig::default())
}

// ==================== Inclusion / Exclusion ====================

#[test]
fn test_inclusion_only() {
    let params = SearchParameters {
        group_in: Some(vec![5, 9]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(set.names(), vec![PredicateName::Group]);
    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![5, 9] })
    );
    assert_eq!(sql(&set, PredicateName::Group), "( `group_id` IN (5,9) )");
}

#[test]
fn test_inclusion_and_exclusion_coexist() {
    let params = SearchParameters {
        group_in: Some(vec![5, 9]),
        group_notin: Some(vec![7]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.names(),
        vec![PredicateName::Group, PredicateName::GroupExclude]
    );
    assert_eq!(
        sql(&set, PredicateName::GroupExclude),
        "( `group_id` NOT IN (7) )"
    );
}

#[test]
fn test_derived_lists_win_over_native() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        native_in: Some(vec![1, 2]),
        group_notin: Some(vec![7]),
        native_not_in: Some(vec![8]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![5] })
    );
    assert_eq!(
        set.get(PredicateName::GroupExclude),
        Some(&Predicate::NotInGroups { ids: vec![7] })
    );
}

#[test]
fn test_native_lists_compile() {
    let params = SearchParameters {
        native_in: Some(vec![1, 2]),
        native_not_in: Some(vec![8]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(sql(&set, PredicateName::Group), "( `group_id` IN (1,2) )");
    assert_eq!(
        sql(&set, PredicateName::GroupExclude),
        "( `group_id` NOT IN (8) )"
    );
}

#[test]
fn test_zero_ids_are_kept() {
    let params = SearchParameters {
        native_in: Some(vec![0, 4]),
        native_not_in: Some(vec![0]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![0, 4] })
    );
    assert_eq!(
        set.get(PredicateName::GroupExclude),
        Some(&Predicate::NotInGroups { ids: vec![0] })
    );
}

#[test]
fn test_native_zero_only_matches_groupless_items() {
    let params = SearchParameters {
        native_in: Some(vec![0]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(sql(&set, PredicateName::Group), "( `group_id` IN (0) )");
}

#[test]
fn test_out_of_range_ids_are_dropped() {
    let params = SearchParameters {
        native_in: Some(vec![u64::MAX, 7]),
        native_not_in: Some(vec![u64::MAX]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![7] })
    );
    // Nothing left to exclude, so no empty NOT IN ()
    assert!(!set.contains(PredicateName::GroupExclude));
}

#[test]
fn test_empty_lists_produce_nothing() {
    let params = SearchParameters {
        group_in: Some(vec![]),
        native_not_in: Some(vec![]),
        ..SearchParameters::default()
    };
    assert!(compile_anonymous(&params).is_empty());
}

// ==================== Existence Flags ====================

#[test]
fn test_group_is_none() {
    let params = SearchParameters {
        group_is_none: true,
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(set.get(PredicateName::Group), Some(&Predicate::NoGroup));
    assert_eq!(
        sql(&set, PredicateName::Group),
        "( `group_id` = 0 OR `group_id` IS NULL )"
    );
}

#[test]
fn test_group_must_exist_uses_distinct_name() {
    let params = SearchParameters {
        group_must_exist: true,
        group_notin: Some(vec![3, 4]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.names(),
        vec![PredicateName::GroupExclude, PredicateName::GroupExists]
    );
    assert_eq!(
        sql(&set, PredicateName::GroupExists),
        "( `group_id` IS NOT NULL AND `group_id` != 0 )"
    );
}

#[test]
fn test_inclusion_overrides_group_is_none() {
    let params = SearchParameters {
        group_is_none: true,
        native_in: Some(vec![6]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![6] })
    );
}

// ==================== My Groups ====================

fn my_marker() -> SearchParameters {
    SearchParameters {
        group: Some(GroupParam::my()),
        ..SearchParameters::default()
    }
}

#[test]
fn test_my_groups_with_memberships() {
    let set = compile_as(Viewer::Authenticated(MEMBER), &my_marker());

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![9, 12] })
    );
}

#[test]
fn test_my_groups_without_memberships_is_groupless() {
    let set = compile_as(Viewer::Authenticated(LONER), &my_marker());

    assert_eq!(set.get(PredicateName::Group), Some(&Predicate::NoGroup));
    assert_eq!(
        sql(&set, PredicateName::Group),
        "( `group_id` = 0 OR `group_id` IS NULL )"
    );
}

#[test]
fn test_my_groups_anonymous_is_ignored() {
    let set = compile_anonymous(&my_marker());
    assert!(set.is_empty());
}

#[test]
fn test_my_groups_overrides_inclusion() {
    let params = SearchParameters {
        native_in: Some(vec![1]),
        ..my_marker()
    };
    let set = compile_as(Viewer::Authenticated(MEMBER), &params);

    assert_eq!(
        set.get(PredicateName::Group),
        Some(&Predicate::InGroups { ids: vec![9, 12] })
    );
}

#[test]
fn test_raw_expression_is_not_compiled() {
    let params = SearchParameters {
        group: Some(GroupParam::Expression(
            crate::expression::FilterExpression::text("knitting"),
        )),
        ..SearchParameters::default()
    };
    assert!(compile_anonymous(&params).is_empty());
}

// ==================== Privacy ====================

#[test]
fn test_privacy_for_member() {
    let set = compile_as(Viewer::Authenticated(MEMBER), &SearchParameters::default());

    assert_eq!(set.names(), vec![PredicateName::GroupPrivacy]);
    assert_eq!(
        sql(&set, PredicateName::GroupPrivacy),
        "(`event_private`=0 OR (`event_private`=1 AND (`group_id` IS NULL OR `group_id` = 0)) \
         OR (`event_private`=1 AND `group_id` IN (9,12)))"
    );
}

#[test]
fn test_privacy_for_user_without_groups() {
    let set = compile_as(Viewer::Authenticated(LONER), &SearchParameters::default());

    assert_eq!(
        sql(&set, PredicateName::GroupPrivacy),
        "(`event_private`=0 OR (`event_private`=1 AND (`group_id` IS NULL OR `group_id` = 0)))"
    );
}

#[test]
fn test_no_privacy_for_anonymous() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);
    assert!(!set.contains(PredicateName::GroupPrivacy));
}

#[test]
fn test_privacy_is_independent_of_filters() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        group_notin: Some(vec![7]),
        ..SearchParameters::default()
    };
    let set = compile_as(Viewer::Authenticated(MEMBER), &params);

    assert_eq!(set.len(), 3);
    assert_eq!(
        set.get(PredicateName::GroupPrivacy),
        Some(&Predicate::Visible {
            member_of: vec![9, 12]
        })
    );
}

#[test]
fn test_compile_is_idempotent() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        group_must_exist: true,
        ..my_marker()
    };
    let first = compile_as(Viewer::Authenticated(MEMBER), &params);
    let second = compile_as(Viewer::Authenticated(MEMBER), &params);
    assert_eq!(first, second);
}

// ==================== PredicateSet ====================

#[test]
fn test_remove_fragment_for_bypass() {
    let mut set = compile_as(Viewer::Authenticated(MEMBER), &SearchParameters::default());
    assert!(set.remove(PredicateName::GroupPrivacy).is_some());
    assert!(set.is_empty());
}

#[test]
fn test_joined_sql() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        group_notin: Some(vec![7]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    assert_eq!(
        set.joined_sql(&ColumnConfig::default()),
        Some("( `group_id` IN (5) ) AND ( `group_id` NOT IN (7) )".to_string())
    );
    assert_eq!(PredicateSet::new().joined_sql(&ColumnConfig::default()), None);
}

#[test]
fn test_custom_columns() {
    let columns = ColumnConfig {
        group: "team_id".to_string(),
        private: "is_private".to_string(),
    };
    let predicate = Predicate::Visible { member_of: vec![] };
    assert_eq!(
        predicate.to_sql(&columns),
        "(`is_private`=0 OR (`is_private`=1 AND (`team_id` IS NULL OR `team_id` = 0)))"
    );
}

#[test]
fn test_predicate_name_round_trip() {
    for name in PredicateName::ALL {
        assert_eq!(name.as_str().parse::<PredicateName>().unwrap(), name);
    }
    assert!("group_owner".parse::<PredicateName>().is_err());
}

#[test]
fn test_predicate_set_serializes_by_name() {
    let params = SearchParameters {
        group_in: Some(vec![5]),
        ..SearchParameters::default()
    };
    let set = compile_anonymous(&params);

    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "group": { "kind": "in_groups", "ids": [5] } })
    );
}
