//! Raw search request attributes.
//!
//! Hosts hand over request attributes as a loosely-typed map. Only the three
//! group-related keys are recognized; everything else is ignored.

use serde_json::Value;

use crate::directory::GroupId;
use crate::expression::{
    describe_value, is_numeric, numeric_id, FilterError, FilterExpression, FilterResult,
    NativeGroupIds,
};

/// Request key holding the group expression.
pub const GROUP_KEY: &str = "group";

/// Request key holding the native inclusion list.
pub const NATIVE_INCLUDE_KEY: &str = "group__in";

/// Request key holding the native exclusion list.
pub const NATIVE_EXCLUDE_KEY: &str = "group__not_in";

/// The group-related attributes of one search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequestAttributes {
    /// The `group` expression, if set.
    pub group: Option<FilterExpression>,
    /// Native `group__in` / `group__not_in` lists, if set.
    pub native: NativeGroupIds,
}

impl RawRequestAttributes {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the group expression.
    pub fn with_group(mut self, group: FilterExpression) -> Self {
        self.group = Some(group);
        self
    }

    /// Sets the native inclusion list.
    pub fn with_group_in(mut self, ids: Vec<GroupId>) -> Self {
        self.native.include = Some(ids);
        self
    }

    /// Sets the native exclusion list.
    pub fn with_group_not_in(mut self, ids: Vec<GroupId>) -> Self {
        self.native.exclude = Some(ids);
        self
    }

    /// Decodes the recognized keys from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidRequest` if `value` is not an object or a
    /// native list has an unsupported shape, and
    /// `FilterError::InvalidFilterInput` if `group` has an unsupported shape.
    pub fn from_json(value: &Value) -> FilterResult<Self> {
        let Value::Object(map) = value else {
            return Err(FilterError::invalid_request(format!(
                "expected an object, found {}",
                describe_value(value)
            )));
        };

        let group = match map.get(GROUP_KEY) {
            Some(raw) => FilterExpression::from_json(raw)?,
            None => None,
        };
        let include = match map.get(NATIVE_INCLUDE_KEY) {
            Some(raw) => parse_id_list(raw)?,
            None => None,
        };
        let exclude = match map.get(NATIVE_EXCLUDE_KEY) {
            Some(raw) => parse_id_list(raw)?,
            None => None,
        };

        Ok(Self {
            group,
            native: NativeGroupIds { include, exclude },
        })
    }
}

/// Decodes an id list leniently.
///
/// Accepts an array of numbers or numeric strings, a single number, or a
/// comma-separated string. Entries that are not positive integers become 0 so
/// the compiler can discard them.
pub(crate) fn parse_id_list(value: &Value) -> FilterResult<Option<Vec<GroupId>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(lenient_id)
            .collect::<FilterResult<Vec<_>>>()
            .map(Some),
        Value::String(s) => Ok(Some(
            s.split(',')
                .filter(|part| !part.trim().is_empty())
                .map(lenient_text_id)
                .collect(),
        )),
        Value::Number(_) => Ok(Some(vec![lenient_id(value)?])),
        other => Err(FilterError::invalid_request(format!(
            "expected an id list, found {}",
            describe_value(other)
        ))),
    }
}

fn lenient_id(value: &Value) -> FilterResult<GroupId> {
    match value {
        Value::Number(n) => Ok(match (n.as_u64(), n.as_f64()) {
            (Some(id), _) => id,
            (None, Some(f)) if f >= 1.0 && f < i64::MAX as f64 => f.trunc() as GroupId,
            _ => 0,
        }),
        Value::String(s) => Ok(lenient_text_id(s)),
        Value::Null => Ok(0),
        other => Err(FilterError::invalid_request(format!(
            "expected an id, found {}",
            describe_value(other)
        ))),
    }
}

fn lenient_text_id(text: &str) -> GroupId {
    let text = text.trim();
    if is_numeric(text) {
        numeric_id(text).unwrap_or(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_all_keys() {
        let request = RawRequestAttributes::from_json(&json!({
            "group": "5,-7",
            "group__in": [1, "2"],
            "group__not_in": "3, 4",
            "scope": "future",
        }))
        .unwrap();

        assert_eq!(request.group, Some(FilterExpression::text("5,-7")));
        assert_eq!(request.native.include, Some(vec![1, 2]));
        assert_eq!(request.native.exclude, Some(vec![3, 4]));
    }

    #[test]
    fn test_from_json_empty_object() {
        let request = RawRequestAttributes::from_json(&json!({})).unwrap();
        assert_eq!(request, RawRequestAttributes::new());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result = RawRequestAttributes::from_json(&json!("group=5"));
        assert!(matches!(result, Err(FilterError::InvalidRequest { .. })));
    }

    #[test]
    fn test_from_json_rejects_bad_group_shape() {
        let result = RawRequestAttributes::from_json(&json!({ "group": { "id": 5 } }));
        assert!(matches!(result, Err(FilterError::InvalidFilterInput { .. })));
    }

    #[test]
    fn test_native_list_junk_becomes_zero() {
        let request = RawRequestAttributes::from_json(&json!({
            "group__in": [-3, "abc", 4.8, null, "6"],
        }))
        .unwrap();
        assert_eq!(request.native.include, Some(vec![0, 0, 4, 0, 6]));
    }

    #[test]
    fn test_native_list_single_number() {
        let request = RawRequestAttributes::from_json(&json!({ "group__not_in": 9 })).unwrap();
        assert_eq!(request.native.exclude, Some(vec![9]));
    }

    #[test]
    fn test_native_list_rejects_boolean() {
        let result = RawRequestAttributes::from_json(&json!({ "group__in": [true] }));
        assert!(matches!(result, Err(FilterError::InvalidRequest { .. })));
    }

    #[test]
    fn test_builders() {
        let request = RawRequestAttributes::new()
            .with_group(FilterExpression::text("my"))
            .with_group_in(vec![1])
            .with_group_not_in(vec![2]);
        assert_eq!(request.group, Some(FilterExpression::text("my")));
        assert_eq!(request.native.include, Some(vec![1]));
        assert_eq!(request.native.exclude, Some(vec![2]));
    }
}
