//! Normalized search parameters.
//!
//! [`SearchParameters`] is the typed form of the host's search argument map,
//! restricted to the keys this crate reads or writes. It serializes with the
//! host's key names so it can be handed back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::directory::GroupId;
use crate::expression::{FilterError, FilterExpression, FilterResult};
use crate::request::parse_id_list;

/// Marker values stored under the `group` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMarker {
    /// Resolve to the viewer's groups when predicates are compiled.
    My,
}

/// Value of the `group` search parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GroupParam {
    /// A marker deferred to the predicate compiler.
    Marker(GroupMarker),
    /// A raw, not-yet-resolved expression.
    Expression(FilterExpression),
}

impl GroupParam {
    /// The `"my"` marker.
    pub fn my() -> Self {
        GroupParam::Marker(GroupMarker::My)
    }
}

/// Search parameters relevant to group filtering.
///
/// Derived lists (`group_in`, `group_notin`) come from the group expression;
/// native lists (`group__in`, `group__not_in`) are supplied by callers
/// directly. When both are set the derived list wins at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// The raw group expression, or a deferred marker.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_group"
    )]
    pub group: Option<GroupParam>,

    /// Derived inclusion list.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id_list"
    )]
    pub group_in: Option<Vec<GroupId>>,

    /// Derived exclusion list.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id_list"
    )]
    pub group_notin: Option<Vec<GroupId>>,

    /// Native inclusion list.
    #[serde(
        rename = "group__in",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id_list"
    )]
    pub native_in: Option<Vec<GroupId>>,

    /// Native exclusion list.
    #[serde(
        rename = "group__not_in",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id_list"
    )]
    pub native_not_in: Option<Vec<GroupId>>,

    /// Only items without a group.
    #[serde(default, skip_serializing_if = "is_false")]
    pub group_is_none: bool,

    /// Only items with some group.
    #[serde(default, skip_serializing_if = "is_false")]
    pub group_must_exist: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Decodes `group` the same way request attributes are decoded, except that
/// an exact `"my"` is the deferred marker.
fn deserialize_group<'de, D>(deserializer: D) -> Result<Option<GroupParam>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.as_str() == Some("my") {
        return Ok(Some(GroupParam::my()));
    }
    let expression = FilterExpression::from_json(&value).map_err(serde::de::Error::custom)?;
    Ok(expression.map(GroupParam::Expression))
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Option<Vec<GroupId>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id_list(&value).map_err(serde::de::Error::custom)
}

impl SearchParameters {
    /// Decodes parameters from the host's JSON map. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidRequest` if a recognized key has an
    /// unsupported shape.
    pub fn from_json(value: &Value) -> FilterResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| FilterError::invalid_request(e.to_string()))
    }

    /// Encodes the parameters with the host's key names.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Returns true if the unresolved group expression is still present.
    pub fn has_raw_group(&self) -> bool {
        matches!(self.group, Some(GroupParam::Expression(_)))
    }

    /// Returns true if the `"my"` marker is set.
    pub fn is_my_groups(&self) -> bool {
        matches!(self.group, Some(GroupParam::Marker(GroupMarker::My)))
    }

    /// Returns true if either derived list is present.
    pub fn has_derived_ids(&self) -> bool {
        self.group_in.is_some() || self.group_notin.is_some()
    }

    /// Inclusion ids to compile: derived if non-empty, else native.
    pub fn effective_include(&self) -> &[GroupId] {
        pick(&self.group_in, &self.native_in)
    }

    /// Exclusion ids to compile: derived if non-empty, else native.
    pub fn effective_exclude(&self) -> &[GroupId] {
        pick(&self.group_notin, &self.native_not_in)
    }
}

fn pick<'a>(
    derived: &'a Option<Vec<GroupId>>,
    native: &'a Option<Vec<GroupId>>,
) -> &'a [GroupId] {
    match (derived, native) {
        (Some(ids), _) if !ids.is_empty() => ids.as_slice(),
        (_, Some(ids)) => ids.as_slice(),
        _ => &[],
    }
}
