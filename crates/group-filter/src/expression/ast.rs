//! Raw filter expressions and the parser's resolved output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{FilterError, FilterResult};
use crate::directory::GroupId;

/// Raw value of the `group` attribute as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterExpression {
    /// A comma-separated expression, e.g. `"5,-7,book-club"`.
    Text(String),
    /// A bare integer, e.g. `0` or `12`.
    Integer(i64),
    /// An already-split list of items.
    List(Vec<ListItem>),
}

/// One element of a list-shaped [`FilterExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    /// A slug or numeric string, optionally prefixed with `-`.
    Text(String),
    /// A numeric id. Negative values are exclusions.
    Integer(i64),
}

impl ListItem {
    /// Returns the item in the same textual form a comma-separated expression uses.
    pub fn to_item_text(&self) -> String {
        match self {
            ListItem::Text(text) => text.clone(),
            ListItem::Integer(n) => n.to_string(),
        }
    }

    fn from_json(value: &Value) -> FilterResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(ListItem::Text(s.clone()))),
            Value::Number(n) => Ok(Some(match n.as_i64() {
                Some(i) => ListItem::Integer(i),
                None => ListItem::Text(n.to_string()),
            })),
            other => Err(FilterError::invalid_input(format!(
                "a list containing {}",
                describe_value(other)
            ))),
        }
    }
}

impl FilterExpression {
    /// Creates a text expression.
    pub fn text(value: impl Into<String>) -> Self {
        FilterExpression::Text(value.into())
    }

    /// Decodes the `group` attribute from the host's loosely-typed value.
    ///
    /// Returns `Ok(None)` for `null` (attribute not set).
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidFilterInput` for booleans, objects, and
    /// lists containing anything other than strings, numbers, or nulls.
    pub fn from_json(value: &Value) -> FilterResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(FilterExpression::Text(s.clone()))),
            Value::Number(n) => Ok(Some(match n.as_i64() {
                Some(i) => FilterExpression::Integer(i),
                // Floats and out-of-range values go through numeric parsing
                None => FilterExpression::Text(n.to_string()),
            })),
            Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(item) = ListItem::from_json(item)? {
                        list.push(item);
                    }
                }
                Ok(Some(FilterExpression::List(list)))
            }
            other => Err(FilterError::invalid_input(describe_value(other))),
        }
    }
}

/// Short human description of a JSON value's shape.
pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "nested list".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// A special, non-list interpretation of a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// Plain inclusion/exclusion lists, or nothing at all.
    #[default]
    None,
    /// `this`: the group whose page the request comes from.
    CurrentGroup,
    /// `my`: every group the viewer belongs to, resolved at compile time.
    MyGroups,
    /// `0`: only items that belong to no group.
    NoGroup,
    /// Exclusions without inclusions: the item must belong to some other group.
    MustHaveGroup,
}

/// Native `group__in` / `group__not_in` lists supplied alongside the expression.
///
/// Values are kept as given (unparsable entries are 0) and only sanitized by
/// the predicate compiler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeGroupIds {
    /// Native inclusion list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<GroupId>>,
    /// Native exclusion list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<GroupId>>,
}

/// Output of the expression parser.
///
/// `directive` never coexists with derived id lists, except that
/// [`Directive::CurrentGroup`] carries its id as the sole inclusion and
/// [`Directive::MustHaveGroup`] is always accompanied by exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedFilterState {
    /// Group ids to include. Duplicates are preserved.
    pub include_ids: Vec<GroupId>,
    /// Group ids to exclude. Duplicates are preserved.
    pub exclude_ids: Vec<GroupId>,
    /// Special interpretation, if any.
    pub directive: Directive,
    /// Native lists passed through untouched.
    pub native: NativeGroupIds,
    /// Items that resolved to no id and were dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_tokens: Vec<String>,
}

impl ResolvedFilterState {
    /// Creates a state that contributes nothing beyond the native lists.
    pub fn empty(native: NativeGroupIds) -> Self {
        Self {
            native,
            ..Self::default()
        }
    }

    /// Returns true if the expression contributes no directive and no ids.
    pub fn is_noop(&self) -> bool {
        self.directive == Directive::None
            && self.include_ids.is_empty()
            && self.exclude_ids.is_empty()
    }
}
