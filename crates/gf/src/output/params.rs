//! Search parameter output formatting.

use group_filter_rs::{FilterExpression, GroupMarker, GroupParam, SearchParameters};

use super::helpers::{format_header, format_optional_ids};

/// Formats search parameters as JSON, using the host's key names.
pub fn format_params_json(params: &SearchParameters) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(params)
}

/// Formats search parameters as a key/value table.
pub fn format_params_table(params: &SearchParameters, use_colors: bool) -> String {
    let mut output = format_header(&format!("{:<18} {}", "Key", "Value"), use_colors);

    let rows = [
        ("group", format_group(params.group.as_ref())),
        ("group_in", format_optional_ids(params.group_in.as_deref())),
        ("group_notin", format_optional_ids(params.group_notin.as_deref())),
        ("group__in", format_optional_ids(params.native_in.as_deref())),
        (
            "group__not_in",
            format_optional_ids(params.native_not_in.as_deref()),
        ),
        ("group_is_none", params.group_is_none.to_string()),
        ("group_must_exist", params.group_must_exist.to_string()),
    ];

    for (key, value) in rows {
        output.push_str(&format!("{:<18} {}\n", key, value));
    }

    output
}

/// Formats the `group` parameter: the marker name, or the raw expression quoted.
fn format_group(group: Option<&GroupParam>) -> String {
    match group {
        None => "-".to_string(),
        Some(GroupParam::Marker(GroupMarker::My)) => "my".to_string(),
        Some(GroupParam::Expression(FilterExpression::Text(text))) => format!("{text:?}"),
        Some(GroupParam::Expression(FilterExpression::Integer(n))) => n.to_string(),
        Some(GroupParam::Expression(FilterExpression::List(items))) => {
            let items: Vec<String> = items.iter().map(|item| item.to_item_text()).collect();
            format!("[{}]", items.join(", "))
        }
    }
}
