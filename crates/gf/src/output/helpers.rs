//! Common helper functions for output formatting.

use group_filter_rs::GroupId;
use owo_colors::OwoColorize;

/// Formats an id list as `5, 9`, or `-` when empty.
pub fn format_ids(ids: &[GroupId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats an optional id list; unset lists render as `-`.
pub fn format_optional_ids(ids: Option<&[GroupId]>) -> String {
    ids.map(format_ids).unwrap_or_else(|| "-".to_string())
}

/// Formats a table header row, dimmed when colors are on.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Formats a section title, bold when colors are on.
pub fn format_title(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", title.bold())
    } else {
        format!("{title}\n")
    }
}
