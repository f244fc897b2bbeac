//! Item splitting and classification for group expressions.

use crate::directory::GroupId;

/// What a single list item refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupToken {
    /// A numeric item. `None` when the number is not a usable id
    /// (zero, negative after the prefix was stripped, or out of range).
    Id(Option<GroupId>),

    /// A slug to be resolved through the group directory.
    Slug(String),
}

/// A classified list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemToken {
    /// The trimmed item as written, including any `-` prefix.
    pub text: String,
    /// Whether the item was prefixed with `-`.
    pub exclude: bool,
    /// The classified value.
    pub token: GroupToken,
}

/// Splits an expression into classified items.
///
/// Empty items (and the literal `0`) are skipped without producing a token.
pub struct Lexer<'a> {
    items: Vec<&'a str>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over a comma-separated expression.
    pub fn new(input: &'a str) -> Self {
        Self {
            items: input.split(',').collect(),
        }
    }

    /// Creates a lexer over items that are already split.
    pub fn from_items(items: &'a [String]) -> Self {
        Self {
            items: items.iter().map(String::as_str).collect(),
        }
    }

    /// Classifies every non-empty item.
    pub fn tokenize(&self) -> Vec<ItemToken> {
        self.items.iter().filter_map(|item| classify(item)).collect()
    }
}

fn classify(item: &str) -> Option<ItemToken> {
    let trimmed = item.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return None;
    }

    let (exclude, value) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, trimmed),
    };

    // Numeric check wins over slug resolution
    let token = if is_numeric(value) {
        GroupToken::Id(numeric_id(value))
    } else {
        GroupToken::Slug(value.to_string())
    };

    Some(ItemToken {
        text: trimmed.to_string(),
        exclude,
        token,
    })
}

/// Returns true for decimal numbers: optional sign, digits with an optional
/// fraction, and an optional exponent.
pub(crate) fn is_numeric(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// Converts a numeric string to a group id, truncating toward zero.
pub(crate) fn numeric_id(value: &str) -> Option<GroupId> {
    let plain = value.strip_prefix('+').unwrap_or(value);
    if plain.bytes().all(|b| b.is_ascii_digit()) {
        return plain
            .parse::<GroupId>()
            .ok()
            .filter(|id| *id > 0 && *id <= i64::MAX as GroupId);
    }

    let truncated = value.parse::<f64>().ok()?.trunc();
    if truncated >= 1.0 && truncated < i64::MAX as f64 {
        Some(truncated as GroupId)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<ItemToken> {
        Lexer::new(input).tokenize()
    }

    #[test]
    fn test_numeric_grammar() {
        assert!(is_numeric("5"));
        assert!(is_numeric("+5"));
        assert!(is_numeric("-5"));
        assert!(is_numeric("5.5"));
        assert!(is_numeric(".5"));
        assert!(is_numeric("5."));
        assert!(is_numeric("1e3"));
        assert!(is_numeric("1E-2"));

        assert!(!is_numeric(""));
        assert!(!is_numeric("."));
        assert!(!is_numeric("1.2.3"));
        assert!(!is_numeric("1e"));
        assert!(!is_numeric("12abc"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("0x1A"));
    }

    #[test]
    fn test_split_ids_and_slugs() {
        let result = tokens("5, -7 ,book-club");
        assert_eq!(result.len(), 3);

        assert_eq!(result[0].token, GroupToken::Id(Some(5)));
        assert!(!result[0].exclude);

        assert_eq!(result[1].token, GroupToken::Id(Some(7)));
        assert!(result[1].exclude);
        assert_eq!(result[1].text, "-7");

        assert_eq!(result[2].token, GroupToken::Slug("book-club".to_string()));
    }

    #[test]
    fn test_empty_items_are_skipped() {
        let result = tokens(",, 5 ,,");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].token, GroupToken::Id(Some(5)));
    }

    #[test]
    fn test_zero_item_is_skipped() {
        let result = tokens("0,5");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_slug_with_inner_hyphen_is_not_exclusion() {
        let result = tokens("my-slug");
        assert!(!result[0].exclude);
        assert_eq!(result[0].token, GroupToken::Slug("my-slug".to_string()));
    }

    #[test]
    fn test_excluded_slug() {
        let result = tokens("-chess");
        assert!(result[0].exclude);
        assert_eq!(result[0].token, GroupToken::Slug("chess".to_string()));
    }

    #[test]
    fn test_double_minus_is_unusable_id() {
        let result = tokens("--5");
        assert!(result[0].exclude);
        assert_eq!(result[0].token, GroupToken::Id(None));
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(tokens("5.9")[0].token, GroupToken::Id(Some(5)));
        assert_eq!(tokens("1e2")[0].token, GroupToken::Id(Some(100)));
        assert_eq!(tokens("0.5")[0].token, GroupToken::Id(None));
    }

    #[test]
    fn test_out_of_range_id() {
        assert_eq!(
            tokens("99999999999999999999")[0].token,
            GroupToken::Id(None)
        );
        assert_eq!(
            tokens("9223372036854775807")[0].token,
            GroupToken::Id(Some(i64::MAX as GroupId))
        );
    }

    #[test]
    fn test_from_items() {
        let items = vec!["5".to_string(), "-book-club".to_string(), " ".to_string()];
        let result = Lexer::from_items(&items).tokenize();
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].token, GroupToken::Slug("book-club".to_string()));
        assert!(result[1].exclude);
    }
}
