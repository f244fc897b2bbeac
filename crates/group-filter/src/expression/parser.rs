//! Resolution of group expressions into id sets and directives.

use serde_json::Value;

use super::ast::{Directive, FilterExpression, NativeGroupIds, ResolvedFilterState};
use super::error::FilterResult;
use super::lexer::{GroupToken, ItemToken, Lexer};
use crate::config::FilterConfig;
use crate::directory::ViewerContext;

/// Special values recognized before list parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    This,
    My,
    Zero,
}

impl Keyword {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "this" => Some(Keyword::This),
            "my" => Some(Keyword::My),
            "0" => Some(Keyword::Zero),
            _ => None,
        }
    }
}

/// Parser for group filter expressions.
///
/// Turns a raw expression such as `"5,-7,book-club"` into resolved inclusion
/// and exclusion id lists, or into one of the special [`Directive`]s.
///
/// # Grammar
///
/// ```text
/// expression ::= "this" | "my" | "0" | item ("," item)*
/// item       ::= ["-"] (number | slug)
/// ```
///
/// Keywords are matched exactly, and only when their precondition holds
/// (`this` needs a current group, `my` needs a logged-in viewer). Otherwise
/// they fall through to list parsing like any other slug.
///
/// Nothing in an expression is ever an error: unknown slugs and unusable
/// numbers are dropped and recorded in
/// [`ResolvedFilterState::dropped_tokens`].
///
/// # Example
///
/// ```
/// use group_filter_rs::{ExpressionParser, FilterConfig, FilterExpression, StaticDirectory, ViewerContext};
/// use group_filter_rs::expression::NativeGroupIds;
///
/// let directory = StaticDirectory::new().with_group("book-club", 9);
/// let context = ViewerContext::anonymous(&directory);
/// let config = FilterConfig::default();
///
/// let parser = ExpressionParser::new(&context, &config);
/// let state = parser.parse(Some(&FilterExpression::text("5,-7,book-club")), NativeGroupIds::default());
///
/// assert_eq!(state.include_ids, vec![5, 9]);
/// assert_eq!(state.exclude_ids, vec![7]);
/// ```
pub struct ExpressionParser<'a> {
    context: &'a ViewerContext<'a>,
    groups_enabled: bool,
}

impl<'a> ExpressionParser<'a> {
    /// Creates a parser bound to a request's viewer context.
    pub fn new(context: &'a ViewerContext<'a>, config: &FilterConfig) -> Self {
        Self {
            context,
            groups_enabled: config.groups_enabled,
        }
    }

    /// Resolves a raw expression.
    ///
    /// The native lists are carried through untouched. A missing expression,
    /// or disabled group support, yields a state that contributes nothing else.
    pub fn parse(
        &self,
        raw: Option<&FilterExpression>,
        native: NativeGroupIds,
    ) -> ResolvedFilterState {
        let mut state = ResolvedFilterState::empty(native);

        let Some(raw) = raw else {
            return state;
        };
        if !self.groups_enabled {
            tracing::debug!("group support disabled, ignoring group expression");
            return state;
        }

        match raw {
            FilterExpression::Text(text) => {
                let text = sanitize_text(text);
                if let Some(directive) = self.apply_keyword(&text, &mut state) {
                    tracing::debug!(?directive, "group expression resolved to directive");
                    return state;
                }
                self.resolve_items(Lexer::new(&text).tokenize(), &mut state);
            }
            FilterExpression::Integer(0) => {
                state.directive = Directive::NoGroup;
                return state;
            }
            FilterExpression::Integer(n) => {
                let text = n.to_string();
                self.resolve_items(Lexer::new(&text).tokenize(), &mut state);
            }
            FilterExpression::List(items) => {
                let items: Vec<String> = items.iter().map(|item| item.to_item_text()).collect();
                self.resolve_items(Lexer::from_items(&items).tokenize(), &mut state);
            }
        }

        if state.include_ids.is_empty() && !state.exclude_ids.is_empty() {
            state.directive = Directive::MustHaveGroup;
        }

        state
    }

    /// Decodes and resolves the `group` attribute straight from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidFilterInput` if the value has an
    /// unsupported shape.
    pub fn parse_json(
        &self,
        raw: &Value,
        native: NativeGroupIds,
    ) -> FilterResult<ResolvedFilterState> {
        let expression = FilterExpression::from_json(raw)?;
        Ok(self.parse(expression.as_ref(), native))
    }

    /// Applies a keyword short-circuit. Returns the directive if one was taken.
    fn apply_keyword(&self, text: &str, state: &mut ResolvedFilterState) -> Option<Directive> {
        match Keyword::from_text(text)? {
            Keyword::This => {
                let id = self.context.current_context_group_id()?;
                state.include_ids = vec![id];
                state.directive = Directive::CurrentGroup;
            }
            Keyword::My => {
                if !self.context.current_viewer().is_authenticated() {
                    return None;
                }
                state.directive = Directive::MyGroups;
            }
            Keyword::Zero => state.directive = Directive::NoGroup,
        }
        Some(state.directive)
    }

    /// Resolves classified items into the include/exclude lists.
    fn resolve_items(&self, tokens: Vec<ItemToken>, state: &mut ResolvedFilterState) {
        for item in tokens {
            let id = match &item.token {
                GroupToken::Id(id) => *id,
                GroupToken::Slug(slug) if slug.is_empty() => None,
                GroupToken::Slug(slug) => self.context.resolve_slug(slug),
            };

            match id {
                Some(id) if item.exclude => state.exclude_ids.push(id),
                Some(id) => state.include_ids.push(id),
                None => {
                    tracing::debug!(token = %item.text, "dropping unresolvable group token");
                    state.dropped_tokens.push(item.text);
                }
            }
        }
    }
}

/// Strips control characters, collapses whitespace runs, and trims.
fn sanitize_text(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
