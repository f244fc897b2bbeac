//! Group directory and viewer context.
//!
//! The core never talks to a user or group store directly. Everything it needs
//! from the outside world goes through the [`GroupDirectory`] trait (slug
//! resolution and membership lookup) and the per-request [`ViewerContext`]
//! (who is looking, and which group page they are on).
//!
//! Lookups are treated as total functions: an `Err` from the directory is
//! logged and handled exactly like "not found".

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;
use thiserror::Error;

use crate::config::ConfigError;

/// Numeric group identifier. Valid identifiers are always greater than zero.
pub type GroupId = u64;

/// Numeric user identifier.
pub type UserId = u64;

/// Maximum Levenshtein distance to consider a slug as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Error reported by a [`GroupDirectory`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The backing store could not answer the lookup.
    #[error("group directory unavailable: {reason}")]
    Unavailable {
        /// Why the lookup could not be answered.
        reason: String,
    },
}

impl LookupError {
    /// Creates an unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        LookupError::Unavailable {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for directory lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// External source of group identities and memberships.
pub trait GroupDirectory {
    /// Maps a human-readable group slug to its identifier.
    ///
    /// Returns `Ok(None)` when no group has that slug.
    fn resolve_slug(&self, slug: &str) -> LookupResult<Option<GroupId>>;

    /// Returns the identifiers of every group the user belongs to.
    fn groups_of(&self, user: UserId) -> LookupResult<Vec<GroupId>>;
}

/// The entity performing a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// A logged-in user.
    Authenticated(UserId),
}

impl Viewer {
    /// Builds a viewer from an optional user id.
    pub fn from_user(user: Option<UserId>) -> Self {
        match user {
            Some(id) => Viewer::Authenticated(id),
            None => Viewer::Anonymous,
        }
    }

    /// Returns true if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }

    /// Returns the logged-in user's id, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::Authenticated(id) => Some(*id),
            Viewer::Anonymous => None,
        }
    }
}

/// Per-request identity and directory access.
///
/// Wraps the raw [`GroupDirectory`] so that callers inside the crate only ever
/// see the degraded-result contract: misses and failures both come back as
/// "nothing".
#[derive(Clone, Copy)]
pub struct ViewerContext<'a> {
    viewer: Viewer,
    current_group: Option<GroupId>,
    directory: &'a dyn GroupDirectory,
}

impl std::fmt::Debug for ViewerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerContext")
            .field("viewer", &self.viewer)
            .field("current_group", &self.current_group)
            .finish_non_exhaustive()
    }
}

impl<'a> ViewerContext<'a> {
    /// Creates a context for the given viewer, with no current group.
    pub fn new(viewer: Viewer, directory: &'a dyn GroupDirectory) -> Self {
        Self {
            viewer,
            current_group: None,
            directory,
        }
    }

    /// Creates a context for an anonymous viewer.
    pub fn anonymous(directory: &'a dyn GroupDirectory) -> Self {
        Self::new(Viewer::Anonymous, directory)
    }

    /// Sets the group whose page the request originates from.
    pub fn with_current_group(mut self, group: Option<GroupId>) -> Self {
        self.current_group = group;
        self
    }

    /// Returns the viewer performing the request.
    pub fn current_viewer(&self) -> Viewer {
        self.viewer
    }

    /// Returns the current-context group, if it is a valid identifier.
    pub fn current_context_group_id(&self) -> Option<GroupId> {
        self.current_group.filter(|id| *id > 0)
    }

    /// Resolves a slug, treating failures and non-positive ids as misses.
    pub fn resolve_slug(&self, slug: &str) -> Option<GroupId> {
        match self.directory.resolve_slug(slug) {
            Ok(Some(id)) if id > 0 => Some(id),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(slug, error = %e, "slug lookup failed, treating as miss");
                None
            }
        }
    }

    /// Returns the viewer's group memberships.
    ///
    /// Returns `None` for anonymous viewers. A failed lookup yields an empty
    /// membership list.
    pub fn viewer_groups(&self) -> Option<Vec<GroupId>> {
        let user = self.viewer.user_id()?;
        match self.directory.groups_of(user) {
            Ok(groups) => Some(groups.into_iter().filter(|id| *id > 0).collect()),
            Err(e) => {
                tracing::debug!(
                    user,
                    error = %e,
                    "membership lookup failed, treating as no groups"
                );
                Some(Vec::new())
            }
        }
    }
}

/// In-memory [`GroupDirectory`] backed by fixed slug and membership tables.
///
/// Can be loaded from TOML:
///
/// ```toml
/// [groups]
/// book-club = 9
/// chess = 12
///
/// [members]
/// 3 = [9, 12]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDirectory {
    /// Slug to group id.
    #[serde(default)]
    pub groups: BTreeMap<String, GroupId>,

    /// User id (as a string key) to the groups that user belongs to.
    #[serde(default)]
    pub members: BTreeMap<String, Vec<GroupId>>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group slug.
    pub fn with_group(mut self, slug: impl Into<String>, id: GroupId) -> Self {
        self.groups.insert(slug.into(), id);
        self
    }

    /// Sets the memberships of a user.
    pub fn with_member(mut self, user: UserId, groups: Vec<GroupId>) -> Self {
        self.members.insert(user.to_string(), groups);
        self
    }

    /// Parses a directory from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a directory from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Suggests the closest known slug for an unresolvable token.
    ///
    /// Returns `None` for exact matches or when nothing is within
    /// [`MAX_SUGGESTION_DISTANCE`] edits.
    pub fn suggest_slug(&self, query: &str) -> Option<&str> {
        let query_lower = query.to_lowercase();

        let (best, distance) = self
            .groups
            .keys()
            .filter(|slug| !slug.is_empty())
            .map(|slug| (slug.as_str(), levenshtein(&query_lower, &slug.to_lowercase())))
            .min_by_key(|(_, d)| *d)?;

        if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
            Some(best)
        } else {
            None
        }
    }
}

impl GroupDirectory for StaticDirectory {
    fn resolve_slug(&self, slug: &str) -> LookupResult<Option<GroupId>> {
        Ok(self.groups.get(slug).copied())
    }

    fn groups_of(&self, user: UserId) -> LookupResult<Vec<GroupId>> {
        Ok(self
            .members
            .get(&user.to_string())
            .cloned()
            .unwrap_or_default())
    }
}
