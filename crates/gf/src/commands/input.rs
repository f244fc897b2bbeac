//! Request assembly shared by the filter commands.
//!
//! Turns [`RequestArgs`] into the pieces a host would hold for one search
//! request: the directory, the viewer, the existing search parameters, and the
//! raw request attributes.

use serde_json::{Map, Value};

use group_filter_rs::request::{GROUP_KEY, NATIVE_EXCLUDE_KEY, NATIVE_INCLUDE_KEY};
use group_filter_rs::{
    normalize_search, FilterConfig, GroupId, RawRequestAttributes, SearchParameters,
    StaticDirectory, Viewer, ViewerContext,
};

use super::Result;
use crate::cli::RequestArgs;

/// One search request as seen by a host.
#[derive(Debug)]
pub struct RequestInput {
    /// Groups and memberships.
    pub directory: StaticDirectory,
    /// The viewer performing the search.
    pub viewer: Viewer,
    /// The group whose page the request comes from.
    pub current_group: Option<GroupId>,
    /// Search parameters set before the request is applied.
    pub existing: SearchParameters,
    /// The request's group attributes.
    pub request: RawRequestAttributes,
}

impl RequestInput {
    /// Builds the request from command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory fixture cannot be loaded or the
    /// `--params` JSON is malformed.
    pub fn from_args(args: &RequestArgs) -> Result<Self> {
        let directory = match &args.directory {
            Some(path) => StaticDirectory::load(path)?,
            None => StaticDirectory::new(),
        };

        let existing = match &args.params {
            Some(raw) => SearchParameters::from_json(&serde_json::from_str(raw)?)?,
            None => SearchParameters::default(),
        };

        Ok(Self {
            directory,
            viewer: Viewer::from_user(args.viewer),
            current_group: args.current_group,
            existing,
            request: request_attributes(args)?,
        })
    }

    /// Returns the viewer context for this request.
    pub fn context(&self) -> ViewerContext<'_> {
        ViewerContext::new(self.viewer, &self.directory).with_current_group(self.current_group)
    }

    /// Runs the request through `normalize_search`.
    pub fn normalize(&self, config: &FilterConfig) -> SearchParameters {
        normalize_search(
            self.existing.clone(),
            &self.request,
            &self.context(),
            config,
        )
    }
}

/// Collects the group flags into a host-style attribute map and decodes it.
fn request_attributes(args: &RequestArgs) -> Result<RawRequestAttributes> {
    let mut map = Map::new();
    let fields = [
        (GROUP_KEY, &args.group),
        (NATIVE_INCLUDE_KEY, &args.group_in),
        (NATIVE_EXCLUDE_KEY, &args.group_not_in),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            map.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    Ok(RawRequestAttributes::from_json(&Value::Object(map))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;
    use group_filter_rs::FilterExpression;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_request_attributes_from_flags() {
        let args = RequestArgs {
            group: Some("5,-7".to_string()),
            group_in: Some("1, 2".to_string()),
            ..RequestArgs::default()
        };
        let request = request_attributes(&args).unwrap();

        assert_eq!(request.group, Some(FilterExpression::text("5,-7")));
        assert_eq!(request.native.include, Some(vec![1, 2]));
        assert_eq!(request.native.exclude, None);
    }

    #[test]
    fn test_from_args_defaults() {
        let input = RequestInput::from_args(&RequestArgs::default()).unwrap();
        assert_eq!(input.viewer, Viewer::Anonymous);
        assert_eq!(input.existing, SearchParameters::default());
        assert!(input.directory.groups.is_empty());
    }

    #[test]
    fn test_from_args_loads_directory_and_params() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("groups.toml");
        fs::write(&path, "[groups]\nchess = 15\n\n[members]\n3 = [15]\n").unwrap();

        let args = RequestArgs {
            group: Some("chess".to_string()),
            params: Some(r#"{"group__not_in": [8]}"#.to_string()),
            directory: Some(path),
            viewer: Some(3),
            ..RequestArgs::default()
        };
        let input = RequestInput::from_args(&args).unwrap();
        let params = input.normalize(&FilterConfig::default());

        assert_eq!(params.group_in, Some(vec![15]));
        assert_eq!(params.native_not_in, Some(vec![8]));
    }

    #[test]
    fn test_from_args_rejects_bad_params_json() {
        let args = RequestArgs {
            params: Some("{not json".to_string()),
            ..RequestArgs::default()
        };
        assert!(matches!(
            RequestInput::from_args(&args),
            Err(CommandError::Json(_))
        ));
    }

    #[test]
    fn test_from_args_missing_directory_is_config_error() {
        let args = RequestArgs {
            directory: Some("/nonexistent/gf/groups.toml".into()),
            ..RequestArgs::default()
        };
        assert!(matches!(
            RequestInput::from_args(&args),
            Err(CommandError::Config(_))
        ));
    }
}
