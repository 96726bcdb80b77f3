use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use crate::models::GroupResource;

// ============================= REQUEST INFO

/// Resolved attributes of an inbound apiserver request.
///
/// Filled in by the routing layer before any handler or filter runs.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RequestInfo {
    pub verb: String,
    #[serde(rename = "apiGroup", default)]
    pub api_group: String,
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub subresource: String,
    #[serde(default)]
    pub name: String,
}

impl RequestInfo {
    pub fn new(verb: &str, api_group: &str, resource: &str) -> Self {
        Self {
            verb: verb.to_string(),
            api_group: api_group.to_string(),
            resource: resource.to_string(),
            ..Default::default()
        }
    }

    pub fn verb_category(&self) -> VerbCategory {
        VerbCategory::from(self.verb.as_str())
    }

    pub fn group_resource(&self) -> GroupResource {
        GroupResource::new(&self.api_group, &self.resource)
    }
}

/// Cost policy a verb falls under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VerbCategory {
    List,
    /// create, update, patch and delete
    Mutating,
    Other,
}

impl From<&str> for VerbCategory {
    fn from(verb: &str) -> Self {
        match verb {
            "list" => VerbCategory::List,
            "create" | "update" | "patch" | "delete" => VerbCategory::Mutating,
            _ => VerbCategory::Other,
        }
    }
}

// ============================= LIST OPTIONS

/// Query parameters accepted by list and watch requests.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListOptions {
    /// Maximum number of objects per chunk, 0 when unset
    pub limit: i64,
    #[serde(rename = "continue")]
    pub continue_token: String,
    #[serde(rename = "resourceVersion")]
    pub resource_version: String,
    #[serde(rename = "resourceVersionMatch")]
    pub resource_version_match: String,
    #[serde(rename = "labelSelector")]
    pub label_selector: String,
    #[serde(rename = "fieldSelector")]
    pub field_selector: String,
    pub watch: bool,
    #[serde(rename = "allowWatchBookmarks")]
    pub allow_watch_bookmarks: bool,
    #[serde(rename = "timeoutSeconds")]
    pub timeout_seconds: Option<i64>,
}

impl ListOptions {
    /// Converts decoded query pairs into list options.
    ///
    /// The first value of a repeated key wins and unknown keys are ignored.
    /// Booleans are false only for `0` or `false`, an empty `timeoutSeconds` is unset.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, InvalidListOption>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut seen = HashSet::new();
        let mut opts = ListOptions::default();

        for (key, value) in pairs {
            if !seen.insert(key) {
                continue;
            }
            match key {
                "limit" => opts.limit = parse_int(key, value)?,
                "continue" => opts.continue_token = value.to_string(),
                "resourceVersion" => opts.resource_version = value.to_string(),
                "resourceVersionMatch" => opts.resource_version_match = value.to_string(),
                "labelSelector" => opts.label_selector = value.to_string(),
                "fieldSelector" => opts.field_selector = value.to_string(),
                "watch" => opts.watch = parse_bool(value),
                "allowWatchBookmarks" => opts.allow_watch_bookmarks = parse_bool(value),
                "timeoutSeconds" if value.is_empty() => opts.timeout_seconds = None,
                "timeoutSeconds" => opts.timeout_seconds = Some(parse_int(key, value)?),
                _ => {}
            }
        }
        Ok(opts)
    }

    pub fn resource_version_match(&self) -> ResourceVersionMatch {
        ResourceVersionMatch::from(self.resource_version_match.as_str())
    }

    pub fn has_continuation(&self) -> bool {
        !self.continue_token.is_empty()
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, InvalidListOption> {
    value.parse().map_err(|e: std::num::ParseIntError| InvalidListOption {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "0" | "false")
}

/// Query parameter whose value does not convert to its list option field.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidListOption {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for InvalidListOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for InvalidListOption {}

/// How `resourceVersion` is interpreted by a list.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ResourceVersionMatch {
    #[default]
    Unspecified,
    Exact,
    NotOlderThan,
}

impl From<&str> for ResourceVersionMatch {
    /// Unrecognized values are left for the list handler to reject.
    fn from(value: &str) -> Self {
        match value {
            "Exact" => ResourceVersionMatch::Exact,
            "NotOlderThan" => ResourceVersionMatch::NotOlderThan,
            _ => ResourceVersionMatch::Unspecified,
        }
    }
}
