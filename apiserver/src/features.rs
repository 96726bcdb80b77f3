//! Feature gates
//!
//! Gates are configured with a comma separated `Name=bool` list, the same
//! format kube components accept, read from `CR8S_FEATURE_GATES`.

use std::{collections::HashMap, env, fmt, str::FromStr};

use crate::errors::FlowControlError;

const CR8S_FEATURE_GATES: &str = "CR8S_FEATURE_GATES";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    /// Chunked list responses through `limit` and `continue`
    ApiListChunking,
}

impl Feature {
    const ALL: [Feature; 1] = [Feature::ApiListChunking];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::ApiListChunking => "APIListChunking",
        }
    }

    pub fn default_enabled(&self) -> bool {
        match self {
            Feature::ApiListChunking => true,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = FlowControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| FlowControlError::InvalidFeatureGate(format!("unknown feature {}", s)))
    }
}

/// Read access to feature gate state.
pub trait FeatureGate: Send + Sync {
    fn enabled(&self, feature: Feature) -> bool;

    fn paging_enabled(&self) -> bool {
        self.enabled(Feature::ApiListChunking)
    }
}

/// Feature gate state with overrides on top of the defaults.
#[derive(Debug, Clone, Default)]
pub struct Features {
    overrides: HashMap<Feature, bool>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads overrides from the environment, keeping defaults if the value is malformed.
    pub fn from_env() -> Self {
        let Ok(spec) = env::var(CR8S_FEATURE_GATES) else {
            return Self::default();
        };
        spec.parse().unwrap_or_else(|err: FlowControlError| {
            tracing::warn!(error=%err, %spec, "Ignoring feature gates");
            Self::default()
        })
    }

    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.overrides.insert(feature, enabled);
        self
    }
}

impl FromStr for Features {
    type Err = FlowControlError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        spec.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .try_fold(Features::default(), |features, entry| {
                let (name, value) = entry.split_once('=').ok_or_else(|| {
                    FlowControlError::InvalidFeatureGate(format!("missing value in {}", entry))
                })?;
                let enabled = value.trim().parse::<bool>().map_err(|e| {
                    FlowControlError::InvalidFeatureGate(format!("{}: {}", entry, e))
                })?;
                Ok::<_, FlowControlError>(features.with(name.trim().parse()?, enabled))
            })
    }
}

impl FeatureGate for Features {
    fn enabled(&self, feature: Feature) -> bool {
        self.overrides
            .get(&feature)
            .copied()
            .unwrap_or_else(|| feature.default_enabled())
    }
}
