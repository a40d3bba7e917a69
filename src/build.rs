//! Build metadata supplied by the CI system
//!
//! The pipeline runner exposes build metadata through environment variables.
//! They are captured once into a [`BuildEnvironment`] and passed around
//! explicitly, so templating and URL derivation stay deterministic in tests.

use std::collections::HashMap;

/// Build ID
pub const BUILD_ID: &str = "BUILD_ID";
/// Build name (number within the job)
pub const BUILD_NAME: &str = "BUILD_NAME";
/// Job name
pub const BUILD_JOB_NAME: &str = "BUILD_JOB_NAME";
/// Pipeline name
pub const BUILD_PIPELINE_NAME: &str = "BUILD_PIPELINE_NAME";
/// Team owning the pipeline
pub const BUILD_TEAM_NAME: &str = "BUILD_TEAM_NAME";
/// Public URL of the CI web UI
pub const ATC_EXTERNAL_URL: &str = "ATC_EXTERNAL_URL";

/// Variables captured by [`BuildEnvironment::from_env`]
pub const BUILD_VARIABLES: [&str; 6] = [
    BUILD_ID,
    BUILD_NAME,
    BUILD_JOB_NAME,
    BUILD_PIPELINE_NAME,
    BUILD_TEAM_NAME,
    ATC_EXTERNAL_URL,
];

/// Key/value view of the build metadata
///
/// Missing keys read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    values: HashMap<String, String>,
}

impl BuildEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the build variables from the process environment
    pub fn from_env() -> Self {
        BUILD_VARIABLES
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value)))
            .collect()
    }

    /// Look up a value, defaulting to the empty string
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    /// Set a value, returning the updated environment
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
