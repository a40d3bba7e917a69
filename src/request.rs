//! Request payload read from stdin
//!
//! The `source` block is shared by every step of the resource, so unknown
//! fields are accepted and ignored.

use crate::build::{
    ATC_EXTERNAL_URL, BUILD_JOB_NAME, BUILD_NAME, BUILD_PIPELINE_NAME, BUILD_TEAM_NAME,
    BuildEnvironment,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use url::Url;

/// Request for the out step
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Connection settings
    pub source: SourceConfig,
    /// Actions to perform
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
}

impl Request {
    /// Decode a request from a JSON reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| Error::InvalidRequest(format!("reading request from stdin: {e}")))
    }
}

/// Connection settings for the GitLab instance and the CI dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Repository URI, e.g. `https://gitlab.example.com/group/project.git`
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    /// Personal or project access token
    #[serde(default, deserialize_with = "null_as_default")]
    pub private_token: String,
    /// Skip TLS certificate verification
    #[serde(default, deserialize_with = "null_as_default")]
    pub insecure: bool,
    /// Public URL of the CI web UI
    #[serde(default)]
    pub concourse_url: Option<String>,
    /// Name reported with commit statuses
    #[serde(default)]
    pub pipeline_name: Option<String>,
    /// Link attached to commit statuses
    #[serde(default)]
    pub target_url: Option<String>,
}

impl SourceConfig {
    /// API root derived from the repository URI: `<scheme>://<authority>/api/v4`
    pub fn base_url(&self) -> Result<String> {
        let uri = Url::parse(&self.uri)
            .map_err(|e| Error::Config(format!("cannot parse uri {:?}: {e}", self.uri)))?;

        if !matches!(uri.scheme(), "http" | "https") || uri.host_str().is_none() {
            return Err(Error::Config(format!(
                "uri {:?} must be an http(s) URL",
                self.uri
            )));
        }

        Ok(format!("{}/api/v4", uri.origin().ascii_serialization()))
    }

    /// Configured pipeline name, or the one reported by the build
    pub fn pipeline_name(&self, build: &BuildEnvironment) -> String {
        non_empty(self.pipeline_name.as_deref())
            .unwrap_or_else(|| build.get(BUILD_PIPELINE_NAME))
            .to_string()
    }

    /// Configured dashboard URL, or the one reported by the build
    pub fn concourse_url(&self, build: &BuildEnvironment) -> String {
        non_empty(self.concourse_url.as_deref())
            .unwrap_or_else(|| build.get(ATC_EXTERNAL_URL))
            .to_string()
    }

    /// Configured target URL, or the dashboard page of the running build
    pub fn target_url(&self, build: &BuildEnvironment) -> String {
        if let Some(target) = non_empty(self.target_url.as_deref()) {
            return target.to_string();
        }

        let dashboard = self.concourse_url(build);
        format!(
            "{}/teams/{}/pipelines/{}/jobs/{}/builds/{}",
            dashboard.trim_end_matches('/'),
            escape(build.get(BUILD_TEAM_NAME)),
            escape(build.get(BUILD_PIPELINE_NAME)),
            escape(build.get(BUILD_JOB_NAME)),
            escape(build.get(BUILD_NAME)),
        )
    }
}

/// Actions requested by the pipeline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Params {
    /// Directory under the destination holding the fetched repository
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository: String,
    /// Commit status to set (`pending`, `running`, `success`, `failed`, `canceled`)
    #[serde(default)]
    pub status: Option<String>,
    /// Labels to add
    #[serde(default)]
    pub add_labels: Option<Vec<String>>,
    /// Labels to remove
    #[serde(default)]
    pub remove_labels: Option<Vec<String>>,
    /// Comment to post
    #[serde(default)]
    pub comment: Option<CommentParams>,
    /// Extra action, only `merge` is supported
    #[serde(default)]
    pub action: Option<String>,
}

impl Params {
    /// Status to set, if any
    pub fn status(&self) -> Option<&str> {
        non_empty(self.status.as_deref())
    }

    /// Labels to add (empty when unset)
    pub fn add_labels(&self) -> &[String] {
        self.add_labels.as_deref().unwrap_or_default()
    }

    /// Labels to remove (empty when unset)
    pub fn remove_labels(&self) -> &[String] {
        self.remove_labels.as_deref().unwrap_or_default()
    }

    /// Parse the requested action; anything but `merge` is ignored
    pub fn action(&self) -> Option<Action> {
        match non_empty(self.action.as_deref()) {
            None => None,
            Some("merge") => Some(Action::Merge),
            Some(other) => {
                warn!(action = other, "ignoring unsupported action");
                None
            }
        }
    }
}

/// Extra action performed after labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Accept the merge request once its pipeline succeeds
    Merge,
}

/// Comment source: a file, literal text, or both
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentParams {
    /// File whose content becomes the comment, relative to the destination
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Literal comment text; `$FILE_CONTENT` is replaced by the file content
    #[serde(default)]
    pub text: Option<String>,
}

/// Join `relative` below `base`, dropping any root or prefix so the result
/// never leaves `base` through an absolute path.
pub fn join_under(base: &Path, relative: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.extend(
        relative
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_))),
    );
    path
}

/// `null` decodes to the field's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn escape(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
