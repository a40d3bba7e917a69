//! Comment templating
//!
//! A comment comes from a file, from literal text, or from text that embeds
//! the file through `$FILE_CONTENT`. Build tokens such as `${BUILD_ID}` are
//! substituted last.

use crate::build::{BUILD_ID, BUILD_JOB_NAME, BUILD_NAME, BuildEnvironment};
use crate::error::{Error, Result};
use crate::request::{CommentParams, SourceConfig, join_under};
use std::fs;
use std::path::Path;

/// Placeholder for the comment file content inside `text`
pub const FILE_CONTENT: &str = "$FILE_CONTENT";

/// Values substituted into comment text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTokens {
    /// `${BUILD_URL}`
    pub build_url: String,
    /// `${BUILD_ID}`
    pub build_id: String,
    /// `${BUILD_NAME}`
    pub build_name: String,
    /// `${BUILD_JOB_NAME}`
    pub build_job_name: String,
    /// `${BUILD_PIPELINE_NAME}`
    pub build_pipeline_name: String,
    /// `${ATC_EXTERNAL_URL}`
    pub atc_external_url: String,
}

impl BuildTokens {
    /// Resolve token values from the source config and build metadata
    pub fn new(source: &SourceConfig, build: &BuildEnvironment) -> Self {
        Self {
            build_url: source.target_url(build),
            build_id: build.get(BUILD_ID).to_string(),
            build_name: build.get(BUILD_NAME).to_string(),
            build_job_name: build.get(BUILD_JOB_NAME).to_string(),
            build_pipeline_name: source.pipeline_name(build),
            atc_external_url: source.concourse_url(build),
        }
    }

    /// Replace every occurrence of every token in `text`
    ///
    /// Single left-to-right pass: substituted values are never rescanned.
    pub fn apply(&self, text: &str) -> String {
        let tokens: [(&str, &str); 6] = [
            ("${BUILD_URL}", &self.build_url),
            ("${BUILD_ID}", &self.build_id),
            ("${BUILD_NAME}", &self.build_name),
            ("${BUILD_JOB_NAME}", &self.build_job_name),
            ("${BUILD_PIPELINE_NAME}", &self.build_pipeline_name),
            ("${ATC_EXTERNAL_URL}", &self.atc_external_url),
        ];

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match tokens.iter().find(|(token, _)| tail.starts_with(token)) {
                Some((token, value)) => {
                    out.push_str(value);
                    rest = &tail[token.len()..];
                }
                None => {
                    out.push_str("${");
                    rest = &tail[2..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Render the comment body
///
/// `file` is resolved against `base_dir`. Returns an empty string when
/// neither `file` nor `text` is set, which means "post nothing".
pub fn render_comment(
    comment: &CommentParams,
    base_dir: &Path,
    tokens: &BuildTokens,
) -> Result<String> {
    let file_content = match comment.file.as_deref() {
        Some(file) if !file.as_os_str().is_empty() => {
            let path = join_under(base_dir, file);
            fs::read_to_string(&path)
                .map_err(|e| Error::CommentFile(format!("can't read from {}: {e}", path.display())))?
        }
        _ => String::new(),
    };

    let body = match comment.text.as_deref() {
        Some(text) if !text.is_empty() => text.replace(FILE_CONTENT, &file_content),
        _ => file_content,
    };

    Ok(tokens.apply(&body))
}
