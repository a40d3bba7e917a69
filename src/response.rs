//! Response payload written to stdout

use crate::error::Result;
use crate::types::MergeRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Version emitted for the merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Merge request IID; versions are string maps, so it is a string
    pub id: String,
    /// Last update time of the merge request
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: String,
}

impl MetadataField {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Names of the metadata fields, in emission order
pub const METADATA_FIELDS: [&str; 9] = [
    "id", "iid", "sha", "message", "title", "author", "source", "target", "url",
];

/// Response of the out step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Version of the merge request after the step ran
    pub version: Version,
    /// Fixed list of metadata fields
    pub metadata: Vec<MetadataField>,
}

impl Response {
    /// Build the response from the final merge request state and summary
    pub fn new(mr: &MergeRequest, message: &str) -> Self {
        Self {
            version: Version {
                id: mr.iid.to_string(),
                updated_at: mr.updated_at,
            },
            metadata: vec![
                MetadataField::new("id", mr.id.to_string()),
                MetadataField::new("iid", mr.iid.to_string()),
                MetadataField::new("sha", mr.sha.as_str()),
                MetadataField::new("message", message),
                MetadataField::new("title", mr.title.as_str()),
                MetadataField::new("author", mr.author.name.as_str()),
                MetadataField::new("source", mr.source_branch.as_str()),
                MetadataField::new("target", mr.target_branch.as_str()),
                MetadataField::new("url", mr.web_url.as_str()),
            ],
        }
    }

    /// Write the response as a single JSON document followed by a newline
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
