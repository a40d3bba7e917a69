//! gitlab-mr-resource - report CI build results to GitLab merge requests
//!
//! Implements the "out" step of a merge request pipeline resource: given a
//! merge request snapshot fetched by an earlier step, it sets a commit
//! status, posts a templated comment, edits labels and optionally merges.

pub mod build;
pub mod comment;
pub mod error;
pub mod labels;
pub mod out;
pub mod platform;
pub mod request;
pub mod response;
pub mod snapshot;
pub mod types;
