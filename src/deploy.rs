//! # Deploy Policies
//!
//! Two deploy policies exist. The top-level one runs after every job that
//! sets `PREPARE_DEPLOY=1` and uploads the job's `dist/deploy` to S3. The
//! stable release job carries its own nested policy that publishes the pex
//! to GitHub releases when a tag is pushed.

use serde::{Deserialize, Serialize};

use crate::env::Secure;

/// Repository that deploys are restricted to.
pub const DEPLOY_REPO: &str = "pantsbuild/pants";

// The pantsbuild-ci-bot OAuth token.
const RELEASES_API_KEY: &str = concat!(
    "u0aCsiuVGOg28YxG0sQUovuUm29kKwQfFgHbNz2TT5L+cGoHxGl4aoVOCtuwWYEtbNGmYc8/3WRS3C",
    "/jOiqQj6JEgHUzWOsnfKUObEqNhisAmXbzBbKc0wPQTL8WNK+DKFh32sD3yPYcw+a5PTLO56+o7rql",
    "I25LK7A17WesHC4="
);

/// When a deploy fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTrigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_branches: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<bool>,
}

/// A `deploy:` record, either top level or nested in a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_glob: Option<bool>,
    pub on: DeployTrigger,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub skip_cleanup: bool,
}

impl DeployPolicy {
    /// Upload of `dist/deploy` to S3 for any branch that prepared a deploy.
    ///
    /// Mostly this serves `main` commits, but stable release branches
    /// (e.g. `1.3.x`) need fresh binaries too, hence `all_branches`.
    pub fn s3() -> Self {
        Self {
            api_key: None,
            file: None,
            file_glob: None,
            on: DeployTrigger {
                all_branches: Some(true),
                condition: Some("$PREPARE_DEPLOY = 1".to_string()),
                repo: DEPLOY_REPO.to_string(),
                tags: None,
            },
            provider: "script".to_string(),
            script: Some("./build-support/bin/deploy_to_s3.py".to_string()),
            // Otherwise travis stashes dist/deploy and the upload finds nothing.
            skip_cleanup: true,
        }
    }

    /// Publication of the stable pex to GitHub releases on tagged builds.
    pub fn github_releases() -> Self {
        Self {
            api_key: Some(Secure::new(RELEASES_API_KEY)),
            file: Some("dist/deploy/pex/*".to_string()),
            file_glob: Some(true),
            on: DeployTrigger {
                all_branches: None,
                condition: None,
                repo: DEPLOY_REPO.to_string(),
                tags: Some(true),
            },
            provider: "releases".to_string(),
            script: None,
            skip_cleanup: true,
        }
    }
}
