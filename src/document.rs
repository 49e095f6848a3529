//! # Document Assembly
//!
//! [`assemble`] builds the whole `.travis.yml` document in memory. It takes
//! no input and has no branches, so two calls always produce equal
//! documents.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::deploy::DeployPolicy;
use crate::env::GlobalEnv;
use crate::error::{Error, Result};
use crate::jobs;
use crate::shard::Shard;
use crate::stage::{Stage, StageEntry};

/// Version of the Travis conditions syntax used by every `if`.
pub const CONDITIONS_VERSION: &str = "v1";

const WEBHOOK_URL: &str = "https://webhooks.toolchain.com/travis/repo/pantsbuild/pants/";

/// The `notifications:` section, passed through as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    pub webhooks: Webhooks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhooks {
    pub on_start: String,
    pub urls: Vec<String>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            webhooks: Webhooks {
                on_start: "always".to_string(),
                urls: vec![WEBHOOK_URL.to_string()],
            },
        }
    }
}

/// The `jobs:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jobs {
    pub include: Vec<Shard>,
}

/// The complete generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub conditions: String,
    pub deploy: DeployPolicy,
    pub env: GlobalEnv,
    pub jobs: Jobs,
    pub notifications: Notifications,
    pub stages: Vec<StageEntry>,
}

impl Document {
    /// Check that every job belongs to one of the declared stages.
    pub fn validate(&self) -> Result<()> {
        for job in &self.jobs.include {
            let stage = job.stage.ok_or_else(|| Error::MissingStage {
                job: job.display_name().to_string(),
            })?;
            if !self.declares(stage) {
                return Err(Error::UndeclaredStage {
                    job: job.display_name().to_string(),
                    stage: stage.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn declares(&self, stage: Stage) -> bool {
        self.stages.iter().any(|entry| entry.name == stage.name())
    }
}

/// Build the document from the static tables and job factories.
pub fn assemble() -> Document {
    let document = Document {
        conditions: CONDITIONS_VERSION.to_string(),
        deploy: DeployPolicy::s3(),
        env: GlobalEnv::default(),
        jobs: Jobs {
            include: jobs::all(),
        },
        notifications: Notifications::default(),
        stages: Stage::all_entries(),
    };
    debug!(
        "{} global env vars, {} notification urls",
        document.env.global.len(),
        document.notifications.webhooks.urls.len()
    );
    info!(
        "assembled {} jobs across {} stages",
        document.jobs.include.len(),
        document.stages.len()
    );
    document
}
