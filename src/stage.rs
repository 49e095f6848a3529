//! # Stage Registry
//!
//! Stages are the named phases of the pipeline. Each one carries a display
//! name (which is also how jobs refer to it) and an activation condition
//! written in Travis' conditions-v1 syntax. The condition is never parsed
//! here; it is passed through to the generated file verbatim.
//!
//! See <https://docs.travis-ci.com/user/conditions-v1>.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const IS_NOT_CRON: &str = "type != cron";

/// A named phase of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Build Wheels")]
    Wheels,
    #[serde(rename = "Deploy Pants Pex")]
    BuildStable,
    #[serde(rename = "Deploy Pants Pex Unstable")]
    BuildUnstable,
}

impl Stage {
    /// Every stage, in the order the pipeline runs them.
    pub const ALL: [Stage; 3] = [Stage::Wheels, Stage::BuildStable, Stage::BuildUnstable];

    /// Display name, used both in the `stages` list and in each job's `stage`.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Wheels => "Build Wheels",
            Stage::BuildStable => "Deploy Pants Pex",
            Stage::BuildUnstable => "Deploy Pants Pex Unstable",
        }
    }

    /// Condition gating whether the stage runs at all.
    pub fn condition(self) -> &'static str {
        match self {
            Stage::Wheels => IS_NOT_CRON,
            Stage::BuildStable => r"tag IS present AND tag =~ ^release_.*$",
            Stage::BuildUnstable => r"tag IS NOT present AND type NOT IN (pull_request, cron)",
        }
    }

    /// The `stages:` section of the document.
    pub fn all_entries() -> Vec<StageEntry> {
        Stage::ALL.iter().map(|stage| stage.entry()).collect()
    }

    fn entry(self) -> StageEntry {
        StageEntry {
            condition: self.condition().to_string(),
            name: self.name().to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| Error::UnknownStage {
                name: s.to_string(),
            })
    }
}

/// One record of the `stages:` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    #[serde(rename = "if")]
    pub condition: String,
    pub name: String,
}
