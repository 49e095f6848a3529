//! # Shards
//!
//! A `Shard` is one entry of `jobs.include` in the generated file. Shards are
//! built by composing fragments: a platform base, a cache fragment, and the
//! job-specific fields, combined with [`Shard::merge`].
//!
//! ## Merge Policy
//!
//! The policy is fixed per field:
//!
//! - **Concatenate** (left fragment first): `after_failure`, `before_cache`,
//!   `before_install`, `before_script`, `env`, `python`, `script`, `services`.
//! - **Replace when set**: `addons`, `cache`, `deploy`, `dist`, `if`,
//!   `language`, `name`, `os`, `osx_image`, `stage`. A fragment that leaves
//!   one of these unset keeps the left-hand value.
//!
//! Both rules are associative, so `a.merge(b).merge(c)` and
//! `a.merge(b.merge(c))` build the same shard. Duplicate env keys are kept;
//! the CI runtime decides which one wins.
//!
//! Fields are declared in the order they are written out, which is
//! alphabetical to keep the generated file stable for reviewers.

use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::deploy::DeployPolicy;
use crate::platform::Platform;
use crate::stage::Stage;

/// Package installation addons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addons {
    pub apt: AptAddon,
}

/// Packages installed through apt before the job starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptAddon {
    pub packages: Vec<String>,
}

/// One job of the pipeline, or a fragment of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Addons>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after_failure: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_cache: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_install: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_script: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CachePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<DeployPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osx_image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub python: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl Shard {
    /// An empty fragment; merging it is a no-op on either side.
    pub fn fragment() -> Self {
        Self::default()
    }

    /// Combine two fragments, `other` taking precedence for scalar fields.
    pub fn merge(mut self, other: Shard) -> Shard {
        // Exhaustive destructuring so a new field cannot skip the policy.
        let Shard {
            addons,
            after_failure,
            before_cache,
            before_install,
            before_script,
            cache,
            deploy,
            dist,
            env,
            condition,
            language,
            name,
            os,
            osx_image,
            python,
            script,
            services,
            stage,
        } = other;

        replace_if_set(&mut self.addons, addons);
        self.after_failure.extend(after_failure);
        self.before_cache.extend(before_cache);
        self.before_install.extend(before_install);
        self.before_script.extend(before_script);
        replace_if_set(&mut self.cache, cache);
        replace_if_set(&mut self.deploy, deploy);
        replace_if_set(&mut self.dist, dist);
        self.env.extend(env);
        replace_if_set(&mut self.condition, condition);
        replace_if_set(&mut self.language, language);
        replace_if_set(&mut self.name, name);
        replace_if_set(&mut self.os, os);
        replace_if_set(&mut self.osx_image, osx_image);
        self.python.extend(python);
        self.script.extend(script);
        self.services.extend(services);
        replace_if_set(&mut self.stage, stage);

        self
    }

    /// Append env declarations after the ones already present.
    pub fn with_env<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env.extend(vars.into_iter().map(Into::into));
        self
    }

    /// Append commands to the job's script.
    pub fn with_script<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.extend(commands.into_iter().map(Into::into));
        self
    }

    /// Name shown in the CI UI, or a placeholder for unnamed fragments.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

fn replace_if_set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Collect string literals into owned command lists.
pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
