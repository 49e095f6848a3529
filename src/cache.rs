//! # Cache Policy
//!
//! Travis caches a fixed set of directories between runs of the jobs that
//! compile the native engine. Before the cache is packed, bytecode and stale
//! build outputs are removed so unchanged inputs do not trigger a re-upload.

use serde::{Deserialize, Serialize};

use crate::shard::{strings, Shard};

/// Uploads of the larger caches exceed Travis' default of 180 seconds.
pub const CACHE_TIMEOUT_SECS: u32 = 500;

// Caching a directory that does not exist on a platform is harmless.
const COMMON_DIRECTORIES: &[&str] = &["${AWS_CLI_ROOT}", "${PYENV_ROOT_OSX}"];

const NATIVE_ENGINE_DIRECTORIES: &[&str] = &[
    "${HOME}/.rustup",
    "${HOME}/.cargo",
    "${HOME}/.cache/pants/pants_dev_deps",
    "src/rust/engine/target",
];

// The chown runs whether or not caching is enabled, so the removals succeed.
const BEFORE_CACHE: &[&str] = &[
    r#"sudo chown -R travis:travis "${HOME}" "${TRAVIS_BUILD_DIR}""#,
    r#"find build-support -name "*.py[co]" -delete"#,
    "./build-support/bin/prune_travis_cache.sh",
];

/// The `cache:` record of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub directories: Vec<String>,
    pub timeout: u32,
}

impl CachePolicy {
    /// Directories used by jobs that build the native engine.
    pub fn native_engine() -> Self {
        Self {
            directories: COMMON_DIRECTORIES
                .iter()
                .chain(NATIVE_ENGINE_DIRECTORIES)
                .map(|dir| dir.to_string())
                .collect(),
            timeout: CACHE_TIMEOUT_SECS,
        }
    }
}

/// Fragment adding the native engine cache and its cleanup steps to a shard.
pub fn native_engine() -> Shard {
    Shard {
        before_cache: strings(BEFORE_CACHE),
        cache: Some(CachePolicy::native_engine()),
        ..Shard::fragment()
    }
}
