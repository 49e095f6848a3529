//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_generated_file();
//! fixture.command().arg("check").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Name of the generated file in a fixture directory.
pub const TRAVIS_YML: &str = ".travis.yml";

/// A temporary directory to run the binary in.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.travis.yml` with the given content.
    pub fn with_travis_yml(self, content: &str) -> Self {
        self.temp_dir
            .child(TRAVIS_YML)
            .write_str(content)
            .expect("Failed to write .travis.yml");
        self
    }

    /// Add a `.travis.yml` holding exactly what the generator produces.
    pub fn with_generated_file(self) -> Self {
        let text = pipegen::render::generate().expect("Failed to generate document");
        self.with_travis_yml(&text)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path of `.travis.yml` in the fixture.
    pub fn travis_yml(&self) -> PathBuf {
        self.temp_dir.path().join(TRAVIS_YML)
    }

    /// A `pipegen` command running inside the fixture directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pipegen");
        cmd.current_dir(self.path());
        cmd.env_remove("PIPEGEN_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
