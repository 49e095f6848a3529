//! # Platform Bases
//!
//! Each platform contributes the fields every job on it needs: the OS and
//! image, packages, setup commands and default environment. Job factories in
//! [`crate::jobs`] start from one of these bases and merge their own fields
//! on top.
//!
//! `Platform` and `PythonVersion` are closed enums. Code that names an
//! unsupported platform does not compile; parsing a name from text returns
//! [`Error::UnknownVariant`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::shard::{strings, Addons, AptAddon, Shard};

/// Operating system a job runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Osx,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Osx => "osx",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linux" => Ok(Platform::Linux),
            "osx" => Ok(Platform::Osx),
            other => Err(Error::UnknownVariant {
                kind: "platform",
                value: other.to_string(),
                expected: "linux, osx".to_string(),
            }),
        }
    }
}

/// Python interpreters installed on macOS runners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PythonVersion {
    Py37,
    Py38,
}

impl PythonVersion {
    /// Version without the dot, as used in env var names (`37`).
    pub fn number(self) -> u32 {
        match self {
            PythonVersion::Py37 => 37,
            PythonVersion::Py38 => 38,
        }
    }

    /// Version as `major.minor` (`3.7`).
    pub fn decimal(self) -> f32 {
        match self {
            PythonVersion::Py37 => 3.7,
            PythonVersion::Py38 => 3.8,
        }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "py{}", self.number())
    }
}

impl FromStr for PythonVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "py37" => Ok(PythonVersion::Py37),
            "py38" => Ok(PythonVersion::Py38),
            other => Err(Error::UnknownVariant {
                kind: "python version",
                value: other.to_string(),
                expected: "py37, py38".to_string(),
            }),
        }
    }
}

const AWS_CLI_INSTALLER: &str = "./build-support/bin/install_aws_cli_for_ci.sh";

const LINUX_APT_PACKAGES: &[&str] = &[
    "lib32stdc++6",
    "lib32z1",
    "lib32z1-dev",
    "gcc-multilib",
    "python-dev",
    "openssl",
    "libssl-dev",
    "jq",
    "unzip",
    "shellcheck",
];

const LINUX_PYTHONS: &[&str] = &["2.7", "3.6", "3.7"];

// Travis pre-installs these but they still have to be activated.
const LINUX_PYENV_GLOBAL: &str = "pyenv global 2.7.17 3.6.10 3.7.6 3.8.1";
const XENIAL_PYENV_GLOBAL: &str = "pyenv global 2.7.15 3.6.7 3.7.1";

const TRAVIS_WAIT_INSTALL: &[&str] = &[
    concat!(
        r#"wget -qO- "https://github.com/crazy-max/travis-wait-enhanced/releases/download/"#,
        r#"v0.2.1/travis-wait-enhanced_0.2.1_linux_x86_64.tar.gz" | tar -zxvf - "#,
        "travis-wait-enhanced"
    ),
    "mv travis-wait-enhanced /home/travis/bin/",
];

/// Knobs for the Linux base.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxOptions {
    /// Run the job's script inside the CI docker image.
    pub use_docker: bool,
    /// Install `travis-wait-enhanced` for long silent commands.
    pub install_travis_wait: bool,
    /// Activate the interpreters shipped on the older xenial image.
    pub xenial: bool,
}

fn linux_before_install(options: LinuxOptions) -> Vec<String> {
    let pyenv = if options.xenial {
        XENIAL_PYENV_GLOBAL
    } else {
        LINUX_PYENV_GLOBAL
    };
    let mut commands = strings(&[AWS_CLI_INSTALLER, pyenv]);
    if options.install_travis_wait {
        commands.extend(strings(TRAVIS_WAIT_INSTALL));
    }
    commands
}

/// Base fields for a Linux job.
pub fn linux_shard(options: LinuxOptions) -> Shard {
    Shard {
        addons: Some(Addons {
            apt: AptAddon {
                packages: strings(LINUX_APT_PACKAGES),
            },
        }),
        after_failure: strings(&["./build-support/bin/ci-failure.sh"]),
        before_install: linux_before_install(options),
        dist: Some("bionic".to_string()),
        language: Some("python".to_string()),
        os: Some(Platform::Linux),
        python: strings(LINUX_PYTHONS),
        services: if options.use_docker {
            strings(&["docker"])
        } else {
            Vec::new()
        },
        ..Shard::fragment()
    }
}

/// Knobs for the macOS base.
#[derive(Debug, Clone)]
pub struct OsxOptions {
    /// Interpreters to install through pyenv.
    pub python_versions: Vec<PythonVersion>,
    /// Also install python 2.7, ahead of the others.
    pub install_py27: bool,
    /// Xcode image to run on; Travis' default when unset.
    pub osx_image: Option<String>,
}

impl Default for OsxOptions {
    fn default() -> Self {
        Self {
            python_versions: vec![PythonVersion::Py37],
            install_py27: true,
            osx_image: None,
        }
    }
}

fn osx_before_install(python_versions: &[PythonVersion], install_py27: bool) -> Vec<String> {
    let mut versions: Vec<String> = python_versions
        .iter()
        .map(|version| format!("${{MACOS_PYENV_PY{}_VERSION}}", version.number()))
        .collect();
    if install_py27 {
        versions.insert(0, "${MACOS_PYENV_PY27_VERSION}".to_string());
    }
    vec![
        "curl -L https://github.com/stedolan/jq/releases/download/jq-1.5/jq-osx-amd64 -o /usr/local/bin/jq".to_string(),
        "chmod 755 /usr/local/bin/jq".to_string(),
        AWS_CLI_INSTALLER.to_string(),
        format!(
            "./build-support/bin/install_python_for_ci.sh {}",
            versions.join(" ")
        ),
    ]
}

const OSX_OPENSSL_ENV: &[&str] = &[
    r#"PATH="/usr/local/opt/openssl/bin:${PATH}""#,
    r#"LDFLAGS="-L/usr/local/opt/openssl/lib""#,
    r#"CPPFLAGS="-I/usr/local/opt/openssl/include""#,
];

const OSX_PYENV_ENV: &[&str] = &[
    r#"PATH="${PYENV_ROOT}/versions/${MACOS_PYENV_PY27_VERSION}/bin:${PATH}""#,
    r#"PATH="${PYENV_ROOT}/versions/${MACOS_PYENV_PY37_VERSION}/bin:${PATH}""#,
    r#"PATH="${PYENV_ROOT}/versions/${MACOS_PYENV_PY38_VERSION}/bin:${PATH}""#,
];

/// Default macOS environment: openssl flags, then the pyenv interpreters.
pub fn osx_env() -> Vec<String> {
    OSX_OPENSSL_ENV
        .iter()
        .chain(OSX_PYENV_ENV)
        .map(|var| var.to_string())
        .collect()
}

/// Base fields for a macOS job.
pub fn osx_shard(options: &OsxOptions) -> Shard {
    Shard {
        before_install: osx_before_install(&options.python_versions, options.install_py27),
        before_script: strings(&["ulimit -n 8192"]),
        env: osx_env(),
        language: Some("generic".to_string()),
        os: Some(Platform::Osx),
        osx_image: options.osx_image.clone(),
        ..Shard::fragment()
    }
}

/// Build the CI image from `build-support/docker/travis_ci/`.
pub fn docker_build_travis_ci_image() -> String {
    [
        "docker",
        "build",
        "--rm",
        "-t",
        "travis_ci",
        "--build-arg",
        r#""TRAVIS_USER=$(id -un)""#,
        "--build-arg",
        r#""TRAVIS_UID=$(id -u)""#,
        "--build-arg",
        r#""TRAVIS_GROUP=$(id -gn)""#,
        "--build-arg",
        r#""TRAVIS_GID=$(id -g)""#,
        "build-support/docker/travis_ci/",
    ]
    .join(" ")
}

/// Run `command` inside the CI image with the home and build dirs mounted.
pub fn docker_run_travis_ci_image(command: &str) -> String {
    let quoted = format!("\"{}\"", command);
    [
        "docker",
        "run",
        "--rm",
        "-t",
        "-v",
        r#""${HOME}:/travis/home""#,
        "-v",
        r#""${TRAVIS_BUILD_DIR}:/travis/workdir""#,
        "travis_ci:latest",
        "sh",
        "-c",
        quoted.as_str(),
    ]
    .join(" ")
}
