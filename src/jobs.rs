//! # Job Factories
//!
//! Each factory returns one fully populated entry of `jobs.include`. They are
//! pure: every call builds a fresh shard from the platform bases, the cache
//! fragment and the constants below.

use log::debug;

use crate::cache;
use crate::deploy::DeployPolicy;
use crate::platform::{
    docker_build_travis_ci_image, docker_run_travis_ci_image, linux_shard, osx_shard,
    LinuxOptions, OsxOptions, Platform, PythonVersion,
};
use crate::shard::{strings, Shard};
use crate::stage::Stage;

/// Runs wheel builds unless a pull request or cron build opts out with
/// `[ci skip-build-wheels]` in the commit message.
pub const SKIP_WHEELS_CONDITION: &str =
    r"commit_message !~ /\[ci skip-build-wheels\]/ OR type NOT IN (pull_request, cron)";

/// Home directory of the CI user inside the docker image.
const DOCKER_HOME: &str = "/travis/home";

fn install_rust(homedir: &str) -> Vec<String> {
    vec![
        "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y --default-toolchain none".to_string(),
        // Puts rustup and cargo on the PATH.
        format!("source {}/.cargo/env", homedir),
    ]
}

fn build_wheels_commands(homedir: &str) -> Vec<String> {
    let mut commands = install_rust(homedir);
    commands.extend(strings(&[
        "./build-support/bin/release.sh -n",
        "USE_PY38=true ./build-support/bin/release.sh -n",
        // fs_util reuses the engine compiled for the wheels.
        "./build-support/bin/release.sh -f",
    ]));
    commands
}

fn build_wheels_env(platform: Platform) -> Vec<String> {
    vec![
        "PREPARE_DEPLOY=1".to_string(),
        format!("CACHE_NAME=wheels.{}", platform),
    ]
}

/// Linux wheels and `fs_util`, built inside the CI docker image.
pub fn build_wheels_linux() -> Shard {
    let command = build_wheels_commands(DOCKER_HOME).join(" && ");
    let shard = cache::native_engine()
        .merge(linux_shard(LinuxOptions {
            use_docker: true,
            ..LinuxOptions::default()
        }))
        .merge(Shard {
            condition: Some(SKIP_WHEELS_CONDITION.to_string()),
            name: Some("Build Linux wheels and fs_util".to_string()),
            script: vec![
                docker_build_travis_ci_image(),
                docker_run_travis_ci_image(&command),
            ],
            stage: Some(Stage::Wheels),
            ..Shard::fragment()
        })
        .with_env(build_wheels_env(Platform::Linux));
    debug!("built job '{}'", shard.display_name());
    shard
}

/// macOS wheels and `fs_util`, built for py37 and py38.
pub fn build_wheels_osx() -> Shard {
    let shard = cache::native_engine()
        .merge(osx_shard(&OsxOptions {
            python_versions: vec![PythonVersion::Py37, PythonVersion::Py38],
            install_py27: false,
            osx_image: Some("xcode8".to_string()),
        }))
        .merge(Shard {
            condition: Some(SKIP_WHEELS_CONDITION.to_string()),
            name: Some("Build macOS wheels and fs_util".to_string()),
            script: build_wheels_commands("${HOME}"),
            stage: Some(Stage::Wheels),
            ..Shard::fragment()
        })
        .with_env(build_wheels_env(Platform::Osx));
    debug!("built job '{}'", shard.display_name());
    shard
}

fn deploy_base() -> Shard {
    linux_shard(LinuxOptions::default()).with_script(["./build-support/bin/release.sh -p"])
}

/// Publishes the pex of a tagged release to GitHub releases.
pub fn deploy_stable() -> Shard {
    let shard = deploy_base()
        .merge(Shard {
            deploy: Some(DeployPolicy::github_releases()),
            name: Some("Deploy stable pants.pex".to_string()),
            stage: Some(Stage::BuildStable),
            ..Shard::fragment()
        })
        .with_env(["PANTS_PEX_RELEASE=stable", "CACHE_NAME=deploy.stable"]);
    debug!("built job '{}'", shard.display_name());
    shard
}

/// Stages the unstable pex in `dist/deploy` for the S3 deploy.
pub fn deploy_unstable() -> Shard {
    let shard = deploy_base()
        .merge(Shard {
            name: Some("Deploy unstable pants.pex".to_string()),
            stage: Some(Stage::BuildUnstable),
            ..Shard::fragment()
        })
        .with_script(["mkdir -p dist/deploy/pex/", "mv dist/pants*.pex dist/deploy/pex/"])
        .with_env(["PREPARE_DEPLOY=1", "CACHE_NAME=deploy.unstable"]);
    debug!("built job '{}'", shard.display_name());
    shard
}

/// Every job, in the order it appears in `jobs.include`.
pub fn all() -> Vec<Shard> {
    vec![
        build_wheels_linux(),
        build_wheels_osx(),
        deploy_stable(),
        deploy_unstable(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachePolicy;

    #[test]
    fn test_every_job_names_a_declared_stage() {
        let declared: Vec<String> = Stage::all_entries().into_iter().map(|e| e.name).collect();
        for job in all() {
            let stage = job.stage.expect("job without stage");
            assert!(
                declared.iter().any(|name| name == stage.name()),
                "{} refers to {}",
                job.display_name(),
                stage
            );
        }
    }

    #[test]
    fn test_build_wheels_linux() {
        let shard = build_wheels_linux();
        assert_eq!(shard.os, Some(Platform::Linux));
        assert_eq!(shard.services, vec!["docker"]);
        assert_eq!(shard.condition.as_deref(), Some(SKIP_WHEELS_CONDITION));
        assert_eq!(shard.env, vec!["PREPARE_DEPLOY=1", "CACHE_NAME=wheels.linux"]);
        assert_eq!(shard.script.len(), 2);
        assert!(shard.script[0].starts_with("docker build"));
        assert!(shard.script[1].contains("source /travis/home/.cargo/env"));
        assert!(shard.script[1].contains(" && ./build-support/bin/release.sh -f"));
        assert_eq!(shard.cache, Some(CachePolicy::native_engine()));
        assert_eq!(shard.before_cache.len(), 3);
    }

    #[test]
    fn test_build_wheels_osx_env_is_platform_then_job() {
        let shard = build_wheels_osx();
        assert_eq!(shard.osx_image.as_deref(), Some("xcode8"));
        assert_eq!(shard.env.len(), 8);
        assert!(shard.env[0].contains("openssl"));
        assert_eq!(shard.env[6], "PREPARE_DEPLOY=1");
        assert_eq!(shard.env[7], "CACHE_NAME=wheels.osx");
        assert!(!shard.before_install[3].contains("PY27"));
        assert_eq!(shard.script[1], "source ${HOME}/.cargo/env");
        assert_eq!(shard.script.len(), 5);
    }

    #[test]
    fn test_deploy_stable() {
        let shard = deploy_stable();
        assert_eq!(shard.stage, Some(Stage::BuildStable));
        assert_eq!(shard.script, vec!["./build-support/bin/release.sh -p"]);
        assert_eq!(shard.deploy, Some(DeployPolicy::github_releases()));
        assert_eq!(
            shard.env,
            vec!["PANTS_PEX_RELEASE=stable", "CACHE_NAME=deploy.stable"]
        );
        assert!(shard.cache.is_none());
    }

    #[test]
    fn test_deploy_unstable_extends_script() {
        let shard = deploy_unstable();
        assert_eq!(shard.stage, Some(Stage::BuildUnstable));
        assert_eq!(
            shard.script,
            vec![
                "./build-support/bin/release.sh -p",
                "mkdir -p dist/deploy/pex/",
                "mv dist/pants*.pex dist/deploy/pex/"
            ]
        );
        assert!(shard.deploy.is_none());
        assert!(shard.condition.is_none());
    }

    #[test]
    fn test_factories_are_pure() {
        assert_eq!(all(), all());
    }
}
