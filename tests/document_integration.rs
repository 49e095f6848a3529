//! Integration tests for the generated document.
//!
//! The rendered text is parsed back as YAML and checked the way the CI
//! runtime would read it: stages, jobs, env overlays and deploy settings.

use pipegen::document::assemble;
use pipegen::render::{generate, HEADER};
use serde_yaml::Value;

fn parsed() -> Value {
    let text = generate().unwrap();
    let body = text.strip_prefix(HEADER).unwrap();
    serde_yaml::from_str(body).unwrap()
}

fn strings(value: &Value) -> Vec<&str> {
    value
        .as_sequence()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect()
}

#[test]
fn test_top_level_keys() {
    let doc = parsed();
    let keys: Vec<&str> = doc
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["conditions", "deploy", "env", "jobs", "notifications", "stages"]
    );
    assert_eq!(doc["conditions"].as_str(), Some("v1"));
}

#[test]
fn test_jobs_reference_declared_stages() {
    let doc = parsed();
    let declared: Vec<&str> = doc["stages"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    let jobs = doc["jobs"]["include"].as_sequence().unwrap();
    assert_eq!(jobs.len(), 4);
    for job in jobs {
        let stage = job["stage"].as_str().unwrap();
        assert!(declared.contains(&stage), "undeclared stage {}", stage);
    }
}

#[test]
fn test_osx_env_overlay_order() {
    let doc = parsed();
    let osx = &doc["jobs"]["include"][1];
    assert_eq!(osx["os"].as_str(), Some("osx"));
    let env = strings(&osx["env"]);
    assert!(env[0].starts_with("PATH=\"/usr/local/opt/openssl/bin"));
    assert_eq!(&env[env.len() - 2..], ["PREPARE_DEPLOY=1", "CACHE_NAME=wheels.osx"]);
}

#[test]
fn test_wheel_jobs_share_cache_policy_by_value() {
    let doc = parsed();
    let linux = &doc["jobs"]["include"][0];
    let osx = &doc["jobs"]["include"][1];
    assert_eq!(linux["cache"], osx["cache"]);
    assert_eq!(linux["cache"]["timeout"].as_u64(), Some(500));
    assert_eq!(strings(&linux["before_cache"]).len(), 3);
}

#[test]
fn test_linux_python_versions_stay_strings() {
    let doc = parsed();
    let linux = &doc["jobs"]["include"][0];
    assert_eq!(strings(&linux["python"]), vec!["2.7", "3.6", "3.7"]);
}

#[test]
fn test_stable_deploy_nested_policy() {
    let doc = parsed();
    let stable = &doc["jobs"]["include"][2];
    assert_eq!(stable["deploy"]["provider"].as_str(), Some("releases"));
    assert_eq!(stable["deploy"]["on"]["tags"].as_bool(), Some(true));
    assert!(stable["deploy"]["api_key"]["secure"].as_str().is_some());
}

#[test]
fn test_deploy_trigger_key_survives_yaml11_readers() {
    let text = generate().unwrap();
    let trigger_lines: Vec<&str> = text
        .lines()
        .filter(|line| line.trim_start().starts_with("'on':"))
        .collect();
    assert_eq!(trigger_lines.len(), 2);
    assert!(text.lines().all(|line| line.trim() != "on:"));

    let doc = parsed();
    assert_eq!(doc["deploy"]["on"]["repo"].as_str(), Some("pantsbuild/pants"));
}

#[test]
fn test_global_env_passes_secure_blob_through() {
    let doc = parsed();
    let global = doc["env"]["global"].as_sequence().unwrap();
    let secure: Vec<&Value> = global.iter().filter(|v| v.is_mapping()).collect();
    assert_eq!(secure.len(), 1);
    assert!(secure[0]["secure"].as_str().unwrap().starts_with("oEmZoB4o"));
}

#[test]
fn test_round_trip_matches_assembled_document() {
    let text = generate().unwrap();
    let body = text.strip_prefix(HEADER).unwrap();
    let reparsed: pipegen::document::Document = serde_yaml::from_str(body).unwrap();
    assert_eq!(reparsed, assemble());
}
