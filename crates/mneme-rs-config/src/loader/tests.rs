//! Tests for configuration loading.

use super::*;
use crate::AutoRecallConfig;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that ignore the real home directory.
fn isolated_options(cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.user_config_path = None;
    options
}

#[test]
fn parse_minimal_config_leaves_recall_absent() {
    let config = MnemeConfig::load_from_str("{}").expect("config");
    assert!(config.memory.auto_recall.is_none());
    assert!(config.agents.list.is_empty());
}

#[test]
fn omitted_fields_take_documented_defaults() {
    let config = MnemeConfig::load_from_str("{ memory: { auto_recall: { enabled: true } } }")
        .expect("config");
    assert_eq!(
        config.memory.auto_recall,
        Some(AutoRecallConfig::enabled())
    );
    let auto_recall = config.memory.auto_recall.expect("auto recall");
    assert_eq!(auto_recall.min_message_length, 20);
    assert_eq!(auto_recall.max_results, 3);
    assert_eq!(auto_recall.min_score, 0.5);
    assert_eq!(auto_recall.max_tokens, 1000);
    assert!(auto_recall.skip_heartbeats);
    assert!(auto_recall.exclude_bootstrapped);
    assert!(auto_recall.random_slot);
}

#[test]
fn camel_case_keys_load_like_snake_case() {
    let camel = MnemeConfig::load_from_str(
        r#"{ memory: { autoRecall: { enabled: true, minMessageLength: 5, maxResults: 4,
            minScore: 0.25, maxTokens: 200, skipHeartbeats: false,
            excludeBootstrapped: false, randomSlot: false } } }"#,
    )
    .expect("camel");
    let snake = MnemeConfig::load_from_str(
        r#"{ memory: { auto_recall: { enabled: true, min_message_length: 5, max_results: 4,
            min_score: 0.25, max_tokens: 200, skip_heartbeats: false,
            exclude_bootstrapped: false, random_slot: false } } }"#,
    )
    .expect("snake");
    assert_eq!(camel.memory.auto_recall, snake.memory.auto_recall);
}

#[test]
fn deprecated_decay_flag_is_accepted() {
    let config = MnemeConfig::load_from_str(
        "{ memory: { auto_recall: { enabled: true, respectTemporalDecay: true } } }",
    )
    .expect("config");
    let auto_recall = config.memory.auto_recall.expect("auto recall");
    assert_eq!(auto_recall.respect_temporal_decay, Some(true));
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = MnemeConfig::load_from_str("{ unexpected: true }").unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

#[test]
fn rejects_unknown_auto_recall_key() {
    let err = MnemeConfig::load_from_str("{ memory: { auto_recall: { max_result: 3 } } }")
        .unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("memory.auto_recall.max_result"));
    assert!(msg.contains("unknown key"));
}

#[test]
fn rejects_out_of_range_min_score() {
    let err = MnemeConfig::load_from_str("{ memory: { auto_recall: { min_score: 1.5 } } }")
        .unwrap_err();
    assert!(format!("{err}").contains("memory.auto_recall.min_score"));
}

#[test]
fn rejects_zero_max_results() {
    let err = MnemeConfig::load_from_str("{ memory: { auto_recall: { max_results: 0 } } }")
        .unwrap_err();
    assert!(format!("{err}").contains("memory.auto_recall.max_results"));
}

#[test]
fn rejects_negative_min_message_length() {
    let err = MnemeConfig::load_from_str(
        "{ memory: { auto_recall: { min_message_length: -1 } } }",
    )
    .unwrap_err();
    assert!(format!("{err}").contains("min_message_length"));
}

#[test]
fn rejects_both_spellings_of_auto_recall_field() {
    let err = MnemeConfig::load_from_str(
        "{ memory: { auto_recall: { max_results: 2, maxResults: 7 } } }",
    )
    .unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("memory.auto_recall.maxResults"));
    assert!(msg.contains("duplicates max_results"));
}

#[test]
fn rejects_both_spellings_of_auto_recall_section() {
    let err = MnemeConfig::load_from_str(
        "{ agents: { list: [ { id: \"ops\", memory: { auto_recall: {}, autoRecall: {} } } ] } }",
    )
    .unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("agents.list[0].memory.autoRecall"));
    assert!(msg.contains("duplicates auto_recall"));
}

#[test]
fn rejects_agent_without_id() {
    let err = MnemeConfig::load_from_str("{ agents: { list: [ { description: \"x\" } ] } }")
        .unwrap_err();
    assert!(format!("{err}").contains("agents.list[0].id"));
}

#[test]
fn agent_section_replaces_global_section() {
    let config = MnemeConfig::load_from_str(
        r#"{
            memory: { auto_recall: { enabled: true, max_results: 5 } },
            agents: { list: [
                { id: "quiet", memory: { auto_recall: { enabled: false } } },
                { id: "plain" }
            ] }
        }"#,
    )
    .expect("config");
    let quiet = config.auto_recall_for("quiet").expect("quiet section");
    assert!(!quiet.enabled);
    assert_eq!(quiet.max_results, 3);
    let plain = config.auto_recall_for("plain").expect("plain section");
    assert_eq!(plain.max_results, 5);
    let unknown = config.auto_recall_for("missing").expect("global section");
    assert_eq!(unknown.max_results, 5);
}

#[test]
fn load_from_path_reads_json5_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("custom.json5");
    write_json5(
        &path,
        "// comments are fine\n{ memory: { auto_recall: { enabled: true, max_tokens: 64, } } }",
    );
    let config = MnemeConfig::load_from_path(&path).expect("config");
    assert_eq!(config.memory.auto_recall.expect("auto recall").max_tokens, 64);
}

#[test]
fn layered_config_prefers_cwd_over_project_and_user() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let project_root = root.join("project");
    fs::create_dir_all(project_root.join(".git")).expect("git");
    let cwd = project_root.join("subdir");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("user.json5");
    write_json5(
        &user_config,
        "{ memory: { auto_recall: { enabled: true, max_results: 2, max_tokens: 10 } } }",
    );
    write_json5(
        &project_root.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
        "{ memory: { auto_recall: { max_results: 4 } } }",
    );
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ memory: { autoRecall: { maxResults: 6 } } }",
    );

    let mut options = isolated_options(&cwd);
    options.user_config_path = Some(user_config);
    let layered = MnemeConfig::load_layered_with_options(options).expect("layered");

    let auto_recall = layered.config.memory.auto_recall.expect("auto recall");
    assert!(auto_recall.enabled);
    assert_eq!(auto_recall.max_results, 6);
    assert_eq!(auto_recall.max_tokens, 10);
    let sources: Vec<ConfigLayerSource> =
        layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Project,
            ConfigLayerSource::Cwd
        ]
    );
}

#[test]
fn runtime_override_wins() {
    let temp = TempDir::new().expect("tmp");
    let cwd = temp.path().join("work");
    fs::create_dir_all(&cwd).expect("cwd");
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ memory: { auto_recall: { enabled: true, random_slot: true } } }",
    );
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, "{ memory: { auto_recall: { random_slot: false } } }");

    let options = isolated_options(&cwd).with_runtime_path(&runtime);
    let layered = MnemeConfig::load_layered_with_options(options).expect("layered");
    let auto_recall = layered.config.memory.auto_recall.expect("auto recall");
    assert!(auto_recall.enabled);
    assert!(!auto_recall.random_slot);
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let options =
        isolated_options(temp.path()).with_runtime_path(temp.path().join("absent.json5"));
    let err = MnemeConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[test]
fn invalid_layer_reports_its_origin() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ memory: { auto_recall: { enabled: \"yes\" } } }",
    );
    let err = MnemeConfig::load_layered_with_options(isolated_options(temp.path())).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("memory.auto_recall.enabled"));
}
