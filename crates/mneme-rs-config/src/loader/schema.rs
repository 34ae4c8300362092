//! Schema validation for Mneme JSON5 configuration layers.

use super::merge::AUTO_RECALL_ALIASES;
use crate::ConfigError;
use serde_json::{Map, Value};

/// Boolean keys of an auto-recall section, in both accepted spellings.
const AUTO_RECALL_BOOL_KEYS: &[&str] = &[
    "enabled",
    "skip_heartbeats",
    "skipHeartbeats",
    "exclude_bootstrapped",
    "excludeBootstrapped",
    "random_slot",
    "randomSlot",
    "respect_temporal_decay",
    "respectTemporalDecay",
];

/// Non-negative integer keys of an auto-recall section.
const AUTO_RECALL_COUNT_KEYS: &[&str] = &[
    "min_message_length",
    "minMessageLength",
    "max_results",
    "maxResults",
    "max_tokens",
    "maxTokens",
];

/// Score keys of an auto-recall section.
const AUTO_RECALL_SCORE_KEYS: &[&str] = &["min_score", "minScore"];

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "memory", "agents"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("memory") {
        validate_memory(value, layer, "memory")?;
    }
    if let Some(value) = map.get("agents") {
        validate_agents(value, layer, "agents")?;
    }
    Ok(())
}

/// Validate a memory block (global or per agent).
fn validate_memory(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["auto_recall", "autoRecall"], layer, path)?;
    reject_duplicate_spellings(map, &[("autoRecall", "auto_recall")], layer, path)?;

    for key in ["auto_recall", "autoRecall"] {
        if let Some(value) = map.get(key) {
            validate_auto_recall(value, layer, &join_path(path, key))?;
        }
    }
    Ok(())
}

/// Validate an auto-recall block.
fn validate_auto_recall(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    let allowed: Vec<&str> = AUTO_RECALL_BOOL_KEYS
        .iter()
        .chain(AUTO_RECALL_COUNT_KEYS)
        .chain(AUTO_RECALL_SCORE_KEYS)
        .copied()
        .collect();
    ensure_allowed_keys(map, &allowed, layer, path)?;
    reject_duplicate_spellings(map, AUTO_RECALL_ALIASES, layer, path)?;

    for key in AUTO_RECALL_BOOL_KEYS {
        if let Some(value) = map.get(*key) {
            expect_bool(value, layer, &join_path(path, key))?;
        }
    }
    for key in AUTO_RECALL_COUNT_KEYS {
        if let Some(value) = map.get(*key) {
            expect_u64(value, layer, &join_path(path, key))?;
        }
    }
    for key in AUTO_RECALL_SCORE_KEYS {
        if let Some(value) = map.get(*key) {
            expect_unit_interval(value, layer, &join_path(path, key))?;
        }
    }
    Ok(())
}

/// Validate the "agents" block.
fn validate_agents(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["list"], layer, path)?;

    if let Some(list) = map.get("list") {
        let arr = expect_array(list, layer, &join_path(path, "list"))?;
        for (idx, entry) in arr.iter().enumerate() {
            validate_agent(entry, layer, &format!("{path}.list[{idx}]"))?;
        }
    }
    Ok(())
}

/// Validate a single agent entry.
fn validate_agent(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["id", "description", "memory"], layer, path)?;

    let id_path = join_path(path, "id");
    let Some(id_value) = map.get("id") else {
        return Err(invalid_field(layer, &id_path, "missing required field"));
    };
    expect_string(id_value, layer, &id_path)?;

    if let Some(value) = map.get("description") {
        expect_string(value, layer, &join_path(path, "description"))?;
    }
    if let Some(value) = map.get("memory") {
        validate_memory(value, layer, &join_path(path, "memory"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON array or return a typed error.
fn expect_array<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ConfigError> {
    match value {
        Value::Array(arr) => Ok(arr),
        _ => Err(invalid_field(layer, path, "expected array")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Expect a number within [0, 1] or return a typed error.
fn expect_unit_interval(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    match value.as_f64() {
        Some(score) if (0.0..=1.0).contains(&score) => Ok(()),
        Some(_) => Err(invalid_field(layer, path, "expected number within [0, 1]")),
        None => Err(invalid_field(layer, path, "expected number")),
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid_field(layer, &join_path(path, key), "unknown key")),
        None => Ok(()),
    }
}

/// Reject objects that set a key in both its camelCase and snake_case spelling.
fn reject_duplicate_spellings(
    map: &Map<String, Value>,
    aliases: &[(&str, &str)],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match aliases
        .iter()
        .find(|(alias, canonical)| map.contains_key(*alias) && map.contains_key(*canonical))
    {
        Some((alias, canonical)) => Err(invalid_field(
            layer,
            &join_path(path, alias),
            &format!("duplicates {canonical}"),
        )),
        None => Ok(()),
    }
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
