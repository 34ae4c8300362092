//! JSON merge helpers for layered configuration.

use serde_json::{Map, Value};

/// camelCase spellings accepted for compatibility, with their canonical keys.
pub(super) const AUTO_RECALL_ALIASES: &[(&str, &str)] = &[
    ("minMessageLength", "min_message_length"),
    ("maxResults", "max_results"),
    ("minScore", "min_score"),
    ("maxTokens", "max_tokens"),
    ("skipHeartbeats", "skip_heartbeats"),
    ("excludeBootstrapped", "exclude_bootstrapped"),
    ("randomSlot", "random_slot"),
    ("respectTemporalDecay", "respect_temporal_decay"),
];

/// Merge overlay values into the base, recursively overriding objects.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

/// Rewrite camelCase auto-recall keys to snake_case.
///
/// Runs per layer before merging so a camelCase layer and a snake_case layer
/// override each other instead of producing duplicate fields.
pub(super) fn canonicalize_keys(value: &mut Value) {
    let Some(root) = value.as_object_mut() else {
        return;
    };
    if let Some(Value::Object(memory)) = root.get_mut("memory") {
        canonicalize_memory(memory);
    }
    let agents = root
        .get_mut("agents")
        .and_then(|agents| agents.get_mut("list"))
        .and_then(Value::as_array_mut);
    for agent in agents.into_iter().flatten() {
        if let Some(Value::Object(memory)) = agent.get_mut("memory") {
            canonicalize_memory(memory);
        }
    }
}

fn canonicalize_memory(memory: &mut Map<String, Value>) {
    rename_key(memory, "autoRecall", "auto_recall");
    if let Some(Value::Object(auto_recall)) = memory.get_mut("auto_recall") {
        for (alias, canonical) in AUTO_RECALL_ALIASES {
            rename_key(auto_recall, alias, canonical);
        }
    }
}

fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.insert(to.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::{canonicalize_keys, merge_json_values};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_overrides_scalars_and_keeps_siblings() {
        let mut base = json!({ "memory": { "auto_recall": { "enabled": true, "max_results": 3 } } });
        let overlay = json!({ "memory": { "auto_recall": { "max_results": 5 } } });
        merge_json_values(&mut base, &overlay);
        assert_eq!(
            base,
            json!({ "memory": { "auto_recall": { "enabled": true, "max_results": 5 } } })
        );
    }

    #[test]
    fn canonicalize_rewrites_global_and_agent_sections() {
        let mut value = json!({
            "memory": { "autoRecall": { "maxResults": 4, "enabled": true } },
            "agents": { "list": [
                { "id": "ops", "memory": { "autoRecall": { "randomSlot": false } } }
            ] }
        });
        canonicalize_keys(&mut value);
        assert_eq!(
            value,
            json!({
                "memory": { "auto_recall": { "max_results": 4, "enabled": true } },
                "agents": { "list": [
                    { "id": "ops", "memory": { "auto_recall": { "random_slot": false } } }
                ] }
            })
        );
    }
}
