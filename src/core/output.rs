//! Output rendering helpers for the `nsload` CLI.

use serde_json::Value as JsonValue;
use std::path::PathBuf;
use ulid::Ulid;

use crate::core::journal::now_epoch_z;

/// JSON envelope wrapped around every `--format json` result.
pub fn command_envelope(cmd: &str, status: &str, extra: JsonValue) -> JsonValue {
    let mut base = serde_json::json!({
        "envelope_version": "1.0.0",
        "ts": now_epoch_z(),
        "event_id": Ulid::new().to_string(),
        "cmd": cmd,
        "status": status
    });
    if let (Some(base_obj), Some(extra_obj)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra_obj {
            base_obj.insert(k.clone(), v.clone());
        }
    }
    base
}

/// Renders up to `max_items` paths on one line, with a `(+N more)` tail.
pub fn preview_paths(paths: &[PathBuf], max_items: usize) -> String {
    if paths.is_empty() {
        return String::from("-");
    }
    let shown = paths
        .iter()
        .take(max_items)
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ");
    if paths.len() > max_items {
        format!("{} (+{} more)", shown, paths.len() - max_items)
    } else {
        shown
    }
}
