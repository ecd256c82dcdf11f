//! Structural validation of a per-driver statistics document.

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Top-level keys a statistics document must carry. Their interior shape is
/// owned by the site templates and opaque to this engine.
pub const REQUIRED_KEYS: [&str; 2] = ["season", "career"];

/// Parse a candidate file's contents and check the minimal structure.
///
/// Malformed JSON and a missing (or `null`) required key are both validation
/// failures; callers treat them identically.
pub fn parse_stats(raw: &str) -> Result<Value> {
    let doc: Value = serde_json::from_str(raw).context("malformed JSON")?;
    let Some(obj) = doc.as_object() else {
        bail!("expected a top-level object");
    };
    for key in REQUIRED_KEYS {
        match obj.get(key) {
            None | Some(Value::Null) => bail!("missing required key '{key}'"),
            Some(_) => {}
        }
    }
    Ok(doc)
}
