//! workspace.json decoding
//!
//! The editor writes one `workspace.json` per storage folder. Its shape is not
//! guaranteed, so every field is optional and a field of the wrong type reads
//! as absent instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::SkipReason;

/// File name of the per-workspace metadata record
pub const WORKSPACE_RECORD_FILE: &str = "workspace.json";

/// The workspace.json file structure
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkspaceRecord {
    /// Single-folder workspace URI
    #[serde(deserialize_with = "lenient_string")]
    pub folder: Option<String>,

    /// Multi-root `.code-workspace` file URI
    #[serde(deserialize_with = "lenient_string")]
    pub workspace: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub label: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Last-opened time in milliseconds since the Unix epoch
    #[serde(deserialize_with = "lenient_millis")]
    pub timestamp: Option<u64>,
}

impl WorkspaceRecord {
    /// Read workspace.json from a file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SkipReason> {
        let content = fs::read(path.as_ref()).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        Self::from_slice(&content)
    }

    /// Decode a record; only a document that is not JSON or not a record shape is rejected
    pub fn from_slice(content: &[u8]) -> Result<Self, SkipReason> {
        serde_json::from_slice(content).map_err(|e| SkipReason::Malformed(e.to_string()))
    }

    /// Explicit display label, preferring `label` over `name`
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref().or(self.name.as_deref())
    }
}

/// Accept non-blank strings, treat anything else as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Accept positive numbers (integer or float), treat anything else as absent
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as u64))
            .filter(|ms| *ms > 0),
        _ => None,
    })
}
