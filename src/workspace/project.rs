//! Project entries produced by a workspace scan

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::SystemTime;

use super::RemoteInfo;

/// Appended to the name of every remote project
pub const REMOTE_MARKER: &str = " (Remote)";

/// A recently opened editor workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Display label
    pub name: String,

    /// Local directory path, or the decoded vscode-remote:// URI
    pub location: String,

    pub is_remote: bool,

    /// Remote connection info when the URI authority names one
    pub remote: Option<RemoteInfo>,

    /// Best-effort recency indicator
    pub last_opened: SystemTime,
}

impl ProjectEntry {
    /// Case-insensitive substring match on name or location
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
    }

    fn dedup_key(&self) -> String {
        self.location
            .trim_end_matches(['/', '\\'])
            .to_lowercase()
    }
}

/// Keep the most recent entry per location, newest first
///
/// Locations compare case-insensitively. Equal times keep the first entry
/// seen and sort by location, then name.
pub fn dedup_by_location(entries: Vec<ProjectEntry>) -> Vec<ProjectEntry> {
    let mut by_location: HashMap<String, ProjectEntry> = HashMap::with_capacity(entries.len());

    for entry in entries {
        match by_location.entry(entry.dedup_key()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if entry.last_opened > slot.get().last_opened {
                    slot.insert(entry);
                }
            }
        }
    }

    let mut unique: Vec<ProjectEntry> = by_location.into_values().collect();
    unique.sort_by(|a, b| {
        b.last_opened
            .cmp(&a.last_opened)
            .then_with(|| a.location.cmp(&b.location))
            .then_with(|| a.name.cmp(&b.name))
    });
    unique
}
