use super::dto::RefAudioListing;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_PREFIX: &str = "default/";
const CUSTOM_PREFIX: &str = "custom/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefAudioCategory {
    Default,
    Custom,
}

impl RefAudioCategory {
    /// Category from the storage key prefix. Keys without a known prefix
    /// count as default, so they are never offered for deletion.
    pub fn of(id: &str) -> Self {
        if id.starts_with(CUSTOM_PREFIX) {
            RefAudioCategory::Custom
        } else {
            RefAudioCategory::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefAudioCategory::Default => "default",
            RefAudioCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for RefAudioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefAudioEntry {
    pub id: String,
    pub category: RefAudioCategory,
    pub transcript: String,
}

impl RefAudioEntry {
    /// The key without its category prefix.
    pub fn display_name(&self) -> &str {
        self.id
            .strip_prefix(CUSTOM_PREFIX)
            .or_else(|| self.id.strip_prefix(DEFAULT_PREFIX))
            .unwrap_or(&self.id)
    }

    pub fn is_deletable(&self) -> bool {
        self.category == RefAudioCategory::Custom
    }
}

/// Reference clips known to the server, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefAudioCatalog {
    entries: Vec<RefAudioEntry>,
    default_id: Option<String>,
}

impl RefAudioCatalog {
    pub fn from_listing(listing: RefAudioListing) -> Self {
        let RefAudioListing {
            files,
            default,
            mut ref_texts,
        } = listing;

        let mut entries: Vec<RefAudioEntry> = Vec::with_capacity(files.len());
        for id in files {
            if entries.iter().any(|e| e.id == id) {
                continue;
            }
            entries.push(RefAudioEntry {
                category: RefAudioCategory::of(&id),
                transcript: ref_texts.remove(&id).unwrap_or_default(),
                id,
            });
        }

        let default_id = default.filter(|id| entries.iter().any(|e| &e.id == id));

        Self {
            entries,
            default_id,
        }
    }

    pub fn entries(&self) -> &[RefAudioEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&RefAudioEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Server default when it is listed, otherwise the first entry.
    pub fn fallback_id(&self) -> Option<&str> {
        self.default_id
            .as_deref()
            .or_else(|| self.entries.first().map(|e| e.id.as_str()))
    }

    pub fn in_category(&self, category: RefAudioCategory) -> Vec<&RefAudioEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Default entries first, then custom, each keeping server order.
    pub fn grouped(&self) -> Vec<(RefAudioCategory, Vec<&RefAudioEntry>)> {
        [RefAudioCategory::Default, RefAudioCategory::Custom]
            .into_iter()
            .map(|category| (category, self.in_category(category)))
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }
}
