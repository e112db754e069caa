// ── Options document ──
//
// Per-entry option flags, one boolean per downstream platform. Flags are
// stored as given; nothing here interprets them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Downstream platforms an entry can switch on or off.
pub const PLATFORMS: &[&str] = &["sensor"];

/// Stored option flags for one configured entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsDocument(BTreeMap<String, bool>);

impl OptionsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Whether a platform is enabled; platforms default to on.
    pub fn is_enabled(&self, platform: &str) -> bool {
        self.get(platform).unwrap_or(true)
    }

    /// Merge `update` over the stored flags. Later values win.
    pub fn merge(&mut self, update: &OptionsDocument) {
        for (key, value) in &update.0 {
            self.0.insert(key.clone(), *value);
        }
    }

    /// Values to pre-fill an options form with: one flag per platform,
    /// taken from the stored document or `true`, in sorted order.
    pub fn form_defaults(&self) -> Vec<(&'static str, bool)> {
        let mut platforms: Vec<&'static str> = PLATFORMS.to_vec();
        platforms.sort_unstable();
        platforms
            .into_iter()
            .map(|p| (p, self.is_enabled(p)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for OptionsDocument {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
