use std::collections::HashMap;

use tracing::debug;

use crate::model::{
    PedalboardGraph, PedalboardMode, PedalboardSummary, PluginRecord, PluginRecordMini,
};

/// Known-broken plugins, filtered out of every discovery and listing path.
/// Direct lookups of these URIs are unsupported.
pub const BLACKLIST: &[&str] = &[
    "urn:50m30n3:plugins:SO-404",
    "urn:50m30n3:plugins:SO-666",
    "urn:50m30n3:plugins:SO-kl5",
    "urn:juce:JuceDemoHost",
    "urn:juced:DrumSynth",
];

pub fn blacklisted(uri: &str) -> bool {
    BLACKLIST.contains(&uri)
}

/// One discovered plugin URI. The entry exists from the moment the URI is
/// seen in the world; the records inside stay empty until a query forces
/// extraction.
#[derive(Debug, Default)]
pub struct CacheEntry {
    pub full: Option<PluginRecord>,
    pub mini: Option<PluginRecordMini>,
    pub presets_dirty: bool,
}

#[derive(Debug, Default)]
pub struct Cache {
    pub(crate) entries: HashMap<String, CacheEntry>,
    uri_snapshot: Vec<String>,
    mini_snapshot: Vec<PluginRecordMini>,
    listing_dirty: bool,
    pedalboards_user: Option<Vec<PedalboardSummary>>,
    pedalboards_both: Option<Vec<PedalboardSummary>>,
    /// Factory boards never change after first computation; this slot
    /// survives everything short of an explicit factory reset.
    pedalboards_factory: Option<Vec<PedalboardSummary>>,
    graphs: HashMap<String, PedalboardGraph>,
}

impl Cache {
    pub fn discover(&mut self, uri: &str) {
        self.entries.entry(uri.to_string()).or_default();
    }

    pub fn remove(&mut self, uri: &str) -> bool {
        self.entries.remove(uri).is_some()
    }

    pub fn mark_presets_dirty(&mut self, uri: &str) -> bool {
        match self.entries.get_mut(uri) {
            Some(entry) => {
                entry.presets_dirty = true;
                true
            }
            None => false,
        }
    }

    /// Force the next listing call to reallocate instead of reusing the
    /// amortized backing array.
    pub fn invalidate_listing(&mut self) {
        self.listing_dirty = true;
    }

    /// Amortization for the listing snapshots: same plugin count reuses the
    /// backing arrays, a changed count (or a forced invalidation)
    /// reallocates. Callers must not assume array identity across calls.
    pub(crate) fn prepare_snapshots(&mut self) {
        let count = self.entries.len();
        if self.listing_dirty || self.uri_snapshot.len() != count {
            self.uri_snapshot = Vec::with_capacity(count);
            self.mini_snapshot = Vec::with_capacity(count);
            self.listing_dirty = false;
        } else {
            self.uri_snapshot.clear();
            self.mini_snapshot.clear();
        }
    }

    pub(crate) fn uri_snapshot_mut(&mut self) -> &mut Vec<String> {
        &mut self.uri_snapshot
    }

    pub(crate) fn uri_snapshot(&self) -> &[String] {
        &self.uri_snapshot
    }

    pub(crate) fn mini_snapshot_mut(&mut self) -> &mut Vec<PluginRecordMini> {
        &mut self.mini_snapshot
    }

    pub(crate) fn mini_snapshot(&self) -> &[PluginRecordMini] {
        &self.mini_snapshot
    }

    pub(crate) fn pedalboards(&self, mode: PedalboardMode) -> Option<&Vec<PedalboardSummary>> {
        match mode {
            PedalboardMode::User => self.pedalboards_user.as_ref(),
            PedalboardMode::Factory => self.pedalboards_factory.as_ref(),
            PedalboardMode::Both => self.pedalboards_both.as_ref(),
        }
    }

    pub(crate) fn store_pedalboards(&mut self, mode: PedalboardMode, list: Vec<PedalboardSummary>) {
        match mode {
            PedalboardMode::User => self.pedalboards_user = Some(list),
            PedalboardMode::Factory => self.pedalboards_factory = Some(list),
            PedalboardMode::Both => self.pedalboards_both = Some(list),
        }
    }

    /// Drop the listing snapshot(s) for `mode`. The factory slot is only
    /// dropped by an explicit factory reset.
    pub fn reset_pedalboards(&mut self, mode: PedalboardMode) {
        debug!(?mode, "pedalboard cache reset");
        match mode {
            PedalboardMode::User | PedalboardMode::Both => {
                self.pedalboards_user = None;
                self.pedalboards_both = None;
            }
            PedalboardMode::Factory => {
                self.pedalboards_factory = None;
                self.pedalboards_both = None;
            }
        }
        self.graphs.clear();
    }

    /// The loaded-bundle set changed: user-facing pedalboard snapshots and
    /// cached graphs are stale, the factory slot is not.
    pub fn bundles_changed(&mut self) {
        self.pedalboards_user = None;
        self.pedalboards_both = None;
        self.graphs.clear();
    }

    pub(crate) fn graph(&self, bundle: &str) -> Option<&PedalboardGraph> {
        self.graphs.get(bundle)
    }

    pub(crate) fn store_graph(&mut self, bundle: String, graph: PedalboardGraph) {
        self.graphs.insert(bundle, graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str) -> PedalboardSummary {
        PedalboardSummary {
            uri: format!("file:///boards/{title}.pedalboard/"),
            bundle: format!("/boards/{title}.pedalboard/"),
            title: title.to_string(),
            version: 1,
            broken: false,
            factory: false,
            has_trial_plugins: false,
        }
    }

    #[test]
    fn user_reset_keeps_the_factory_slot() {
        let mut cache = Cache::default();
        cache.store_pedalboards(PedalboardMode::User, vec![summary("a")]);
        cache.store_pedalboards(PedalboardMode::Both, vec![summary("a")]);
        cache.store_pedalboards(PedalboardMode::Factory, vec![summary("f")]);

        cache.reset_pedalboards(PedalboardMode::User);
        assert!(cache.pedalboards(PedalboardMode::User).is_none());
        assert!(cache.pedalboards(PedalboardMode::Both).is_none());
        assert!(cache.pedalboards(PedalboardMode::Factory).is_some());

        cache.reset_pedalboards(PedalboardMode::Factory);
        assert!(cache.pedalboards(PedalboardMode::Factory).is_none());
    }

    #[test]
    fn bundle_changes_spare_the_factory_slot() {
        let mut cache = Cache::default();
        cache.store_pedalboards(PedalboardMode::Factory, vec![summary("f")]);
        cache.store_pedalboards(PedalboardMode::Both, vec![summary("f")]);
        cache.bundles_changed();
        assert!(cache.pedalboards(PedalboardMode::Factory).is_some());
        assert!(cache.pedalboards(PedalboardMode::Both).is_none());
    }

    #[test]
    fn presets_dirty_needs_a_known_uri() {
        let mut cache = Cache::default();
        assert!(!cache.mark_presets_dirty("urn:test:gain"));
        cache.discover("urn:test:gain");
        assert!(cache.mark_presets_dirty("urn:test:gain"));
    }

    #[test]
    fn blacklist_matches_exact_uris() {
        assert!(blacklisted("urn:juced:DrumSynth"));
        assert!(!blacklisted("urn:juced:DrumSynth2"));
    }
}
