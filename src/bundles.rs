use std::path::Path;

use tracing::{debug, warn};

use crate::cache;
use crate::catalog::Catalog;
use crate::ns::Vocab;
use crate::world::{Term, World, normalized_bundle};

/// Enumerate the plugin URIs one bundle contributes, using an isolated
/// scratch world so the long-lived world sees nothing from the scan.
fn scan_bundle<W: World>(bundle: &str) -> Vec<String> {
    let mut scratch = match W::open() {
        Ok(world) => world,
        Err(e) => {
            warn!(error = %e, "scratch world unavailable");
            return Vec::new();
        }
    };
    if !scratch.load_bundle(bundle) {
        return Vec::new();
    }
    let vocab = Vocab::new();
    let mut uris: Vec<String> = scratch
        .subjects_of_type(&vocab.lv2_plugin)
        .iter()
        .filter_map(|subject| {
            let uri = subject.as_uri()?;
            if cache::blacklisted(uri) {
                return None;
            }
            let is_pedalboard = scratch
                .values(subject, &vocab.rdf_type)
                .iter()
                .any(|t| t.as_uri() == Some(vocab.modpedal_pedalboard.as_str()));
            if is_pedalboard {
                return None;
            }
            Some(uri.to_string())
        })
        .collect();
    uris.sort();
    uris
}

impl<W: World> Catalog<W> {
    pub fn is_bundle_loaded(&self, path: &Path) -> bool {
        normalized_bundle(path)
            .map(|bundle| self.world.is_bundle_loaded(&bundle))
            .unwrap_or(false)
    }

    /// Plugin URIs contained in one bundle, loaded or not.
    pub fn plugins_in_bundle(&self, path: &Path) -> Vec<String> {
        match normalized_bundle(path) {
            Some(bundle) => scan_bundle::<W>(&bundle),
            None => Vec::new(),
        }
    }

    /// Load one bundle and return the plugin URIs it introduced. A no-op
    /// (empty result) when the normalized path is already loaded.
    pub fn add_bundle(&mut self, path: &Path) -> Vec<String> {
        let Some(bundle) = normalized_bundle(path) else {
            return Vec::new();
        };
        if self.world.is_bundle_loaded(&bundle) {
            debug!(%bundle, "bundle already loaded");
            return Vec::new();
        }
        if !self.world.load_bundle(&bundle) {
            warn!(%bundle, "bundle failed to load");
            return Vec::new();
        }

        let added = scan_bundle::<W>(&bundle);
        for uri in &added {
            self.cache.discover(uri);
        }
        if !added.is_empty() {
            debug!(%bundle, count = added.len(), "plugins discovered");
        }
        self.cache.bundles_changed();
        added
    }

    /// Unload one bundle (optionally one resource document first) and drop
    /// every cached plugin originating from it. Returns the removed URIs
    /// and forces the next listing call to rebuild its backing array.
    pub fn remove_bundle(&mut self, path: &Path, resource: Option<&str>) -> Vec<String> {
        let Some(bundle) = normalized_bundle(path) else {
            return Vec::new();
        };
        if !self.world.is_bundle_loaded(&bundle) {
            debug!(%bundle, "bundle not loaded");
            return Vec::new();
        }
        if let Some(uri) = resource {
            self.world.unload_resource(uri);
        }

        let mut removed: Vec<String> = self
            .cache
            .entries
            .iter()
            .filter(|(uri, entry)| {
                let owner = self
                    .world
                    .bundle_of(&Term::uri(uri.as_str()))
                    .or_else(|| {
                        entry
                            .full
                            .as_ref()
                            .and_then(|record| record.bundles.first().cloned())
                    });
                owner.as_deref() == Some(bundle.as_str())
            })
            .map(|(uri, _)| uri.clone())
            .collect();
        removed.sort();

        self.world.unload_bundle(&bundle);
        for uri in &removed {
            self.cache.remove(uri);
        }
        self.cache.invalidate_listing();
        self.cache.bundles_changed();
        removed
    }
}
