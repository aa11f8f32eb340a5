use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error};

use crate::cache::{self, Cache};
use crate::config;
use crate::extract;
use crate::model::{
    InstancePortValue, Licensing, PedalboardGraph, PedalboardMode, PedalboardSummary,
    PluginEssentials, PluginGui, PluginGuiMini, PluginRecord, PluginRecordMini, Port,
    StatePortValue,
};
use crate::ns::Vocab;
use crate::pedalboard;
use crate::world::{World, normalized_bundle};

/// The metadata catalog: owns the long-lived plugin world and the cache of
/// extracted records. All state is explicit here; callers needing
/// concurrent access serialize around the whole object.
pub struct Catalog<W: World> {
    pub(crate) world: W,
    pub(crate) cache: Cache,
}

impl<W: World> Catalog<W> {
    /// Acquire the world handle and perform the initial full load. The one
    /// failure a consumer must treat as fatal at startup.
    pub fn init() -> Result<Self, String> {
        let world = W::open().map_err(|e| {
            error!(error = %e, "world handle unavailable");
            e
        })?;
        let mut catalog = Self {
            world,
            cache: Cache::default(),
        };
        catalog.world.load_all();
        catalog.discover_all();
        Ok(catalog)
    }

    fn discover_all(&mut self) {
        let vocab = Vocab::new();
        for subject in self.world.subjects_of_type(&vocab.lv2_plugin) {
            let Some(uri) = subject.as_uri() else {
                continue;
            };
            if cache::blacklisted(uri) {
                continue;
            }
            let is_pedalboard = self
                .world
                .values(&subject, &vocab.rdf_type)
                .iter()
                .any(|t| t.as_uri() == Some(vocab.modpedal_pedalboard.as_str()));
            if is_pedalboard {
                continue;
            }
            self.cache.discover(uri);
        }
    }

    /// Full record for one plugin, extracting on first access. A pending
    /// preset rescan refreshes only the `presets` field of an already-valid
    /// record; everything else keeps its allocations.
    pub fn plugin(&mut self, uri: &str) -> Option<&PluginRecord> {
        let entry = self.cache.entries.get_mut(uri)?;
        if entry.full.is_none() {
            let record = extract::plugin_record(&mut self.world, uri)?;
            // The mini map is filled from the same pass, but an existing
            // mini record is left alone rather than repopulated.
            if entry.mini.is_none() {
                entry.mini = Some(extract::mini_from_full(&record));
            }
            entry.presets_dirty = false;
            entry.full = Some(record);
        } else if entry.presets_dirty {
            if let Some(record) = entry.full.as_mut() {
                let main_bundle = record.bundles.first().cloned();
                let (presets, extra_bundles) =
                    extract::plugin_presets(&mut self.world, uri, main_bundle.as_deref());
                record.presets = presets;
                record.bundles.truncate(1);
                for bundle in extra_bundles {
                    if !record.bundles.contains(&bundle) {
                        record.bundles.push(bundle);
                    }
                }
            }
            entry.presets_dirty = false;
        }
        entry.full.as_ref()
    }

    /// Abbreviated record; derived from the full record when one exists,
    /// from a cheap triple scan otherwise.
    pub fn plugin_mini(&mut self, uri: &str) -> Option<&PluginRecordMini> {
        let entry = self.cache.entries.get_mut(uri)?;
        if entry.mini.is_none() {
            entry.mini = match entry.full.as_ref() {
                Some(full) => Some(extract::mini_from_full(full)),
                None => extract::plugin_record_mini(&self.world, uri),
            };
        }
        entry.mini.as_ref()
    }

    fn sorted_uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = self.cache.entries.keys().cloned().collect();
        uris.sort();
        uris
    }

    pub fn list_plugin_uris(&mut self) -> &[String] {
        let uris = self.sorted_uris();
        self.cache.prepare_snapshots();
        self.cache.uri_snapshot_mut().extend(uris);
        self.cache.uri_snapshot()
    }

    pub fn list_plugins_mini(&mut self) -> &[PluginRecordMini] {
        let uris = self.sorted_uris();
        let mut minis = Vec::with_capacity(uris.len());
        for uri in &uris {
            if let Some(mini) = self.plugin_mini(uri) {
                minis.push(mini.clone());
            }
        }
        self.cache.prepare_snapshots();
        self.cache.mini_snapshot_mut().extend(minis);
        self.cache.mini_snapshot()
    }

    pub fn list_plugins(&mut self) -> Vec<&PluginRecord> {
        let uris = self.sorted_uris();
        for uri in &uris {
            let _ = self.plugin(uri);
        }
        uris.iter()
            .filter_map(|uri| self.cache.entries.get(uri).and_then(|e| e.full.as_ref()))
            .collect()
    }

    pub fn plugin_gui(&mut self, uri: &str) -> Option<PluginGui> {
        let entry = self.cache.entries.get(uri)?;
        match entry.full.as_ref() {
            Some(full) => full.gui.clone(),
            None => extract::plugin_gui_view(&self.world, uri),
        }
    }

    pub fn plugin_gui_mini(&mut self, uri: &str) -> Option<PluginGuiMini> {
        let entry = self.cache.entries.get(uri)?;
        match entry.mini.as_ref() {
            Some(mini) => mini.gui.clone(),
            None => extract::plugin_gui_mini_view(&self.world, uri),
        }
    }

    pub fn plugin_control_inputs(&mut self, uri: &str) -> Option<Vec<Port>> {
        self.plugin(uri).map(|r| r.ports.control.input.clone())
    }

    /// The automatable surface only: control inputs, monitored outputs,
    /// parameters, and build metadata.
    pub fn plugin_essentials(&mut self, uri: &str) -> Option<PluginEssentials> {
        let record = self.plugin(uri)?;
        Some(PluginEssentials {
            control_inputs: record.ports.control.input.clone(),
            monitored_outputs: record
                .gui
                .as_ref()
                .map(|gui| gui.monitored_outputs.clone())
                .unwrap_or_default(),
            parameters: record.parameters.clone(),
            build_environment: record.build_environment.clone(),
            minor_version: record.minor_version,
            micro_version: record.micro_version,
            release: record.release,
            builder: record.builder,
        })
    }

    pub fn preset_exists(&self, plugin_uri: &str, preset_uri: &str) -> bool {
        extract::preset_exists(&self.world, plugin_uri, preset_uri)
    }

    /// Lazy invalidation of exactly one sub-field: the next full-record
    /// fetch re-extracts presets, nothing else.
    pub fn rescan_presets(&mut self, uri: &str) -> bool {
        self.cache.mark_presets_dirty(uri)
    }

    fn plugin_uri_sets(&mut self) -> (HashSet<String>, HashSet<String>) {
        let uris = self.sorted_uris();
        let mut trial = HashSet::new();
        for uri in &uris {
            if let Some(mini) = self.plugin_mini(uri)
                && mini.licensing == Licensing::Trial
            {
                trial.insert(uri.clone());
            }
        }
        (uris.into_iter().collect(), trial)
    }

    fn build_pedalboard_list(&mut self, mode: PedalboardMode) -> Vec<PedalboardSummary> {
        let (known, trial) = self.plugin_uri_sets();
        let mut list = Vec::new();
        if matches!(mode, PedalboardMode::User | PedalboardMode::Both) {
            list.extend(pedalboard::list_pedalboards_in::<W>(
                &config::user_pedalboards_dir(),
                &known,
                &trial,
            ));
        }
        if matches!(mode, PedalboardMode::Factory | PedalboardMode::Both) {
            list.extend(pedalboard::list_pedalboards_in::<W>(
                &config::factory_pedalboards_dir(),
                &known,
                &trial,
            ));
        }
        list
    }

    pub fn list_pedalboards(&mut self, mode: PedalboardMode) -> &[PedalboardSummary] {
        if self.cache.pedalboards(mode).is_none() {
            let list = self.build_pedalboard_list(mode);
            debug!(?mode, count = list.len(), "pedalboard list rebuilt");
            self.cache.store_pedalboards(mode, list);
        }
        self.cache
            .pedalboards(mode)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Pedalboards referencing a plugin URI absent from the world right
    /// now. Always computed fresh.
    pub fn broken_pedalboards(&mut self) -> Vec<PedalboardSummary> {
        self.build_pedalboard_list(PedalboardMode::Both)
            .into_iter()
            .filter(|summary| summary.broken)
            .collect()
    }

    pub fn pedalboard(&mut self, bundle: &Path) -> Option<&PedalboardGraph> {
        let bundle = normalized_bundle(bundle)?;
        if self.cache.graph(&bundle).is_none() {
            let graph = pedalboard::pedalboard_graph::<W>(&bundle)?;
            self.cache.store_graph(bundle.clone(), graph);
        }
        self.cache.graph(&bundle)
    }

    pub fn pedalboard_size(&self, bundle: &Path) -> Option<(u32, u32)> {
        let bundle = normalized_bundle(bundle)?;
        pedalboard::pedalboard_size::<W>(&bundle)
    }

    pub fn pedalboard_values(&self, bundle: &Path) -> Option<Vec<InstancePortValue>> {
        let bundle = normalized_bundle(bundle)?;
        pedalboard::pedalboard_values::<W>(&bundle)
    }

    pub fn reset_pedalboard_cache(&mut self, mode: PedalboardMode) {
        self.cache.reset_pedalboards(mode);
    }

    /// Port values of a saved-state document, loaded on demand.
    pub fn state_port_values(&mut self, state_uri: &str) -> Vec<StatePortValue> {
        extract::state_port_values(&mut self.world, state_uri)
    }

    /// Resolve a location identifier (URI or filesystem path) to an
    /// absolute local path.
    pub fn resolve_path(&self, location: &str) -> Option<String> {
        if location.contains("://") {
            return self.world.path_of(location).map(|p| p.display().to_string());
        }
        std::fs::canonicalize(location)
            .ok()
            .and_then(|p| p.to_str().map(str::to_string))
    }

    /// Known (non-blacklisted, non-pedalboard) plugin count; sizes the
    /// listing snapshots.
    pub fn plugin_count(&self) -> usize {
        self.cache.entries.len()
    }

    /// Release the world handle and every cached record.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl<W: World> std::fmt::Debug for Catalog<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("plugins", &self.cache.entries.len())
            .finish()
    }
}

// Dropping the catalog releases the world handle; scratch worlds used by
// pedalboard and bundle scans never outlive their operation.
