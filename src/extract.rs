use std::cmp::Ordering;

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::config;
use crate::model::{
    Licensing, Parameter, ParameterRange, PluginAuthor, PluginGui, PluginGuiMini, PluginGuiPort,
    PluginPorts, PluginRecord, PluginRecordMini, Port, PortRanges, PortUnits, Preset, ScalePoint,
    Stability, StatePortValue,
};
use crate::ns::{self, Vocab};
use crate::world::{Term, World};

pub const BRAND_MAX: usize = 16;
pub const LABEL_MAX: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortKind {
    Audio,
    Control,
    Cv,
    Midi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortDirection {
    Input,
    Output,
}

fn text_of(term: Option<Term>) -> String {
    term.and_then(|t| t.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn uri_of(term: Option<Term>) -> String {
    term.and_then(|t| t.as_uri().map(str::to_string))
        .unwrap_or_default()
}

pub(crate) fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

pub(crate) fn stability(minor: u32, micro: u32) -> Stability {
    if minor == 0 {
        Stability::Experimental
    } else if minor % 2 != 0 || micro % 2 != 0 {
        Stability::Testing
    } else {
        Stability::Stable
    }
}

/// Hex SHA-1 of a plugin URI; the file name a paid-license key is stored
/// under in the keys directory.
pub fn sha1_hex(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Category resolution over the fixed tables. A house (vendor) match wins
/// and ends matching; otherwise the first type with a table entry wins.
pub(crate) fn category_for_types(type_uris: &[String]) -> Vec<String> {
    for uri in type_uris {
        if let Some(local) = uri.strip_prefix(ns::NS_MOD)
            && let Some((_, path)) = ns::HOUSE_CATEGORIES.iter().find(|(key, _)| *key == local)
        {
            return path.iter().map(|s| (*s).to_string()).collect();
        }
    }
    for uri in type_uris {
        if let Some(local) = uri.strip_prefix(ns::NS_LV2)
            && let Some((_, path)) = ns::LV2_CATEGORIES.iter().find(|(key, _)| *key == local)
        {
            return path.iter().map(|s| (*s).to_string()).collect();
        }
    }
    Vec::new()
}

fn type_uris<W: World>(world: &W, subject: &Term, vocab: &Vocab) -> Vec<String> {
    world
        .values(subject, &vocab.rdf_type)
        .into_iter()
        .filter_map(|t| t.as_uri().map(str::to_string))
        .collect()
}

fn classify_port<W: World>(
    world: &W,
    port: &Term,
    vocab: &Vocab,
    allow_regular_cv: bool,
) -> Option<(PortKind, PortDirection)> {
    let types = type_uris(world, port, vocab);

    let direction = if types.iter().any(|t| *t == vocab.lv2_input_port) {
        PortDirection::Input
    } else if types.iter().any(|t| *t == vocab.lv2_output_port) {
        PortDirection::Output
    } else {
        return None;
    };

    let kind = if types.iter().any(|t| *t == vocab.lv2_audio_port) {
        PortKind::Audio
    } else if types.iter().any(|t| *t == vocab.lv2_control_port) {
        PortKind::Control
    } else if types.iter().any(|t| *t == vocab.mod_cv_port)
        || (allow_regular_cv && types.iter().any(|t| *t == vocab.lv2_cv_port))
    {
        PortKind::Cv
    } else if types.iter().any(|t| *t == vocab.atom_port)
        && world
            .value(port, &vocab.atom_buffer_type)
            .is_some_and(|t| t.as_uri() == Some(vocab.atom_sequence.as_str()))
        && world
            .values(port, &vocab.atom_supports)
            .iter()
            .any(|t| t.as_uri() == Some(vocab.midi_event.as_str()))
    {
        PortKind::Midi
    } else {
        return None;
    };

    Some((kind, direction))
}

fn port_ranges<W: World>(world: &W, port: &Term, vocab: &Vocab, kind: PortKind) -> PortRanges {
    let (fallback_min, fallback_max) = match kind {
        PortKind::Control => (0.0_f32, 1.0_f32),
        PortKind::Cv => (-5.0, 5.0),
        _ => return PortRanges::default(),
    };

    let mut min = world
        .value(port, &vocab.lv2_minimum)
        .and_then(|t| t.as_f32())
        .unwrap_or(fallback_min);
    let mut max = world
        .value(port, &vocab.lv2_maximum)
        .and_then(|t| t.as_f32())
        .unwrap_or(fallback_max);
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }

    // Platform override term first, generic default second.
    let mut default = world
        .value(port, &vocab.mod_default)
        .or_else(|| world.value(port, &vocab.lv2_default))
        .and_then(|t| t.as_f32())
        .unwrap_or(min);

    let properties = world.values(port, &vocab.lv2_port_property);
    let has_property = |uri: &str| properties.iter().any(|t| t.as_uri() == Some(uri));
    if has_property(&vocab.mod_momentary_off) {
        default = min;
    } else if has_property(&vocab.mod_momentary_on) {
        default = max;
    }

    PortRanges::new(min, max, default.clamp(min, max))
}

fn port_units<W: World>(world: &W, port: &Term, vocab: &Vocab) -> Option<PortUnits> {
    let unit = world.value(port, &vocab.units_unit)?;
    if let Some(local) = unit.as_uri().and_then(|u| u.strip_prefix(ns::NS_UNITS))
        && let Some((_, (label, render, symbol))) =
            ns::KNOWN_UNITS.iter().find(|(key, _)| *key == local)
    {
        return Some(PortUnits {
            label: (*label).to_string(),
            render: (*render).to_string(),
            symbol: (*symbol).to_string(),
        });
    }

    let label = text_of(world.value(&unit, &vocab.rdfs_label));
    let render = text_of(world.value(&unit, &vocab.units_render));
    let symbol = text_of(world.value(&unit, &vocab.units_symbol));
    if label.is_empty() && render.is_empty() && symbol.is_empty() {
        None
    } else {
        Some(PortUnits {
            label,
            render,
            symbol,
        })
    }
}

fn scale_points<W: World>(world: &W, port: &Term, vocab: &Vocab) -> Vec<ScalePoint> {
    let mut points: Vec<ScalePoint> = world
        .values(port, &vocab.lv2_scale_point)
        .iter()
        .filter_map(|sp| {
            let label = world
                .value(sp, &vocab.rdfs_label)
                .and_then(|t| t.as_str().map(str::to_string))?;
            let value = world.value(sp, &vocab.rdf_value).and_then(|t| t.as_f32())?;
            Some(ScalePoint { value, label })
        })
        .collect();
    points.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    points
}

fn port_from_node<W: World>(
    world: &W,
    port: &Term,
    vocab: &Vocab,
    kind: PortKind,
    ordinal: u32,
) -> Port {
    let symbol = text_of(world.value(port, &vocab.lv2_symbol));
    let name = world
        .value(port, &vocab.lv2_name)
        .and_then(|t| t.as_str().map(str::to_string))
        .unwrap_or_else(|| symbol.clone());

    let known = ns::known_port_properties();
    let properties: Vec<String> = world
        .values(port, &vocab.lv2_port_property)
        .iter()
        .filter_map(|t| {
            let uri = t.as_uri()?;
            known
                .iter()
                .find(|(full, _)| full == uri)
                .map(|(_, short)| (*short).to_string())
        })
        .collect();

    Port {
        index: world
            .value(port, &vocab.lv2_index)
            .and_then(|t| t.as_u32())
            .unwrap_or(ordinal),
        symbol,
        name,
        comment: text_of(world.value(port, &vocab.rdfs_comment)),
        designation: uri_of(world.value(port, &vocab.lv2_designation)),
        properties,
        range_steps: world
            .value(port, &vocab.mod_range_steps)
            .and_then(|t| t.as_u32()),
        ranges: port_ranges(world, port, vocab, kind),
        units: port_units(world, port, vocab),
        scale_points: scale_points(world, port, vocab),
    }
}

/// Two-pass port extraction: classify and count first, then fill tables
/// pre-sized to the counts, ordered by original port index. Unclassifiable
/// ports are dropped here; mini extraction rejects the plugin instead.
fn extract_ports<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> PluginPorts {
    let allow_cv = config::allow_regular_cv();
    let nodes = world.values(plugin, &vocab.lv2_port);

    let mut counts = [[0usize; 2]; 4];
    let mut classified = Vec::with_capacity(nodes.len());
    for (ordinal, node) in nodes.iter().enumerate() {
        let Some((kind, direction)) = classify_port(world, node, vocab, allow_cv) else {
            debug!(ordinal, "dropping port with unrecognized type or direction");
            continue;
        };
        counts[kind as usize][direction as usize] += 1;
        classified.push((node, kind, direction, ordinal as u32));
    }

    let mut ports = PluginPorts::default();
    ports.audio.input = Vec::with_capacity(counts[PortKind::Audio as usize][0]);
    ports.audio.output = Vec::with_capacity(counts[PortKind::Audio as usize][1]);
    ports.control.input = Vec::with_capacity(counts[PortKind::Control as usize][0]);
    ports.control.output = Vec::with_capacity(counts[PortKind::Control as usize][1]);
    ports.cv.input = Vec::with_capacity(counts[PortKind::Cv as usize][0]);
    ports.cv.output = Vec::with_capacity(counts[PortKind::Cv as usize][1]);
    ports.midi.input = Vec::with_capacity(counts[PortKind::Midi as usize][0]);
    ports.midi.output = Vec::with_capacity(counts[PortKind::Midi as usize][1]);

    let mut filled: Vec<(Port, PortKind, PortDirection)> = classified
        .into_iter()
        .map(|(node, kind, direction, ordinal)| {
            (port_from_node(world, node, vocab, kind, ordinal), kind, direction)
        })
        .collect();
    filled.sort_by_key(|(port, _, _)| port.index);

    for (port, kind, direction) in filled {
        let table = match kind {
            PortKind::Audio => &mut ports.audio,
            PortKind::Control => &mut ports.control,
            PortKind::Cv => &mut ports.cv,
            PortKind::Midi => &mut ports.midi,
        };
        match direction {
            PortDirection::Input => table.input.push(port),
            PortDirection::Output => table.output.push(port),
        }
    }
    ports
}

fn licensing<W: World>(world: &W, plugin: &Term, uri: &str, vocab: &Vocab) -> Licensing {
    let has_interface = world
        .values(plugin, &vocab.lv2_extension_data)
        .iter()
        .any(|t| t.as_uri() == Some(vocab.modlicense_interface.as_str()));
    if !has_interface {
        return Licensing::NonCommercial;
    }
    let Some(keys) = config::keys_path() else {
        return Licensing::Trial;
    };
    if keys.join(sha1_hex(uri)).is_file() {
        Licensing::Paid
    } else {
        Licensing::Trial
    }
}

fn author<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> PluginAuthor {
    let Some(maintainer) = world.value(plugin, &vocab.doap_maintainer) else {
        return PluginAuthor::default();
    };
    let email = text_of(world.value(&maintainer, &vocab.foaf_mbox));
    PluginAuthor {
        name: text_of(world.value(&maintainer, &vocab.foaf_name)),
        homepage: text_of(world.value(&maintainer, &vocab.foaf_homepage)),
        email: email.strip_prefix("mailto:").unwrap_or(&email).to_string(),
    }
}

/// Pick the winning GUI descriptor: a resource directory under the home
/// directory ends the scan immediately, otherwise the last one that
/// resolves wins.
fn select_gui<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> Option<(Term, String)> {
    let home = config::home_dir();
    let mut chosen = None;
    for gui in world.values(plugin, &vocab.modgui_gui) {
        let Some(resdir) = world.value(&gui, &vocab.modgui_resources_directory) else {
            continue;
        };
        let Some(path) = resolve_file(world, &resdir) else {
            continue;
        };
        let under_home = home
            .as_deref()
            .is_some_and(|h| std::path::Path::new(&path).starts_with(h));
        chosen = Some((gui, path));
        if under_home {
            break;
        }
    }
    chosen
}

/// URI terms resolve through the world; literal terms are taken verbatim.
fn resolve_file<W: World>(world: &W, term: &Term) -> Option<String> {
    match term {
        Term::Uri(u) => world.path_of(u).map(|p| p.display().to_string()),
        Term::Literal(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn gui_file<W: World>(world: &W, gui: &Term, predicate: &str) -> String {
    world
        .value(gui, predicate)
        .and_then(|t| resolve_file(world, &t))
        .unwrap_or_default()
}

fn plugin_gui<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> Option<PluginGui> {
    let (gui, resources_directory) = select_gui(world, plugin, vocab)?;

    let mut gui_ports: Vec<PluginGuiPort> = world
        .values(&gui, &vocab.modgui_port)
        .iter()
        .enumerate()
        .map(|(ordinal, port)| {
            let symbol = text_of(world.value(port, &vocab.lv2_symbol));
            PluginGuiPort {
                index: world
                    .value(port, &vocab.lv2_index)
                    .and_then(|t| t.as_u32())
                    .unwrap_or(ordinal as u32),
                name: world
                    .value(port, &vocab.lv2_name)
                    .and_then(|t| t.as_str().map(str::to_string))
                    .unwrap_or_else(|| symbol.clone()),
                symbol,
            }
        })
        .collect();
    gui_ports.sort_by_key(|p| p.index);

    let monitored_outputs = world
        .values(&gui, &vocab.modgui_monitored_outputs)
        .iter()
        .filter_map(|t| match t {
            Term::Literal(s) => Some(s.clone()),
            node => world
                .value(node, &vocab.lv2_symbol)
                .and_then(|s| s.as_str().map(str::to_string)),
        })
        .collect();

    Some(PluginGui {
        resources_directory,
        icon_template: gui_file(world, &gui, &vocab.modgui_icon_template),
        settings_template: gui_file(world, &gui, &vocab.modgui_settings_template),
        javascript: gui_file(world, &gui, &vocab.modgui_javascript),
        stylesheet: gui_file(world, &gui, &vocab.modgui_stylesheet),
        screenshot: gui_file(world, &gui, &vocab.modgui_screenshot),
        thumbnail: gui_file(world, &gui, &vocab.modgui_thumbnail),
        documentation: gui_file(world, &gui, &vocab.modgui_documentation),
        brand: text_of(world.value(&gui, &vocab.modgui_brand)),
        label: text_of(world.value(&gui, &vocab.modgui_label)),
        model: text_of(world.value(&gui, &vocab.modgui_model)),
        panel: text_of(world.value(&gui, &vocab.modgui_panel)),
        color: text_of(world.value(&gui, &vocab.modgui_color)),
        knob: text_of(world.value(&gui, &vocab.modgui_knob)),
        ports: gui_ports,
        monitored_outputs,
    })
}

fn plugin_gui_mini<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> Option<PluginGuiMini> {
    let (gui, resources_directory) = select_gui(world, plugin, vocab)?;
    Some(PluginGuiMini {
        resources_directory,
        screenshot: gui_file(world, &gui, &vocab.modgui_screenshot),
        thumbnail: gui_file(world, &gui, &vocab.modgui_thumbnail),
    })
}

struct VersionInfo {
    minor: u32,
    micro: u32,
    release: u32,
    builder: u32,
    build_environment: String,
}

fn version_info<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> VersionInfo {
    let minor = world
        .value(plugin, &vocab.lv2_minor_version)
        .and_then(|t| t.as_u32())
        .unwrap_or(0);
    let micro = world
        .value(plugin, &vocab.lv2_micro_version)
        .and_then(|t| t.as_u32())
        .unwrap_or(0);
    let release_node = world.value(plugin, &vocab.mod_release_number);
    let builder_node = world.value(plugin, &vocab.mod_builder_version);
    let build_environment = world
        .value(plugin, &vocab.mod_build_environment)
        .and_then(|t| t.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if release_node.is_some() && builder_node.is_some() {
                "prod".to_string()
            } else {
                String::new()
            }
        });
    VersionInfo {
        minor,
        micro,
        release: release_node.and_then(|t| t.as_u32()).unwrap_or(0),
        builder: builder_node.and_then(|t| t.as_u32()).unwrap_or(0),
        build_environment,
    }
}

fn parameter_range<W: World>(
    world: &W,
    plugin: &Term,
    param: &Term,
    param_uri: &str,
    vocab: &Vocab,
) -> ParameterRange {
    let range_type = uri_of(world.value(param, &vocab.rdfs_range));
    if range_type == vocab.atom_float || range_type == vocab.atom_double {
        let min = world
            .value(param, &vocab.lv2_minimum)
            .and_then(|t| t.as_f32())
            .unwrap_or(0.0);
        let max = world
            .value(param, &vocab.lv2_maximum)
            .and_then(|t| t.as_f32())
            .unwrap_or(1.0);
        let default = world
            .value(param, &vocab.lv2_default)
            .and_then(|t| t.as_f32())
            .unwrap_or(min);
        ParameterRange::Float { min, max, default }
    } else if range_type == vocab.atom_int || range_type == vocab.atom_long {
        let min = world
            .value(param, &vocab.lv2_minimum)
            .and_then(|t| t.as_i64())
            .unwrap_or(0);
        let max = world
            .value(param, &vocab.lv2_maximum)
            .and_then(|t| t.as_i64())
            .unwrap_or(1);
        let default = world
            .value(param, &vocab.lv2_default)
            .and_then(|t| t.as_i64())
            .unwrap_or(min);
        ParameterRange::Long { min, max, default }
    } else {
        // Path, URI, and plain strings: a previously-saved state document
        // supplies the default when one is attached to the plugin.
        let default = world
            .value(plugin, &vocab.state_state)
            .and_then(|state| world.value(&state, param_uri))
            .or_else(|| world.value(param, &vocab.lv2_default))
            .and_then(|t| t.as_str().map(str::to_string))
            .unwrap_or_default();
        ParameterRange::String { default }
    }
}

/// Host-controllable parameters, merged from readable and writable
/// declarations keyed by parameter URI.
fn plugin_parameters<W: World>(world: &W, plugin: &Term, vocab: &Vocab) -> Vec<Parameter> {
    let mut order: Vec<(String, bool, bool)> = Vec::new();
    let mut note = |term: &Term, readable: bool| {
        let Some(uri) = term.as_uri() else { return };
        match order.iter_mut().find(|(u, _, _)| u == uri) {
            Some(entry) => {
                entry.1 |= readable;
                entry.2 |= !readable;
            }
            None => order.push((uri.to_string(), readable, !readable)),
        }
    };
    for term in world.values(plugin, &vocab.patch_writable) {
        note(&term, false);
    }
    for term in world.values(plugin, &vocab.patch_readable) {
        note(&term, true);
    }

    order
        .into_iter()
        .map(|(uri, readable, writable)| {
            let param = Term::uri(&uri);
            let label = world
                .value(&param, &vocab.rdfs_label)
                .and_then(|t| t.as_str().map(str::to_string))
                .unwrap_or_else(|| uri.rsplit(['#', '/']).next().unwrap_or(&uri).to_string());
            Parameter {
                range: parameter_range(world, plugin, &param, &uri, vocab),
                uri,
                label,
                readable,
                writable,
            }
        })
        .collect()
}

/// Presets applying to `uri`, plus the extra bundles contributing them.
/// Candidates without a label are loaded as resources once; still unlabeled
/// candidates are skipped. Presets sharing a bundle keep `path` only on the
/// representative. Ordering of equal URI keys is unspecified.
pub fn plugin_presets<W: World>(
    world: &mut W,
    uri: &str,
    main_bundle: Option<&str>,
) -> (Vec<Preset>, Vec<String>) {
    let vocab = Vocab::new();
    let subject = Term::uri(uri);
    let candidates = world.subjects_with(&vocab.lv2_applies_to, &subject);

    let mut presets = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let Some(preset_uri) = candidate.as_uri().map(str::to_string) else {
            continue;
        };
        let mut label = world
            .value(&candidate, &vocab.rdfs_label)
            .and_then(|t| t.as_str().map(str::to_string));
        if label.is_none() {
            world.load_resource(&preset_uri);
            label = world
                .value(&candidate, &vocab.rdfs_label)
                .and_then(|t| t.as_str().map(str::to_string));
        }
        let Some(label) = label else {
            debug!(preset = %preset_uri, "skipping unlabeled preset");
            continue;
        };
        let types = type_uris(world, &candidate, &vocab);
        if !types.is_empty() && !types.iter().any(|t| *t == vocab.pset_preset) {
            continue;
        }

        let mut path = world
            .path_of(&preset_uri)
            .and_then(|p| p.parent().map(|d| format!("{}/", d.display())))
            .unwrap_or_default();
        if main_bundle == Some(path.as_str()) {
            path.clear();
        }
        presets.push(Preset {
            uri: preset_uri,
            label,
            path,
        });
    }

    presets.sort_unstable_by(|a, b| a.uri.cmp(&b.uri));

    let mut extra_bundles: Vec<String> = Vec::new();
    for preset in &mut presets {
        if preset.path.is_empty() {
            continue;
        }
        if extra_bundles.contains(&preset.path) {
            preset.path.clear();
        } else {
            extra_bundles.push(preset.path.clone());
        }
    }
    (presets, extra_bundles)
}

pub fn preset_exists<W: World>(world: &W, plugin_uri: &str, preset_uri: &str) -> bool {
    let vocab = Vocab::new();
    world
        .subjects_with(&vocab.lv2_applies_to, &Term::uri(plugin_uri))
        .iter()
        .any(|t| t.as_uri() == Some(preset_uri))
}

/// Port values of a saved-state document, as a flat symbol/value list. The
/// document is loaded as a resource on demand.
pub fn state_port_values<W: World>(world: &mut W, state_uri: &str) -> Vec<StatePortValue> {
    world.load_resource(state_uri);
    let vocab = Vocab::new();
    let subject = Term::uri(state_uri);
    world
        .values(&subject, &vocab.lv2_port)
        .iter()
        .filter_map(|port| {
            let symbol = world
                .value(port, &vocab.lv2_symbol)
                .and_then(|t| t.as_str().map(str::to_string))?;
            let value = world.value(port, &vocab.pset_value).and_then(|t| t.as_f32())?;
            Some(StatePortValue { symbol, value })
        })
        .collect()
}

/// Cheap scan producing the abbreviated record. Refuses pedalboard-typed
/// entities and plugins with any unclassifiable port.
pub fn plugin_record_mini<W: World>(world: &W, uri: &str) -> Option<PluginRecordMini> {
    let vocab = Vocab::new();
    let subject = Term::uri(uri);

    let types = type_uris(world, &subject, &vocab);
    if types.is_empty() {
        return None;
    }
    if types.iter().any(|t| *t == vocab.modpedal_pedalboard) {
        return None;
    }

    let allow_cv = config::allow_regular_cv();
    for port in world.values(&subject, &vocab.lv2_port) {
        classify_port(world, &port, &vocab, allow_cv)?;
    }

    let name = text_of(world.value(&subject, &vocab.doap_name));
    let author = author(world, &subject, &vocab);
    let brand = text_of(world.value(&subject, &vocab.mod_brand));
    let brand = clip(if brand.is_empty() { &author.name } else { &brand }, BRAND_MAX);
    let label = text_of(world.value(&subject, &vocab.mod_label));
    let label = clip(if label.is_empty() { &name } else { &label }, LABEL_MAX);
    let version = version_info(world, &subject, &vocab);

    Some(PluginRecordMini {
        licensing: licensing(world, &subject, uri, &vocab),
        gui: plugin_gui_mini(world, &subject, &vocab),
        category: category_for_types(&types),
        minor_version: version.minor,
        micro_version: version.micro,
        release: version.release,
        builder: version.builder,
        uri: uri.to_string(),
        name,
        brand,
        label,
    })
}

/// Full extraction of one plugin entity into a ready-to-serialize record.
pub fn plugin_record<W: World>(world: &mut W, uri: &str) -> Option<PluginRecord> {
    let vocab = Vocab::new();
    let subject = Term::uri(uri);

    let types = type_uris(world, &subject, &vocab);
    if types.is_empty() {
        return None;
    }
    if types.iter().any(|t| *t == vocab.modpedal_pedalboard) {
        return None;
    }

    let name = text_of(world.value(&subject, &vocab.doap_name));
    let binary = world
        .value(&subject, &vocab.lv2_binary)
        .and_then(|t| resolve_file(world, &t))
        .unwrap_or_default();
    let license = world
        .value(&subject, &vocab.doap_license)
        .or_else(|| {
            world
                .value(&subject, &vocab.lv2_project)
                .and_then(|project| world.value(&project, &vocab.doap_license))
        })
        .and_then(|t| t.as_str().map(str::to_string))
        .unwrap_or_default();

    let author = author(world, &subject, &vocab);
    let brand = text_of(world.value(&subject, &vocab.mod_brand));
    let brand = clip(if brand.is_empty() { &author.name } else { &brand }, BRAND_MAX);
    let label = text_of(world.value(&subject, &vocab.mod_label));
    let label = clip(if label.is_empty() { &name } else { &label }, LABEL_MAX);

    let version = version_info(world, &subject, &vocab);
    let gui = plugin_gui(world, &subject, &vocab);
    let ports = extract_ports(world, &subject, &vocab);
    let parameters = plugin_parameters(world, &subject, &vocab);

    let main_bundle = world.bundle_of(&subject);
    let (presets, preset_bundles) = plugin_presets(world, uri, main_bundle.as_deref());
    let mut bundles = Vec::with_capacity(1 + preset_bundles.len());
    if let Some(main) = main_bundle {
        bundles.push(main);
    }
    for bundle in preset_bundles {
        if !bundles.contains(&bundle) {
            bundles.push(bundle);
        }
    }

    Some(PluginRecord {
        uri: uri.to_string(),
        comment: text_of(world.value(&subject, &vocab.rdfs_comment)),
        category: category_for_types(&types),
        stability: stability(version.minor, version.micro),
        minor_version: version.minor,
        micro_version: version.micro,
        release: version.release,
        builder: version.builder,
        build_environment: version.build_environment,
        licensing: licensing(world, &subject, uri, &vocab),
        name,
        binary,
        brand,
        label,
        license,
        author,
        bundles,
        gui,
        ports,
        parameters,
        presets,
    })
}

/// GUI-only view, without touching the rest of the record.
pub fn plugin_gui_view<W: World>(world: &W, uri: &str) -> Option<PluginGui> {
    let vocab = Vocab::new();
    plugin_gui(world, &Term::uri(uri), &vocab)
}

pub fn plugin_gui_mini_view<W: World>(world: &W, uri: &str) -> Option<PluginGuiMini> {
    let vocab = Vocab::new();
    plugin_gui_mini(world, &Term::uri(uri), &vocab)
}

/// The abbreviated record derived from an already-computed full record; a
/// full extraction pass populates both maps through this.
pub fn mini_from_full(full: &PluginRecord) -> PluginRecordMini {
    PluginRecordMini {
        uri: full.uri.clone(),
        name: full.name.clone(),
        brand: full.brand.clone(),
        label: full.label.clone(),
        category: full.category.clone(),
        minor_version: full.minor_version,
        micro_version: full.micro_version,
        release: full.release,
        builder: full.builder,
        licensing: full.licensing,
        gui: full.gui.as_ref().map(|gui| PluginGuiMini {
            resources_directory: gui.resources_directory.clone(),
            screenshot: gui.screenshot.clone(),
            thumbnail: gui.thumbnail.clone(),
        }),
    }
}
