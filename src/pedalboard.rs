use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config;
use crate::model::{
    BlockPortValue, HardwareMidiPort, InstancePortValue, MidiCc, PedalboardBlock,
    PedalboardConnection, PedalboardGraph, PedalboardHardware, PedalboardSummary,
    PedalboardTimeInfo, TimePortInfo,
};
use crate::ns::Vocab;
use crate::world::{Term, World, normalized_bundle};

pub const BPB_MIN: f32 = 1.0;
pub const BPB_MAX: f32 = 16.0;
pub const BPM_MIN: f32 = 20.0;
pub const BPM_MAX: f32 = 280.0;

const SYM_BYPASS: &str = ":bypass";
const SYM_BPB: &str = ":bpb";
const SYM_BPM: &str = ":bpm";
const SYM_ROLLING: &str = ":rolling";

pub(crate) fn valid_bpb(value: f32) -> bool {
    (BPB_MIN..=BPB_MAX).contains(&value)
}

pub(crate) fn valid_bpm(value: f32) -> bool {
    (BPM_MIN..=BPM_MAX).contains(&value)
}

/// MIDI-CC binding attached to a port node. Out-of-range channel or
/// controller values count as no binding at all.
fn midi_cc_from<W: World>(world: &W, node: &Term, vocab: &Vocab) -> Option<MidiCc> {
    let binding = world.value(node, &vocab.midi_binding)?;
    let channel = world
        .value(&binding, &vocab.midi_channel)
        .and_then(|t| t.as_i64())?;
    let control = world
        .value(&binding, &vocab.midi_controller)
        .and_then(|t| t.as_i64())?;
    if !(0..=15).contains(&channel) || !(0..=254).contains(&control) {
        return None;
    }
    let minimum = world
        .value(&binding, &vocab.lv2_minimum)
        .and_then(|t| t.as_f32());
    let maximum = world
        .value(&binding, &vocab.lv2_maximum)
        .and_then(|t| t.as_f32());
    let range = match (minimum, maximum) {
        (Some(min), Some(max)) => Some((min, max)),
        _ => None,
    };
    Some(MidiCc {
        channel: channel as u8,
        control: control as u8,
        range,
    })
}

/// Strip the bundle path prefix from an identifier inside the bundle.
fn bundle_relative<W: World>(world: &W, bundle: &str, term: &Term) -> Option<String> {
    let uri = term.as_uri()?;
    let path = world.path_of(uri)?.display().to_string();
    Some(match path.strip_prefix(bundle) {
        Some(rel) => rel.to_string(),
        None => path,
    })
}

/// Connection endpoint form: `instance:symbol` for a block port, the bare
/// symbol for a hardware port.
fn endpoint<W: World>(world: &W, bundle: &str, term: &Term) -> Option<String> {
    let relative = bundle_relative(world, bundle, term)?;
    Some(match relative.rsplit_once('/') {
        Some((instance, symbol)) => format!("{instance}:{symbol}"),
        None => relative,
    })
}

fn port_symbol<W: World>(world: &W, port: &Term, vocab: &Vocab) -> String {
    if let Some(symbol) = world
        .value(port, &vocab.lv2_symbol)
        .and_then(|t| t.as_str().map(str::to_string))
    {
        return symbol;
    }
    port.as_uri()
        .and_then(|u| u.rsplit('/').next())
        .unwrap_or_default()
        .to_string()
}

/// Load `bundle` into a fresh scratch world and find its single pedalboard
/// entity. Zero or several entities, or an entity without the pedalboard
/// type marker, refuse the whole extraction.
fn load_single<W: World>(bundle: &str) -> Option<(W, Term, Vocab)> {
    let mut scratch = match W::open() {
        Ok(world) => world,
        Err(e) => {
            warn!(error = %e, "scratch world unavailable");
            return None;
        }
    };
    if !scratch.load_bundle(bundle) {
        return None;
    }
    let vocab = Vocab::new();
    let entities = scratch.subjects_of_type(&vocab.lv2_plugin);
    if entities.len() != 1 {
        debug!(bundle, count = entities.len(), "not exactly one entity in bundle");
        return None;
    }
    let entity = entities.into_iter().next()?;
    let is_pedalboard = scratch
        .values(&entity, &vocab.rdf_type)
        .iter()
        .any(|t| t.as_uri() == Some(vocab.modpedal_pedalboard.as_str()));
    if !is_pedalboard {
        return None;
    }
    Some((scratch, entity, vocab))
}

fn block_prototype<W: World>(world: &W, block: &Term, vocab: &Vocab) -> String {
    world
        .value(block, &vocab.lv2_prototype)
        .or_else(|| world.value(block, &vocab.ingen_prototype))
        .and_then(|t| t.as_uri().map(str::to_string))
        .unwrap_or_default()
}

fn extract_blocks<W: World>(world: &W, pb: &Term, bundle: &str, vocab: &Vocab) -> Vec<PedalboardBlock> {
    let nodes = world.values(pb, &vocab.ingen_block);
    let mut seen = HashSet::with_capacity(nodes.len());
    let mut blocks = Vec::with_capacity(nodes.len());

    for node in &nodes {
        let Some(instance) = bundle_relative(world, bundle, node) else {
            debug!(bundle, "skipping block without resolvable identifier");
            continue;
        };
        if !seen.insert(instance.clone()) {
            warn!(%instance, "duplicate block instance");
            continue;
        }

        let enabled = world
            .value(node, &vocab.ingen_enabled)
            .and_then(|t| t.as_bool())
            .unwrap_or(true);

        let mut bypass_cc = None;
        let port_nodes = world.values(node, &vocab.lv2_port);
        let mut ports = Vec::with_capacity(port_nodes.len());
        for port in &port_nodes {
            let symbol = port_symbol(world, port, vocab);
            if symbol == SYM_BYPASS {
                bypass_cc = midi_cc_from(world, port, vocab);
                continue;
            }
            ports.push(BlockPortValue {
                value: world
                    .value(port, &vocab.ingen_value)
                    .and_then(|t| t.as_f32())
                    .unwrap_or(0.0),
                midi_cc: midi_cc_from(world, port, vocab),
                symbol,
            });
        }

        blocks.push(PedalboardBlock {
            uri: block_prototype(world, node, vocab),
            bypassed: !enabled,
            bypass_cc,
            instance_number: world
                .value(node, &vocab.mod_instance_number)
                .and_then(|t| t.as_u32()),
            preset: world
                .value(node, &vocab.modpedal_preset)
                .and_then(|t| t.as_uri().map(str::to_string))
                .filter(|p| !p.is_empty()),
            x: world
                .value(node, &vocab.ingen_canvas_x)
                .and_then(|t| t.as_f32())
                .unwrap_or(0.0),
            y: world
                .value(node, &vocab.ingen_canvas_y)
                .and_then(|t| t.as_f32())
                .unwrap_or(0.0),
            instance,
            ports,
        })
    }
    blocks
}

struct HardwareScan {
    hardware: PedalboardHardware,
    timeinfo: PedalboardTimeInfo,
    hardware_symbols: HashSet<String>,
}

fn scan_hardware<W: World>(world: &W, pb: &Term, vocab: &Vocab) -> HardwareScan {
    let mut hardware = PedalboardHardware::default();
    let mut timeinfo = PedalboardTimeInfo::default();
    let mut hardware_symbols = HashSet::new();
    let mut separated = false;

    for port in world.values(pb, &vocab.lv2_port) {
        let symbol = port_symbol(world, &port, vocab);
        match symbol.as_str() {
            // Control-chain pseudo ports, never part of the graph.
            "control_in" | "control_out" => continue,
            "midi_separated_mode" | "midi_legacy_mode" => {
                separated = world
                    .value(&port, &vocab.ingen_value)
                    .and_then(|t| t.as_bool())
                    .unwrap_or(false);
                continue;
            }
            "midi_loopback" => {
                hardware.midi_loopback = world
                    .value(&port, &vocab.ingen_value)
                    .and_then(|t| t.as_bool())
                    .unwrap_or(false);
                continue;
            }
            SYM_BPB => {
                if let Some(value) = world
                    .value(&port, &vocab.ingen_value)
                    .and_then(|t| t.as_f32())
                    .filter(|v| valid_bpb(*v))
                {
                    timeinfo.bpb = TimePortInfo {
                        available: true,
                        value,
                        midi_cc: midi_cc_from(world, &port, vocab),
                    };
                }
                continue;
            }
            SYM_BPM => {
                if let Some(value) = world
                    .value(&port, &vocab.ingen_value)
                    .and_then(|t| t.as_f32())
                    .filter(|v| valid_bpm(*v))
                {
                    timeinfo.bpm = TimePortInfo {
                        available: true,
                        value,
                        midi_cc: midi_cc_from(world, &port, vocab),
                    };
                }
                continue;
            }
            SYM_ROLLING => {
                if let Some(value) = world
                    .value(&port, &vocab.ingen_value)
                    .and_then(|t| t.as_f32())
                {
                    timeinfo.rolling = TimePortInfo {
                        available: true,
                        value: if value != 0.0 { 1.0 } else { 0.0 },
                        midi_cc: midi_cc_from(world, &port, vocab),
                    };
                }
                continue;
            }
            "serial_midi_in" => {
                hardware.serial_midi_in = true;
                hardware_symbols.insert(symbol.clone());
                continue;
            }
            "serial_midi_out" => {
                hardware.serial_midi_out = true;
                hardware_symbols.insert(symbol.clone());
                continue;
            }
            _ => {}
        }

        let types: Vec<String> = world
            .values(&port, &vocab.rdf_type)
            .into_iter()
            .filter_map(|t| t.as_uri().map(str::to_string))
            .collect();
        let is_input = types.iter().any(|t| *t == vocab.lv2_input_port);
        let is_output = types.iter().any(|t| *t == vocab.lv2_output_port);
        if !is_input && !is_output {
            continue;
        }

        if types.iter().any(|t| *t == vocab.lv2_audio_port) {
            if is_input {
                hardware.audio_ins += 1;
            } else {
                hardware.audio_outs += 1;
            }
            hardware_symbols.insert(symbol);
        } else if types
            .iter()
            .any(|t| *t == vocab.lv2_cv_port || *t == vocab.mod_cv_port)
        {
            if is_input {
                hardware.cv_ins += 1;
            } else {
                hardware.cv_outs += 1;
            }
            hardware_symbols.insert(symbol);
        } else if types.iter().any(|t| *t == vocab.atom_port) {
            let midi_port = HardwareMidiPort {
                name: world
                    .value(&port, &vocab.lv2_name)
                    .and_then(|t| t.as_str().map(str::to_string))
                    .unwrap_or_else(|| symbol.clone()),
                symbol: symbol.clone(),
            };
            if is_input {
                hardware.midi_ins.push(midi_port);
            } else {
                hardware.midi_outs.push(midi_port);
            }
            hardware_symbols.insert(symbol);
        }
    }

    // Aggregated MIDI mode keeps a single merged output and broadcast input
    // pair instead of the per-device ports.
    hardware.midi_merger_out = !separated;
    hardware.midi_broadcaster_in = !separated;

    HardwareScan {
        hardware,
        timeinfo,
        hardware_symbols,
    }
}

fn extract_connections<W: World>(
    world: &W,
    pb: &Term,
    bundle: &str,
    vocab: &Vocab,
    block_instances: &HashSet<String>,
    hardware_symbols: &HashSet<String>,
) -> Vec<PedalboardConnection> {
    let arcs = world.values(pb, &vocab.ingen_arc);
    let mut connections = Vec::with_capacity(arcs.len());

    let resolves = |id: &str| match id.rsplit_once(':') {
        Some((instance, _)) => block_instances.contains(instance),
        None => hardware_symbols.contains(id),
    };

    for arc in arcs {
        let Some(tail) = world.value(&arc, &vocab.ingen_tail) else {
            continue;
        };
        let Some(head) = world.value(&arc, &vocab.ingen_head) else {
            continue;
        };
        let (Some(source), Some(target)) = (
            endpoint(world, bundle, &tail),
            endpoint(world, bundle, &head),
        ) else {
            continue;
        };
        if !resolves(&source) || !resolves(&target) {
            debug!(%source, %target, "dropping arc with unresolved endpoint");
            continue;
        }
        connections.push(PedalboardConnection { source, target });
    }
    connections
}

/// Full signal-flow graph of one pedalboard bundle, built from an isolated
/// short-lived world so board-local triples never touch the plugin world.
pub fn pedalboard_graph<W: World>(bundle: &str) -> Option<PedalboardGraph> {
    let (scratch, pb, vocab) = load_single::<W>(bundle)?;

    let blocks = extract_blocks(&scratch, &pb, bundle, &vocab);
    let scan = scan_hardware(&scratch, &pb, &vocab);
    let block_instances: HashSet<String> = blocks.iter().map(|b| b.instance.clone()).collect();
    let connections = extract_connections(
        &scratch,
        &pb,
        bundle,
        &vocab,
        &block_instances,
        &scan.hardware_symbols,
    );

    Some(PedalboardGraph {
        title: scratch
            .value(&pb, &vocab.doap_name)
            .and_then(|t| t.as_str().map(str::to_string))
            .unwrap_or_default(),
        width: scratch
            .value(&pb, &vocab.modpedal_width)
            .and_then(|t| t.as_u32())
            .unwrap_or(0),
        height: scratch
            .value(&pb, &vocab.modpedal_height)
            .and_then(|t| t.as_u32())
            .unwrap_or(0),
        factory: is_factory_bundle(bundle),
        version: scratch
            .value(&pb, &vocab.modpedal_version)
            .and_then(|t| t.as_u32())
            .unwrap_or(0),
        blocks,
        connections,
        hardware: scan.hardware,
        timeinfo: scan.timeinfo,
    })
}

pub(crate) fn is_factory_bundle(bundle: &str) -> bool {
    Path::new(bundle).starts_with(config::factory_pedalboards_dir())
}

/// Canvas size only, without building the graph.
pub fn pedalboard_size<W: World>(bundle: &str) -> Option<(u32, u32)> {
    let (scratch, pb, vocab) = load_single::<W>(bundle)?;
    let width = scratch
        .value(&pb, &vocab.modpedal_width)
        .and_then(|t| t.as_u32())
        .unwrap_or(0);
    let height = scratch
        .value(&pb, &vocab.modpedal_height)
        .and_then(|t| t.as_u32())
        .unwrap_or(0);
    Some((width, height))
}

/// State snapshot: every block port value plus a synthesized `:bypass` row
/// per block, without graph topology.
pub fn pedalboard_values<W: World>(bundle: &str) -> Option<Vec<InstancePortValue>> {
    let (scratch, pb, vocab) = load_single::<W>(bundle)?;
    let blocks = extract_blocks(&scratch, &pb, bundle, &vocab);

    let mut values = Vec::with_capacity(blocks.iter().map(|b| b.ports.len() + 1).sum());
    for block in blocks {
        values.push(InstancePortValue {
            instance: block.instance.clone(),
            symbol: SYM_BYPASS.to_string(),
            value: if block.bypassed { 1.0 } else { 0.0 },
        });
        for port in block.ports {
            values.push(InstancePortValue {
                instance: block.instance.clone(),
                symbol: port.symbol,
                value: port.value,
            });
        }
    }
    Some(values)
}

/// Summary for listing: no graph topology, but broken/trial flags computed
/// against the currently-known plugin set.
pub fn pedalboard_summary<W: World>(
    bundle: &str,
    known_plugins: &HashSet<String>,
    trial_plugins: &HashSet<String>,
) -> Option<PedalboardSummary> {
    let (scratch, pb, vocab) = load_single::<W>(bundle)?;

    let mut broken = false;
    let mut has_trial_plugins = false;
    for block in scratch.values(&pb, &vocab.ingen_block) {
        let prototype = block_prototype(&scratch, &block, &vocab);
        if prototype.is_empty() || !known_plugins.contains(&prototype) {
            broken = true;
        }
        if trial_plugins.contains(&prototype) {
            has_trial_plugins = true;
        }
    }

    Some(PedalboardSummary {
        uri: scratch
            .uri_of(Path::new(bundle))
            .unwrap_or_else(|| format!("file://{bundle}")),
        bundle: bundle.to_string(),
        title: scratch
            .value(&pb, &vocab.doap_name)
            .and_then(|t| t.as_str().map(str::to_string))
            .unwrap_or_default(),
        version: scratch
            .value(&pb, &vocab.modpedal_version)
            .and_then(|t| t.as_u32())
            .unwrap_or(0),
        broken,
        factory: is_factory_bundle(bundle),
        has_trial_plugins,
    })
}

/// Scan one directory for `*.pedalboard` bundles and summarize each.
pub fn list_pedalboards_in<W: World>(
    dir: &Path,
    known_plugins: &HashSet<String>,
    trial_plugins: &HashSet<String>,
) -> Vec<PedalboardSummary> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut bundles: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.extension().is_some_and(|ext| ext == "pedalboard"))
        .collect();
    bundles.sort();

    let mut summaries = Vec::with_capacity(bundles.len());
    for path in bundles {
        let Some(bundle) = normalized_bundle(&path) else {
            continue;
        };
        if let Some(summary) = pedalboard_summary::<W>(&bundle, known_plugins, trial_plugins) {
            summaries.push(summary);
        }
    }
    summaries
}
