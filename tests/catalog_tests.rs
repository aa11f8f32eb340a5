mod common;

use std::path::Path;

use common::{MemWorld, gain_plugin, lit, make_bundle_dir, register_bundle, t, uri};
use pedalier::Catalog;
use pedalier::extract::sha1_hex;
use pedalier::model::{Licensing, Stability};
use pedalier::ns::Vocab;
use pedalier::world::Term;

const GAIN_URI: &str = "urn:test:gain";

fn catalog_with_gain(root: &Path) -> (Catalog<MemWorld>, String) {
    common::init_logging();
    let bundle = make_bundle_dir(root, "gain.lv2");
    register_bundle(&bundle, gain_plugin(&bundle, GAIN_URI));
    let catalog = Catalog::<MemWorld>::init().unwrap();
    (catalog, bundle)
}

#[test]
fn gain_plugin_extracts_expected_records() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, bundle) = catalog_with_gain(root.path());

    let mini = catalog.plugin_mini(GAIN_URI).unwrap();
    assert_eq!(mini.name, "Gain");
    assert!(mini.category.is_empty());
    assert_eq!(mini.label, "Gain");

    let record = catalog.plugin(GAIN_URI).unwrap();
    assert_eq!(record.name, "Gain");
    assert_eq!(record.license, "GPL-2.0-or-later");
    assert_eq!(record.binary, format!("{bundle}gain.so"));
    assert_eq!(record.stability, Stability::Stable);
    assert_eq!(record.licensing, Licensing::NonCommercial);
    assert_eq!(record.bundles, vec![bundle]);

    assert_eq!(record.ports.audio.input.len(), 1);
    assert_eq!(record.ports.audio.output.len(), 1);
    assert_eq!(record.ports.control.input.len(), 1);
    assert!(record.ports.control.output.is_empty());

    let gain = &record.ports.control.input[0];
    assert_eq!(gain.symbol, "gain");
    assert_eq!(gain.index, 2);
    assert_eq!(gain.ranges.min, 0.0);
    assert_eq!(gain.ranges.max, 1.0);
    assert_eq!(gain.ranges.default, 0.5);
}

#[test]
fn repeated_reads_reuse_the_extracted_record() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, _bundle) = catalog_with_gain(root.path());

    let first_name = catalog.plugin(GAIN_URI).unwrap().name.as_ptr();
    for _ in 0..4 {
        let again = catalog.plugin(GAIN_URI).unwrap().name.as_ptr();
        assert_eq!(again, first_name, "record was re-extracted");
    }

    // A full extraction populates the mini map in the same pass.
    let mini = catalog.plugin_mini(GAIN_URI).unwrap();
    assert_eq!(mini.name, "Gain");
}

#[test]
fn unknown_and_blacklisted_uris_are_absent() {
    let root = tempfile::tempdir().unwrap();
    let blacklisted = "urn:juced:DrumSynth";
    let bundle = make_bundle_dir(root.path(), "mixed.lv2");
    let mut triples = gain_plugin(&bundle, GAIN_URI);
    let v = Vocab::new();
    let bad = uri(blacklisted);
    triples.push(t(&bad, &v.rdf_type, uri(&v.lv2_plugin)));
    triples.push(t(&bad, &v.doap_name, lit("Broken")));
    register_bundle(&bundle, triples);

    let mut catalog = Catalog::<MemWorld>::init().unwrap();
    assert!(catalog.plugin("urn:test:absent").is_none());
    assert_eq!(catalog.list_plugin_uris(), &[GAIN_URI.to_string()]);
}

#[test]
fn unclassifiable_ports_exclude_only_that_plugin_from_mini_listing() {
    let root = tempfile::tempdir().unwrap();
    let bundle = make_bundle_dir(root.path(), "mixed.lv2");
    let weird_uri = "urn:test:weird";
    let v = Vocab::new();
    let weird = uri(weird_uri);
    let weird_port = common::blank("weird_port");

    let mut triples = gain_plugin(&bundle, GAIN_URI);
    triples.push(t(&weird, &v.rdf_type, uri(&v.lv2_plugin)));
    triples.push(t(&weird, &v.doap_name, lit("Weird")));
    triples.push(t(&weird, &v.lv2_port, weird_port.clone()));
    triples.push(t(&weird_port, &v.lv2_symbol, lit("mystery")));
    register_bundle(&bundle, triples);

    let mut catalog = Catalog::<MemWorld>::init().unwrap();
    let minis = catalog.list_plugins_mini();
    assert_eq!(minis.len(), 1);
    assert_eq!(minis[0].uri, GAIN_URI);

    // Both URIs stay known; only the mini listing filters the reject.
    assert_eq!(catalog.list_plugin_uris().len(), 2);
    assert!(catalog.plugin(weird_uri).is_some());
}

#[test]
fn preset_rescan_rebuilds_only_the_presets_field() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, _bundle) = catalog_with_gain(root.path());
    let v = Vocab::new();

    let preset_bundle = make_bundle_dir(root.path(), "gain-presets.lv2");
    let preset = uri(&format!("file://{preset_bundle}loud.ttl"));
    register_bundle(
        &preset_bundle,
        vec![
            t(&preset, &v.rdf_type, uri(&v.pset_preset)),
            t(&preset, &v.rdfs_label, lit("Loud")),
            t(&preset, &v.lv2_applies_to, uri(GAIN_URI)),
        ],
    );

    let before = catalog.plugin(GAIN_URI).unwrap();
    assert!(before.presets.is_empty());
    let name_ptr = before.name.as_ptr();
    let comment_ptr = before.comment.as_ptr();

    // Loading the preset bundle alone does not refresh a valid record.
    assert!(catalog.add_bundle(Path::new(&preset_bundle)).is_empty());
    assert!(catalog.plugin(GAIN_URI).unwrap().presets.is_empty());

    assert!(catalog.rescan_presets(GAIN_URI));
    let after = catalog.plugin(GAIN_URI).unwrap();
    assert_eq!(after.presets.len(), 1);
    assert_eq!(after.presets[0].label, "Loud");
    assert_eq!(after.presets[0].path, preset_bundle);
    assert_eq!(after.bundles.len(), 2);

    // Everything outside `presets` kept its allocations.
    assert_eq!(after.name.as_ptr(), name_ptr);
    assert_eq!(after.comment.as_ptr(), comment_ptr);

    assert!(catalog.preset_exists(GAIN_URI, &format!("file://{preset_bundle}loud.ttl")));
    assert!(!catalog.preset_exists(GAIN_URI, "urn:test:no-such-preset"));
}

#[test]
fn licensing_distinguishes_trial_and_paid() {
    let _guard = common::env_lock();
    let root = tempfile::tempdir().unwrap();
    let bundle = make_bundle_dir(root.path(), "paid.lv2");
    let paid_uri = "urn:test:paid";
    let v = Vocab::new();
    let plugin = uri(paid_uri);
    let mut triples = gain_plugin(&bundle, paid_uri);
    triples.push(t(&plugin, &v.lv2_extension_data, uri(&v.modlicense_interface)));
    register_bundle(&bundle, triples);

    // Licensed interface without a keys directory reads as trial.
    unsafe { std::env::remove_var(pedalier::config::KEYS_PATH_ENV) };
    let mut catalog = Catalog::<MemWorld>::init().unwrap();
    assert_eq!(
        catalog.plugin_mini(paid_uri).unwrap().licensing,
        Licensing::Trial
    );

    // A key file named after the URI digest upgrades it to paid.
    let keys = tempfile::tempdir().unwrap();
    std::fs::write(keys.path().join(sha1_hex(paid_uri)), b"key").unwrap();
    unsafe { std::env::set_var(pedalier::config::KEYS_PATH_ENV, keys.path()) };
    let mut catalog = Catalog::<MemWorld>::init().unwrap();
    assert_eq!(
        catalog.plugin(paid_uri).unwrap().licensing,
        Licensing::Paid
    );
    unsafe { std::env::remove_var(pedalier::config::KEYS_PATH_ENV) };
}

#[test]
fn essentials_cover_the_automatable_surface() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, _bundle) = catalog_with_gain(root.path());

    let essentials = catalog.plugin_essentials(GAIN_URI).unwrap();
    assert_eq!(essentials.control_inputs.len(), 1);
    assert_eq!(essentials.control_inputs[0].symbol, "gain");
    assert!(essentials.monitored_outputs.is_empty());
    assert!(essentials.parameters.is_empty());

    let inputs = catalog.plugin_control_inputs(GAIN_URI).unwrap();
    assert_eq!(inputs.len(), 1);
}

#[test]
fn state_documents_flatten_to_port_values() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, _bundle) = catalog_with_gain(root.path());
    let v = Vocab::new();

    let state_uri = "file:///tmp/saved-state.ttl";
    let state = uri(state_uri);
    let port = common::blank("state_port");
    common::register_resource(
        state_uri,
        vec![
            t(&state, &v.lv2_port, port.clone()),
            t(&port, &v.lv2_symbol, lit("gain")),
            t(&port, &v.pset_value, Term::Float(0.25)),
        ],
    );

    let values = catalog.state_port_values(state_uri);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].symbol, "gain");
    assert_eq!(values[0].value, 0.25);

    assert!(catalog.state_port_values("file:///tmp/missing.ttl").is_empty());
}

#[test]
fn records_serialize_to_json() {
    let root = tempfile::tempdir().unwrap();
    let (mut catalog, _bundle) = catalog_with_gain(root.path());
    let record = catalog.plugin(GAIN_URI).unwrap();
    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["name"], "Gain");
    assert_eq!(json["stability"], "stable");
    assert_eq!(json["licensing"], "non-commercial");
    assert_eq!(json["ports"]["control"]["input"][0]["ranges"]["default"], 0.5);
}
