#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use pedalier::ns::Vocab;
use pedalier::world::{Term, World};

/// Route library tracing through the test harness capture.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Serializes tests that touch `PEDALIER_*` environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Debug)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

pub fn t(subject: &Term, predicate: &str, object: Term) -> Triple {
    Triple {
        subject: subject.clone(),
        predicate: predicate.to_string(),
        object,
    }
}

pub fn uri(value: &str) -> Term {
    Term::Uri(value.to_string())
}

pub fn lit(value: &str) -> Term {
    Term::Literal(value.to_string())
}

pub fn blank(id: &str) -> Term {
    Term::Blank(id.to_string())
}

#[derive(Default)]
struct Registry {
    /// Normalized bundle path -> triples that bundle contributes.
    bundles: Vec<(String, Vec<Triple>)>,
    /// Resource URI -> triples its document contributes.
    resources: Vec<(String, Vec<Triple>)>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

pub fn register_bundle(bundle: &str, triples: Vec<Triple>) {
    REGISTRY.with(|r| {
        let mut registry = r.borrow_mut();
        registry.bundles.retain(|(b, _)| b != bundle);
        registry.bundles.push((bundle.to_string(), triples));
    });
}

pub fn register_resource(resource_uri: &str, triples: Vec<Triple>) {
    REGISTRY.with(|r| {
        let mut registry = r.borrow_mut();
        registry.resources.retain(|(u, _)| u != resource_uri);
        registry.resources.push((resource_uri.to_string(), triples));
    });
}

pub fn unregister_bundle(bundle: &str) {
    REGISTRY.with(|r| r.borrow_mut().bundles.retain(|(b, _)| b != bundle));
}

/// In-memory stand-in for the external triple-store engine. Bundles and
/// resource documents are registered per test thread; every `MemWorld`
/// (long-lived or scratch) opens against the same registered universe, the
/// way real worlds share one filesystem.
pub struct MemWorld {
    facts: Vec<(String, Triple)>,
    loaded_bundles: HashSet<String>,
    loaded_resources: HashSet<String>,
}

const RESOURCE_ORIGIN: &str = "\u{0}resource:";

impl MemWorld {
    fn matching<'a>(&'a self, subject: &'a Term, predicate: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.facts
            .iter()
            .map(|(_, triple)| triple)
            .filter(move |triple| triple.subject == *subject && triple.predicate == predicate)
    }
}

impl World for MemWorld {
    fn open() -> Result<Self, String> {
        Ok(Self {
            facts: Vec::new(),
            loaded_bundles: HashSet::new(),
            loaded_resources: HashSet::new(),
        })
    }

    fn load_all(&mut self) {
        let bundles: Vec<String> =
            REGISTRY.with(|r| r.borrow().bundles.iter().map(|(b, _)| b.clone()).collect());
        for bundle in bundles {
            self.load_bundle(&bundle);
        }
    }

    fn is_bundle_loaded(&self, bundle: &str) -> bool {
        self.loaded_bundles.contains(bundle)
    }

    fn load_bundle(&mut self, bundle: &str) -> bool {
        if self.loaded_bundles.contains(bundle) {
            return true;
        }
        let triples = REGISTRY.with(|r| {
            r.borrow()
                .bundles
                .iter()
                .find(|(b, _)| b == bundle)
                .map(|(_, triples)| triples.clone())
        });
        let Some(triples) = triples else {
            return false;
        };
        for triple in triples {
            self.facts.push((bundle.to_string(), triple));
        }
        self.loaded_bundles.insert(bundle.to_string());
        true
    }

    fn unload_bundle(&mut self, bundle: &str) -> bool {
        if !self.loaded_bundles.remove(bundle) {
            return false;
        }
        self.facts.retain(|(origin, _)| origin != bundle);
        true
    }

    fn load_resource(&mut self, resource_uri: &str) -> bool {
        if self.loaded_resources.contains(resource_uri) {
            return true;
        }
        let triples = REGISTRY.with(|r| {
            r.borrow()
                .resources
                .iter()
                .find(|(u, _)| u == resource_uri)
                .map(|(_, triples)| triples.clone())
        });
        let Some(triples) = triples else {
            return false;
        };
        let origin = format!("{RESOURCE_ORIGIN}{resource_uri}");
        for triple in triples {
            self.facts.push((origin.clone(), triple));
        }
        self.loaded_resources.insert(resource_uri.to_string());
        true
    }

    fn unload_resource(&mut self, resource_uri: &str) -> bool {
        if !self.loaded_resources.remove(resource_uri) {
            return false;
        }
        let origin = format!("{RESOURCE_ORIGIN}{resource_uri}");
        self.facts.retain(|(o, _)| *o != origin);
        true
    }

    fn subjects_of_type(&self, type_uri: &str) -> Vec<Term> {
        let vocab = Vocab::new();
        let mut seen = Vec::new();
        for (_, triple) in &self.facts {
            if triple.predicate == vocab.rdf_type
                && triple.object.as_uri() == Some(type_uri)
                && !seen.contains(&triple.subject)
            {
                seen.push(triple.subject.clone());
            }
        }
        seen
    }

    fn subjects_with(&self, predicate: &str, object: &Term) -> Vec<Term> {
        let mut seen = Vec::new();
        for (_, triple) in &self.facts {
            if triple.predicate == predicate
                && triple.object == *object
                && !seen.contains(&triple.subject)
            {
                seen.push(triple.subject.clone());
            }
        }
        seen
    }

    fn value(&self, subject: &Term, predicate: &str) -> Option<Term> {
        self.matching(subject, predicate)
            .next()
            .map(|triple| triple.object.clone())
    }

    fn values(&self, subject: &Term, predicate: &str) -> Vec<Term> {
        self.matching(subject, predicate)
            .map(|triple| triple.object.clone())
            .collect()
    }

    fn path_of(&self, uri: &str) -> Option<PathBuf> {
        uri.strip_prefix("file://").map(PathBuf::from)
    }

    fn uri_of(&self, path: &Path) -> Option<String> {
        Some(format!("file://{}", path.display()))
    }

    fn bundle_of(&self, subject: &Term) -> Option<String> {
        self.facts
            .iter()
            .find(|(origin, triple)| {
                !origin.starts_with(RESOURCE_ORIGIN) && triple.subject == *subject
            })
            .map(|(origin, _)| origin.clone())
    }
}

/// Create a bundle directory on disk and return its normalized path.
pub fn make_bundle_dir(root: &Path, name: &str) -> String {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    pedalier::normalized_bundle(&dir).unwrap()
}

/// Triples for a gain-style plugin: audio in/out plus one control input
/// with an explicit 0..1 range and 0.5 default.
pub fn gain_plugin(bundle: &str, plugin_uri: &str) -> Vec<Triple> {
    let v = Vocab::new();
    let plugin = uri(plugin_uri);
    let p_in = blank(&format!("{plugin_uri}#in"));
    let p_out = blank(&format!("{plugin_uri}#out"));
    let p_gain = blank(&format!("{plugin_uri}#gain"));

    vec![
        t(&plugin, &v.rdf_type, uri(&v.lv2_plugin)),
        t(&plugin, &v.doap_name, lit("Gain")),
        t(&plugin, &v.lv2_binary, uri(&format!("file://{bundle}gain.so"))),
        t(&plugin, &v.doap_license, lit("GPL-2.0-or-later")),
        t(&plugin, &v.lv2_minor_version, Term::Int(2)),
        t(&plugin, &v.lv2_micro_version, Term::Int(4)),
        t(&plugin, &v.lv2_port, p_in.clone()),
        t(&plugin, &v.lv2_port, p_out.clone()),
        t(&plugin, &v.lv2_port, p_gain.clone()),
        t(&p_in, &v.rdf_type, uri(&v.lv2_input_port)),
        t(&p_in, &v.rdf_type, uri(&v.lv2_audio_port)),
        t(&p_in, &v.lv2_index, Term::Int(0)),
        t(&p_in, &v.lv2_symbol, lit("in")),
        t(&p_in, &v.lv2_name, lit("In")),
        t(&p_out, &v.rdf_type, uri(&v.lv2_output_port)),
        t(&p_out, &v.rdf_type, uri(&v.lv2_audio_port)),
        t(&p_out, &v.lv2_index, Term::Int(1)),
        t(&p_out, &v.lv2_symbol, lit("out")),
        t(&p_out, &v.lv2_name, lit("Out")),
        t(&p_gain, &v.rdf_type, uri(&v.lv2_input_port)),
        t(&p_gain, &v.rdf_type, uri(&v.lv2_control_port)),
        t(&p_gain, &v.lv2_index, Term::Int(2)),
        t(&p_gain, &v.lv2_symbol, lit("gain")),
        t(&p_gain, &v.lv2_name, lit("Gain")),
        t(&p_gain, &v.lv2_minimum, Term::Float(0.0)),
        t(&p_gain, &v.lv2_maximum, Term::Float(1.0)),
        t(&p_gain, &v.lv2_default, Term::Float(0.5)),
    ]
}

/// Triples for a pedalboard bundle holding two gain blocks and one
/// connection `gain1:out -> gain2:in`, plus a stereo pair of hardware
/// audio ports.
pub fn two_block_pedalboard(bundle: &str, plugin_uri: &str) -> Vec<Triple> {
    let v = Vocab::new();
    let pb = uri(&format!("file://{bundle}board.ttl"));
    let gain1 = uri(&format!("file://{bundle}gain1"));
    let gain2 = uri(&format!("file://{bundle}gain2"));
    let gain1_port = blank("gain1_gain");
    let gain2_port = blank("gain2_gain");
    let arc = blank("arc0");
    let capture = blank("hw_capture");
    let playback = blank("hw_playback");

    vec![
        t(&pb, &v.rdf_type, uri(&v.lv2_plugin)),
        t(&pb, &v.rdf_type, uri(&v.modpedal_pedalboard)),
        t(&pb, &v.doap_name, lit("Two Gains")),
        t(&pb, &v.modpedal_width, Term::Int(1280)),
        t(&pb, &v.modpedal_height, Term::Int(720)),
        t(&pb, &v.modpedal_version, Term::Int(3)),
        t(&pb, &v.ingen_block, gain1.clone()),
        t(&pb, &v.ingen_block, gain2.clone()),
        t(&gain1, &v.lv2_prototype, uri(plugin_uri)),
        t(&gain1, &v.ingen_enabled, Term::Bool(true)),
        t(&gain1, &v.ingen_canvas_x, Term::Float(100.0)),
        t(&gain1, &v.ingen_canvas_y, Term::Float(200.0)),
        t(&gain1, &v.lv2_port, gain1_port.clone()),
        t(&gain1_port, &v.lv2_symbol, lit("gain")),
        t(&gain1_port, &v.ingen_value, Term::Float(0.7)),
        t(&gain2, &v.lv2_prototype, uri(plugin_uri)),
        t(&gain2, &v.ingen_enabled, Term::Bool(false)),
        t(&gain2, &v.ingen_canvas_x, Term::Float(400.0)),
        t(&gain2, &v.ingen_canvas_y, Term::Float(200.0)),
        t(&gain2, &v.lv2_port, gain2_port.clone()),
        t(&gain2_port, &v.lv2_symbol, lit("gain")),
        t(&gain2_port, &v.ingen_value, Term::Float(0.3)),
        t(&pb, &v.ingen_arc, arc.clone()),
        t(&arc, &v.ingen_tail, uri(&format!("file://{bundle}gain1/out"))),
        t(&arc, &v.ingen_head, uri(&format!("file://{bundle}gain2/in"))),
        t(&pb, &v.lv2_port, capture.clone()),
        t(&capture, &v.rdf_type, uri(&v.lv2_input_port)),
        t(&capture, &v.rdf_type, uri(&v.lv2_audio_port)),
        t(&capture, &v.lv2_symbol, lit("capture_1")),
        t(&pb, &v.lv2_port, playback.clone()),
        t(&playback, &v.rdf_type, uri(&v.lv2_output_port)),
        t(&playback, &v.rdf_type, uri(&v.lv2_audio_port)),
        t(&playback, &v.lv2_symbol, lit("playback_1")),
    ]
}
