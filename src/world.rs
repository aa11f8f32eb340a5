use std::path::{Path, PathBuf};

/// A single value in the triple store: a URI, a blank node, or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Uri(String),
    Blank(String),
    Literal(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Term::Uri(value.into())
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Term::Uri(u) => Some(u),
            _ => None,
        }
    }

    /// Textual form of a URI or literal. Numbers and booleans are not text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Uri(u) => Some(u),
            Term::Blank(b) => Some(b),
            Term::Literal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|v| v as f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Term::Float(v) => Some(*v),
            Term::Int(v) => Some(*v as f64),
            Term::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Term::Literal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Term::Int(v) => Some(*v),
            Term::Float(v) => Some(*v as i64),
            Term::Bool(b) => Some(i64::from(*b)),
            Term::Literal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_i64().and_then(|v| u32::try_from(v).ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Bool(b) => Some(*b),
            Term::Int(v) => Some(*v != 0),
            Term::Float(v) => Some(*v != 0.0),
            Term::Literal(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// The triple-store collaborator. The long-lived plugin world and every
/// short-lived scratch world go through this same surface; the engine
/// behind it is external and opaque.
///
/// Subjects are URI or blank terms. Bundle paths handed to the load/unload
/// calls are expected in normalized form (see [`normalized_bundle`]).
pub trait World {
    /// Acquire a handle. Failing here is a startup failure for the consumer;
    /// nothing else in this crate is allowed to be fatal.
    fn open() -> Result<Self, String>
    where
        Self: Sized;

    /// Load every known bundle into this world.
    fn load_all(&mut self);

    fn is_bundle_loaded(&self, bundle: &str) -> bool;
    fn load_bundle(&mut self, bundle: &str) -> bool;
    fn unload_bundle(&mut self, bundle: &str) -> bool;

    /// Load/unload a single resource document (a preset or state file).
    fn load_resource(&mut self, uri: &str) -> bool;
    fn unload_resource(&mut self, uri: &str) -> bool;

    /// Entity enumeration: every subject carrying `rdf:type <type_uri>`.
    fn subjects_of_type(&self, type_uri: &str) -> Vec<Term>;

    /// Reverse lookup: every subject with `<predicate> == object`.
    fn subjects_with(&self, predicate: &str, object: &Term) -> Vec<Term>;

    fn value(&self, subject: &Term, predicate: &str) -> Option<Term>;
    fn values(&self, subject: &Term, predicate: &str) -> Vec<Term>;

    /// URI to local filesystem path, when the URI maps to one.
    fn path_of(&self, uri: &str) -> Option<PathBuf>;

    /// Local filesystem path to URI.
    fn uri_of(&self, path: &Path) -> Option<String>;

    /// Normalized path of the bundle a subject was loaded from.
    fn bundle_of(&self, subject: &Term) -> Option<String>;
}

/// Canonical bundle-path form: absolute, symlinks resolved, trailing
/// separator. Two paths normalizing equal are the same bundle. `None` when
/// the path does not resolve on this filesystem.
pub fn normalized_bundle(path: &Path) -> Option<String> {
    let canonical = std::fs::canonicalize(path).ok()?;
    let mut out = canonical.to_str()?.to_string();
    if !out.ends_with(std::path::MAIN_SEPARATOR) {
        out.push(std::path::MAIN_SEPARATOR);
    }
    Some(out)
}
