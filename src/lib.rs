mod bundles;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod extract;
pub mod model;
pub mod ns;
pub mod pedalboard;
pub mod world;

pub use catalog::Catalog;
pub use model::{
    PedalboardGraph, PedalboardMode, PedalboardSummary, PluginRecord, PluginRecordMini,
};
pub use world::{Term, World, normalized_bundle};
