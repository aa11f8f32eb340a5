use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Experimental,
    Testing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Licensing {
    #[serde(rename = "non-commercial")]
    NonCommercial,
    #[serde(rename = "trial")]
    Trial,
    #[serde(rename = "paid")]
    Paid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortRanges {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl PortRanges {
    pub fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub value: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortUnits {
    pub label: String,
    pub render: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub index: u32,
    pub symbol: String,
    pub name: String,
    pub comment: String,
    pub designation: String,
    pub properties: Vec<String>,
    pub range_steps: Option<u32>,
    /// Meaningful for control and CV ports; zeroed elsewhere.
    pub ranges: PortRanges,
    pub units: Option<PortUnits>,
    pub scale_points: Vec<ScalePoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortTable {
    pub input: Vec<Port>,
    pub output: Vec<Port>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginPorts {
    pub audio: PortTable,
    pub control: PortTable,
    pub cv: PortTable,
    pub midi: PortTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterRange {
    Float { min: f32, max: f32, default: f32 },
    Long { min: i64, max: i64, default: i64 },
    String { default: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub uri: String,
    pub label: String,
    pub readable: bool,
    pub writable: bool,
    pub range: ParameterRange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginAuthor {
    pub name: String,
    pub homepage: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginGuiPort {
    pub index: u32,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginGui {
    pub resources_directory: String,
    pub icon_template: String,
    pub settings_template: String,
    pub javascript: String,
    pub stylesheet: String,
    pub screenshot: String,
    pub thumbnail: String,
    pub documentation: String,
    pub brand: String,
    pub label: String,
    pub model: String,
    pub panel: String,
    pub color: String,
    pub knob: String,
    pub ports: Vec<PluginGuiPort>,
    pub monitored_outputs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginGuiMini {
    pub resources_directory: String,
    pub screenshot: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub uri: String,
    pub label: String,
    /// Containing bundle when not the plugin's main bundle; empty otherwise.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub uri: String,
    pub name: String,
    pub binary: String,
    pub brand: String,
    pub label: String,
    pub license: String,
    pub comment: String,
    pub category: Vec<String>,
    pub minor_version: u32,
    pub micro_version: u32,
    pub release: u32,
    pub builder: u32,
    pub stability: Stability,
    pub build_environment: String,
    pub licensing: Licensing,
    pub author: PluginAuthor,
    /// Main bundle first, then any bundle contributing presets.
    pub bundles: Vec<String>,
    pub gui: Option<PluginGui>,
    pub ports: PluginPorts,
    pub parameters: Vec<Parameter>,
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecordMini {
    pub uri: String,
    pub name: String,
    pub brand: String,
    pub label: String,
    pub category: Vec<String>,
    pub minor_version: u32,
    pub micro_version: u32,
    pub release: u32,
    pub builder: u32,
    pub licensing: Licensing,
    pub gui: Option<PluginGuiMini>,
}

/// The automatable surface of a plugin: what a host needs to address it,
/// without the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEssentials {
    pub control_inputs: Vec<Port>,
    pub monitored_outputs: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub build_environment: String,
    pub minor_version: u32,
    pub micro_version: u32,
    pub release: u32,
    pub builder: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MidiCc {
    pub channel: u8,
    pub control: u8,
    /// Explicit remapping range when both bounds were declared.
    pub range: Option<(f32, f32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPortValue {
    pub symbol: String,
    pub value: f32,
    pub midi_cc: Option<MidiCc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedalboardBlock {
    /// Bundle-relative instance name, unique within the graph.
    pub instance: String,
    /// Prototype plugin URI.
    pub uri: String,
    pub bypassed: bool,
    pub bypass_cc: Option<MidiCc>,
    pub instance_number: Option<u32>,
    pub preset: Option<String>,
    pub x: f32,
    pub y: f32,
    pub ports: Vec<BlockPortValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedalboardConnection {
    /// Bundle-relative `instance:port` of the source end.
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareMidiPort {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedalboardHardware {
    pub audio_ins: u32,
    pub audio_outs: u32,
    pub cv_ins: u32,
    pub cv_outs: u32,
    pub midi_ins: Vec<HardwareMidiPort>,
    pub midi_outs: Vec<HardwareMidiPort>,
    pub serial_midi_in: bool,
    pub serial_midi_out: bool,
    pub midi_merger_out: bool,
    pub midi_broadcaster_in: bool,
    pub midi_loopback: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePortInfo {
    pub available: bool,
    pub value: f32,
    pub midi_cc: Option<MidiCc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PedalboardTimeInfo {
    pub bpb: TimePortInfo,
    pub bpm: TimePortInfo,
    pub rolling: TimePortInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedalboardGraph {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub factory: bool,
    pub version: u32,
    pub blocks: Vec<PedalboardBlock>,
    pub connections: Vec<PedalboardConnection>,
    pub hardware: PedalboardHardware,
    pub timeinfo: PedalboardTimeInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedalboardSummary {
    pub uri: String,
    pub bundle: String,
    pub title: String,
    pub version: u32,
    pub broken: bool,
    pub factory: bool,
    pub has_trial_plugins: bool,
}

/// One row of a pedalboard state snapshot: current value of one port of one
/// block, plus the synthesized `:bypass` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstancePortValue {
    pub instance: String,
    pub symbol: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePortValue {
    pub symbol: String,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedalboardMode {
    User,
    Factory,
    Both,
}
