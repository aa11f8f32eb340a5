pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const NS_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const NS_DOAP: &str = "http://usefulinc.com/ns/doap#";
pub const NS_FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const NS_LV2: &str = "http://lv2plug.in/ns/lv2core#";
pub const NS_ATOM: &str = "http://lv2plug.in/ns/ext/atom#";
pub const NS_MIDI: &str = "http://lv2plug.in/ns/ext/midi#";
pub const NS_PSET: &str = "http://lv2plug.in/ns/ext/presets#";
pub const NS_STATE: &str = "http://lv2plug.in/ns/ext/state#";
pub const NS_PATCH: &str = "http://lv2plug.in/ns/ext/patch#";
pub const NS_PPROPS: &str = "http://lv2plug.in/ns/ext/port-props#";
pub const NS_UNITS: &str = "http://lv2plug.in/ns/extensions/units#";
pub const NS_MOD: &str = "http://moddevices.com/ns/mod#";
pub const NS_MODGUI: &str = "http://moddevices.com/ns/modgui#";
pub const NS_MODPEDAL: &str = "http://moddevices.com/ns/modpedal#";
pub const NS_MODLICENSE: &str = "http://moddevices.com/ns/modlicense#";
pub const NS_INGEN: &str = "http://drobilla.net/ns/ingen#";

/// The fixed vocabulary every extraction pass queries with. Built once per
/// operation and dropped when the operation returns; term handles are never
/// kept across world mutations.
pub struct Vocab {
    pub rdf_type: String,
    pub rdf_value: String,
    pub rdfs_label: String,
    pub rdfs_comment: String,
    pub rdfs_range: String,

    pub doap_name: String,
    pub doap_license: String,
    pub doap_maintainer: String,
    pub foaf_name: String,
    pub foaf_homepage: String,
    pub foaf_mbox: String,

    pub lv2_plugin: String,
    pub lv2_port: String,
    pub lv2_symbol: String,
    pub lv2_name: String,
    pub lv2_index: String,
    pub lv2_input_port: String,
    pub lv2_output_port: String,
    pub lv2_audio_port: String,
    pub lv2_control_port: String,
    pub lv2_cv_port: String,
    pub lv2_default: String,
    pub lv2_minimum: String,
    pub lv2_maximum: String,
    pub lv2_scale_point: String,
    pub lv2_port_property: String,
    pub lv2_designation: String,
    pub lv2_binary: String,
    pub lv2_project: String,
    pub lv2_minor_version: String,
    pub lv2_micro_version: String,
    pub lv2_extension_data: String,
    pub lv2_applies_to: String,
    pub lv2_prototype: String,

    pub atom_port: String,
    pub atom_buffer_type: String,
    pub atom_supports: String,
    pub atom_sequence: String,
    pub atom_float: String,
    pub atom_double: String,
    pub atom_int: String,
    pub atom_long: String,
    pub atom_string: String,
    pub atom_path: String,
    pub atom_uri: String,

    pub midi_event: String,
    pub midi_binding: String,
    pub midi_channel: String,
    pub midi_controller: String,

    pub pset_preset: String,
    pub pset_value: String,
    pub state_state: String,

    pub patch_readable: String,
    pub patch_writable: String,

    pub units_unit: String,
    pub units_render: String,
    pub units_symbol: String,

    pub mod_brand: String,
    pub mod_label: String,
    pub mod_default: String,
    pub mod_cv_port: String,
    pub mod_release_number: String,
    pub mod_builder_version: String,
    pub mod_build_environment: String,
    pub mod_instance_number: String,
    pub mod_range_steps: String,
    pub mod_momentary_off: String,
    pub mod_momentary_on: String,

    pub modgui_gui: String,
    pub modgui_resources_directory: String,
    pub modgui_icon_template: String,
    pub modgui_settings_template: String,
    pub modgui_javascript: String,
    pub modgui_stylesheet: String,
    pub modgui_screenshot: String,
    pub modgui_thumbnail: String,
    pub modgui_documentation: String,
    pub modgui_brand: String,
    pub modgui_label: String,
    pub modgui_model: String,
    pub modgui_panel: String,
    pub modgui_color: String,
    pub modgui_knob: String,
    pub modgui_port: String,
    pub modgui_monitored_outputs: String,

    pub modpedal_pedalboard: String,
    pub modpedal_width: String,
    pub modpedal_height: String,
    pub modpedal_version: String,
    pub modpedal_preset: String,

    pub modlicense_interface: String,

    pub ingen_block: String,
    pub ingen_arc: String,
    pub ingen_head: String,
    pub ingen_tail: String,
    pub ingen_enabled: String,
    pub ingen_value: String,
    pub ingen_canvas_x: String,
    pub ingen_canvas_y: String,
    pub ingen_prototype: String,
}

fn term(ns: &str, local: &str) -> String {
    let mut out = String::with_capacity(ns.len() + local.len());
    out.push_str(ns);
    out.push_str(local);
    out
}

impl Vocab {
    pub fn new() -> Self {
        Self {
            rdf_type: term(NS_RDF, "type"),
            rdf_value: term(NS_RDF, "value"),
            rdfs_label: term(NS_RDFS, "label"),
            rdfs_comment: term(NS_RDFS, "comment"),
            rdfs_range: term(NS_RDFS, "range"),

            doap_name: term(NS_DOAP, "name"),
            doap_license: term(NS_DOAP, "license"),
            doap_maintainer: term(NS_DOAP, "maintainer"),
            foaf_name: term(NS_FOAF, "name"),
            foaf_homepage: term(NS_FOAF, "homepage"),
            foaf_mbox: term(NS_FOAF, "mbox"),

            lv2_plugin: term(NS_LV2, "Plugin"),
            lv2_port: term(NS_LV2, "port"),
            lv2_symbol: term(NS_LV2, "symbol"),
            lv2_name: term(NS_LV2, "name"),
            lv2_index: term(NS_LV2, "index"),
            lv2_input_port: term(NS_LV2, "InputPort"),
            lv2_output_port: term(NS_LV2, "OutputPort"),
            lv2_audio_port: term(NS_LV2, "AudioPort"),
            lv2_control_port: term(NS_LV2, "ControlPort"),
            lv2_cv_port: term(NS_LV2, "CVPort"),
            lv2_default: term(NS_LV2, "default"),
            lv2_minimum: term(NS_LV2, "minimum"),
            lv2_maximum: term(NS_LV2, "maximum"),
            lv2_scale_point: term(NS_LV2, "scalePoint"),
            lv2_port_property: term(NS_LV2, "portProperty"),
            lv2_designation: term(NS_LV2, "designation"),
            lv2_binary: term(NS_LV2, "binary"),
            lv2_project: term(NS_LV2, "project"),
            lv2_minor_version: term(NS_LV2, "minorVersion"),
            lv2_micro_version: term(NS_LV2, "microVersion"),
            lv2_extension_data: term(NS_LV2, "extensionData"),
            lv2_applies_to: term(NS_LV2, "appliesTo"),
            lv2_prototype: term(NS_LV2, "prototype"),

            atom_port: term(NS_ATOM, "AtomPort"),
            atom_buffer_type: term(NS_ATOM, "bufferType"),
            atom_supports: term(NS_ATOM, "supports"),
            atom_sequence: term(NS_ATOM, "Sequence"),
            atom_float: term(NS_ATOM, "Float"),
            atom_double: term(NS_ATOM, "Double"),
            atom_int: term(NS_ATOM, "Int"),
            atom_long: term(NS_ATOM, "Long"),
            atom_string: term(NS_ATOM, "String"),
            atom_path: term(NS_ATOM, "Path"),
            atom_uri: term(NS_ATOM, "URI"),

            midi_event: term(NS_MIDI, "MidiEvent"),
            midi_binding: term(NS_MIDI, "binding"),
            midi_channel: term(NS_MIDI, "channel"),
            midi_controller: term(NS_MIDI, "controllerNumber"),

            pset_preset: term(NS_PSET, "Preset"),
            pset_value: term(NS_PSET, "value"),
            state_state: term(NS_STATE, "state"),

            patch_readable: term(NS_PATCH, "readable"),
            patch_writable: term(NS_PATCH, "writable"),

            units_unit: term(NS_UNITS, "unit"),
            units_render: term(NS_UNITS, "render"),
            units_symbol: term(NS_UNITS, "symbol"),

            mod_brand: term(NS_MOD, "brand"),
            mod_label: term(NS_MOD, "label"),
            mod_default: term(NS_MOD, "default"),
            mod_cv_port: term(NS_MOD, "CVPort"),
            mod_release_number: term(NS_MOD, "releaseNumber"),
            mod_builder_version: term(NS_MOD, "builderVersion"),
            mod_build_environment: term(NS_MOD, "buildEnvironment"),
            mod_instance_number: term(NS_MOD, "instanceNumber"),
            mod_range_steps: term(NS_MOD, "rangeSteps"),
            mod_momentary_off: term(NS_MOD, "preferMomentaryOffByDefault"),
            mod_momentary_on: term(NS_MOD, "preferMomentaryOnByDefault"),

            modgui_gui: term(NS_MODGUI, "gui"),
            modgui_resources_directory: term(NS_MODGUI, "resourcesDirectory"),
            modgui_icon_template: term(NS_MODGUI, "iconTemplate"),
            modgui_settings_template: term(NS_MODGUI, "settingsTemplate"),
            modgui_javascript: term(NS_MODGUI, "javascript"),
            modgui_stylesheet: term(NS_MODGUI, "stylesheet"),
            modgui_screenshot: term(NS_MODGUI, "screenshot"),
            modgui_thumbnail: term(NS_MODGUI, "thumbnail"),
            modgui_documentation: term(NS_MODGUI, "documentation"),
            modgui_brand: term(NS_MODGUI, "brand"),
            modgui_label: term(NS_MODGUI, "label"),
            modgui_model: term(NS_MODGUI, "model"),
            modgui_panel: term(NS_MODGUI, "panel"),
            modgui_color: term(NS_MODGUI, "color"),
            modgui_knob: term(NS_MODGUI, "knob"),
            modgui_port: term(NS_MODGUI, "port"),
            modgui_monitored_outputs: term(NS_MODGUI, "monitoredOutputs"),

            modpedal_pedalboard: term(NS_MODPEDAL, "Pedalboard"),
            modpedal_width: term(NS_MODPEDAL, "width"),
            modpedal_height: term(NS_MODPEDAL, "height"),
            modpedal_version: term(NS_MODPEDAL, "version"),
            modpedal_preset: term(NS_MODPEDAL, "preset"),

            modlicense_interface: term(NS_MODLICENSE, "interface"),

            ingen_block: term(NS_INGEN, "block"),
            ingen_arc: term(NS_INGEN, "arc"),
            ingen_head: term(NS_INGEN, "head"),
            ingen_tail: term(NS_INGEN, "tail"),
            ingen_enabled: term(NS_INGEN, "enabled"),
            ingen_value: term(NS_INGEN, "value"),
            ingen_canvas_x: term(NS_INGEN, "canvasX"),
            ingen_canvas_y: term(NS_INGEN, "canvasY"),
            ingen_prototype: term(NS_INGEN, "prototype"),
        }
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

/// House (vendor) category types, keyed by local name under the `mod`
/// namespace. A house match takes precedence and ends category matching.
pub const HOUSE_CATEGORIES: &[(&str, &[&str])] = &[
    ("ControlVoltagePlugin", &["Control Voltage"]),
    ("MIDIPlugin", &["MIDI"]),
    ("MaxGenPlugin", &["MAX gen~"]),
];

/// Standard plugin classes, keyed by local name under the lv2 core
/// namespace. First structurally valid match wins.
pub const LV2_CATEGORIES: &[(&str, &[&str])] = &[
    ("DelayPlugin", &["Delay"]),
    ("DistortionPlugin", &["Distortion"]),
    ("WaveshaperPlugin", &["Distortion", "Waveshaper"]),
    ("DynamicsPlugin", &["Dynamics"]),
    ("AmplifierPlugin", &["Dynamics", "Amplifier"]),
    ("CompressorPlugin", &["Dynamics", "Compressor"]),
    ("ExpanderPlugin", &["Dynamics", "Expander"]),
    ("GatePlugin", &["Dynamics", "Gate"]),
    ("LimiterPlugin", &["Dynamics", "Limiter"]),
    ("FilterPlugin", &["Filter"]),
    ("AllpassPlugin", &["Filter", "Allpass"]),
    ("BandpassPlugin", &["Filter", "Bandpass"]),
    ("CombPlugin", &["Filter", "Comb"]),
    ("EQPlugin", &["Filter", "Equaliser"]),
    ("MultiEQPlugin", &["Filter", "Equaliser", "Multiband"]),
    ("ParaEQPlugin", &["Filter", "Equaliser", "Parametric"]),
    ("HighpassPlugin", &["Filter", "Highpass"]),
    ("LowpassPlugin", &["Filter", "Lowpass"]),
    ("GeneratorPlugin", &["Generator"]),
    ("ConstantPlugin", &["Generator", "Constant"]),
    ("InstrumentPlugin", &["Generator", "Instrument"]),
    ("OscillatorPlugin", &["Generator", "Oscillator"]),
    ("ModulatorPlugin", &["Modulator"]),
    ("ChorusPlugin", &["Modulator", "Chorus"]),
    ("FlangerPlugin", &["Modulator", "Flanger"]),
    ("PhaserPlugin", &["Modulator", "Phaser"]),
    ("ReverbPlugin", &["Reverb"]),
    ("SimulatorPlugin", &["Simulator"]),
    ("SpatialPlugin", &["Spatial"]),
    ("SpectralPlugin", &["Spectral"]),
    ("PitchPlugin", &["Spectral", "Pitch Shifter"]),
    ("UtilityPlugin", &["Utility"]),
    ("AnalyserPlugin", &["Utility", "Analyser"]),
    ("ConverterPlugin", &["Utility", "Converter"]),
    ("FunctionPlugin", &["Utility", "Function"]),
    ("MixerPlugin", &["Utility", "Mixer"]),
];

/// Standard unit vocabulary: local name under the units namespace mapped to
/// (label, render, symbol).
pub const KNOWN_UNITS: &[(&str, (&str, &str, &str))] = &[
    ("bar", ("bars", "%f bars", "bars")),
    ("beat", ("beats", "%f beats", "beats")),
    ("bpm", ("beats per minute", "%f BPM", "BPM")),
    ("cent", ("cents", "%f ct", "ct")),
    ("cm", ("centimetres", "%f cm", "cm")),
    ("coef", ("coefficient", "* %f", "*")),
    ("db", ("decibels", "%f dB", "dB")),
    ("degree", ("degrees", "%f deg", "deg")),
    ("frame", ("audio frames", "%f frames", "frames")),
    ("hz", ("hertz", "%f Hz", "Hz")),
    ("inch", ("inches", "%f in", "in")),
    ("khz", ("kilohertz", "%f kHz", "kHz")),
    ("km", ("kilometres", "%f km", "km")),
    ("m", ("metres", "%f m", "m")),
    ("mhz", ("megahertz", "%f MHz", "MHz")),
    ("midiNote", ("MIDI note", "MIDI note %d", "note")),
    ("min", ("minutes", "%f mins", "min")),
    ("mm", ("millimetres", "%f mm", "mm")),
    ("ms", ("milliseconds", "%f ms", "ms")),
    ("oct", ("octaves", "%f octaves", "oct")),
    ("pc", ("percent", "%f%%", "%")),
    ("s", ("seconds", "%f s", "s")),
    ("semitone12TET", ("semitones", "%f semi", "semi")),
];

/// Port properties worth surfacing, as (full term, short name).
pub fn known_port_properties() -> Vec<(String, &'static str)> {
    vec![
        (term(NS_LV2, "integer"), "integer"),
        (term(NS_LV2, "toggled"), "toggled"),
        (term(NS_LV2, "enumeration"), "enumeration"),
        (term(NS_LV2, "sampleRate"), "sampleRate"),
        (term(NS_LV2, "connectionOptional"), "optional"),
        (term(NS_PPROPS, "logarithmic"), "logarithmic"),
        (term(NS_PPROPS, "trigger"), "trigger"),
        (term(NS_PPROPS, "notOnGUI"), "notOnGUI"),
        (term(NS_PPROPS, "expensive"), "expensive"),
        (term(NS_MOD, "tapTempo"), "tapTempo"),
    ]
}
