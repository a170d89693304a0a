use phf::{Map, phf_map};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use PresetValue::{Int, Text};

/// The one setting routed to the background setter instead of the generic one.
pub const BACKGROUND_KEY: &str = "bg_color";

/// The preset used when no style is requested.
pub const DEFAULT_STYLE: &str = "default";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error(
        "Style '{input}' is neither a registered style nor a valid inline JSON object: {reason}"
    )]
    Unrecognized { input: String, reason: String },

    #[error("Unknown style: '{0}'")]
    UnknownStyle(String),

    #[error("Inline style setting '{key}' must be a string, number or boolean")]
    InvalidValue { key: String },
}

/// A scalar value for a single engine setting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    fn from_json(key: &str, value: &serde_json::Value) -> Result<Self, StyleError> {
        use serde_json::Value;
        match value {
            Value::Bool(b) => Ok(SettingValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(SettingValue::Integer)
                .or_else(|| n.as_f64().map(SettingValue::Float))
                .ok_or_else(|| StyleError::InvalidValue {
                    key: key.to_string(),
                }),
            Value::String(s) => Ok(SettingValue::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(StyleError::InvalidValue {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(true) => write!(f, "on"),
            SettingValue::Bool(false) => write!(f, "off"),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Integer(i)
    }
}

impl From<f64> for SettingValue {
    fn from(x: f64) -> Self {
        SettingValue::Float(x)
    }
}

/// An ordered setting-name to value mapping; order is application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSettings {
    entries: Vec<(String, SettingValue)>,
}

impl StyleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a setting. A repeated key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses an inline JSON object such as `{"ray_trace_mode": 3}`.
    pub fn from_json(input: &str) -> Result<Self, StyleError> {
        let unrecognized = |reason: String| StyleError::Unrecognized {
            input: input.to_string(),
            reason,
        };
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| unrecognized(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| unrecognized("expected a JSON object".to_string()))?;

        let mut settings = StyleSettings::new();
        for (key, value) in object {
            settings.insert(key.clone(), SettingValue::from_json(key, value)?);
        }
        Ok(settings)
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for StyleSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = StyleSettings::new();
        for (k, v) in iter {
            settings.insert(k, v);
        }
        settings
    }
}

impl<'de> Deserialize<'de> for StyleSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SettingsVisitor;

        impl<'de> Visitor<'de> for SettingsVisitor {
            type Value = StyleSettings;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of setting names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut settings = StyleSettings::new();
                while let Some((key, value)) = map.next_entry::<String, SettingValue>()? {
                    settings.insert(key, value);
                }
                Ok(settings)
            }
        }

        deserializer.deserialize_map(SettingsVisitor)
    }
}

/// A style request before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSpec {
    Registered(String),
    Inline(StyleSettings),
}

impl Default for StyleSpec {
    fn default() -> Self {
        StyleSpec::Registered(DEFAULT_STYLE.to_string())
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleSpec::Registered(name) => write!(f, "{}", name),
            StyleSpec::Inline(settings) => write!(f, "<inline: {} settings>", settings.len()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PresetValue {
    Text(&'static str),
    Int(i64),
}

impl From<PresetValue> for SettingValue {
    fn from(v: PresetValue) -> Self {
        match v {
            PresetValue::Text(s) => SettingValue::Text(s.to_string()),
            PresetValue::Int(i) => SettingValue::Integer(i),
        }
    }
}

static BUILTIN_STYLES: Map<&'static str, &'static [(&'static str, PresetValue)]> = phf_map! {
    "default" => &[
        ("bg_color", Text("white")),
        ("ray_opaque_background", Text("off")),
        ("antialias", Int(2)),
        ("orthoscopic", Text("on")),
        ("depth_cue", Text("0")),
        ("ray_trace_mode", Text("1")),
    ],
    "default_bw" => &[
        ("bg_color", Text("white")),
        ("ray_opaque_background", Text("off")),
        ("antialias", Int(2)),
        ("orthoscopic", Text("on")),
        ("depth_cue", Text("0")),
        ("ray_trace_mode", Text("2")),
    ],
    "default_cartoon" => &[
        ("bg_color", Text("white")),
        ("ray_opaque_background", Text("off")),
        ("antialias", Int(2)),
        ("orthoscopic", Text("on")),
        ("depth_cue", Text("0")),
        ("ray_trace_mode", Text("3")),
    ],
    "dark" => &[
        ("bg_color", Text("black")),
        ("ray_opaque_background", Text("off")),
        ("antialias", Int(2)),
        ("orthoscopic", Text("on")),
        ("light_count", Text("2")),
        ("specular", Text("1")),
        ("depth_cue", Text("0")),
        ("ray_trace_mode", Text("1")),
    ],
    "muted" => &[
        ("bg_color", Text("white")),
        ("valence", Int(0)),
        ("bg_rgb", Text("white")),
        ("reflect", Text("0")),
        ("spec_direct", Text("0")),
        ("light_count", Text("1")),
        ("spec_count", Text("0")),
        ("shininess", Text("0")),
        ("power", Text("1")),
        ("specular", Text("0")),
        ("ambient_occlusion_mode", Text("1")),
        ("ambient_occlusion_scale", Text("15")),
        ("ambient_occlusion_smooth", Text("15")),
        ("ray_trace_gain", Text("0.1")),
        ("ambient", Text("0.9")),
        ("direct", Text("0.2")),
        ("ray_trace_mode", Text("0")),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOrigin {
    Builtin,
    Custom,
}

/// Named style presets: the built-in ones plus user-defined additions.
///
/// User presets shadow built-ins of the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRegistry {
    custom: BTreeMap<String, StyleSettings>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, settings: StyleSettings) {
        self.custom.insert(name.into(), settings);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || BUILTIN_STYLES.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<StyleSettings> {
        if let Some(settings) = self.custom.get(name) {
            return Some(settings.clone());
        }
        BUILTIN_STYLES
            .get(name)
            .map(|entries| entries.iter().map(|(k, v)| (*k, *v)).collect())
    }

    /// All registered names, sorted, with where each one comes from.
    pub fn names(&self) -> Vec<(String, StyleOrigin)> {
        let mut names: BTreeMap<String, StyleOrigin> = BUILTIN_STYLES
            .keys()
            .map(|k| (k.to_string(), StyleOrigin::Builtin))
            .collect();
        for name in self.custom.keys() {
            names.insert(name.clone(), StyleOrigin::Custom);
        }
        names.into_iter().collect()
    }

    /// Registered names win; anything else must parse as an inline JSON object.
    pub fn parse(&self, input: &str) -> Result<StyleSpec, StyleError> {
        let trimmed = input.trim();
        if self.contains(trimmed) {
            return Ok(StyleSpec::Registered(trimmed.to_string()));
        }
        StyleSettings::from_json(trimmed).map(StyleSpec::Inline)
    }

    pub fn resolve(&self, spec: &StyleSpec) -> Result<StyleSettings, StyleError> {
        match spec {
            StyleSpec::Registered(name) => self
                .get(name)
                .ok_or_else(|| StyleError::UnknownStyle(name.clone())),
            StyleSpec::Inline(settings) => Ok(settings.clone()),
        }
    }
}
