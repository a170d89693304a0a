use crate::error::{CliError, Result};
use pdb2png::core::color::{ColorError, ColorSpec};
use pdb2png::core::style::StyleSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A color as written in the file: a name, or a flat list of RGB components.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileColor {
    Name(String),
    Components(Vec<f64>),
}

impl TryFrom<FileColor> for ColorSpec {
    type Error = ColorError;

    fn try_from(value: FileColor) -> std::result::Result<Self, Self::Error> {
        match value {
            FileColor::Name(name) => ColorSpec::named(name),
            FileColor::Components(values) => ColorSpec::palette(&values),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRenderConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub style: Option<String>,
    pub show_water: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCameraConfig {
    pub rotate: Option<[f64; 3]>,
    pub zoom: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileColorsConfig {
    pub protein: Option<FileColor>,
    pub hetatm: Option<FileColor>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileLigandConfig {
    pub id: Option<String>,
    pub chain: Option<String>,
    pub zoom: Option<f64>,
    pub color: Option<FileColor>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileEngineConfig {
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub render: Option<FileRenderConfig>,
    pub camera: Option<FileCameraConfig>,
    pub colors: Option<FileColorsConfig>,
    pub ligand: Option<FileLigandConfig>,
    pub engine: Option<FileEngineConfig>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleSettings>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdb2png::core::style::SettingValue;
    use std::fs;

    const FULL: &str = r#"
        [render]
        width = 800
        height = 600
        style = "dark"
        show-water = true

        [camera]
        rotate = [0.0, 90.0, 0.0]
        zoom = 5.0

        [colors]
        protein = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        hetatm = "grey50"

        [ligand]
        id = "LIG"
        chain = "A"
        zoom = 8.0
        color = "red"

        [engine]
        executable = "/opt/pymol/bin/pymol"
        args = ["-k"]

        [styles.poster]
        bg_color = "black"
        ray_trace_mode = 3
        ray_trace_gain = 0.1
        orthoscopic = true
    "#;

    #[test]
    fn parses_every_section() {
        let config = FileConfig::from_toml(FULL).unwrap();

        let render = config.render.unwrap();
        assert_eq!((render.width, render.height), (Some(800), Some(600)));
        assert_eq!(render.style.as_deref(), Some("dark"));
        assert_eq!(render.show_water, Some(true));

        let camera = config.camera.unwrap();
        assert_eq!(camera.rotate, Some([0.0, 90.0, 0.0]));
        assert_eq!(camera.zoom, Some(5.0));

        let colors = config.colors.unwrap();
        assert_eq!(
            colors.protein,
            Some(FileColor::Components(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]))
        );
        assert_eq!(colors.hetatm, Some(FileColor::Name("grey50".to_string())));

        let ligand = config.ligand.unwrap();
        assert_eq!(ligand.id.as_deref(), Some("LIG"));
        assert_eq!(ligand.zoom, Some(8.0));

        let engine = config.engine.unwrap();
        assert_eq!(engine.executable, Some(PathBuf::from("/opt/pymol/bin/pymol")));
        assert_eq!(engine.args, vec!["-k".to_string()]);
    }

    #[test]
    fn style_tables_keep_setting_order_and_types() {
        let config = FileConfig::from_toml(FULL).unwrap();
        let poster = &config.styles["poster"];
        let keys: Vec<&str> = poster.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["bg_color", "ray_trace_mode", "ray_trace_gain", "orthoscopic"]
        );
        assert_eq!(poster.get("ray_trace_mode"), Some(&SettingValue::Integer(3)));
        assert_eq!(poster.get("ray_trace_gain"), Some(&SettingValue::Float(0.1)));
        assert_eq!(poster.get("orthoscopic"), Some(&SettingValue::Bool(true)));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert!(config.render.is_none());
        assert!(config.styles.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[render]\nwidht = 10\n").is_err());
        assert!(FileConfig::from_toml("[lights]\ncount = 2\n").is_err());
    }

    #[test]
    fn file_colors_convert_to_color_specs() {
        assert_eq!(
            ColorSpec::try_from(FileColor::Name("red".to_string())),
            Ok(ColorSpec::named("red").unwrap())
        );
        assert_eq!(
            ColorSpec::try_from(FileColor::Components(vec![1.0, 0.0])),
            Err(ColorError::IncompleteTriple { len: 2 })
        );
    }

    #[test]
    fn from_file_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[render\nwidth = 1").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { path: p, .. }) if p == path));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
