use super::traits::Axis;
use crate::core::color::ColorSpec;
use crate::core::selection::Selection;
use crate::core::style::{StyleRegistry, StyleSpec};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Extension of the rendered image when no output path is given.
pub const IMAGE_EXTENSION: &str = "png";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(name, format!("{} is not a finite number", value)))
    }
}

/// Rotation in degrees, applied about x, then y, then z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn steps(&self) -> [(Axis, f64); 3] {
        [(Axis::X, self.x), (Axis::Y, self.y), (Axis::Z, self.z)]
    }
}

impl FromStr for Rotation {
    type Err = ConfigError;

    /// Parses `x,y,z` in degrees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| invalid("rotation", format!("'{}' is not a number", part)))
                    .and_then(|v| require_finite("rotation", v))
            })
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            [x, y, z] => Ok(Rotation {
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => Err(invalid(
                "rotation",
                format!("expected three comma-separated angles, got {}", values.len()),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraConfig {
    pub rotation: Option<Rotation>,
    pub zoom: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColoringConfig {
    pub protein: Option<ColorSpec>,
    pub hetatm: Option<ColorSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LigandConfig {
    pub residue_name: String,
    pub chain: Option<String>,
    pub zoom: f64,
    pub color: Option<ColorSpec>,
}

impl LigandConfig {
    /// Every residue with the ligand's name, narrowed to one chain if requested.
    pub fn selection(&self) -> Selection {
        let by_name = Selection::residue_name(self.residue_name.as_str());
        match &self.chain {
            Some(chain) => by_name.and(Selection::chain(chain.as_str())),
            None => by_name,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.residue_name.trim().is_empty() || self.residue_name.contains(char::is_whitespace)
        {
            return Err(invalid(
                "ligand_id",
                format!("'{}' is not a residue name", self.residue_name),
            ));
        }
        if let Some(chain) = &self.chain {
            if chain.trim().is_empty() || chain.contains(char::is_whitespace) {
                return Err(invalid(
                    "ligand_chain",
                    format!("'{}' is not a chain identifier", chain),
                ));
            }
        }
        require_finite("ligand_zoom", self.zoom)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleConfig {
    pub spec: StyleSpec,
    pub registry: StyleRegistry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Everything one render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub camera: CameraConfig,
    pub coloring: ColoringConfig,
    pub ligand: Option<LigandConfig>,
    pub show_solvent: bool,
    pub style: StyleConfig,
    pub resolution: Resolution,
}

/// The input path with its extension replaced by the image extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(IMAGE_EXTENSION)
}

#[derive(Default)]
pub struct RenderConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    rotation: Option<Rotation>,
    zoom: Option<f64>,
    protein_color: Option<ColorSpec>,
    hetatm_color: Option<ColorSpec>,
    ligand: Option<LigandConfig>,
    show_solvent: bool,
    style: Option<StyleSpec>,
    style_registry: Option<StyleRegistry>,
    resolution: Option<Resolution>,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }
    pub fn rotation(mut self, rotation: Option<Rotation>) -> Self {
        self.rotation = rotation;
        self
    }
    pub fn zoom(mut self, zoom: Option<f64>) -> Self {
        self.zoom = zoom;
        self
    }
    pub fn protein_color(mut self, color: Option<ColorSpec>) -> Self {
        self.protein_color = color;
        self
    }
    pub fn hetatm_color(mut self, color: Option<ColorSpec>) -> Self {
        self.hetatm_color = color;
        self
    }
    pub fn ligand(mut self, ligand: Option<LigandConfig>) -> Self {
        self.ligand = ligand;
        self
    }
    pub fn show_solvent(mut self, show: bool) -> Self {
        self.show_solvent = show;
        self
    }
    pub fn style(mut self, spec: StyleSpec) -> Self {
        self.style = Some(spec);
        self
    }
    pub fn style_registry(mut self, registry: StyleRegistry) -> Self {
        self.style_registry = Some(registry);
        self
    }
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some(Resolution { width, height });
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let input_path = self
            .input_path
            .ok_or(ConfigError::MissingParameter("input_path"))?;
        if input_path.as_os_str().is_empty() {
            return Err(invalid("input_path", "path is empty"));
        }

        let resolution = self
            .resolution
            .ok_or(ConfigError::MissingParameter("resolution"))?;
        if resolution.width == 0 || resolution.height == 0 {
            return Err(invalid(
                "resolution",
                format!(
                    "{}x{} has a zero dimension",
                    resolution.width, resolution.height
                ),
            ));
        }

        if let Some(zoom) = self.zoom {
            require_finite("protein_zoom", zoom)?;
        }
        if let Some(ligand) = &self.ligand {
            ligand.validate()?;
        }

        let registry = self.style_registry.unwrap_or_default();
        let spec = self.style.unwrap_or_default();
        if let StyleSpec::Registered(name) = &spec {
            if !registry.contains(name) {
                return Err(invalid("style", format!("'{}' is not a registered style", name)));
            }
        }

        let output_path = self
            .output_path
            .unwrap_or_else(|| default_output_path(&input_path));
        if output_path == input_path {
            return Err(invalid(
                "output_path",
                "output would overwrite the input structure",
            ));
        }

        Ok(RenderConfig {
            input_path,
            output_path,
            camera: CameraConfig {
                rotation: self.rotation,
                zoom: self.zoom,
            },
            coloring: ColoringConfig {
                protein: self.protein_color,
                hetatm: self.hetatm_color,
            },
            ligand: self.ligand,
            show_solvent: self.show_solvent,
            style: StyleConfig { spec, registry },
            resolution,
        })
    }
}
