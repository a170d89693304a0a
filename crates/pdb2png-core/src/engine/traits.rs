use super::error::EngineError;
use crate::core::color::Rgb;
use crate::core::selection::Selection;
use crate::core::style::SettingValue;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The imperative scene API of a molecular-visualization engine.
///
/// Implementors hold one process-wide scene. Every call mutates or queries that
/// scene, so a single engine must never be driven from two places at once; the
/// [`Session`](super::session::Session) wrapper enforces this through ownership.
pub trait SceneEngine {
    /// Discards every loaded object, selection, color and setting.
    fn reinitialize(&mut self) -> Result<(), EngineError>;

    /// Loads a structure file into the scene.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Orients the camera along the principal axes of the scene.
    fn orient(&mut self) -> Result<(), EngineError>;

    fn rotate(&mut self, axis: Axis, degrees: f64) -> Result<(), EngineError>;

    /// Chain identifiers of the loaded structure, in engine order.
    fn chains(&mut self) -> Result<Vec<String>, EngineError>;

    /// Stores `selection` under `name` and returns the number of atoms it holds.
    fn select(&mut self, name: &str, selection: &Selection) -> Result<usize, EngineError>;

    fn count_atoms(&mut self, selection: &Selection) -> Result<usize, EngineError>;

    /// Defines (or redefines) a named color.
    fn set_color(&mut self, name: &str, rgb: Rgb) -> Result<(), EngineError>;

    /// Colors the selected atoms with a named color.
    fn color(&mut self, color: &str, selection: &Selection) -> Result<(), EngineError>;

    /// Frames `selection` with `buffer` Ångström of padding.
    fn zoom(&mut self, selection: &Selection, buffer: f64) -> Result<(), EngineError>;

    fn hide(&mut self, representation: &str, selection: &Selection) -> Result<(), EngineError>;

    fn set(&mut self, setting: &str, value: &SettingValue) -> Result<(), EngineError>;

    fn bg_color(&mut self, color: &str) -> Result<(), EngineError>;

    fn ray(&mut self, width: u32, height: u32) -> Result<(), EngineError>;

    /// Writes the last ray-traced image.
    fn save(&mut self, path: &Path) -> Result<(), EngineError>;
}

impl<E: SceneEngine + ?Sized> SceneEngine for &mut E {
    fn reinitialize(&mut self) -> Result<(), EngineError> {
        (**self).reinitialize()
    }
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        (**self).load(path)
    }
    fn orient(&mut self) -> Result<(), EngineError> {
        (**self).orient()
    }
    fn rotate(&mut self, axis: Axis, degrees: f64) -> Result<(), EngineError> {
        (**self).rotate(axis, degrees)
    }
    fn chains(&mut self) -> Result<Vec<String>, EngineError> {
        (**self).chains()
    }
    fn select(&mut self, name: &str, selection: &Selection) -> Result<usize, EngineError> {
        (**self).select(name, selection)
    }
    fn count_atoms(&mut self, selection: &Selection) -> Result<usize, EngineError> {
        (**self).count_atoms(selection)
    }
    fn set_color(&mut self, name: &str, rgb: Rgb) -> Result<(), EngineError> {
        (**self).set_color(name, rgb)
    }
    fn color(&mut self, color: &str, selection: &Selection) -> Result<(), EngineError> {
        (**self).color(color, selection)
    }
    fn zoom(&mut self, selection: &Selection, buffer: f64) -> Result<(), EngineError> {
        (**self).zoom(selection, buffer)
    }
    fn hide(&mut self, representation: &str, selection: &Selection) -> Result<(), EngineError> {
        (**self).hide(representation, selection)
    }
    fn set(&mut self, setting: &str, value: &SettingValue) -> Result<(), EngineError> {
        (**self).set(setting, value)
    }
    fn bg_color(&mut self, color: &str) -> Result<(), EngineError> {
        (**self).bg_color(color)
    }
    fn ray(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        (**self).ray(width, height)
    }
    fn save(&mut self, path: &Path) -> Result<(), EngineError> {
        (**self).save(path)
    }
}
