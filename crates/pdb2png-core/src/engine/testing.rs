//! In-memory stand-in for the rendering engine, used by unit tests.

use super::error::EngineError;
use super::traits::{Axis, SceneEngine};
use crate::core::color::Rgb;
use crate::core::selection::Selection;
use crate::core::style::SettingValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct MockAtom {
    pub chain: String,
    pub resn: String,
    pub hetatm: bool,
    pub color: Option<Rgb>,
    pub visible: bool,
}

impl MockAtom {
    pub fn polymer(chain: &str, resn: &str) -> Self {
        Self {
            chain: chain.to_string(),
            resn: resn.to_string(),
            hetatm: false,
            color: None,
            visible: true,
        }
    }

    pub fn hetero(chain: &str, resn: &str) -> Self {
        Self {
            hetatm: true,
            ..Self::polymer(chain, resn)
        }
    }

    pub fn water(chain: &str) -> Self {
        Self::hetero(chain, "HOH")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Reinitialize,
    Load(PathBuf),
    Orient,
    Rotate(Axis, f64),
    Select(String, String),
    SetColor(String, Rgb),
    Color(String, String),
    Zoom(String, f64),
    Hide(String, String),
    Set(String, SettingValue),
    BgColor(String),
    Ray(u32, u32),
    Save(PathBuf),
}

const KNOWN_COLORS: &[(&str, [f64; 3])] = &[
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("white", [1.0, 1.0, 1.0]),
    ("black", [0.0, 0.0, 0.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("grey50", [0.5, 0.5, 0.5]),
];

#[derive(Debug, Default)]
pub struct MockEngine {
    structures: HashMap<PathBuf, Vec<MockAtom>>,
    atoms: Vec<MockAtom>,
    named: HashMap<String, Vec<usize>>,
    colors: HashMap<String, Rgb>,
    calls: Vec<Call>,
    reinitialize_count: usize,
    has_image: bool,
    fail_on: Option<&'static str>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `path` loadable with the given atoms.
    pub fn with_structure(mut self, path: &str, atoms: Vec<MockAtom>) -> Self {
        self.structures.insert(PathBuf::from(path), atoms);
        self
    }

    /// Makes the named command fail the way a real engine error would.
    pub fn failing_on(mut self, command: &'static str) -> Self {
        self.fail_on = Some(command);
        self
    }

    pub fn atoms(&self) -> &[MockAtom] {
        &self.atoms
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn reinitialize_count(&self) -> usize {
        self.reinitialize_count
    }

    pub fn colors_of_chain(&self, chain: &str, hetatm: bool) -> Vec<Option<Rgb>> {
        self.atoms
            .iter()
            .filter(|a| a.chain == chain && a.hetatm == hetatm)
            .map(|a| a.color)
            .collect()
    }

    pub fn visible_count(&self, selection: &Selection) -> usize {
        (0..self.atoms.len())
            .filter(|&i| self.atoms[i].visible && self.matches(i, selection).unwrap_or(false))
            .count()
    }

    pub fn zooms(&self) -> Vec<(String, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Zoom(sel, buffer) => Some((sel.clone(), *buffer)),
                _ => None,
            })
            .collect()
    }

    pub fn named_selection(&self, name: &str) -> Option<Vec<&MockAtom>> {
        self.named
            .get(name)
            .map(|idx| idx.iter().map(|&i| &self.atoms[i]).collect())
    }

    fn check(&self, command: &'static str) -> Result<(), EngineError> {
        if self.fail_on == Some(command) {
            return Err(EngineError::Command {
                command: command.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn matches(&self, index: usize, selection: &Selection) -> Result<bool, EngineError> {
        let atom = &self.atoms[index];
        Ok(match selection {
            Selection::All => true,
            Selection::Named(name) => self
                .named
                .get(name)
                .ok_or_else(|| EngineError::Command {
                    command: "select".to_string(),
                    message: format!("Invalid selection name \"{}\"", name),
                })?
                .contains(&index),
            Selection::Hetatm => atom.hetatm,
            Selection::Chain(id) => atom.chain == *id,
            Selection::ResidueName(resn) => atom.resn == *resn,
            Selection::Not(inner) => !self.matches(index, inner)?,
            Selection::And(lhs, rhs) => self.matches(index, lhs)? && self.matches(index, rhs)?,
        })
    }

    fn evaluate(&self, selection: &Selection) -> Result<Vec<usize>, EngineError> {
        let mut hits = Vec::new();
        for i in 0..self.atoms.len() {
            if self.matches(i, selection)? {
                hits.push(i);
            }
        }
        Ok(hits)
    }

    fn resolve_color(&self, color: &str) -> Result<Rgb, EngineError> {
        if let Some(rgb) = self.colors.get(color) {
            return Ok(*rgb);
        }
        KNOWN_COLORS
            .iter()
            .find(|(name, _)| *name == color)
            .map(|(_, [r, g, b])| Rgb { r: *r, g: *g, b: *b })
            .ok_or_else(|| EngineError::Command {
                command: "color".to_string(),
                message: format!("Unknown color '{}'", color),
            })
    }
}

impl SceneEngine for MockEngine {
    fn reinitialize(&mut self) -> Result<(), EngineError> {
        self.check("reinitialize")?;
        self.atoms.clear();
        self.named.clear();
        self.colors.clear();
        self.has_image = false;
        self.reinitialize_count += 1;
        self.calls.push(Call::Reinitialize);
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        self.check("load")?;
        let atoms = self
            .structures
            .get(path)
            .ok_or_else(|| EngineError::Command {
                command: "load".to_string(),
                message: format!("Unable to open file '{}'", path.display()),
            })?;
        self.atoms.extend(atoms.iter().cloned());
        self.calls.push(Call::Load(path.to_path_buf()));
        Ok(())
    }

    fn orient(&mut self) -> Result<(), EngineError> {
        self.check("orient")?;
        self.calls.push(Call::Orient);
        Ok(())
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) -> Result<(), EngineError> {
        self.check("rotate")?;
        self.calls.push(Call::Rotate(axis, degrees));
        Ok(())
    }

    fn chains(&mut self) -> Result<Vec<String>, EngineError> {
        self.check("get_chains")?;
        let mut chains: Vec<String> = Vec::new();
        for atom in &self.atoms {
            if !chains.contains(&atom.chain) {
                chains.push(atom.chain.clone());
            }
        }
        Ok(chains)
    }

    fn select(&mut self, name: &str, selection: &Selection) -> Result<usize, EngineError> {
        self.check("select")?;
        let hits = self.evaluate(selection)?;
        let count = hits.len();
        self.named.insert(name.to_string(), hits);
        self.calls
            .push(Call::Select(name.to_string(), selection.to_string()));
        Ok(count)
    }

    fn count_atoms(&mut self, selection: &Selection) -> Result<usize, EngineError> {
        self.check("count_atoms")?;
        Ok(self.evaluate(selection)?.len())
    }

    fn set_color(&mut self, name: &str, rgb: Rgb) -> Result<(), EngineError> {
        self.check("set_color")?;
        self.colors.insert(name.to_string(), rgb);
        self.calls.push(Call::SetColor(name.to_string(), rgb));
        Ok(())
    }

    fn color(&mut self, color: &str, selection: &Selection) -> Result<(), EngineError> {
        self.check("color")?;
        let rgb = self.resolve_color(color)?;
        for i in self.evaluate(selection)? {
            self.atoms[i].color = Some(rgb);
        }
        self.calls
            .push(Call::Color(color.to_string(), selection.to_string()));
        Ok(())
    }

    fn zoom(&mut self, selection: &Selection, buffer: f64) -> Result<(), EngineError> {
        self.check("zoom")?;
        self.evaluate(selection)?;
        self.calls.push(Call::Zoom(selection.to_string(), buffer));
        Ok(())
    }

    fn hide(&mut self, representation: &str, selection: &Selection) -> Result<(), EngineError> {
        self.check("hide")?;
        for i in self.evaluate(selection)? {
            self.atoms[i].visible = false;
        }
        self.calls
            .push(Call::Hide(representation.to_string(), selection.to_string()));
        Ok(())
    }

    fn set(&mut self, setting: &str, value: &SettingValue) -> Result<(), EngineError> {
        self.check("set")?;
        self.calls.push(Call::Set(setting.to_string(), value.clone()));
        Ok(())
    }

    fn bg_color(&mut self, color: &str) -> Result<(), EngineError> {
        self.check("bg_color")?;
        self.resolve_color(color)?;
        self.calls.push(Call::BgColor(color.to_string()));
        Ok(())
    }

    fn ray(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        self.check("ray")?;
        self.has_image = true;
        self.calls.push(Call::Ray(width, height));
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<(), EngineError> {
        self.check("save")?;
        if !self.has_image {
            return Err(EngineError::Command {
                command: "save".to_string(),
                message: "no ray-traced image to save".to_string(),
            });
        }
        self.calls.push(Call::Save(path.to_path_buf()));
        Ok(())
    }
}
