use super::error::EngineError;
use super::traits::SceneEngine;
use crate::core::color::{ColorSpec, Rgb};
use crate::core::selection::Selection;
use tracing::{debug, instrument};

/// One chain that received a palette color.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainColor {
    pub chain: String,
    pub color_name: String,
    pub rgb: Rgb,
    pub atoms: usize,
}

/// What the cycler did for one entity class (protein, hetatm, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ColoringReport {
    Uniform { entity: String, color: String },
    PerChain { entity: String, chains: Vec<ChainColor> },
}

impl ColoringReport {
    pub fn entity(&self) -> &str {
        match self {
            ColoringReport::Uniform { entity, .. } | ColoringReport::PerChain { entity, .. } => {
                entity
            }
        }
    }
}

/// Assigns colors to one entity class, chain by chain.
///
/// `entity` labels the generated selection and color names; `scope` restricts
/// the class (e.g. `not hetatm` for protein).
pub struct ColorCycler<'a> {
    entity: &'a str,
    scope: Selection,
}

impl<'a> ColorCycler<'a> {
    pub fn new(entity: &'a str, scope: Selection) -> Self {
        Self { entity, scope }
    }

    /// A named color is applied to the whole scope at once. A palette walks
    /// `chains` in order, skips chains with no atoms in scope, and gives each
    /// remaining chain the next triple, wrapping around the palette.
    #[instrument(skip_all, fields(entity = self.entity))]
    pub fn apply<E: SceneEngine>(
        &self,
        engine: &mut E,
        spec: &ColorSpec,
        chains: &[String],
    ) -> Result<ColoringReport, EngineError> {
        let palette = match spec {
            ColorSpec::Named(name) => {
                debug!("Coloring all '{}' atoms {}", self.entity, name);
                engine.color(name, &self.scope)?;
                return Ok(ColoringReport::Uniform {
                    entity: self.entity.to_string(),
                    color: name.clone(),
                });
            }
            ColorSpec::Palette(palette) => palette,
        };

        let mut next_color = palette.cycle();
        let mut assigned = Vec::new();
        for chain in chains {
            let selection_name = format!("sel_{}_{}", self.entity, chain);
            let scoped = Selection::chain(chain.as_str()).and(self.scope.clone());
            let atoms = engine.select(&selection_name, &scoped)?;
            if atoms == 0 {
                debug!("Chain {} has no '{}' atoms, skipping", chain, self.entity);
                continue;
            }

            let Some(rgb) = next_color.next() else {
                break;
            };
            let color_name = format!("{}_color_{}", self.entity, chain);
            engine.set_color(&color_name, rgb)?;
            engine.color(&color_name, &Selection::named(selection_name.as_str()))?;
            debug!("Chain {} ({} atoms) colored {}", chain, atoms, rgb);

            assigned.push(ChainColor {
                chain: chain.clone(),
                color_name,
                rgb,
                atoms,
            });
        }

        Ok(ColoringReport::PerChain {
            entity: self.entity.to_string(),
            chains: assigned,
        })
    }
}
