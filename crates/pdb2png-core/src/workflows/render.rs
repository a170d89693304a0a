use crate::core::color::ColorSpec;
use crate::core::selection::Selection;
use crate::core::style::StyleSettings;
use crate::engine::coloring::{ColorCycler, ColoringReport};
use crate::engine::config::{LigandConfig, RenderConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{ProgressReporter, RenderPhase};
use crate::engine::session::Session;
use crate::engine::styling::StyleApplier;
use crate::engine::traits::SceneEngine;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

const LIGAND_SELECTION: &str = "ligand";
const LIGAND_COLOR: &str = "ligand_color";
const SOLVENT_SELECTION: &str = "HOH";
const ALL_REPRESENTATIONS: &str = "everything";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub output_path: PathBuf,
    pub chains: Vec<String>,
    pub atoms: usize,
    pub colorings: Vec<ColoringReport>,
    pub ligand_atoms: Option<usize>,
    pub style: StyleSettings,
}

#[instrument(skip_all, name = "render_workflow", fields(input = %config.input_path.display()))]
pub fn run<E: SceneEngine>(
    session: &mut Session<E>,
    config: &RenderConfig,
    reporter: &ProgressReporter,
) -> Result<RenderOutcome, EngineError> {
    // === Phase 1: Fresh scene and structure ===
    reporter.start(RenderPhase::Loading);
    let engine = session.begin()?;
    engine.load(&config.input_path)?;
    engine.orient()?;
    if let Some(rotation) = config.camera.rotation {
        for (axis, degrees) in rotation.steps() {
            engine.rotate(axis, degrees)?;
        }
    }
    let chains = engine.chains()?;
    let atoms = engine.count_atoms(&Selection::All)?;
    info!(
        "Loaded {} with {} atom(s) in {} chain(s).",
        config.input_path.display(),
        atoms,
        chains.len()
    );
    reporter.message(format!("{} atom(s) in {} chain(s)", atoms, chains.len()));
    reporter.finish(RenderPhase::Loading);

    // === Phase 2: Protein and heteroatom colors ===
    reporter.start(RenderPhase::Coloring);
    let protein = config
        .coloring
        .protein
        .clone()
        .unwrap_or_else(ColorSpec::default_protein);
    let hetatm = config
        .coloring
        .hetatm
        .clone()
        .unwrap_or_else(ColorSpec::default_hetatm);
    let colorings = vec![
        ColorCycler::new("protein", Selection::polymer()).apply(engine, &protein, &chains)?,
        ColorCycler::new("hetatm", Selection::Hetatm).apply(engine, &hetatm, &chains)?,
    ];
    reporter.finish(RenderPhase::Coloring);

    // === Phase 3: Camera framing, ligand focus, solvent ===
    reporter.start(RenderPhase::Framing);
    if let Some(zoom) = config.camera.zoom {
        engine.zoom(&Selection::All, zoom)?;
    }
    let ligand_atoms = match &config.ligand {
        Some(ligand) => Some(focus_ligand(engine, ligand)?),
        None => None,
    };
    if !config.show_solvent {
        let waters = engine.select(SOLVENT_SELECTION, &Selection::solvent())?;
        debug!("Hiding {} solvent atom(s).", waters);
        engine.hide(
            ALL_REPRESENTATIONS,
            &Selection::named(SOLVENT_SELECTION),
        )?;
    }
    reporter.finish(RenderPhase::Framing);

    // === Phase 4: Style ===
    reporter.start(RenderPhase::Styling);
    let style = StyleApplier::new(&config.style.registry).apply(engine, &config.style.spec)?;
    reporter.finish(RenderPhase::Styling);

    // === Phase 5: Ray trace and save ===
    reporter.start(RenderPhase::RayTracing);
    let resolution = config.resolution;
    reporter.message(format!(
        "Ray tracing {}x{}",
        resolution.width, resolution.height
    ));
    engine.ray(resolution.width, resolution.height)?;
    reporter.finish(RenderPhase::RayTracing);

    reporter.start(RenderPhase::Saving);
    engine.save(&config.output_path)?;
    reporter.finish(RenderPhase::Saving);

    info!("Rendered image written to {}", config.output_path.display());
    Ok(RenderOutcome {
        output_path: config.output_path.clone(),
        chains,
        atoms,
        colorings,
        ligand_atoms,
        style,
    })
}

fn focus_ligand<E: SceneEngine>(
    engine: &mut E,
    ligand: &LigandConfig,
) -> Result<usize, EngineError> {
    let selection = ligand.selection();
    let atoms = engine.select(LIGAND_SELECTION, &selection)?;
    if atoms == 0 {
        return Err(EngineError::EmptySelection {
            selection: selection.to_string(),
        });
    }
    info!("Ligand '{}' selected ({} atoms).", selection, atoms);

    let named = Selection::named(LIGAND_SELECTION);
    engine.zoom(&named, ligand.zoom)?;
    match &ligand.color {
        Some(ColorSpec::Named(name)) => engine.color(name, &named)?,
        Some(ColorSpec::Palette(palette)) => {
            engine.set_color(LIGAND_COLOR, palette.first())?;
            engine.color(LIGAND_COLOR, &named)?;
        }
        None => {}
    }
    Ok(atoms)
}
