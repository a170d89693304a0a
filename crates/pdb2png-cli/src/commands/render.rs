use crate::cli::Cli;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdb2png::engine::coloring::ColoringReport;
use pdb2png::engine::progress::ProgressReporter;
use pdb2png::engine::pymol::PymolProcess;
use pdb2png::engine::session::Session;
use pdb2png::workflows::{self, render::RenderOutcome};
use tracing::{info, warn};

pub fn run(cli: &Cli) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app = build_config(cli)?;

    let progress_handler = if cli.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let outcome = render(&app, &progress_handler);
    if outcome.is_err() {
        progress_handler.abandon();
        warn!(
            "Render stopped after {} completed phase(s).",
            progress_handler.completed_phases().len()
        );
    }
    let outcome = outcome?;

    for line in summarize(&outcome) {
        println!("{}", line);
    }
    Ok(())
}

fn render(app: &AppConfig, progress_handler: &CliProgressHandler) -> Result<RenderOutcome> {
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut process = PymolProcess::spawn(&app.engine)?;
    info!("Using PyMOL {}", process.version());
    let mut session = Session::new(process.engine());

    info!("Invoking the core render workflow...");
    let outcome = workflows::render::run(&mut session, &app.render, &reporter)?;
    Ok(outcome)
}

/// Human-readable result lines printed after a successful render.
fn summarize(outcome: &RenderOutcome) -> Vec<String> {
    let mut lines = vec![format!(
        "  structure: {} atom(s) in {} chain(s)",
        outcome.atoms,
        outcome.chains.len()
    )];
    for report in &outcome.colorings {
        let entity = report.entity();
        match report {
            ColoringReport::Uniform { color, .. } => {
                lines.push(format!("  {}: {}", entity, color));
            }
            ColoringReport::PerChain { chains, .. } if !chains.is_empty() => {
                let assigned: Vec<String> = chains
                    .iter()
                    .map(|c| format!("{} {}", c.chain, c.rgb))
                    .collect();
                lines.push(format!("  {}: {}", entity, assigned.join(", ")));
            }
            ColoringReport::PerChain { .. } => {}
        }
    }
    if let Some(atoms) = outcome.ligand_atoms {
        lines.push(format!("  ligand: {} atom(s)", atoms));
    }
    lines.push(format!(
        "✓ Image written to: {}",
        outcome.output_path.display()
    ));
    lines
}
