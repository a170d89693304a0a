use crate::utils::parser;
use clap::Parser;
use pdb2png::core::color::ColorSpec;
use pdb2png::engine::config::Rotation;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "pdb2png",
    version,
    about = "pdb2png - Render a molecular structure file to a ray-traced PNG image with PyMOL.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the input structure file (PDB, mmCIF, or any format PyMOL loads).
    #[arg(value_name = "INPUT", required_unless_present = "list_styles")]
    pub input: Option<PathBuf>,

    /// Path for the rendered image. Defaults to the input path with a .png extension.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Camera ---
    /// Rotate the structure about x, y and z, in degrees (e.g. '0,90,0').
    #[arg(
        long,
        alias = "protein_rotate",
        value_name = "X,Y,Z",
        value_parser = parser::parse_rotation,
        allow_hyphen_values = true
    )]
    pub protein_rotate: Option<Rotation>,

    /// Zoom buffer around the whole structure, e.g. -40 (zoomed in) to 100 (zoomed out).
    #[arg(
        long,
        alias = "protein_zoom",
        value_name = "FLOAT",
        allow_negative_numbers = true
    )]
    pub protein_zoom: Option<f64>,

    // --- Colors ---
    /// Protein color: a color name, or a flat list of RGB triples cycled per chain.
    #[arg(long, alias = "protein_color", value_name = "COLOR", value_parser = parser::parse_color)]
    pub protein_color: Option<ColorSpec>,

    /// Heteroatom color: a color name, or a flat list of RGB triples cycled per chain.
    #[arg(long, alias = "hetatm_color", value_name = "COLOR", value_parser = parser::parse_color)]
    pub hetatm_color: Option<ColorSpec>,

    // --- Ligand ---
    /// Residue name of a ligand to select, zoom to and color.
    #[arg(long, alias = "ligand_id", value_name = "RESN")]
    pub ligand_id: Option<String>,

    /// Restrict the ligand to one chain.
    #[arg(long, alias = "ligand_chain", value_name = "ID")]
    pub ligand_chain: Option<String>,

    /// Zoom buffer around the ligand.
    #[arg(
        long,
        alias = "ligand_zoom",
        value_name = "FLOAT",
        allow_negative_numbers = true
    )]
    pub ligand_zoom: Option<f64>,

    /// Ligand color: a color name, or an RGB triple.
    #[arg(
        long,
        alias = "ligand_color",
        value_name = "COLOR",
        value_parser = parser::parse_color
    )]
    pub ligand_color: Option<ColorSpec>,

    // --- Rendering ---
    /// Keep water molecules visible.
    #[arg(long, alias = "show_water")]
    pub show_water: bool,

    /// A registered style name (see --list-styles) or an inline JSON object of settings.
    #[arg(long, alias = "render_style", value_name = "STYLE")]
    pub render_style: Option<String>,

    /// Image width in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S render.width=800
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// Path to the PyMOL executable.
    #[arg(long, env = "PYMOL_EXECUTABLE", value_name = "PATH")]
    pub pymol: Option<PathBuf>,

    /// Print the available render styles and exit.
    #[arg(long)]
    pub list_styles: bool,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
