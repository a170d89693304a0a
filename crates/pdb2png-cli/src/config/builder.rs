use super::defaults::DefaultsConfig;
use super::file::{FileColor, FileConfig};
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::utils::parser;
use pdb2png::core::color::ColorSpec;
use pdb2png::core::style::StyleRegistry;
use pdb2png::engine::config::{LigandConfig, RenderConfigBuilder, Rotation};
use pdb2png::engine::pymol::PymolOptions;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

pub fn build_config(cli: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = load_file_config(cli)?;
    let mut file_config = apply_set_values(file_config, &cli.set_values)?;

    let registry = build_registry(&mut file_config);

    let render_file = file_config.render.take().unwrap_or_default();
    let style_input = cli
        .render_style
        .as_deref()
        .or(render_file.style.as_deref())
        .unwrap_or(&defaults.style);
    let style = registry
        .parse(style_input)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let width = cli.width.or(render_file.width).unwrap_or(defaults.width);
    let height = cli.height.or(render_file.height).unwrap_or(defaults.height);
    let show_water = cli.show_water || render_file.show_water.unwrap_or(defaults.show_water);

    let camera_file = file_config.camera.take().unwrap_or_default();
    let rotation = cli
        .protein_rotate
        .or(camera_file.rotate.map(|[x, y, z]| Rotation { x, y, z }));
    let zoom = cli.protein_zoom.or(camera_file.zoom);

    let colors_file = file_config.colors.take().unwrap_or_default();
    let protein_color = merge_color(cli.protein_color.clone(), colors_file.protein, "colors.protein")?;
    let hetatm_color = merge_color(cli.hetatm_color.clone(), colors_file.hetatm, "colors.hetatm")?;

    let ligand_file = file_config.ligand.take().unwrap_or_default();
    let ligand = match cli.ligand_id.clone().or(ligand_file.id) {
        Some(residue_name) => Some(LigandConfig {
            residue_name,
            chain: cli.ligand_chain.clone().or(ligand_file.chain),
            zoom: cli
                .ligand_zoom
                .or(ligand_file.zoom)
                .unwrap_or(defaults.ligand_zoom),
            color: merge_color(cli.ligand_color.clone(), ligand_file.color, "ligand.color")?,
        }),
        None => {
            let orphaned = cli.ligand_chain.is_some()
                || cli.ligand_zoom.is_some()
                || cli.ligand_color.is_some()
                || ligand_file.chain.is_some()
                || ligand_file.zoom.is_some()
                || ligand_file.color.is_some();
            if orphaned {
                return Err(CliError::Config(
                    "Ligand chain, zoom or color given without a ligand id".to_string(),
                ));
            }
            None
        }
    };

    let engine_file = file_config.engine.take().unwrap_or_default();
    let engine = PymolOptions {
        executable: cli
            .pymol
            .clone()
            .or(engine_file.executable)
            .unwrap_or_else(|| PathBuf::from(&defaults.pymol_executable)),
        extra_args: engine_file.args,
    };

    let input_path = cli
        .input
        .clone()
        .ok_or_else(|| CliError::Argument("an input structure file is required".to_string()))?;

    let render = RenderConfigBuilder::new()
        .input_path(input_path)
        .output_path(cli.output.clone())
        .rotation(rotation)
        .zoom(zoom)
        .protein_color(protein_color)
        .hetatm_color(hetatm_color)
        .ligand(ligand)
        .show_solvent(show_water)
        .style(style)
        .style_registry(registry)
        .resolution(width, height)
        .build()?;

    debug!("Final render configuration: {:?}", render);
    Ok(AppConfig { render, engine })
}

/// The built-in presets plus every `[styles.<name>]` table from the config file.
pub fn build_registry(file_config: &mut FileConfig) -> StyleRegistry {
    let mut registry = StyleRegistry::new();
    for (name, settings) in std::mem::take(&mut file_config.styles) {
        debug!("Registering style '{}' from configuration file", name);
        registry.register(name, settings);
    }
    registry
}

pub fn load_file_config(cli: &Cli) -> Result<FileConfig> {
    match &cli.config {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn merge_color(
    cli_value: Option<ColorSpec>,
    file_value: Option<FileColor>,
    key: &str,
) -> Result<Option<ColorSpec>> {
    if cli_value.is_some() {
        return Ok(cli_value);
    }
    file_value
        .map(|color| {
            ColorSpec::try_from(color)
                .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "render.width" => {
                config.render.get_or_insert_with(Default::default).width =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "render.height" => {
                config.render.get_or_insert_with(Default::default).height =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "render.style" => {
                config.render.get_or_insert_with(Default::default).style =
                    Some(value_str.to_string());
            }
            "render.show-water" => {
                config.render.get_or_insert_with(Default::default).show_water =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "camera.zoom" => {
                config.camera.get_or_insert_with(Default::default).zoom =
                    Some(parse_value(key, value_str, "float")?);
            }
            "ligand.id" => {
                config.ligand.get_or_insert_with(Default::default).id =
                    Some(value_str.to_string());
            }
            "ligand.chain" => {
                config.ligand.get_or_insert_with(Default::default).chain =
                    Some(value_str.to_string());
            }
            "ligand.zoom" => {
                config.ligand.get_or_insert_with(Default::default).zoom =
                    Some(parse_value(key, value_str, "float")?);
            }
            "engine.executable" => {
                config.engine.get_or_insert_with(Default::default).executable =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
