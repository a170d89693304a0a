use pdb2png::core::style::DEFAULT_STYLE;

pub struct DefaultsConfig {
    pub width: u32,
    pub height: u32,
    pub style: String,
    pub show_water: bool,
    pub ligand_zoom: f64,
    pub pymol_executable: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1600,
            style: DEFAULT_STYLE.to_string(),
            show_water: false,
            ligand_zoom: 10.0,
            pymol_executable: "pymol".to_string(),
        }
    }
}
