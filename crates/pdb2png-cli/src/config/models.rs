use pdb2png::engine::config::RenderConfig;
use pdb2png::engine::pymol::PymolOptions;

/// Everything the render command needs after all configuration layers are merged.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub engine: PymolOptions,
}
