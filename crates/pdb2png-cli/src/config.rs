//! Layered configuration: built-in defaults, then the TOML file, then `--set`
//! overrides, then explicit command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, build_registry, load_file_config};
pub use models::AppConfig;
