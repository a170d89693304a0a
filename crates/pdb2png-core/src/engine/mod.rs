//! # Engine Module
//!
//! The stateful layer between the pure data models in [`crate::core`] and the
//! render workflow. It owns the rendering engine and translates colors,
//! selections and styles into engine commands.
//!
//! ## Architecture
//!
//! - **Engine Interface** ([`traits`]) - The [`traits::SceneEngine`] command set every backend implements
//! - **PyMOL Backend** ([`pymol`]) - A headless PyMOL child process driven over a line protocol
//! - **Session** ([`session`]) - Sole ownership of an engine with a scene reset per render
//! - **Coloring** ([`coloring`]) - Per-chain palette cycling and uniform named colors
//! - **Styling** ([`styling`]) - Resolution and application of style presets
//! - **Configuration** ([`config`]) - Validated render parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Render phase reporting for front-ends
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod coloring;
pub mod config;
pub mod error;
pub mod progress;
pub mod pymol;
pub mod session;
pub mod styling;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;
