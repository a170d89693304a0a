//! # pdb2png Core Library
//!
//! Renders molecular structures (PDB, mmCIF and anything else the engine can
//! load) to ray-traced PNG images through an external molecular graphics engine.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless value types: colors and palettes,
//!   typed atom selections, and style presets with their registry.
//!
//! - **[`engine`]: The Logic Core.** The [`engine::traits::SceneEngine`] interface,
//!   the PyMOL backend, the owning [`engine::session::Session`], and the
//!   coloring and styling steps that turn value types into engine commands.
//!
//! - **[`workflows`]: The Public API.** [`workflows::render::run`] executes one
//!   complete render from a validated [`engine::config::RenderConfig`].

pub mod core;
pub mod engine;
pub mod workflows;
