//! # Workflows Module
//!
//! High-level entry points that run a complete render against a [`Session`](crate::engine::session::Session).
//!
//! - **Render Workflow** ([`render`]) - Structure in, ray-traced PNG out: loading,
//!   camera setup, chain coloring, ligand focus, solvent hiding, styling and saving.

pub mod render;
