//! # Core Module
//!
//! Stateless models shared by the engine layer and the command-line front end.
//!
//! - **Colors** ([`color`]) - RGB triples, palettes and the named-or-palette [`color::ColorSpec`]
//! - **Selections** ([`selection`]) - Typed atom selections rendered to the engine's syntax
//! - **Styles** ([`style`]) - Setting values, ordered style settings and the preset registry
//!
//! Nothing in here talks to the rendering engine.

pub mod color;
pub mod selection;
pub mod style;
