pub mod render;
pub mod styles;
