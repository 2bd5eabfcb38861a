pub mod behavior;
pub mod render;
