pub mod animation;
pub mod character;
pub mod sprite;
pub mod state;
