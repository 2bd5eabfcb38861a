pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, StageConfig};
pub use api::stage::Stage;
pub use api::types::{CharacterId, FoodId};
pub use assets::manifest::{SpriteManifest, SpriteSource};
pub use assets::registry::SpriteLibrary;
pub use assets::sheet::{FrameImage, SheetError, SheetSlicer};
pub use components::character::Character;
pub use components::sprite::{SheetInfo, SpriteKey};
pub use components::state::{JumpKind, State};
pub use core::food::{FoodField, FoodItem};
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::draw::{DrawCommand, DrawList, Rgba};
pub use renderer::projection::IsoProjection;
pub use renderer::traits::{FrameData, Renderer};
