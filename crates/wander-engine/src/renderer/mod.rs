pub mod draw;
pub mod projection;
pub mod traits;

// Re-export key types for convenient access
pub use draw::{DrawCommand, DrawList, Rgba, Shadow};
pub use projection::{FloorTile, IsoProjection};
pub use traits::{FrameData, Renderer};
