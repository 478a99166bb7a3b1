pub mod cli;
pub mod display;
pub mod error;
pub mod rasterizer;
pub mod render;
pub mod scene;
pub mod surface;
pub mod tui;
pub mod vector;

pub use error::{DomainError, SceneError};
pub use rasterizer::{glyph, PaletteRasterizer, Rasterizer, PALETTE};
pub use render::{render, Camera, Canvas, Light, Projection, UNLIT};
pub use scene::Scene;
pub use surface::{CubeGenerator, PointSource, SamplePoint};
