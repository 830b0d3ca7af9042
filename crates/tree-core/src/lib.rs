pub mod camera;
pub mod constants;
pub mod frame;
pub mod groups;
pub mod lighting;
pub mod mode;
pub mod palette;
pub mod render;
pub mod scene;
pub mod spatial;
pub mod transition;

pub use camera::*;
pub use constants::*;
pub use frame::*;
pub use groups::*;
pub use lighting::*;
pub use mode::*;
pub use palette::{Palette, Rgb};
pub use render::*;
pub use scene::*;
pub use spatial::*;
pub use transition::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
