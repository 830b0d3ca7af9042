//! Native front-end for the particle tree: wgpu renderer, winit shell and
//! the wish service adapter. Scene logic lives in `tree_core`.

pub mod app;
pub mod geometry;
pub mod keyboard;
pub mod renderer;
pub mod wish;

pub use app::App;
pub use keyboard::{action_for_key, Action};
pub use wish::{WishBackend, WishConfig, WishDesk, WishError, WishService};
