pub mod config;
pub mod layout;
pub mod model;

pub use config::PadConfig;
pub use layout::{CanvasSize, LayoutConfig, Viewport};
pub use model::*;

// Re-export kurbo geometry so downstream crates share one point type
pub use kurbo::{Point, Rect, Vec2};
