pub mod input;
pub mod pad;
pub mod tools;

pub use input::{InputEvent, MouseInput, MouseKind, TouchInput, TouchKind};
pub use pad::{Downloader, DrawingPad};
pub use tools::{DrawingState, StrokeTool};
