pub mod raster;
pub mod surface;

pub use raster::RasterSurface;
pub use surface::{Surface, SurfaceOp};
