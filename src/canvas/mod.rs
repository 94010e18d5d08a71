pub mod journal;
pub mod model;
pub mod raster;
pub mod session;

pub use journal::CommandJournal;
pub use model::{CanvasBaseline, CanvasCommand, Color, Tool};
pub use raster::RasterSurface;
pub use session::SessionState;
