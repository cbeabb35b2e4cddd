// Calendar time-grid library
// Layout, live-clock and drag-to-create engine behind week/day views

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::TimeGridError;
pub use models::render_state::RenderState;
pub use services::controller::{PointerEvent, TimeGridController};
