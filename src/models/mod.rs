// Module exports for models

pub mod day_range;
pub mod guide;
pub mod render_state;
pub mod settings;
pub mod timezone;
