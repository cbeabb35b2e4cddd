// Service module exports

pub mod column_layout;
pub mod controller;
pub mod creation_guide;
pub mod live_clock;
pub mod settings;
pub mod time_axis;
pub mod timezone_ruler;
