pub mod model;
pub mod view;

pub use model::{ChangeHandler, KnobError, KnobSpec, RotaryKnob};
pub use view::draw;

/// Angular domain of every knob, radians from the positive x axis (screen coordinates).
pub const MIN_ANGLE: f64 = -135.0 * (std::f64::consts::PI / 180.0);
pub const MAX_ANGLE: f64 = 135.0 * (std::f64::consts::PI / 180.0);

pub const CENTER_DOT_RADIUS: f64 = 3.0;
pub const INDICATOR_LENGTH_FACTOR: f64 = 0.7; // relative to the hit radius
pub const INDICATOR_WIDTH: f64 = 3.0;
pub const END_DOT_RADIUS: f64 = 5.0;
pub const RANGE_ARC_WIDTH: f64 = 2.0;
