pub mod downstream;
pub mod model;
pub mod view;

pub use downstream::{Detached, Downstream};
pub use model::{Control, Decoration, InterfaceController, KnobRole, PointerAction, Power};
pub use view::draw;

pub const DECORATION_SCALE: f64 = 2.0; // decoration diameter relative to the hit diameter
