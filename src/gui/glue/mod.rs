pub mod cursor;
pub mod sections;
pub mod slideshow;

pub use cursor::CursorCache;
pub use sections::{SectionContent, SectionPanel};
pub use slideshow::Slideshow;
