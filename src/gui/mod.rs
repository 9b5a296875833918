pub mod app;
pub mod glue;
pub mod knob;
pub mod panel;
pub mod theme;
pub mod window;
