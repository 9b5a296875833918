use crate::geometry::Viewport;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn set_class(widget: &impl IsA<gtk::Widget>, class: &str, enabled: bool) {
    if enabled {
        widget.add_css_class(class);
    } else {
        widget.remove_css_class(class);
    }
}

/// Pointer coordinates from gestures are widget-relative, so the origin is always zero.
pub fn viewport_of(widget: &impl IsA<gtk::Widget>) -> Viewport {
    Viewport::sized(widget.width() as f64, widget.height() as f64)
}

pub fn grabbing_cursor() -> Option<gdk::Cursor> {
    gdk::Cursor::from_name("grabbing", gdk::Cursor::from_name("default", None).as_ref())
}

pub fn clear_children(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}
