use super::DECORATION_SCALE;
use super::model::{Control, InterfaceController};
use crate::geometry::Size;
use crate::gui::knob;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;

/// Repaints the whole surface: background slide, then every knob with its decoration.
/// `displayed` is the allocated widget size; knobs are laid out in logical units.
pub fn draw(
    cr: &Context,
    controller: &InterfaceController,
    background: Option<&Pixbuf>,
    colors: &ThemeColors,
    displayed: Size,
) -> Result<(), cairo::Error> {
    clear(cr)?;

    if let Some(pixbuf) = background {
        draw_background(cr, pixbuf, displayed)?;
    }

    let (sx, sy) = controller.surface().factors(displayed);
    cr.save()?;
    cr.scale(1.0 / sx, 1.0 / sy);
    for control in controller.controls() {
        draw_decoration(cr, control)?;
        knob::draw(cr, &control.knob, colors)?;
    }
    cr.restore()
}

fn clear(cr: &Context) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_operator(cairo::Operator::Clear);
    cr.paint()?;
    cr.restore()
}

fn draw_background(cr: &Context, pixbuf: &Pixbuf, displayed: Size) -> Result<(), cairo::Error> {
    let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
    if w <= 0.0 || h <= 0.0 || displayed.is_empty() {
        return Ok(());
    }

    // cover the surface, cropping whatever overflows
    let scale = (displayed.width / w).max(displayed.height / h);
    cr.save()?;
    cr.translate(
        (displayed.width - w * scale) / 2.0,
        (displayed.height - h * scale) / 2.0,
    );
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_decoration(cr: &Context, control: &Control) -> Result<(), cairo::Error> {
    let Some(pixbuf) = control.decoration.image() else {
        return Ok(());
    };
    let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
    if w <= 0.0 || h <= 0.0 {
        return Ok(());
    }

    let center = control.knob.center();
    let scale = (control.knob.radius() * 2.0 * DECORATION_SCALE) / w.max(h);

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(control.decoration.rotation_degrees().to_radians());
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, -w / 2.0, -h / 2.0);
    cr.paint()?;
    cr.restore()
}
