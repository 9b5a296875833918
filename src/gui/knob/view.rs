use super::model::RotaryKnob;
use super::{
    CENTER_DOT_RADIUS, END_DOT_RADIUS, INDICATOR_LENGTH_FACTOR, INDICATOR_WIDTH, MAX_ANGLE,
    MIN_ANGLE, RANGE_ARC_WIDTH,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

struct KnobRenderer<'a> {
    knob: &'a RotaryKnob,
    colors: &'a ThemeColors,
}

impl<'a> KnobRenderer<'a> {
    fn new(knob: &'a RotaryKnob, colors: &'a ThemeColors) -> Self {
        Self { knob, colors }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_center_dot(cr)?;
        self.draw_indicator(cr)?;
        self.draw_range_arc(cr)
    }

    fn draw_center_dot(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.knob.center();
        set_source(cr, self.colors.center_dot);
        cr.new_path();
        cr.arc(center.x, center.y, CENTER_DOT_RADIUS, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_indicator(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.knob.center();
        let length = self.knob.radius() * INDICATOR_LENGTH_FACTOR;

        cr.save()?;
        // indicator is drawn along +x, then turned to the knob angle
        cr.translate(center.x, center.y);
        cr.rotate(self.knob.angle());

        set_source(cr, self.colors.indicator);
        cr.set_line_width(INDICATOR_WIDTH);
        cr.new_path();
        cr.move_to(0.0, 0.0);
        cr.line_to(length, 0.0);
        cr.stroke()?;

        cr.arc(length, 0.0, END_DOT_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;

        cr.restore()
    }

    fn draw_range_arc(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.knob.center();
        set_source(cr, self.colors.range_arc);
        cr.set_line_width(RANGE_ARC_WIDTH);
        cr.new_path();
        cr.arc(center.x, center.y, self.knob.radius(), MIN_ANGLE, MAX_ANGLE);
        cr.stroke()
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, knob: &RotaryKnob, colors: &ThemeColors) -> Result<(), cairo::Error> {
    KnobRenderer::new(knob, colors).draw(cr)
}
