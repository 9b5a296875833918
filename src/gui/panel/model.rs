use crate::config::{Config, LengthKnobConfig, LengthOption, WordRange, YearKnobConfig};
use crate::geometry::{Point, Size, SurfaceScale, Viewport};
use crate::gui::knob::{KnobError, KnobSpec, RotaryKnob};
use crate::gui::panel::downstream::Downstream;
use gdk_pixbuf::Pixbuf;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum KnobRole {
    Year,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Power {
    Powered,
    #[default]
    Unpowered,
}

impl Power {
    pub fn is_on(self) -> bool {
        self == Self::Powered
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Powered => Self::Unpowered,
            Self::Unpowered => Self::Powered,
        }
    }
}

/// Image turned along with a knob.
#[derive(Debug, Clone, Default)]
pub struct Decoration {
    image: Option<Pixbuf>,
    rotation_degrees: f64,
}

impl Decoration {
    pub fn load(path: Option<&Path>) -> Self {
        let image = path.and_then(|p| match Pixbuf::from_file(p) {
            Ok(pixbuf) => Some(pixbuf),
            Err(e) => {
                log::warn!("Failed to load knob image {}: {}", p.display(), e);
                None
            }
        });
        Self {
            image,
            rotation_degrees: 0.0,
        }
    }

    pub fn image(&self) -> Option<&Pixbuf> {
        self.image.as_ref()
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    fn follow(&mut self, knob: &RotaryKnob) {
        self.rotation_degrees = knob.angle_degrees();
    }
}

#[derive(Debug)]
pub struct Control {
    pub role: KnobRole,
    pub knob: RotaryKnob,
    pub decoration: Decoration,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PointerAction {
    pub should_redraw: bool,
}

impl PointerAction {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }
}

/// Owns the knobs, the power switch and the sentence length, and routes pointer gestures
/// from the shared surface to the knobs.
pub struct InterfaceController {
    controls: Vec<Control>,
    scale: SurfaceScale,
    capturing: bool,
    power: Rc<Cell<Power>>,
    sentence_length: Rc<Cell<WordRange>>,
    downstream: Rc<RefCell<dyn Downstream>>,
}

impl InterfaceController {
    pub fn new(config: &Config, downstream: impl Downstream + 'static) -> Result<Self, KnobError> {
        let downstream: Rc<RefCell<dyn Downstream>> = Rc::new(RefCell::new(downstream));
        let power = Rc::new(Cell::new(if config.power.start_powered {
            Power::Powered
        } else {
            Power::Unpowered
        }));
        let sentence_length = Rc::new(Cell::new(config.length_knob.initial.word_range()));

        let year = Self::year_knob(&config.year_knob, &power, &downstream)?;
        let length =
            Self::length_knob(&config.length_knob, &power, &sentence_length, &downstream)?;

        // order is pointer priority
        let controls = vec![
            Control {
                role: KnobRole::Year,
                knob: year,
                decoration: Decoration::load(config.year_knob.image.as_deref()),
            },
            Control {
                role: KnobRole::Length,
                knob: length,
                decoration: Decoration::load(config.length_knob.image.as_deref()),
            },
        ];

        let mut controller = Self {
            controls,
            scale: Self::surface_scale(config),
            capturing: false,
            power,
            sentence_length,
            downstream,
        };
        controller.mirror_decorations();
        Ok(controller)
    }

    fn surface_scale(config: &Config) -> SurfaceScale {
        SurfaceScale::new(Size::new(config.surface.width, config.surface.height))
    }

    fn year_spec(cfg: &YearKnobConfig) -> KnobSpec {
        KnobSpec {
            center: Point::new(cfg.x, cfg.y),
            radius: cfg.radius,
            min: cfg.min,
            max: cfg.max,
            step: cfg.step,
        }
    }

    fn length_spec(cfg: &LengthKnobConfig) -> KnobSpec {
        KnobSpec {
            center: Point::new(cfg.x, cfg.y),
            radius: cfg.radius,
            min: 0.0,
            max: LengthOption::last_index() as f64,
            step: 1.0,
        }
    }

    fn year_knob(
        cfg: &YearKnobConfig,
        power: &Rc<Cell<Power>>,
        downstream: &Rc<RefCell<dyn Downstream>>,
    ) -> Result<RotaryKnob, KnobError> {
        let power = Rc::clone(power);
        let downstream = Rc::clone(downstream);

        let mut knob = RotaryKnob::new(Self::year_spec(cfg))?.with_on_change(move |value| {
            if !power.get().is_on() {
                return;
            }
            let year = value.round() as i32;
            log::info!("Year: {}", year);

            let mut downstream = downstream.borrow_mut();
            downstream.year_changed(year);
            downstream.set_year_weighting(year);
            downstream.regenerate();
        });
        knob.set_value(cfg.initial);
        Ok(knob)
    }

    fn length_knob(
        cfg: &LengthKnobConfig,
        power: &Rc<Cell<Power>>,
        sentence_length: &Rc<Cell<WordRange>>,
        downstream: &Rc<RefCell<dyn Downstream>>,
    ) -> Result<RotaryKnob, KnobError> {
        let power = Rc::clone(power);
        let sentence_length = Rc::clone(sentence_length);
        let downstream = Rc::clone(downstream);

        let mut knob = RotaryKnob::new(Self::length_spec(cfg))?.with_on_change(move |value| {
            if !power.get().is_on() {
                return;
            }
            let Some(option) = LengthOption::from_value(value) else {
                log::warn!("No length option for knob value {}", value);
                return;
            };
            let range = option.word_range();
            log::info!("Length: {} ({} words)", option, range);
            sentence_length.set(range);

            let mut downstream = downstream.borrow_mut();
            downstream.sentence_length_changed(range);
            downstream.regenerate();
        });
        knob.set_value(cfg.initial.as_value());
        Ok(knob)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn knob(&self, role: KnobRole) -> Option<&RotaryKnob> {
        self.controls
            .iter()
            .find(|c| c.role == role)
            .map(|c| &c.knob)
    }

    pub fn year(&self) -> Option<i32> {
        self.knob(KnobRole::Year).map(|k| k.value().round() as i32)
    }

    pub fn length_option(&self) -> Option<LengthOption> {
        self.knob(KnobRole::Length)
            .and_then(|k| LengthOption::from_value(k.value()))
    }

    pub fn sentence_length(&self) -> WordRange {
        self.sentence_length.get()
    }

    pub fn power(&self) -> Power {
        self.power.get()
    }

    pub fn surface(&self) -> SurfaceScale {
        self.scale
    }

    pub fn is_dragging(&self) -> bool {
        self.controls.iter().any(|c| c.knob.is_dragging())
    }

    /// Whether the surface should keep receiving the pointer, i.e. a knob owns the gesture.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn pointer_down(&mut self, client: Point, viewport: Viewport) -> PointerAction {
        let point = self.scale.to_logical(client, viewport);

        self.controls.iter_mut().for_each(|c| c.knob.stop_drag());
        // first knob to accept claims the gesture
        let claimed = self
            .controls
            .iter_mut()
            .position(|c| c.knob.start_drag(point))
            .map(|i| self.controls[i].role);

        match claimed {
            Some(role) => {
                log::debug!("{} knob claimed pointer at ({}, {})", role, point.x, point.y);
                self.capturing = true;
                self.mirror_decorations();
                PointerAction::new(true)
            }
            None => {
                self.capturing = false;
                PointerAction::default()
            }
        }
    }

    pub fn pointer_move(&mut self, client: Point, viewport: Viewport) -> PointerAction {
        if !self.is_dragging() {
            return PointerAction::default();
        }

        let point = self.scale.to_logical(client, viewport);
        for control in &mut self.controls {
            control.knob.update_from_pointer(point);
        }
        self.mirror_decorations();
        PointerAction::new(true)
    }

    pub fn pointer_up(&mut self) -> PointerAction {
        for control in &mut self.controls {
            control.knob.stop_drag();
        }
        self.capturing = false;
        PointerAction::default()
    }

    pub fn mirror_decorations(&mut self) {
        for control in &mut self.controls {
            control.decoration.follow(&control.knob);
        }
    }

    pub fn toggle_power(&mut self) -> Power {
        let power = self.power.get().toggled();
        self.power.set(power);
        log::info!("System {}", power);

        if power.is_on() {
            self.downstream.borrow_mut().regenerate();
        }
        power
    }

    /// Applies a reloaded config. Values, power state and callbacks survive; a config with
    /// invalid knob geometry is rejected as a whole.
    pub fn reconfigure(&mut self, config: &Config) -> Result<(), KnobError> {
        let year = Self::year_spec(&config.year_knob);
        let length = Self::length_spec(&config.length_knob);
        year.validate()?;
        length.validate()?;

        for control in &mut self.controls {
            let (spec, image) = match control.role {
                KnobRole::Year => (year, config.year_knob.image.as_deref()),
                KnobRole::Length => (length, config.length_knob.image.as_deref()),
            };
            control.knob.reshape(spec)?;
            control.decoration = Decoration::load(image);
        }
        self.scale = Self::surface_scale(config);
        self.mirror_decorations();
        Ok(())
    }
}
