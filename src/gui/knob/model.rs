use crate::gui::knob::{MAX_ANGLE, MIN_ANGLE};
use crate::geometry::Point;
use std::fmt;
use thiserror::Error;

/// Called with the new value whenever a drag moves the knob onto a different step.
pub type ChangeHandler = Box<dyn FnMut(f64)>;

#[derive(Debug, Error, PartialEq)]
pub enum KnobError {
    #[error("Invalid knob range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("Invalid knob step {0}: must be positive")]
    InvalidStep(f64),
    #[error("Invalid knob radius {0}: must be positive")]
    InvalidRadius(f64),
}

/// Fixed geometry and value domain of a knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobSpec {
    pub center: Point,
    pub radius: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl KnobSpec {
    pub fn validate(&self) -> Result<(), KnobError> {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(KnobError::InvalidRadius(self.radius));
        }
        if self.min.is_nan() || self.max.is_nan() || self.min >= self.max {
            return Err(KnobError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.step.is_nan() || self.step <= 0.0 {
            return Err(KnobError::InvalidStep(self.step));
        }
        Ok(())
    }
}

pub struct RotaryKnob {
    spec: KnobSpec,
    value: f64,
    angle: f64,
    dragging: bool,
    on_change: Option<ChangeHandler>,
}

impl fmt::Debug for RotaryKnob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotaryKnob")
            .field("spec", &self.spec)
            .field("value", &self.value)
            .field("angle", &self.angle)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}

impl RotaryKnob {
    pub fn new(spec: KnobSpec) -> Result<Self, KnobError> {
        spec.validate()?;
        Ok(Self {
            spec,
            value: spec.min,
            angle: MIN_ANGLE,
            dragging: false,
            on_change: None,
        })
    }

    pub fn with_on_change(mut self, handler: impl FnMut(f64) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn spec(&self) -> &KnobSpec {
        &self.spec
    }

    pub fn center(&self) -> Point {
        self.spec.center
    }

    pub fn radius(&self) -> f64 {
        self.spec.radius
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Indicator angle in radians, always within the angular domain.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_inside(&self, point: Point) -> bool {
        self.spec.center.distance_to(point) <= self.spec.radius
    }

    /// Claims the gesture if `point` hits the knob. The value jumps to the pointer right away.
    pub fn start_drag(&mut self, point: Point) -> bool {
        if !self.is_inside(point) {
            return false;
        }
        self.dragging = true;
        self.update_from_pointer(point);
        true
    }

    /// Follows the pointer while dragging. Returns whether the value changed.
    pub fn update_from_pointer(&mut self, point: Point) -> bool {
        if !self.dragging {
            return false;
        }

        let angle = self.spec.center.angle_to(point).clamp(MIN_ANGLE, MAX_ANGLE);
        let value = self.value_for_angle(angle);

        if value == self.value {
            return false;
        }

        self.value = value;
        self.angle = angle;
        if let Some(handler) = self.on_change.as_mut() {
            handler(value);
        }
        true
    }

    pub fn stop_drag(&mut self) {
        self.dragging = false;
    }

    /// Programmatic update; never notifies the change handler.
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(self.spec.min, self.spec.max);
        self.angle = self.angle_for_value(self.value);
    }

    /// Swaps geometry and range, keeping the current value as far as the new range allows.
    pub fn reshape(&mut self, spec: KnobSpec) -> Result<(), KnobError> {
        spec.validate()?;
        self.spec = spec;
        self.set_value(self.value);
        Ok(())
    }

    /// Linear angle-to-value mapping, snapped to the step and clamped to the range.
    pub fn value_for_angle(&self, angle: f64) -> f64 {
        let KnobSpec { min, max, step, .. } = self.spec;
        let angle = angle.clamp(MIN_ANGLE, MAX_ANGLE);
        let normalized = (angle - MIN_ANGLE) / (MAX_ANGLE - MIN_ANGLE);
        let raw = min + normalized * (max - min);
        // halves round towards +inf on both sides of zero
        let snapped = (raw / step + 0.5).floor() * step;
        snapped.clamp(min, max)
    }

    pub fn angle_for_value(&self, value: f64) -> f64 {
        let KnobSpec { min, max, .. } = self.spec;
        let normalized = (value.clamp(min, max) - min) / (max - min);
        MIN_ANGLE + normalized * (MAX_ANGLE - MIN_ANGLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    fn spec(min: f64, max: f64, step: f64) -> KnobSpec {
        KnobSpec {
            center: CENTER,
            radius: 30.0,
            min,
            max,
            step,
        }
    }

    fn year_knob() -> RotaryKnob {
        RotaryKnob::new(spec(2010.0, 2125.0, 1.0)).unwrap()
    }

    fn length_knob() -> RotaryKnob {
        RotaryKnob::new(spec(0.0, 2.0, 1.0)).unwrap()
    }

    fn at_angle(angle: f64, distance: f64) -> Point {
        CENTER.on_circle(distance, angle)
    }

    fn recording(knob: RotaryKnob) -> (RotaryKnob, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (knob.with_on_change(move |v| sink.borrow_mut().push(v)), seen)
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        assert_eq!(
            RotaryKnob::new(spec(5.0, 5.0, 1.0)).unwrap_err(),
            KnobError::InvalidRange { min: 5.0, max: 5.0 }
        );
        assert_eq!(
            RotaryKnob::new(spec(0.0, 1.0, 0.0)).unwrap_err(),
            KnobError::InvalidStep(0.0)
        );
        let mut bad = spec(0.0, 1.0, 1.0);
        bad.radius = -1.0;
        assert_eq!(
            RotaryKnob::new(bad).unwrap_err(),
            KnobError::InvalidRadius(-1.0)
        );
    }

    #[test]
    fn test_new_knob_starts_at_min() {
        let knob = year_knob();
        assert_eq!(knob.value(), 2010.0);
        assert_eq!(knob.angle(), MIN_ANGLE);
        assert!(!knob.is_dragging());
    }

    #[test]
    fn test_hit_test_includes_boundary() {
        let knob = year_knob();
        assert!(knob.is_inside(CENTER));
        assert!(knob.is_inside(Point::new(130.0, 100.0)));
        assert!(!knob.is_inside(Point::new(130.1, 100.0)));
        assert!(!knob.is_inside(Point::new(122.0, 122.0)));
    }

    #[test]
    fn test_start_drag_outside_leaves_state_unchanged() {
        let (mut knob, seen) = recording(year_knob());
        knob.set_value(2050.0);
        let angle = knob.angle();

        for point in [
            Point::new(0.0, 0.0),
            Point::new(131.0, 100.0),
            Point::new(100.0, 69.0),
            at_angle(1.0, 45.0),
        ] {
            assert!(!knob.start_drag(point));
            assert!(!knob.is_dragging());
            assert_eq!(knob.value(), 2050.0);
            assert_eq!(knob.angle(), angle);
        }
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_start_drag_inside_sets_value_from_pointer() {
        let (mut knob, seen) = recording(length_knob());

        assert!(knob.start_drag(at_angle(0.0, 10.0)));
        assert!(knob.is_dragging());
        assert_eq!(knob.value(), 1.0);
        assert_eq!(*seen.borrow(), vec![1.0]);
    }

    #[test]
    fn test_halfway_angle_maps_to_medium() {
        let knob = length_knob();
        assert_eq!(knob.value_for_angle(0.0), 1.0);
        assert_eq!(knob.value_for_angle(MIN_ANGLE), 0.0);
        assert_eq!(knob.value_for_angle(MAX_ANGLE), 2.0);
    }

    #[test]
    fn test_mapping_is_monotonic_and_bounded() {
        for knob in [year_knob(), length_knob()] {
            let mut previous = f64::NEG_INFINITY;
            for i in 0..=1000 {
                let angle = MIN_ANGLE + (MAX_ANGLE - MIN_ANGLE) * (i as f64 / 1000.0);
                let value = knob.value_for_angle(angle);
                assert!(value >= previous);
                assert!(value >= knob.spec().min && value <= knob.spec().max);
                previous = value;
            }
        }
    }

    #[test]
    fn test_quantization_rounds_and_caps() {
        let knob = year_knob();
        let range = MAX_ANGLE - MIN_ANGLE;
        // 2124.6 rounds up to the maximum
        let angle = MIN_ANGLE + range * (114.6 / 115.0);
        assert_eq!(knob.value_for_angle(angle), 2125.0);
        // 2010.4 rounds down to the minimum
        let angle = MIN_ANGLE + range * (0.4 / 115.0);
        assert_eq!(knob.value_for_angle(angle), 2010.0);
        assert_eq!(knob.value_for_angle(MAX_ANGLE + 1.0), 2125.0);
    }

    #[test]
    fn test_halves_round_up_below_zero() {
        let knob = RotaryKnob::new(spec(-1.0, 0.0, 1.0)).unwrap();
        assert_eq!(knob.value_for_angle(0.0), 0.0);

        let knob = RotaryKnob::new(spec(-2.0, -1.0, 1.0)).unwrap();
        // -1.5 goes to -1, not -2
        assert_eq!(knob.value_for_angle(0.0), -1.0);
    }

    #[test]
    fn test_pointer_behind_knob_clamps_to_domain_edges() {
        let (mut knob, _) = recording(year_knob());
        assert!(knob.start_drag(at_angle(3.0, 10.0)));
        assert_eq!(knob.value(), 2125.0);
        assert_eq!(knob.angle(), MAX_ANGLE);

        knob.update_from_pointer(at_angle(-3.0, 10.0));
        assert_eq!(knob.value(), 2010.0);
        assert_eq!(knob.angle(), MIN_ANGLE);
    }

    #[test]
    fn test_change_fires_once_per_distinct_value() {
        let (mut knob, seen) = recording(length_knob());
        knob.set_value(0.0);

        assert!(knob.start_drag(at_angle(MIN_ANGLE, 10.0)));
        assert!(seen.borrow().is_empty());

        // many small moves sweeping the whole domain
        for i in 0..=200 {
            let angle = MIN_ANGLE + (MAX_ANGLE - MIN_ANGLE) * (i as f64 / 200.0);
            knob.update_from_pointer(at_angle(angle, 20.0));
        }
        // and the same spot repeatedly
        for _ in 0..10 {
            assert!(!knob.update_from_pointer(at_angle(MAX_ANGLE, 20.0)));
        }

        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_update_is_ignored_when_not_dragging() {
        let (mut knob, seen) = recording(length_knob());
        assert!(!knob.update_from_pointer(at_angle(MAX_ANGLE, 10.0)));
        assert_eq!(knob.value(), 0.0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_stop_drag_keeps_value_and_angle() {
        let (mut knob, _) = recording(year_knob());
        knob.start_drag(at_angle(0.5, 10.0));
        let (value, angle) = (knob.value(), knob.angle());

        knob.stop_drag();
        assert!(!knob.is_dragging());
        assert_eq!(knob.value(), value);
        assert_eq!(knob.angle(), angle);

        assert!(!knob.update_from_pointer(at_angle(-1.0, 10.0)));
        assert_eq!(knob.value(), value);
    }

    #[test]
    fn test_set_value_clamps_and_skips_handler() {
        let (mut knob, seen) = recording(year_knob());

        knob.set_value(1900.0);
        assert_eq!(knob.value(), 2010.0);
        assert_eq!(knob.angle(), MIN_ANGLE);

        knob.set_value(3000.0);
        assert_eq!(knob.value(), 2125.0);
        assert_eq!(knob.angle(), MAX_ANGLE);

        knob.set_value(2067.5);
        assert_eq!(knob.value(), 2067.5);
        assert!(knob.angle().abs() < 1e-12);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_set_value_angle_round_trips_through_pointer() {
        for v in [2010.0, 2025.0, 2067.0, 2100.0, 2125.0] {
            let mut source = year_knob();
            source.set_value(v);

            let mut probe = year_knob();
            probe.set_value(if v == 2010.0 { 2125.0 } else { 2010.0 });
            probe.start_drag(at_angle(source.angle(), 15.0));
            assert_eq!(probe.value(), v);
        }
    }

    #[test]
    fn test_reshape_reclamps_value() {
        let (mut knob, seen) = recording(year_knob());
        knob.set_value(2100.0);

        knob.reshape(spec(2010.0, 2050.0, 1.0)).unwrap();
        assert_eq!(knob.value(), 2050.0);
        assert_eq!(knob.angle(), MAX_ANGLE);
        assert!(seen.borrow().is_empty());

        assert!(knob.reshape(spec(1.0, 0.0, 1.0)).is_err());
        assert_eq!(knob.spec().max, 2050.0);
    }
}
