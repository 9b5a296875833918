use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `self` to `other`, screen coordinates (y grows downwards).
    pub fn angle_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn on_circle(&self, radius: f64, angle: f64) -> Point {
        Point::new(
            self.x + radius * angle.cos(),
            self.y + radius * angle.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Where the rendering surface currently sits on screen and how big it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub origin: Point,
    pub size: Size,
}

impl Viewport {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(Point::default(), Size::new(width, height))
    }
}

/// Fixed logical resolution knobs are laid out in, independent of the displayed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceScale {
    logical: Size,
}

impl SurfaceScale {
    pub fn new(logical: Size) -> Self {
        Self { logical }
    }

    pub fn logical(&self) -> Size {
        self.logical
    }

    /// Per-axis factors from displayed units to logical units. Degenerate axes map 1:1.
    pub fn factors(&self, displayed: Size) -> (f64, f64) {
        let axis = |logical: f64, shown: f64| {
            if shown > 0.0 && logical > 0.0 {
                logical / shown
            } else {
                1.0
            }
        };
        (
            axis(self.logical.width, displayed.width),
            axis(self.logical.height, displayed.height),
        )
    }

    pub fn to_logical(&self, client: Point, viewport: Viewport) -> Point {
        let (sx, sy) = self.factors(viewport.size);
        Point::new(
            (client.x - viewport.origin.x) * sx,
            (client.y - viewport.origin.y) * sy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_angle_to_uses_screen_orientation() {
        let center = Point::new(10.0, 10.0);
        assert_eq!(center.angle_to(Point::new(20.0, 10.0)), 0.0);
        assert!((center.angle_to(Point::new(10.0, 20.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((center.angle_to(Point::new(10.0, 0.0)) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_to_logical_scales_each_axis() {
        let scale = SurfaceScale::new(Size::new(1920.0, 1080.0));
        let viewport = Viewport::new(Point::new(100.0, 50.0), Size::new(960.0, 270.0));

        let p = scale.to_logical(Point::new(580.0, 150.0), viewport);
        assert_eq!(p, Point::new(960.0, 400.0));
    }

    #[test]
    fn test_to_logical_with_empty_viewport_is_identity() {
        let scale = SurfaceScale::new(Size::new(1920.0, 1080.0));
        let p = scale.to_logical(Point::new(30.0, 40.0), Viewport::default());
        assert_eq!(p, Point::new(30.0, 40.0));
    }
}
