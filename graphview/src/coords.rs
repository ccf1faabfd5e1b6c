//! Provides utilities related to viewport coordinates.

use cgmath::{EuclideanSpace, MetricSpace, Point2, Rad};

/// A position in viewport pixel space. The origin is the top left corner of the surface, `y`
/// grows downwards.
pub type Coordinates = Point2<f64>;

/// Size of the surface a captor is attached to, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Coordinates {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn smallest(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Euclidean distance between two contacts.
pub fn touches_distance(first: Coordinates, second: Coordinates) -> f64 {
    first.distance(second)
}

/// Angle of the vector pointing from `first` to `second`.
pub fn touches_angle(first: Coordinates, second: Coordinates) -> Rad<f64> {
    Rad((second.y - first.y).atan2(second.x - first.x))
}

pub fn midpoint(first: Coordinates, second: Coordinates) -> Coordinates {
    first.midpoint(second)
}
