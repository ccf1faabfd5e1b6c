//! The camera capability used by the captors.
//!
//! Viewport and graph space relate through
//! `graph = (x, y) + ratio * R(-angle) * (viewport - center)`, where `center` is the middle of
//! the surface. A smaller ratio shows less of the graph, i.e. it is more zoomed in.

use std::{cell::RefCell, rc::Rc};

use cgmath::{Basis2, Point2, Rad, Rotation, Rotation2, Vector2};

use crate::coords::{Coordinates, Dimensions};

/// Pan position, rotation and zoom ratio of a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    /// Rotation in radians.
    pub angle: f64,
    pub ratio: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            ratio: 1.0,
        }
    }
}

impl CameraState {
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    fn with_position(self, position: Point2<f64>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Converts a displacement measured in viewport pixels into a graph-space displacement.
    pub fn viewport_delta_to_graph(&self, delta: Vector2<f64>) -> Vector2<f64> {
        let rotation: Basis2<f64> = Rotation2::from_angle(Rad(-self.angle));
        rotation.rotate_vector(delta) * self.ratio
    }

    pub fn viewport_to_graph(&self, position: Coordinates, dimensions: &Dimensions) -> Point2<f64> {
        self.position() + self.viewport_delta_to_graph(position - dimensions.center())
    }

    pub fn graph_to_viewport(&self, position: Point2<f64>, dimensions: &Dimensions) -> Coordinates {
        let rotation: Basis2<f64> = Rotation2::from_angle(Rad(self.angle));
        dimensions.center() + rotation.rotate_vector(position - self.position()) / self.ratio
    }

    /// Returns the state with the same angle and ratio, panned so that the graph point
    /// `graph_position` is displayed at `viewport_position`.
    pub fn anchored(
        self,
        graph_position: Point2<f64>,
        viewport_position: Coordinates,
        dimensions: &Dimensions,
    ) -> Self {
        let offset = self.viewport_delta_to_graph(viewport_position - dimensions.center());
        self.with_position(graph_position - offset)
    }

    /// Returns the state panned by a viewport displacement. The graph follows the displacement,
    /// so the camera moves the opposite way.
    pub fn panned_by(self, delta: Vector2<f64>) -> Self {
        let offset = self.viewport_delta_to_graph(delta);
        self.with_position(self.position() - offset)
    }
}

/// Read and write access to the camera of the rendering engine.
pub trait CameraHandle {
    fn state(&self) -> CameraState;

    fn set_state(&mut self, state: CameraState);
}

/// A camera which only holds its state.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    state: CameraState,
}

impl Camera {
    pub fn new(state: CameraState) -> Self {
        Self { state }
    }
}

impl CameraHandle for Camera {
    fn state(&self) -> CameraState {
        self.state
    }

    fn set_state(&mut self, state: CameraState) {
        self.state = state;
    }
}

// Lets the engine and a captor share one camera.
impl<T: CameraHandle> CameraHandle for Rc<RefCell<T>> {
    fn state(&self) -> CameraState {
        self.borrow().state()
    }

    fn set_state(&mut self, state: CameraState) {
        self.borrow_mut().set_state(state)
    }
}
