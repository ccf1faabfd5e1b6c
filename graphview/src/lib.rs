//! # graphview
//!
//! The pointer input layer of a graph-rendering canvas.
//!
//! Raw multi-touch events are turned into camera transformations (pan, zoom and rotation) and
//! into synthesized single-point pointer events for the rest of the rendering pipeline. The
//! rendering engine owns the camera; the captors in [`captor`] only read and apply
//! [`camera::CameraState`] values through the narrow [`camera::CameraHandle`] capability.

pub mod camera;
pub mod captor;
pub mod coords;
pub mod error;
pub mod event;
pub mod settings;

pub use camera::{Camera, CameraHandle, CameraState};
pub use captor::{
    touch::{TouchCaptor, TouchMode},
    CaptorSurface, PointerCoords, PointerEvent, PointerEventKind, TouchCaptorEvent,
    TouchCaptorEventKind, TouchCoords, TouchEvent, TouchEventKind, TouchPoint, UpdateState,
};
pub use coords::{Coordinates, Dimensions};
pub use error::SettingsError;
pub use settings::TouchCaptorSettings;
