//! Feeds winit window events into the graphview captors.

#![deny(unused_imports)]

pub mod input;

pub use input::{surface::WinitSurface, TouchInput};
