use std::{cell::Cell, rc::Rc};

use graphview::{
    captor::{CaptorSurface, ListenerOptions, TouchEventKind},
    coords::Dimensions,
};
use winit::dpi::PhysicalSize;

/// The inner area of a winit window, measured in logical pixels.
///
/// Clones share their state, so the input controller can keep the size current while the
/// captor owns the surface.
#[derive(Debug, Clone)]
pub struct WinitSurface {
    dimensions: Rc<Cell<Dimensions>>,
    listening: Rc<Cell<bool>>,
}

impl WinitSurface {
    pub fn new(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let surface = Self {
            dimensions: Rc::default(),
            listening: Rc::default(),
        };
        surface.resize(size, scale_factor);
        surface
    }

    pub fn resize(&self, size: PhysicalSize<u32>, scale_factor: f64) {
        let size = size.to_logical::<f64>(scale_factor);
        self.dimensions.set(Dimensions::new(size.width, size.height));
    }

    /// Whether a captor currently listens to the touch events of this surface.
    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }
}

impl CaptorSurface for WinitSurface {
    fn dimensions(&self) -> Dimensions {
        self.dimensions.get()
    }

    fn listen(&mut self, _kinds: &[TouchEventKind], options: ListenerOptions) {
        // Winit always lets the application handle touches, there is no passive mode to opt out of.
        log::debug!("listening to touch events (passive: {})", options.passive);
        self.listening.set(true);
    }

    fn unlisten(&mut self, _kinds: &[TouchEventKind]) {
        self.listening.set(false);
    }
}
