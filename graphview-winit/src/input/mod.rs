//! Handles the touch input which is dispatched by the main event loop.

use std::time::Duration;

use cgmath::Vector2;
use graphview::{
    camera::CameraHandle,
    captor::{touch::TouchCaptor, TouchEvent, UpdateState},
    error::SettingsError,
    settings::TouchCaptorSettings,
};
use instant::Instant;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{Touch, TouchPhase, WindowEvent},
};

use crate::input::{surface::WinitSurface, touch_handler::TouchHandler};

pub mod surface;
mod touch_handler;

pub struct TouchInput<C> {
    touch_handler: TouchHandler,
    captor: TouchCaptor<WinitSurface, C>,
    surface: WinitSurface,
    size: PhysicalSize<u32>,
    scale_factor: f64,
    last_frame: Option<Instant>,
}

impl<C: CameraHandle> TouchInput<C> {
    /// Creates a new touch input controller for a window.
    ///
    /// # Arguments
    ///
    /// * `size`: The inner size of the window.
    /// * `scale_factor`: Touch positions are divided by it, so the captor works in logical pixels.
    /// * `camera`: The camera the gestures move.
    ///
    pub fn new(
        size: PhysicalSize<u32>,
        scale_factor: f64,
        camera: C,
        settings: TouchCaptorSettings,
    ) -> Result<Self, SettingsError> {
        let surface = WinitSurface::new(size, scale_factor);
        let captor = TouchCaptor::new(surface.clone(), camera, settings)?;

        Ok(Self {
            touch_handler: TouchHandler::default(),
            captor,
            surface,
            size,
            scale_factor,
            last_frame: None,
        })
    }

    pub fn captor(&self) -> &TouchCaptor<WinitSurface, C> {
        &self.captor
    }

    pub fn captor_mut(&mut self) -> &mut TouchCaptor<WinitSurface, C> {
        &mut self.captor
    }

    /// Process the given winit `[winit::event::WindowEvent]`.
    /// Returns true if the event has been processed and false otherwise.
    pub fn window_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => self.process_touch(*id, *phase, *location),
            WindowEvent::Resized(size) => {
                self.size = *size;
                self.surface.resize(self.size, self.scale_factor);
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("New scaling factor: {}", scale_factor);
                self.scale_factor = *scale_factor;
                self.surface.resize(self.size, self.scale_factor);
                false
            }
            _ => false,
        }
    }

    /// Forwards a single winit contact to the captor.
    pub fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> bool {
        if !self.surface.is_listening() {
            return false;
        }

        let position: (f64, f64) = location.into();
        let position = Vector2::from(position) / self.scale_factor;
        for event in self.touch_handler.process_touch(id, phase, &position) {
            self.dispatch(&event);
        }
        true
    }

    fn dispatch(&mut self, event: &TouchEvent) {
        self.captor.handle(event);

        if event.default_prevented() {
            log::trace!("native handling of {:?} suppressed", event.kind);
        }
    }

    /// Reports the contacts which started during this frame and advances the captor by the time
    /// elapsed since the previous call. Meant to be called once per redraw.
    pub fn on_frame(&mut self) {
        if let Some(event) = self.touch_handler.flush_started() {
            self.dispatch(&event);
        }

        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last_frame| now - last_frame);
        self.last_frame = Some(now);
        self.update_state(dt);
    }

    /// Detaches the captor. Later touches are not consumed anymore.
    pub fn kill(&mut self) {
        self.captor.kill();
    }
}

impl<C: CameraHandle> UpdateState for TouchInput<C> {
    fn update_state(&mut self, dt: Duration) {
        self.captor.update_state(dt);
    }
}
