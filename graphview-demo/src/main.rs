use std::{cell::RefCell, rc::Rc, time::Duration};

use clap::Parser;
use graphview::{
    camera::{Camera, CameraHandle, CameraState},
    captor::{PointerEvent, PointerEventKind, TouchCaptorEvent, TouchCaptorEventKind, TouchEvent},
    error::SettingsError,
    settings::TouchCaptorSettings,
};
use graphview_winit::TouchInput;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

#[derive(Parser, Debug)]
#[command(version, about = "Drag, pinch and rotate a camera with touch input")]
struct Args {
    /// Milliseconds after the last touch lifted before the camera counts as resting
    #[arg(long, default_value_t = 100)]
    decay_ms: u64,
    /// Smallest camera ratio a pinch can reach
    #[arg(long)]
    min_ratio: Option<f64>,
    /// Largest camera ratio a pinch can reach
    #[arg(long)]
    max_ratio: Option<f64>,
}

impl Args {
    fn settings(&self) -> TouchCaptorSettings {
        TouchCaptorSettings {
            decay_interval: Duration::from_millis(self.decay_ms),
            min_camera_ratio: self.min_ratio,
            max_camera_ratio: self.max_ratio,
            ..TouchCaptorSettings::default()
        }
    }
}

#[derive(Error, Debug)]
enum DemoError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
}

type SharedCamera = Rc<RefCell<Camera>>;

struct App {
    settings: TouchCaptorSettings,
    camera: SharedCamera,
    logged_state: CameraState,
    window: Option<Window>,
    input: Option<TouchInput<SharedCamera>>,
}

impl App {
    fn new(settings: TouchCaptorSettings) -> Self {
        Self {
            settings,
            camera: Rc::default(),
            logged_state: CameraState::default(),
            window: None,
            input: None,
        }
    }

    fn create_input(&self, window: &Window) -> Result<TouchInput<SharedCamera>, SettingsError> {
        let mut input = TouchInput::new(
            window.inner_size(),
            window.scale_factor(),
            self.camera.clone(),
            self.settings.clone(),
        )?;

        let captor = input.captor_mut();
        for kind in [
            TouchCaptorEventKind::TouchDown,
            TouchCaptorEventKind::TouchUp,
        ] {
            captor
                .touch_events_mut()
                .on(kind, move |event: &TouchCaptorEvent| {
                    log::info!("{:?} with {} touches", kind, event.coords().touches.len())
                });
        }
        captor.pointer_events_mut().on(
            PointerEventKind::Click,
            |event: &PointerEvent<TouchEvent>| {
                let coords = event.coords();
                log::info!("click at ({:.1}, {:.1})", coords.x, coords.y)
            },
        );

        Ok(input)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop
            .create_window(Window::default_attributes().with_title("graphview"))
        {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match self.create_input(&window) {
            Ok(input) => self.input = Some(input),
            Err(e) => {
                log::error!("Failed to attach touch input: {}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(input)) = (&self.window, &mut self.input) else {
            return;
        };

        if input.window_input(&event) {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                input.kill();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                input.on_frame();

                let state = self.camera.state();
                if state != self.logged_state {
                    log::info!(
                        "camera x={:.2} y={:.2} angle={:.3} ratio={:.3}",
                        state.x,
                        state.y,
                        state.angle,
                        state.ratio
                    );
                    self.logged_state = state;
                }

                if input.captor().is_moving() {
                    window.request_redraw();
                } else {
                    log::debug!("camera at rest, waiting for input");
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), DemoError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let settings = args.settings();
    settings.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;
    Ok(())
}
