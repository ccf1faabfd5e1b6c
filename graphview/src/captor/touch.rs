//! The touch captor.
//!
//! One finger drags the camera, two fingers pinch, rotate and pan it at the same time. The mode
//! is chosen when a gesture starts and is kept until the fingers driving it lift.

use std::time::Duration;

use cgmath::Rad;

use crate::{
    camera::{CameraHandle, CameraState},
    captor::{
        timeout::MovingTimeout, CaptorSurface, ListenerOptions, PointerCoords, PointerEvent,
        PointerEventKind, TouchCaptorEvent, TouchCoords, TouchEvent, TouchEventKind, TouchPoint,
        UpdateState,
    },
    coords::{midpoint, touches_angle, touches_distance, Coordinates, Dimensions},
    error::SettingsError,
    event::Emitter,
    settings::TouchCaptorSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchMode {
    Idle,
    SingleTouchDrag,
    DualTouchPinchRotate,
}

/// Snapshot taken when a gesture starts.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    Drag {
        id: u64,
        start_camera_state: CameraState,
    },
    PinchRotate {
        ids: [u64; 2],
        start_camera_state: CameraState,
        start_positions: [Coordinates; 2],
        start_distance: f64,
        start_angle: Rad<f64>,
    },
}

impl Gesture {
    fn begin(touches: &[TouchPoint], camera_state: CameraState) -> Option<Self> {
        match touches {
            [] => None,
            [single] => Some(Gesture::Drag {
                id: single.id,
                start_camera_state: camera_state,
            }),
            // Further contacts are tracked but do not take part in the geometry.
            [first, second, ..] => Some(Gesture::PinchRotate {
                ids: [first.id, second.id],
                start_camera_state: camera_state,
                start_positions: [first.position, second.position],
                start_distance: touches_distance(first.position, second.position),
                start_angle: touches_angle(first.position, second.position),
            }),
        }
    }

    fn mode(&self) -> TouchMode {
        match self {
            Gesture::Drag { .. } => TouchMode::SingleTouchDrag,
            Gesture::PinchRotate { .. } => TouchMode::DualTouchPinchRotate,
        }
    }

    fn tracks(&self, touch_id: u64) -> bool {
        match self {
            Gesture::Drag { id, .. } => *id == touch_id,
            Gesture::PinchRotate { ids, .. } => ids.contains(&touch_id),
        }
    }

    fn start_camera_state(&self) -> CameraState {
        match self {
            Gesture::Drag {
                start_camera_state, ..
            }
            | Gesture::PinchRotate {
                start_camera_state, ..
            } => *start_camera_state,
        }
    }
}

/// Owns the touch state of a surface and drives the camera from it.
pub struct TouchCaptor<S, C> {
    surface: Option<S>,
    camera: C,
    settings: TouchCaptorSettings,

    /// Active contacts with their last known position, in order of first contact.
    touches: Vec<TouchPoint>,
    gesture: Option<Gesture>,
    last_focus: Option<Coordinates>,

    is_moving: bool,
    moving_timeout: MovingTimeout,

    touch_events: Emitter<TouchCaptorEvent>,
    pointer_events: Emitter<PointerEvent<TouchEvent>>,
}

impl<S: CaptorSurface, C: CameraHandle> TouchCaptor<S, C> {
    /// Attaches a captor to `surface`. The captor registers non-passive listeners, so it can
    /// suppress native scrolling and pinch-zoom during its own gestures.
    pub fn new(
        mut surface: S,
        camera: C,
        settings: TouchCaptorSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        surface.listen(&TouchEventKind::ALL, ListenerOptions { passive: false });

        Ok(Self {
            surface: Some(surface),
            camera,
            settings,
            touches: Vec::new(),
            gesture: None,
            last_focus: None,
            is_moving: false,
            moving_timeout: MovingTimeout::default(),
            touch_events: Emitter::default(),
            pointer_events: Emitter::default(),
        })
    }

    /// Detaches the captor: listeners are removed, the pending timeout is cancelled and the
    /// surface is released. Calling it again does nothing.
    pub fn kill(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };

        surface.unlisten(&TouchEventKind::ALL);
        self.moving_timeout.cancel();
        self.touch_events.remove_all_listeners();
        self.pointer_events.remove_all_listeners();
        self.touches.clear();
        self.gesture = None;
        self.is_moving = false;

        log::debug!("touch captor killed");
    }

    pub fn is_killed(&self) -> bool {
        self.surface.is_none()
    }

    /// Current size of the surface, `None` once the captor has been killed.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.surface.as_ref().map(CaptorSurface::dimensions)
    }

    pub fn mode(&self) -> TouchMode {
        self.gesture
            .as_ref()
            .map_or(TouchMode::Idle, Gesture::mode)
    }

    /// True while the camera is being manipulated, until the decay interval has elapsed after
    /// the last touch lifted.
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Disabling the captor ends the current gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.settings.enabled == enabled {
            return;
        }

        self.settings.enabled = enabled;

        if !enabled {
            self.touches.clear();
            if self.gesture.is_some() {
                self.end_gesture();
            }
        }
    }

    pub fn settings(&self) -> &TouchCaptorSettings {
        &self.settings
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Positions of the active contacts, in order of first contact.
    pub fn touches(&self) -> Vec<Coordinates> {
        self.touches.iter().map(|touch| touch.position).collect()
    }

    pub fn start_camera_state(&self) -> Option<CameraState> {
        self.gesture.as_ref().map(Gesture::start_camera_state)
    }

    /// Distance between the two fingers when the current pinch started.
    pub fn start_touches_distance(&self) -> Option<f64> {
        match self.gesture {
            Some(Gesture::PinchRotate { start_distance, .. }) => Some(start_distance),
            _ => None,
        }
    }

    /// Angle of the vector between the two fingers when the current pinch started.
    pub fn start_touches_angle(&self) -> Option<Rad<f64>> {
        match self.gesture {
            Some(Gesture::PinchRotate { start_angle, .. }) => Some(start_angle),
            _ => None,
        }
    }

    pub fn start_touches_positions(&self) -> Option<[Coordinates; 2]> {
        match self.gesture {
            Some(Gesture::PinchRotate {
                start_positions, ..
            }) => Some(start_positions),
            _ => None,
        }
    }

    /// Listeners for `touchdown`, `touchup` and `touchmove`.
    pub fn touch_events_mut(&mut self) -> &mut Emitter<TouchCaptorEvent> {
        &mut self.touch_events
    }

    /// Listeners for the synthesized single-point events.
    pub fn pointer_events_mut(&mut self) -> &mut Emitter<PointerEvent<TouchEvent>> {
        &mut self.pointer_events
    }

    /// Processes one native event completely before returning.
    pub fn handle(&mut self, event: &TouchEvent) {
        match event.kind {
            TouchEventKind::Start => self.handle_start(event),
            TouchEventKind::Move => self.handle_move(event),
            TouchEventKind::End | TouchEventKind::Cancel | TouchEventKind::Leave => {
                self.handle_leave(event)
            }
        }
    }

    pub fn handle_start(&mut self, event: &TouchEvent) {
        if !self.accepts_input() {
            return;
        }

        for changed in &event.changed_touches {
            match self.touches.iter_mut().find(|touch| touch.id == changed.id) {
                Some(touch) => touch.position = changed.position,
                None => self.touches.push(*changed),
            }
        }

        if self.gesture.is_none() {
            let Some(gesture) = Gesture::begin(&self.touches, self.camera.state()) else {
                return;
            };
            log::debug!(
                "gesture started with {} touches: {:?}",
                self.touches.len(),
                gesture.mode()
            );
            self.gesture = Some(gesture);
        }

        self.is_moving = true;
        self.moving_timeout.cancel();
        event.prevent_default();

        if let Some(focus) = self.focus() {
            self.dispatch_pointer_event(PointerEventKind::Down, focus, event);
        }
        self.emit_touch_event(TouchCaptorEvent::TouchDown, event);
    }

    pub fn handle_move(&mut self, event: &TouchEvent) {
        if !self.accepts_input() {
            return;
        }

        let Some(gesture) = self.gesture else {
            return;
        };

        let previous = self.touches.clone();
        for moved in &event.changed_touches {
            if let Some(touch) = self.touches.iter_mut().find(|touch| touch.id == moved.id) {
                touch.position = moved.position;
            }
        }

        self.is_moving = true;
        event.prevent_default();

        let sigma_default_prevented = match self.focus() {
            Some(focus) => self.dispatch_pointer_event(PointerEventKind::Move, focus, event),
            None => false,
        };

        match gesture {
            Gesture::Drag { id, .. } if !sigma_default_prevented => self.drag(id, &previous),
            Gesture::PinchRotate { .. } if !sigma_default_prevented => {
                self.pinch_rotate(&gesture)
            }
            Gesture::PinchRotate { .. } => {
                // The pinch is measured from its snapshot, which has to follow the skipped move.
                self.gesture = Gesture::begin(&self.touches, self.camera.state());
            }
            Gesture::Drag { .. } => {}
        }

        self.emit_touch_event(TouchCaptorEvent::TouchMove, event);
    }

    /// Handles touch-end, touch-cancel and touch-leave.
    pub fn handle_leave(&mut self, event: &TouchEvent) {
        if !self.accepts_input() || self.touches.is_empty() {
            return;
        }

        let lifted_tracked = self.gesture.map_or(false, |gesture| {
            event
                .changed_touches
                .iter()
                .any(|lifted| gesture.tracks(lifted.id))
        });
        let count = self.touches.len();
        self.touches.retain(|touch| {
            !event
                .changed_touches
                .iter()
                .any(|lifted| lifted.id == touch.id)
        });

        if self.touches.len() == count {
            log::warn!("ignoring touch end of untracked contacts");
            return;
        }

        if self.gesture.is_some() {
            event.prevent_default();
        }

        let ended = self.touches.is_empty();
        if ended {
            self.end_gesture();
        } else if lifted_tracked {
            // Continue with the remaining fingers from where they are now.
            self.gesture = Gesture::begin(&self.touches, self.camera.state());
            log::debug!("gesture re-anchored: {:?}", self.mode());
        }

        if let Some(focus) = self.focus().or(self.last_focus) {
            self.dispatch_pointer_event(PointerEventKind::Up, focus, event);
            if ended {
                self.dispatch_pointer_event(PointerEventKind::Click, focus, event);
            }
        }
        self.emit_touch_event(TouchCaptorEvent::TouchUp, event);
    }

    fn accepts_input(&self) -> bool {
        if self.is_killed() {
            log::warn!("ignoring touch input of a killed captor");
            return false;
        }

        self.settings.enabled
    }

    fn end_gesture(&mut self) {
        self.gesture = None;
        self.moving_timeout.schedule(self.settings.decay_interval);
        log::debug!("gesture ended");
    }

    fn position_of(&self, id: u64) -> Option<Coordinates> {
        self.touches
            .iter()
            .find(|touch| touch.id == id)
            .map(|touch| touch.position)
    }

    /// The single point representing the gesture: the dragging finger, or the midpoint
    /// between the two pinching fingers.
    fn focus(&mut self) -> Option<Coordinates> {
        let focus = match self.gesture? {
            Gesture::Drag { id, .. } => self.position_of(id),
            Gesture::PinchRotate { ids, .. } => {
                match (self.position_of(ids[0]), self.position_of(ids[1])) {
                    (Some(first), Some(second)) => Some(midpoint(first, second)),
                    _ => None,
                }
            }
        };

        if focus.is_some() {
            self.last_focus = focus;
        }
        focus
    }

    fn drag(&mut self, id: u64, previous: &[TouchPoint]) {
        let last = previous
            .iter()
            .find(|touch| touch.id == id)
            .map(|touch| touch.position);

        let (Some(last), Some(current)) = (last, self.position_of(id)) else {
            return;
        };

        let delta = current - last;
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }

        let state = self.camera.state().panned_by(delta);
        log::trace!("drag by {delta:?}: {state:?}");
        self.camera.set_state(state);
    }

    fn pinch_rotate(&mut self, gesture: &Gesture) {
        let Gesture::PinchRotate {
            ids,
            start_camera_state,
            start_positions,
            start_distance,
            start_angle,
        } = *gesture
        else {
            return;
        };

        let (Some(first), Some(second)) = (self.position_of(ids[0]), self.position_of(ids[1]))
        else {
            return;
        };
        let Some(dimensions) = self.dimensions() else {
            return;
        };

        let distance = touches_distance(first, second);
        // Fingers which started or ended up at the same pixel give no usable zoom factor.
        let ratio = if start_distance > 0.0 && distance > 0.0 {
            self.settings
                .bounded_ratio(start_camera_state.ratio * start_distance / distance)
        } else {
            start_camera_state.ratio
        };
        let angle = start_camera_state.angle + (touches_angle(first, second) - start_angle).0;

        let anchor = start_camera_state.viewport_to_graph(
            midpoint(start_positions[0], start_positions[1]),
            &dimensions,
        );
        let state = CameraState {
            angle,
            ratio,
            ..start_camera_state
        }
        .anchored(anchor, midpoint(first, second), &dimensions);

        log::trace!("pinch to distance {distance}: {state:?}");
        self.camera.set_state(state);
    }

    /// Emits a synthesized single-point event. Returns whether a listener prevented the
    /// default camera behavior, in which case the native default is prevented as well.
    fn dispatch_pointer_event(
        &mut self,
        kind: PointerEventKind,
        position: Coordinates,
        event: &TouchEvent,
    ) -> bool {
        let pointer_event = PointerEvent::new(kind, PointerCoords::new(position, event.clone()));
        self.pointer_events.emit(&pointer_event);

        let prevented = pointer_event.coords().sigma_default_prevented();
        if prevented {
            event.prevent_default();
        }
        prevented
    }

    fn emit_touch_event(
        &mut self,
        variant: fn(TouchCoords) -> TouchCaptorEvent,
        event: &TouchEvent,
    ) {
        let coords = TouchCoords {
            touches: self.touches(),
            original: event.clone(),
        };
        self.touch_events.emit(&variant(coords));
    }
}

impl<S: CaptorSurface, C: CameraHandle> UpdateState for TouchCaptor<S, C> {
    fn update_state(&mut self, dt: Duration) {
        if self.moving_timeout.advance(dt) {
            self.is_moving = false;
            log::debug!("camera at rest");
        }
    }
}
