//! Captors turn the native input of a surface into camera updates and normalized events.

use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{
    coords::{Coordinates, Dimensions},
    event::EventMap,
};

pub mod timeout;
pub mod touch;

pub trait UpdateState {
    /// Advances time-based state by the time elapsed since the previous frame.
    fn update_state(&mut self, dt: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
    Leave,
}

impl TouchEventKind {
    pub const ALL: [TouchEventKind; 5] = [
        TouchEventKind::Start,
        TouchEventKind::Move,
        TouchEventKind::End,
        TouchEventKind::Cancel,
        TouchEventKind::Leave,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// A passive listener can not prevent the native default of an event.
    pub passive: bool,
}

/// The surface a captor is attached to.
pub trait CaptorSurface {
    /// Current size of the surface. Read on every call, never cached by the captor.
    fn dimensions(&self) -> Dimensions;

    fn listen(&mut self, kinds: &[TouchEventKind], options: ListenerOptions);

    fn unlisten(&mut self, kinds: &[TouchEventKind]);
}

/// A single contact on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Stable for one physical finger for the whole time it touches the surface.
    pub id: u64,
    pub position: Coordinates,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Coordinates::new(x, y),
        }
    }
}

/// A native touch event as delivered by the surface.
///
/// Clones share the default prevention flag, like references to the same native event.
#[derive(Debug, Clone)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    /// Contacts on the surface after this event, in order of first contact.
    pub touches: Vec<TouchPoint>,
    /// Contacts which started, moved or lifted with this event.
    pub changed_touches: Vec<TouchPoint>,
    default_prevented: Rc<Cell<bool>>,
}

impl TouchEvent {
    pub fn new(
        kind: TouchEventKind,
        touches: Vec<TouchPoint>,
        changed_touches: Vec<TouchPoint>,
    ) -> Self {
        Self {
            kind,
            touches,
            changed_touches,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    /// Suppresses the native handling (scrolling, native pinch-zoom) of this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Payload of the touch captor's own events.
#[derive(Debug, Clone)]
pub struct TouchCoords {
    pub touches: Vec<Coordinates>,
    pub original: TouchEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchCaptorEventKind {
    TouchDown,
    TouchUp,
    TouchMove,
}

#[derive(Debug, Clone)]
pub enum TouchCaptorEvent {
    TouchDown(TouchCoords),
    TouchUp(TouchCoords),
    TouchMove(TouchCoords),
}

impl TouchCaptorEvent {
    pub fn coords(&self) -> &TouchCoords {
        match self {
            TouchCaptorEvent::TouchDown(coords)
            | TouchCaptorEvent::TouchUp(coords)
            | TouchCaptorEvent::TouchMove(coords) => coords,
        }
    }
}

impl EventMap for TouchCaptorEvent {
    type Kind = TouchCaptorEventKind;

    fn kind(&self) -> TouchCaptorEventKind {
        match self {
            TouchCaptorEvent::TouchDown(_) => TouchCaptorEventKind::TouchDown,
            TouchCaptorEvent::TouchUp(_) => TouchCaptorEventKind::TouchUp,
            TouchCaptorEvent::TouchMove(_) => TouchCaptorEventKind::TouchMove,
        }
    }
}

/// A single-point pointer position, shared by every captor. `O` is the native event the
/// position was derived from.
#[derive(Debug, Clone)]
pub struct PointerCoords<O> {
    pub x: f64,
    pub y: f64,
    sigma_default_prevented: Cell<bool>,
    pub original: O,
}

impl<O> PointerCoords<O> {
    pub fn new(position: Coordinates, original: O) -> Self {
        Self {
            x: position.x,
            y: position.y,
            sigma_default_prevented: Cell::new(false),
            original,
        }
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }

    /// Asks the captor to skip its default camera and selection behavior for this event. The
    /// native handling of the original event is not affected by this call.
    pub fn prevent_sigma_default(&self) {
        self.sigma_default_prevented.set(true);
    }

    pub fn sigma_default_prevented(&self) -> bool {
        self.sigma_default_prevented.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Up,
    Move,
    Click,
}

#[derive(Debug, Clone)]
pub enum PointerEvent<O> {
    Down(PointerCoords<O>),
    Up(PointerCoords<O>),
    Move(PointerCoords<O>),
    Click(PointerCoords<O>),
}

impl<O> PointerEvent<O> {
    pub fn new(kind: PointerEventKind, coords: PointerCoords<O>) -> Self {
        match kind {
            PointerEventKind::Down => PointerEvent::Down(coords),
            PointerEventKind::Up => PointerEvent::Up(coords),
            PointerEventKind::Move => PointerEvent::Move(coords),
            PointerEventKind::Click => PointerEvent::Click(coords),
        }
    }

    pub fn coords(&self) -> &PointerCoords<O> {
        match self {
            PointerEvent::Down(coords)
            | PointerEvent::Up(coords)
            | PointerEvent::Move(coords)
            | PointerEvent::Click(coords) => coords,
        }
    }
}

impl<O> EventMap for PointerEvent<O> {
    type Kind = PointerEventKind;

    fn kind(&self) -> PointerEventKind {
        match self {
            PointerEvent::Down(_) => PointerEventKind::Down,
            PointerEvent::Up(_) => PointerEventKind::Up,
            PointerEvent::Move(_) => PointerEventKind::Move,
            PointerEvent::Click(_) => PointerEventKind::Click,
        }
    }
}
