use cgmath::{EuclideanSpace, Point2, Vector2};
use graphview::captor::{TouchEvent, TouchEventKind, TouchPoint};
use winit::event::TouchPhase;

/// Winit reports one contact per event. This keeps the contacts which are currently down, so
/// every event handed to a captor carries the full touch list.
///
/// Contacts which start together arrive as separate `Started` events. They are held back and
/// reported as one start event, either when the next non-start event arrives or when
/// [`TouchHandler::flush_started`] is called at the end of a frame.
#[derive(Default)]
pub struct TouchHandler {
    touches: Vec<TouchPoint>,
    started: Vec<TouchPoint>,
}

impl TouchHandler {
    pub fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        window_position: &Vector2<f64>,
    ) -> Vec<TouchEvent> {
        let changed = TouchPoint {
            id,
            position: Point2::from_vec(*window_position),
        };

        if phase == TouchPhase::Started {
            upsert(&mut self.touches, changed);
            upsert(&mut self.started, changed);
            return Vec::new();
        }

        let mut events: Vec<TouchEvent> = self.flush_started().into_iter().collect();
        let kind = match phase {
            TouchPhase::Moved => {
                if let Some(touch) = self.touches.iter_mut().find(|touch| touch.id == id) {
                    touch.position = changed.position;
                }
                TouchEventKind::Move
            }
            TouchPhase::Ended => {
                self.touches.retain(|touch| touch.id != id);
                TouchEventKind::End
            }
            TouchPhase::Cancelled | TouchPhase::Started => {
                self.touches.retain(|touch| touch.id != id);
                TouchEventKind::Cancel
            }
        };

        events.push(TouchEvent::new(kind, self.touches.clone(), vec![changed]));
        events
    }

    /// Reports the contacts which started since the last event, if any.
    pub fn flush_started(&mut self) -> Option<TouchEvent> {
        if self.started.is_empty() {
            return None;
        }

        let changed = std::mem::take(&mut self.started);
        Some(TouchEvent::new(
            TouchEventKind::Start,
            self.touches.clone(),
            changed,
        ))
    }
}

fn upsert(touches: &mut Vec<TouchPoint>, changed: TouchPoint) {
    match touches.iter_mut().find(|touch| touch.id == changed.id) {
        Some(touch) => touch.position = changed.position,
        None => touches.push(changed),
    }
}
