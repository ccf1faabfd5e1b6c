//! Typed publish/subscribe used by the captors.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Maps each event of a family to the name listeners subscribe to.
pub trait EventMap {
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Returned by [`Emitter::on`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Dispatches events of the family `E` to the listeners registered for their kind. Listeners
/// of one kind run in registration order.
pub struct Emitter<E: EventMap> {
    listeners: HashMap<E::Kind, Vec<(ListenerId, Listener<E>)>>,
    next_id: u64,
}

impl<E: EventMap> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E: EventMap> Emitter<E> {
    pub fn on<F>(&mut self, kind: E::Kind, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(other, _)| *other == id) {
                drop(listeners.remove(index));
                return true;
            }
        }
        false
    }

    /// Calls every listener registered for the kind of `event`. Returns true if at least one
    /// listener ran.
    pub fn emit(&mut self, event: &E) -> bool {
        match self.listeners.get_mut(&event.kind()) {
            Some(listeners) if !listeners.is_empty() => {
                for (_, listener) in listeners.iter_mut() {
                    listener(event);
                }
                true
            }
            _ => false,
        }
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }
}
