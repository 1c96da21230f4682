//! Listener interface for engine notifications.

use crate::body::{Body, BodyId};

/// Receives engine notifications synchronously, from inside the engine call
/// that caused them.
///
/// All methods default to doing nothing, so listeners only implement the
/// events they care about.
pub trait SimulationEvents {
    /// A body was added and stamped with `id`.
    fn object_created(&mut self, _id: BodyId, _body: &Body) {}

    /// `heavier` (already grown) absorbed `lighter`.
    fn objects_collided(&mut self, _heavier: &Body, _lighter: &Body) {}

    /// `body` left the simulation. Always follows the matching
    /// [`objects_collided`](Self::objects_collided).
    fn object_annihilated(&mut self, _body: &Body) {}

    /// Position or velocity of `id` changed during the last tick.
    fn object_updated(&mut self, _id: BodyId, _body: &Body) {}
}

/// A single notification, as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Created(BodyId, Body),
    Collided { heavier: Body, lighter: Body },
    Annihilated(Body),
    Updated(BodyId, Body),
}

/// Listener that appends every notification to a shared list.
///
/// ```
/// use gravity_sim::{Body, EventLog, SimulationEngine};
///
/// let log = EventLog::default();
/// let mut engine = SimulationEngine::new();
/// engine.add_events_observer(Box::new(log.clone()));
/// engine.add_object(Body::new(0.0, 0.0, 1.0, 1.0)).unwrap();
///
/// assert_eq!(log.events().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
}

impl EventLog {
    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl SimulationEvents for EventLog {
    fn object_created(&mut self, id: BodyId, body: &Body) {
        self.push(Event::Created(id, *body));
    }

    fn objects_collided(&mut self, heavier: &Body, lighter: &Body) {
        self.push(Event::Collided {
            heavier: *heavier,
            lighter: *lighter,
        });
    }

    fn object_annihilated(&mut self, body: &Body) {
        self.push(Event::Annihilated(*body));
    }

    fn object_updated(&mut self, id: BodyId, body: &Body) {
        self.push(Event::Updated(id, *body));
    }
}
