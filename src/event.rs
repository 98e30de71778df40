use std::cell::RefCell;

/// Change notifications emitted by the sketchpad core.
///
/// Events carry no payload: consumers always repaint from current state,
/// never from notification data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchEvent {
    /// The committed drawing changed (commit, extend, undo, redo, clear).
    DrawingChanged,
    /// The tool preview moved or was cleared; history is untouched.
    ToolMoved,
}

/// Receives sketchpad events.
pub trait EventHandler {
    fn handle_event(&mut self, event: &SketchEvent);
}

impl<F: FnMut(&SketchEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &SketchEvent) {
        self(event)
    }
}

/// A simple event bus broadcasting sketchpad events to registered handlers.
///
/// Fan-out is synchronous and single-threaded; handlers must not re-enter
/// the sketchpad.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers.
    pub fn emit(&self, event: SketchEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}
