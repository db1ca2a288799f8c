//! Destinations for [`WorkerEvent`]s.
//!
//! Emitting never blocks on the caller and never fails: a receiver that has
//! gone away simply stops getting events.

use crossbeam_channel::Sender;
use tracing::debug;

use super::types::WorkerEvent;

pub trait EventSink {
    fn emit(&mut self, event: WorkerEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: WorkerEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: WorkerEvent) {
        (**self).emit(event);
    }
}

impl EventSink for Sender<WorkerEvent> {
    fn emit(&mut self, event: WorkerEvent) {
        if self.send(event).is_err() {
            debug!(event = "core.worker.event_receiver_closed");
        }
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct CallbackSink<F>(pub F);

impl<F: FnMut(WorkerEvent)> EventSink for CallbackSink<F> {
    fn emit(&mut self, event: WorkerEvent) {
        (self.0)(event);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: WorkerEvent) {}
}
