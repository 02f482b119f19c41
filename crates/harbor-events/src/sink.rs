use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex,
};

use crate::SyncEvent;

/// Receives the events emitted during a synchronization run.
///
/// The synchronizer emits through a shared handle; implementations decide
/// where the events go.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SyncEvent);
}

/// Discards every event. The default sink.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SyncEvent) {}
}

/// An mpsc sender doubles as a sink; a frontend holds the receiver and
/// polls it at its own pace. A dropped receiver loses events silently
/// rather than failing the run.
impl EventSink for Sender<SyncEvent> {
    fn emit(&self, event: SyncEvent) {
        let _ = self.send(event);
    }
}

/// Builds a channel whose sending half is usable as an event sink.
pub fn channel_sink() -> (Sender<SyncEvent>, Receiver<SyncEvent>) {
    mpsc::channel()
}

/// Accumulates events in memory for later inspection. Test sink.
#[derive(Default)]
pub struct CollectorSink {
    events: Mutex<Vec<SyncEvent>>,
}

impl CollectorSink {
    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for CollectorSink {
    fn emit(&self, event: SyncEvent) {
        self.events.lock().unwrap().push(event);
    }
}
