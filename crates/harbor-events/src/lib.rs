mod event;
mod sink;

use std::sync::Arc;

pub use event::*;
pub use sink::*;

/// Shared handle to an event sink.
pub type EventSinkHandle = Arc<dyn EventSink>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink() {
        let sink = NullSink;
        sink.emit(SyncEvent::SyncStarted {
            new: 1,
            missing: 0,
            modified: 0,
        });
    }

    #[test]
    fn test_channel_sink() {
        let (sink, rx) = channel_sink();
        sink.emit(SyncEvent::SyncStarted {
            new: 2,
            missing: 1,
            modified: 0,
        });
        sink.emit(SyncEvent::PackageIndexed {
            path: "a-1.0.0.pkg".to_string(),
        });
        sink.emit(SyncEvent::Committed {
            removed: 1,
            added: 2,
            updated: 0,
        });

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            SyncEvent::SyncStarted {
                new: 2,
                ..
            }
        ));
        assert!(matches!(&events[2], SyncEvent::Committed { .. }));
    }

    #[test]
    fn test_channel_sink_receiver_dropped() {
        let (sink, rx) = channel_sink();
        drop(rx);
        sink.emit(SyncEvent::PackageIndexed {
            path: "orphaned.pkg".to_string(),
        });
    }

    #[test]
    fn test_collector_sink() {
        let sink = CollectorSink::default();
        assert!(sink.is_empty());

        sink.emit(SyncEvent::PackageLoadFailed {
            path: "broken.pkg".to_string(),
            error: "invalid package".to_string(),
        });
        sink.emit(SyncEvent::PackageUpdated {
            path: "redisq-2.1.0.pkg".to_string(),
        });

        assert_eq!(sink.len(), 2);
        let events = sink.events();
        assert!(matches!(&events[0], SyncEvent::PackageLoadFailed { .. }));
        assert!(matches!(&events[1], SyncEvent::PackageUpdated { .. }));
    }

    #[test]
    fn test_event_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NullSink>();
        assert_send_sync::<std::sync::mpsc::Sender<SyncEvent>>();
        assert_send_sync::<CollectorSink>();
    }
}
