//! Progress notifications.

use std::fmt;

use tracing::{debug, info};

/// A structured progress notification emitted by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Existing objects of a class were enumerated.
    ObjectsFound { count: u64, object_class: String },
    /// A flush is about to be sent.
    Flushing { writes: usize, deletes: usize },
    /// A flush completed.
    Flushed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectsFound {
                count,
                object_class,
            } => write!(
                f,
                "Found {} objects for object class {}",
                count, object_class
            ),
            Self::Flushing { writes, deletes } => write!(
                f,
                "Flushing {} inserts or updates and {} deletes",
                writes, deletes
            ),
            Self::Flushed => f.write_str("Flushed"),
        }
    }
}

/// Destination for adapter notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Sink that emits notifications as `tracing` events.
///
/// `ObjectsFound` and `Flushing` are logged at INFO, `Flushed` at DEBUG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::ObjectsFound {
                count,
                object_class,
            } => {
                info!(count = count, object_class = %object_class, "{}", notification);
            }
            Notification::Flushing { writes, deletes } => {
                info!(writes = writes, deletes = deletes, "{}", notification);
            }
            Notification::Flushed => {
                debug!("{}", notification);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_counts() {
        let found = Notification::ObjectsFound {
            count: 42,
            object_class: "Article".to_string(),
        };
        assert_eq!(found.to_string(), "Found 42 objects for object class Article");

        let flushing = Notification::Flushing {
            writes: 3,
            deletes: 1,
        };
        assert_eq!(
            flushing.to_string(),
            "Flushing 3 inserts or updates and 1 deletes"
        );

        assert_eq!(Notification::Flushed.to_string(), "Flushed");
    }

    #[test]
    fn test_tracing_sink_accepts_every_notification() {
        let sink = TracingSink;

        sink.notify(&Notification::ObjectsFound {
            count: 0,
            object_class: "Article".to_string(),
        });
        sink.notify(&Notification::Flushing {
            writes: 0,
            deletes: 0,
        });
        sink.notify(&Notification::Flushed);
    }
}
