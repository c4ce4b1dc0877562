//! Interface definitions for the destination adapter.
//!
//! The synchronizer drives a destination through the traits in
//! `destination_adapter`; notifications about progress leave the adapter
//! through a `NotificationSink`.

mod destination_adapter;
mod notification_sink;

pub use destination_adapter::{DestinationAdapter, ProgressListener, UpdateableObjectProvider};
pub use notification_sink::{Notification, NotificationSink, TracingSink};
