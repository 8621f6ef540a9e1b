//! Event listeners
//!
//! Background consumers of the domain event bus.

mod notification_listener;

pub use notification_listener::NotificationListener;
