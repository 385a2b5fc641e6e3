//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams facility events in publish
//! order, filtered per connection by floor subscriptions.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
