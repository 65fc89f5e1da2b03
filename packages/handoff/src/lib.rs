//! A blocking, Go-style channel: buffered or rendezvous, any number of producer and consumer
//! threads, an explicit close operation, and iteration over received values.

#[macro_use]
extern crate tracing;

mod channel;

pub use crate::channel::api::*;

/// Error types
pub mod error {
    pub use crate::channel::error::*;
}
