//! REST API module for the Dear Days conversion service.
//!
//! HTTP wrappers over the conversion engine, consumed by the event
//! create/update request handlers and the mobile UI.

mod handlers;
mod rest;

pub use handlers::*;
pub use rest::*;
