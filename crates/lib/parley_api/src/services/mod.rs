//! Services orchestrating core operations for the handlers.

pub mod chat;
pub mod survey;
