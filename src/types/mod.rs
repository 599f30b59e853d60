//! Core types used across reagent.

pub mod message;

pub use message::{Message, Role};
