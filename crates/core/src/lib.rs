//! The conversation engine: transcript ownership, input classification,
//! scripted replies on fixed delays and the highlight signal they emit.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod classify;
pub mod conversation;
mod engine;
mod persist;
pub mod script;

pub use classify::Category;
pub use engine::{Engine, EngineBuilder, EngineSnapshot};
