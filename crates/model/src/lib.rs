//! Shared data model for the map-and-chat assistant.
//!
//! This crate describes the messages exchanged in a conversation, the
//! recommendation cards attached to them, the highlight signal consumed
//! by the map, and the collaborators (session cache, navigation context)
//! that the conversation engine depends on.
//!
//! Types in this crate don't define any behavior beyond small helpers,
//! instead they are the contracts that the engine and its collaborators
//! agree on. Implementations live in their own crates.

#![deny(missing_docs)]

mod cache;
mod error;
mod highlight;
mod marker;
mod message;
mod navigation;

pub use cache::*;
pub use error::*;
pub use highlight::*;
pub use marker::*;
pub use message::*;
pub use navigation::*;
