//! The map-and-chat assistant as an embeddable session.
//!
//! A [`Session`] wires the conversation engine to the bundled catalog and
//! a [`map::MarkerBoard`], so hosts only deal with text in, messages out
//! and markers to draw. The crate also ships a terminal front-end.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod catalog;
pub mod map;
mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`pinboard_core`] crate.
pub mod core {
    pub use pinboard_core::*;
}

/// Re-exports of [`pinboard_model`] crate.
pub mod model {
    pub use pinboard_model::*;
}
