mod builder;
mod state;

use pinboard_actor::Actor;
use pinboard_model::{HighlightSignal, ReturnNavigation};
use tokio::sync::{oneshot, watch};

use crate::conversation::Transcript;
pub use builder::EngineBuilder;
use state::{
    EngineState, ReturnNavigationMessage, ShutdownMessage, SnapshotMessage,
    SubmitMessage,
};

/// A conversation engine instance.
///
/// The engine owns the transcript and runs as an actor: every operation
/// is a message handled in order on the engine's own task, so callers
/// never block waiting for a reply. Scripted replies arrive later through
/// the registered callbacks, the composing state and the highlight
/// signal.
///
/// Handles are cheap to clone. The engine stops when [`Engine::shutdown`]
/// is called or when every handle has been dropped; either way pending
/// scripted replies are discarded.
#[derive(Clone)]
pub struct Engine {
    handle: Actor<EngineState>,
    composing_rx: watch::Receiver<bool>,
    highlight_rx: watch::Receiver<HighlightSignal>,
}

/// A point-in-time copy of the engine state.
#[derive(Clone, Debug)]
pub struct EngineSnapshot {
    /// The transcript, in append order.
    pub transcript: Transcript,
    /// Whether a scripted reply sequence is in flight.
    pub composing: bool,
    /// Whether the one-time special offer has been announced in this
    /// session.
    pub special_offer_announced: bool,
}

impl Engine {
    /// Submits a user input.
    ///
    /// Blank input is ignored. Otherwise the user message is appended
    /// right away and the scripted replies follow on their own delays.
    pub fn submit<S: Into<String>>(&self, text: S) {
        if self.handle.send(SubmitMessage(text.into())).is_err() {
            debug!("engine has stopped, dropping input");
        }
    }

    /// Handles the user landing back on the map from a detail page.
    ///
    /// The special offer is announced once per session, and only when
    /// the user comes back from a service page after reserving.
    pub fn handle_return_navigation(
        &self,
        came_from_service: bool,
        reserved: bool,
    ) {
        let msg = ReturnNavigationMessage {
            came_from_service,
            reserved,
        };
        if self.handle.send(msg).is_err() {
            debug!("engine has stopped, ignoring navigation");
        }
    }

    /// Same as [`Engine::handle_return_navigation`], reading the flags
    /// from a parsed navigation context.
    #[inline]
    pub fn return_from(&self, nav: &ReturnNavigation) {
        self.handle_return_navigation(nav.came_from_service(), nav.reserved());
    }

    /// Returns a copy of the current state, or `None` if the engine has
    /// stopped.
    pub async fn snapshot(&self) -> Option<EngineSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.handle.send(SnapshotMessage(tx)).ok()?;
        rx.await.ok()
    }

    /// Subscribes to the composing state.
    #[inline]
    pub fn composing(&self) -> watch::Receiver<bool> {
        self.composing_rx.clone()
    }

    /// Returns `true` if a scripted reply sequence is in flight.
    #[inline]
    pub fn is_composing(&self) -> bool {
        *self.composing_rx.borrow()
    }

    /// Subscribes to the highlight signal.
    #[inline]
    pub fn highlight(&self) -> watch::Receiver<HighlightSignal> {
        self.highlight_rx.clone()
    }

    /// Returns the latest highlight signal.
    #[inline]
    pub fn current_highlight(&self) -> HighlightSignal {
        self.highlight_rx.borrow().clone()
    }

    /// Stops the engine and discards every pending scripted reply.
    ///
    /// Messages sent before this call are still handled first.
    pub fn shutdown(&self) {
        self.handle.send(ShutdownMessage(None)).ok();
    }

    /// Like [`Engine::shutdown`], but waits until the engine has handled
    /// everything sent before and stopped, so its last transcript is in
    /// the session cache when this returns.
    pub async fn close(&self) {
        let (tx, rx) = oneshot::channel();
        if self.handle.send(ShutdownMessage(Some(tx))).is_ok() {
            rx.await.ok();
        }
    }
}

impl Engine {
    fn spawn_from_builder(builder: EngineBuilder) -> Self {
        let (state, composing_rx, highlight_rx) = EngineState::new(builder);
        let handle = Actor::spawn(state, Some("engine"));
        Self {
            handle,
            composing_rx,
            highlight_rx,
        }
    }
}
