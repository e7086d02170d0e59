use pinboard_model::{Message, SessionCache};

use super::Engine;
use crate::script::WELCOME;

type MessageCallback = Box<dyn Fn(&Message) + Send + Sync>;
type IdleCallback = Box<dyn Fn() + Send + Sync>;

/// [`Engine`] builder.
pub struct EngineBuilder {
    pub(crate) cache: Option<Box<dyn SessionCache>>,
    pub(crate) welcome: String,
    pub(crate) on_message: Option<MessageCallback>,
    pub(crate) on_idle: Option<IdleCallback>,
}

impl EngineBuilder {
    /// Creates a builder without a session cache. The transcript of such
    /// an engine lives only as long as the engine itself.
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: None,
            welcome: WELCOME.to_owned(),
            on_message: None,
            on_idle: None,
        }
    }

    /// Uses the specified session cache to restore and persist state.
    #[inline]
    pub fn with_session_cache<C: SessionCache + 'static>(
        mut self,
        cache: C,
    ) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Replaces the welcome message seeding a fresh transcript.
    #[inline]
    pub fn with_welcome_message<S: Into<String>>(mut self, welcome: S) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Attaches a callback to be invoked for every appended message,
    /// user messages included.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the last queued reply
    /// sequence has finished.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the engine, restoring the transcript from the session cache
    /// when possible.
    ///
    /// Must be called within a tokio runtime.
    #[inline]
    pub fn build(self) -> Engine {
        Engine::spawn_from_builder(self)
    }
}

impl Default for EngineBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
