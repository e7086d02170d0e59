use std::sync::Arc;

use pinboard_core::{Engine, EngineBuilder};
use pinboard_model::{HighlightSignal, Message, ReturnNavigation, SessionCache};
use pinboard_session_cache::MemoryCache;
use tokio::sync::watch;

use crate::catalog::{Catalog, CatalogError};
use crate::map::MarkerBoard;

type MessageCallback = Arc<dyn Fn(&Message) + Send + Sync>;
type IdleCallback = Arc<dyn Fn() + Send + Sync>;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    cache: Arc<dyn SessionCache>,
    catalog: Option<Catalog>,
    welcome: Option<String>,
    on_message: Option<MessageCallback>,
    on_idle: Option<IdleCallback>,
}

impl SessionBuilder {
    /// Creates a session builder backed by a fresh in-memory session
    /// cache and the bundled catalog.
    pub fn new() -> Self {
        Self {
            cache: Arc::new(MemoryCache::new()),
            catalog: None,
            welcome: None,
            on_message: None,
            on_idle: None,
        }
    }

    /// Uses the specified session cache.
    #[inline]
    pub fn with_session_cache<C: SessionCache + 'static>(
        mut self,
        cache: C,
    ) -> Self {
        self.cache = Arc::new(cache);
        self
    }

    /// Uses the specified catalog instead of the bundled one.
    #[inline]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replaces the welcome message seeding a fresh transcript.
    #[inline]
    pub fn with_welcome_message<S: Into<String>>(mut self, welcome: S) -> Self {
        self.welcome = Some(welcome.into());
        self
    }

    /// Attaches a callback to be invoked for every appended message.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Arc::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the assistant is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Arc::new(on_idle));
        self
    }

    /// Builds a new session. Must be called within a tokio runtime.
    pub fn build(self) -> Result<Session, CatalogError> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::bundled()?,
        };
        let board = MarkerBoard::new(catalog.markers());
        let factory = EngineFactory {
            cache: self.cache,
            welcome: self.welcome,
            on_message: self.on_message,
            on_idle: self.on_idle,
        };
        let engine = factory.build();

        Ok(Session {
            engine,
            board,
            catalog,
            factory,
        })
    }
}

impl Default for SessionBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to build the engine again after a reload.
struct EngineFactory {
    cache: Arc<dyn SessionCache>,
    welcome: Option<String>,
    on_message: Option<MessageCallback>,
    on_idle: Option<IdleCallback>,
}

impl EngineFactory {
    fn build(&self) -> Engine {
        let mut builder =
            EngineBuilder::new().with_session_cache(Arc::clone(&self.cache));
        if let Some(welcome) = &self.welcome {
            builder = builder.with_welcome_message(welcome.clone());
        }
        if let Some(on_message) = &self.on_message {
            let on_message = Arc::clone(on_message);
            builder = builder.on_message(move |msg| on_message(msg));
        }
        if let Some(on_idle) = &self.on_idle {
            let on_idle = Arc::clone(on_idle);
            builder = builder.on_idle(move || on_idle());
        }
        builder.build()
    }
}

/// A browsing session: the chat panel and the map next to it.
///
/// The session holds a conversation engine and the marker board it drives.
/// Dropping the session stops the engine and discards pending replies, the
/// session cache is left untouched.
pub struct Session {
    engine: Engine,
    board: MarkerBoard,
    catalog: Catalog,
    factory: EngineFactory,
}

impl Session {
    /// Sends a message to the assistant.
    #[inline]
    pub fn send_message(&self, message: &str) {
        self.engine.submit(message);
    }

    /// Tells the assistant the user landed back on the map, with the
    /// landing query (e.g. `from=service&reserved=true`).
    pub fn return_from(&self, query: &str) {
        let nav = ReturnNavigation::from_query(query);
        debug!("returned with {nav:?}");
        self.engine.return_from(&nav);
    }

    /// Returns `true` if the assistant is composing a reply.
    #[inline]
    pub fn is_composing(&self) -> bool {
        self.engine.is_composing()
    }

    /// Subscribes to the composing state.
    #[inline]
    pub fn composing(&self) -> watch::Receiver<bool> {
        self.engine.composing()
    }

    /// Subscribes to the highlight signal.
    #[inline]
    pub fn highlight(&self) -> watch::Receiver<HighlightSignal> {
        self.engine.highlight()
    }

    /// Returns the transcript, or an empty list if the engine has stopped.
    pub async fn transcript(&self) -> Vec<Message> {
        match self.engine.snapshot().await {
            Some(snapshot) => snapshot.transcript.messages().to_vec(),
            None => vec![],
        }
    }

    /// Pulls the latest highlight signal into the marker board. Returns
    /// `true` if the emphasis changed.
    pub fn sync_markers(&mut self) -> bool {
        self.board.set_highlight(self.engine.current_highlight())
    }

    /// The marker board, as of the last [`Session::sync_markers`].
    #[inline]
    pub fn board(&self) -> &MarkerBoard {
        &self.board
    }

    /// The catalog shown on the map.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tears the engine down and builds it again from the session cache,
    /// like reloading the page. Messages sent before the reload are
    /// persisted by the old engine before the new one reads the cache.
    pub async fn reload(&mut self) {
        info!("reloading the session");
        self.engine.close().await;
        self.engine = self.factory.build();
        self.sync_markers();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}
