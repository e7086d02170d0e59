use std::error::Error;
use std::fmt;
use std::sync::{Arc, Weak};

use tracing::Instrument;

use crate::Message;
use crate::mailbox::Mailbox;

/// Returned when a message is sent to an actor that has stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorDeadError;

impl fmt::Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the actor has stopped")
    }
}

impl Error for ActorDeadError {}

/// Handle to an actor.
///
/// The actor keeps running as long as any strong handle is alive (or
/// until it's killed). Use [`Actor::downgrade`] for references that
/// must not keep the actor alive, such as pending timers.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor with the specified state and an optional label.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (mailbox, inbox) = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            inbox
                .serve(Arc::downgrade(&mailbox), state)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.send(Box::new(msg))
    }

    /// Sends an already boxed message to the actor.
    #[inline]
    pub fn send_boxed(
        &self,
        msg: Box<dyn Message<S>>,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.send(msg)
    }

    /// Attempts to kill the actor.
    ///
    /// The actor is not guaranteed to be killed immediately, but it
    /// will stop handling further messages and quit soon.
    #[inline]
    pub fn try_kill(&self) {
        self.mailbox.try_kill();
    }

    /// Creates a handle that doesn't keep the actor alive.
    #[inline]
    pub fn downgrade(&self) -> WeakActor<S> {
        WeakActor {
            mailbox: Arc::downgrade(&self.mailbox),
        }
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}

/// A non-owning handle to an actor.
pub struct WeakActor<S> {
    mailbox: Weak<Mailbox<S>>,
}

impl<S: Send + 'static> WeakActor<S> {
    /// Upgrades to a strong handle if the actor is still reachable.
    #[inline]
    pub fn upgrade(&self) -> Option<Actor<S>> {
        self.mailbox.upgrade().map(Actor::from_mailbox)
    }

    /// Sends a boxed message if the actor is still reachable.
    #[inline]
    pub fn send_boxed(
        &self,
        msg: Box<dyn Message<S>>,
    ) -> Result<(), ActorDeadError> {
        let Some(mailbox) = self.mailbox.upgrade() else {
            return Err(ActorDeadError);
        };
        mailbox.send(msg)
    }

    /// Sends a message if the actor is still reachable.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.send_boxed(Box::new(msg))
    }
}

impl<S> Clone for WeakActor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Weak::clone(&self.mailbox),
        }
    }
}
