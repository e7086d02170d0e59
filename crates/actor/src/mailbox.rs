use std::fmt::Debug;
use std::sync::Weak;

use tokio::sync::{mpsc, watch};

use crate::{Actor, ActorDeadError};

/// Helper trait for handling boxed messages.
pub trait BoxMessage<S>: Send + Debug + 'static {
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

/// The message that an actor can handle.
pub trait Message<S>: BoxMessage<S> {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> BoxMessage<S> for M {
    #[inline]
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

impl<S, M: Message<S> + ?Sized> Message<S> for Box<M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.handle_box(state, handle)
    }
}

/// Sending half of an actor: shared by every handle.
pub struct Mailbox<S> {
    msg_tx: mpsc::UnboundedSender<Box<dyn Message<S>>>,
    kill_tx: watch::Sender<bool>,
}

/// Receiving half of an actor, owned by its task.
pub struct Inbox<S> {
    msg_rx: mpsc::UnboundedReceiver<Box<dyn Message<S>>>,
    kill_rx: watch::Receiver<bool>,
}

impl<S: Send + 'static> Mailbox<S> {
    #[inline]
    pub fn new() -> (Self, Inbox<S>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        (Mailbox { msg_tx, kill_tx }, Inbox { msg_rx, kill_rx })
    }

    #[inline]
    pub fn send(&self, msg: Box<dyn Message<S>>) -> Result<(), ActorDeadError> {
        if *self.kill_tx.borrow() {
            return Err(ActorDeadError);
        }
        self.msg_tx.send(msg).map_err(|_| ActorDeadError)
    }

    #[inline]
    pub fn try_kill(&self) {
        self.kill_tx.send_replace(true);
    }
}

impl<S: Send + 'static> Inbox<S> {
    /// Waits for the next message. A kill request wins over queued
    /// messages; `None` means the actor must stop.
    async fn next(&mut self) -> Option<Box<dyn Message<S>>> {
        tokio::select! {
            biased;

            _ = self.kill_rx.changed() => None,
            msg = self.msg_rx.recv() => msg,
        }
    }

    /// Runs the actor until it's killed or its last strong handle is gone.
    pub async fn serve(mut self, mailbox: Weak<Mailbox<S>>, mut state: S) {
        debug!("started");
        while let Some(msg) = self.next().await {
            trace!("received message: {msg:?}");
            let Some(mailbox) = mailbox.upgrade() else {
                debug!("no strong handle left, discarding the message");
                break;
            };
            let handle = Actor::from_mailbox(mailbox);
            trace_span!("proc msg").in_scope(|| msg.handle(&mut state, &handle));
        }
        // Owned timelines are aborted here, before the task ends.
        drop(state);
        debug!("stopped");
    }
}
