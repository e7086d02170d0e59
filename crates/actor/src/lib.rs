//! A lightweight actor runtime with timed message delivery.
//!
//! Every actor owns its state and handles messages one at a time from a
//! single mailbox, so the state never needs a lock. Deferred work is
//! expressed as a [`Timeline`]: an ordered list of `(delay, message)`
//! steps played against an actor.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod handle;
mod mailbox;
mod timeline;

pub use handle::{Actor, ActorDeadError, WeakActor};
pub use mailbox::Message;
pub use timeline::{Timeline, TimelineHandle};

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    struct Add(u32);

    impl Message<Counter> for Add {
        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) {
            state.value += self.0;
        }
    }

    #[derive(Debug)]
    struct Get(oneshot::Sender<u32>);

    impl Message<Counter> for Get {
        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) {
            self.0.send(state.value).unwrap();
        }
    }

    #[tokio::test]
    async fn test_send_message() {
        let actor = Actor::spawn(Counter::default(), None);
        actor.send(Add(42)).unwrap();

        let (tx, rx) = oneshot::channel();
        actor.send(Get(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_weak_handle_dies_with_actor() {
        let actor = Actor::spawn(Counter::default(), Some("counter"));
        let weak = actor.downgrade();
        assert!(weak.send(Add(1)).is_ok());

        drop(actor);
        assert!(weak.upgrade().is_none());
        assert!(weak.send(Add(1)).is_err());
    }

    #[tokio::test]
    async fn test_killed_actor_rejects_messages() {
        let actor = Actor::spawn(Counter::default(), Some("counter"));
        let (tx, rx) = oneshot::channel();
        actor.send(Get(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), 0);

        actor.try_kill();
        assert_eq!(actor.send(Add(1)), Err(ActorDeadError));
        assert_eq!(actor.downgrade().send(Add(1)), Err(ActorDeadError));
    }
}
