use std::fmt::{self, Debug};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::Instrument;

use crate::{Actor, Message};

/// An ordered list of messages, each delivered to an actor after its own
/// delay.
///
/// Delays are sequential: every step waits for its delay after the
/// previous step has been delivered, not from a common starting point.
pub struct Timeline<S> {
    steps: Vec<(Duration, Box<dyn Message<S>>)>,
}

impl<S: Send + 'static> Timeline<S> {
    /// Creates an empty timeline.
    #[inline]
    pub fn new() -> Self {
        Self { steps: vec![] }
    }

    /// Appends a step that delivers `msg` after `delay`.
    #[inline]
    pub fn then<M: Message<S> + 'static>(
        mut self,
        delay: Duration,
        msg: M,
    ) -> Self {
        self.push(delay, Box::new(msg));
        self
    }

    /// Appends an already boxed step.
    #[inline]
    pub fn push(&mut self, delay: Duration, msg: Box<dyn Message<S>>) {
        self.steps.push((delay, msg));
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the timeline has no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of every step's delay.
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|(delay, _)| *delay).sum()
    }

    /// Starts playing the timeline against `actor`.
    ///
    /// The player only holds a weak reference to the actor, so it stops
    /// silently once the actor is gone. Dropping the returned handle
    /// cancels every step that has not been delivered yet.
    pub fn play(self, actor: &Actor<S>) -> TimelineHandle {
        let actor = actor.downgrade();
        let steps = self.steps;
        let task = tokio::spawn(
            async move {
                let total = steps.len();
                for (idx, (delay, msg)) in steps.into_iter().enumerate() {
                    sleep(delay).await;
                    trace!("delivering step {}/{total}", idx + 1);
                    if actor.send_boxed(msg).is_err() {
                        debug!("actor has stopped, drop remaining steps");
                        return;
                    }
                }
            }
            .instrument(trace_span!("timeline")),
        );
        TimelineHandle { task }
    }
}

impl<S: Send + 'static> Default for Timeline<S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Debug for Timeline<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|(delay, msg)| (delay, msg)))
            .finish()
    }
}

/// Handle to a playing [`Timeline`].
///
/// Dropping the handle cancels the remaining steps.
#[derive(Debug)]
pub struct TimelineHandle {
    task: JoinHandle<()>,
}

impl TimelineHandle {
    /// Cancels every step that has not been delivered yet.
    #[inline]
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns `true` if every step has been delivered or the timeline
    /// has been cancelled.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
