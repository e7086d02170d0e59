use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Debug};

use pinboard_actor::{Actor, Message, Timeline, TimelineHandle};
use pinboard_model::{
    HighlightSignal, Message as ChatMessage, RecommendationCard, Role,
};
use tokio::sync::{oneshot, watch};

use super::EngineSnapshot;
use super::builder::EngineBuilder;
use crate::classify::Category;
use crate::conversation::Transcript;
use crate::persist::Persistence;
use crate::script::{self, ScriptedReply, SPECIAL_OFFER_DELAY};

/// A reply sequence that is currently being played.
struct ActiveChain {
    id: u64,
    category: Category,
    _timeline: TimelineHandle,
}

pub struct EngineState {
    transcript: Transcript,
    persistence: Persistence,
    special_offer_announced: bool,

    active_chain: Option<ActiveChain>,
    queued_chains: VecDeque<Category>,
    side_timelines: HashMap<u64, TimelineHandle>,
    next_timeline_id: u64,

    composing_tx: watch::Sender<bool>,
    highlight_tx: watch::Sender<HighlightSignal>,
    on_message: Option<Box<dyn Fn(&ChatMessage) + Send + Sync>>,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl EngineState {
    pub fn new(
        builder: EngineBuilder,
    ) -> (Self, watch::Receiver<bool>, watch::Receiver<HighlightSignal>) {
        let EngineBuilder {
            cache,
            welcome,
            on_message,
            on_idle,
        } = builder;

        let persistence = Persistence::new(cache);
        let transcript = persistence
            .load_transcript()
            .unwrap_or_else(|| Transcript::seeded(welcome));
        let special_offer_announced = persistence.load_special_offer_flag();
        persistence.save_transcript(&transcript);

        let (composing_tx, composing_rx) = watch::channel(false);
        let (highlight_tx, highlight_rx) =
            watch::channel(HighlightSignal::default());

        let state = Self {
            transcript,
            persistence,
            special_offer_announced,
            active_chain: None,
            queued_chains: Default::default(),
            side_timelines: Default::default(),
            next_timeline_id: 1,
            composing_tx,
            highlight_tx,
            on_message,
            on_idle,
        };
        (state, composing_rx, highlight_rx)
    }

    fn submit(&mut self, text: String, handle: &Actor<Self>) {
        if text.trim().is_empty() {
            trace!("ignoring blank input");
            return;
        }

        let category = Category::classify(&text);
        debug!("input classified as {category:?}");
        self.append(Role::User, text, vec![]);

        if self.active_chain.is_some() {
            // Replies are serialized, the chain starts once the current
            // one has finished.
            self.queued_chains.push_back(category);
        } else {
            self.start_chain(category, handle);
        }
        self.sync_composing();
    }

    fn start_chain(&mut self, category: Category, handle: &Actor<Self>) {
        let id = self.next_timeline_id();
        let steps = script::steps_for(category);
        let last = steps.len().saturating_sub(1);

        let mut timeline = Timeline::<Self>::new();
        for (idx, step) in steps.into_iter().enumerate() {
            timeline.push(
                step.delay,
                Box::new(ScriptedReplyMessage {
                    chain: id,
                    reply: step.reply,
                    finishes: idx == last,
                }),
            );
        }
        trace!(
            "starting chain {id} ({category:?}) lasting {:?}",
            timeline.total_duration()
        );

        self.active_chain = Some(ActiveChain {
            id,
            category,
            _timeline: timeline.play(handle),
        });
    }

    fn append_scripted_reply(
        &mut self,
        chain: u64,
        reply: ScriptedReply,
        finishes: bool,
        handle: &Actor<Self>,
    ) {
        let Some(active) = &self.active_chain else {
            warn!("reply for chain {chain} arrived without an active chain");
            return;
        };
        if active.id != chain {
            warn!("discarding stale reply for chain {chain}");
            return;
        }

        self.append(Role::Assistant, reply.content, reply.cards);

        if finishes {
            if let Some(active) = self.active_chain.take() {
                debug!("chain {} ({:?}) finished", active.id, active.category);
            }
            self.process_next_chain(handle);
        }
    }

    fn process_next_chain(&mut self, handle: &Actor<Self>) {
        if let Some(category) = self.queued_chains.pop_front() {
            self.start_chain(category, handle);
        } else if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
        self.sync_composing();
    }

    fn handle_return_navigation(
        &mut self,
        came_from_service: bool,
        reserved: bool,
        handle: &Actor<Self>,
    ) {
        if !(came_from_service && reserved) {
            return;
        }
        if self.special_offer_announced {
            trace!("special offer already announced in this session");
            return;
        }

        self.special_offer_announced = true;
        self.persistence.save_special_offer_flag();

        let id = self.next_timeline_id();
        let timeline = Timeline::<Self>::new()
            .then(SPECIAL_OFFER_DELAY, SpecialOfferMessage(id));
        self.side_timelines.insert(id, timeline.play(handle));
    }

    fn announce_special_offer(&mut self, timeline_id: u64) {
        self.side_timelines.remove(&timeline_id);
        let reply = script::special_offer();
        self.append(Role::Assistant, reply.content, reply.cards);
    }

    /// Appends a message and propagates it: cache, callback and, if the
    /// message has cards, the highlight signal.
    fn append<S: Into<String>>(
        &mut self,
        role: Role,
        content: S,
        cards: Vec<RecommendationCard>,
    ) {
        let msg = self.transcript.append(role, content, cards);
        trace!("appended {} from {:?}", msg.id, msg.role);

        if msg.has_cards() {
            let signal = HighlightSignal::from_cards(&msg.cards);
            debug!("highlighting {} markers", signal.len());
            self.highlight_tx.send_replace(signal);
        }
        if let Some(on_message) = &self.on_message {
            on_message(msg);
        }

        self.persistence.save_transcript(&self.transcript);
    }

    fn sync_composing(&self) {
        let composing =
            self.active_chain.is_some() || !self.queued_chains.is_empty();
        self.composing_tx.send_if_modified(|current| {
            if *current == composing {
                return false;
            }
            *current = composing;
            true
        });
    }

    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            transcript: self.transcript.clone(),
            composing: *self.composing_tx.borrow(),
            special_offer_announced: self.special_offer_announced,
        }
    }

    fn shutdown(&mut self, handle: &Actor<Self>) {
        let pending = self.side_timelines.len()
            + self.queued_chains.len()
            + usize::from(self.active_chain.is_some());
        debug!("shutting down with {pending} pending reply sequences");

        self.active_chain = None;
        self.queued_chains.clear();
        self.side_timelines.clear();
        self.sync_composing();
        handle.try_kill();
    }

    #[inline]
    fn next_timeline_id(&mut self) -> u64 {
        let id = self.next_timeline_id;
        self.next_timeline_id += 1;
        id
    }
}

#[derive(Debug)]
pub struct SubmitMessage(pub String);

impl Message<EngineState> for SubmitMessage {
    fn handle(self, state: &mut EngineState, handle: &Actor<EngineState>) {
        state.submit(self.0, handle);
    }
}

#[derive(Debug)]
pub struct ReturnNavigationMessage {
    pub came_from_service: bool,
    pub reserved: bool,
}

impl Message<EngineState> for ReturnNavigationMessage {
    fn handle(self, state: &mut EngineState, handle: &Actor<EngineState>) {
        state.handle_return_navigation(
            self.came_from_service,
            self.reserved,
            handle,
        );
    }
}

pub struct SnapshotMessage(pub oneshot::Sender<EngineSnapshot>);

impl Debug for SnapshotMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotMessage").finish_non_exhaustive()
    }
}

impl Message<EngineState> for SnapshotMessage {
    #[inline]
    fn handle(self, state: &mut EngineState, _handle: &Actor<EngineState>) {
        self.0.send(state.snapshot()).ok();
    }
}

#[derive(Debug)]
pub struct ShutdownMessage(pub Option<oneshot::Sender<()>>);

impl Message<EngineState> for ShutdownMessage {
    #[inline]
    fn handle(self, state: &mut EngineState, handle: &Actor<EngineState>) {
        state.shutdown(handle);
        if let Some(done) = self.0 {
            done.send(()).ok();
        }
    }
}

#[derive(Debug)]
struct ScriptedReplyMessage {
    chain: u64,
    reply: ScriptedReply,
    finishes: bool,
}

impl Message<EngineState> for ScriptedReplyMessage {
    fn handle(self, state: &mut EngineState, handle: &Actor<EngineState>) {
        state.append_scripted_reply(
            self.chain,
            self.reply,
            self.finishes,
            handle,
        );
    }
}

#[derive(Debug)]
struct SpecialOfferMessage(u64);

impl Message<EngineState> for SpecialOfferMessage {
    #[inline]
    fn handle(self, state: &mut EngineState, _handle: &Actor<EngineState>) {
        state.announce_special_offer(self.0);
    }
}
