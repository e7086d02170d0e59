//! Conversation-related types.

use pinboard_model::{Message, RecommendationCard, Role};

/// Identifier of the seeded welcome message.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

const ID_PREFIX: &str = "msg:";

/// The append-only, ordered list of messages exchanged in one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_seq: u64,
}

impl Transcript {
    /// Creates a transcript holding only the welcome message.
    pub(crate) fn seeded<S: Into<String>>(welcome: S) -> Self {
        Self {
            messages: vec![Message::new(
                WELCOME_MESSAGE_ID,
                Role::Assistant,
                welcome,
            )],
            next_seq: 1,
        }
    }

    /// Creates a transcript from previously saved messages.
    ///
    /// New ids continue after the largest sequence number found, so they
    /// never collide with restored ones. Returns `None` if no sequence
    /// number is left after the largest one.
    pub(crate) fn restored(messages: Vec<Message>) -> Option<Self> {
        let largest = messages
            .iter()
            .filter_map(|msg| msg.id.strip_prefix(ID_PREFIX))
            .filter_map(|seq| seq.parse::<u64>().ok())
            .max();
        let next_seq = match largest {
            Some(seq) => seq.checked_add(1)?,
            None => 1,
        };
        Some(Self { messages, next_seq })
    }

    /// Appends a new message and returns it.
    pub(crate) fn append<S: Into<String>>(
        &mut self,
        role: Role,
        content: S,
        cards: Vec<RecommendationCard>,
    ) -> &Message {
        let id = format!("{ID_PREFIX}{}", self.next_seq);
        self.next_seq = self.next_seq.saturating_add(1);
        self.messages
            .push(Message::new(id, role, content).with_cards(cards));
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    /// Returns all messages in append order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_resume_after_restore() {
        let mut transcript = Transcript::seeded("Welcome");
        transcript.append(Role::User, "hi", vec![]);
        transcript.append(Role::Assistant, "hello", vec![]);
        assert_eq!(transcript.last().unwrap().id, "msg:2");

        let mut restored =
            Transcript::restored(transcript.messages().to_vec()).unwrap();
        let id = restored.append(Role::User, "again", vec![]).id.clone();
        assert_eq!(id, "msg:3");
        assert_eq!(restored.len(), 4);
    }

    #[test]
    fn test_foreign_ids_are_skipped() {
        let messages = vec![
            Message::new("1731578400000", Role::User, "hi"),
            Message::new("msg:oops", Role::Assistant, "hello"),
        ];
        let mut restored = Transcript::restored(messages).unwrap();
        let id = restored.append(Role::User, "x", vec![]).id.clone();
        assert_eq!(id, "msg:1");
    }

    #[test]
    fn test_exhausted_ids_are_rejected() {
        let messages = vec![Message::new(
            format!("msg:{}", u64::MAX),
            Role::User,
            "x",
        )];
        assert!(Transcript::restored(messages).is_none());

        let messages = vec![Message::new(
            format!("msg:{}", u64::MAX - 1),
            Role::User,
            "x",
        )];
        let mut restored = Transcript::restored(messages).unwrap();
        let id = restored.append(Role::User, "y", vec![]).id.clone();
        assert_eq!(id, format!("msg:{}", u64::MAX));
    }
}
