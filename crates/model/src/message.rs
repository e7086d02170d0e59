use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The scripted assistant.
    Assistant,
    /// The person browsing the map.
    User,
}

/// A scripted service suggestion attached to an assistant message.
///
/// All display fields are opaque and passed through verbatim. The `id`
/// matches the identifier of a marker on the map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCard {
    /// Identifier of the marker this card refers to.
    pub id: String,
    /// Display name of the provider.
    pub name: String,
    /// Service category, e.g. "Home Cook".
    pub category: String,
    /// Path to the provider's avatar image.
    #[serde(default)]
    pub avatar: String,
    /// Reputation summary.
    pub reputation: String,
    /// Where else the provider has been active.
    pub global_history: String,
    /// Pricing summary.
    pub pricing: String,
    /// Shortened wallet address.
    pub address: String,
}

/// An entry in the transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier of the message.
    pub id: String,
    /// Who wrote the message.
    pub role: Role,
    /// Display text.
    pub content: String,
    /// Creation time. Informational only, transcript order is append
    /// order.
    pub timestamp: DateTime<Utc>,
    /// Recommendation cards, empty when the message carries none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<RecommendationCard>,
}

impl Message {
    /// Creates a message without cards, stamped with the current time.
    #[inline]
    pub fn new<ID: Into<String>, S: Into<String>>(
        id: ID,
        role: Role,
        content: S,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            cards: vec![],
        }
    }

    /// Attaches recommendation cards to the message.
    #[inline]
    pub fn with_cards(mut self, cards: impl Into<Vec<RecommendationCard>>) -> Self {
        self.cards = cards.into();
        self
    }

    /// Returns `true` if the message carries at least one card.
    #[inline]
    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card(id: &str) -> RecommendationCard {
        RecommendationCard {
            id: id.to_owned(),
            name: "Ana".to_owned(),
            category: "Home Cook".to_owned(),
            avatar: "/profiles/ana.jpg".to_owned(),
            reputation: "12 verified jobs in San Martín".to_owned(),
            global_history: "Also active in London, CDMX".to_owned(),
            pricing: "From 30k ARS per dinner".to_owned(),
            address: "0x2c75...5c23".to_owned(),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let msg = Message::new("msg:1", Role::Assistant, "Hi")
            .with_cards([card("ana-cook")]);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["cards"][0]["globalHistory"], "Also active in London, CDMX");

        let plain = Message::new("msg:2", Role::User, "Hello");
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("cards").is_none());
    }

    #[test]
    fn test_missing_cards_means_none() {
        let msg: Message = serde_json::from_value(json!({
            "id": "welcome",
            "role": "assistant",
            "content": "Welcome!",
            "timestamp": "2025-11-14T10:00:00.000Z",
        }))
        .unwrap();
        assert!(!msg.has_cards());
        assert_eq!(msg.role, Role::Assistant);
    }
}
