//! Canned replies and their timing.

use std::time::Duration;

use pinboard_model::RecommendationCard;

use crate::classify::Category;

/// Default welcome message seeding a fresh transcript.
pub const WELCOME: &str = "Welcome to San Martín, John. I can help you find \
    local places and people who offer services. What are you looking for?";

/// First childcare reply.
pub const CHILDCARE_SEARCHING: &str = "Looking for babysitters near you…";
/// Second childcare reply.
pub const CHILDCARE_NONE_FOUND: &str = "Right now there are no babysitters \
    listed. I've asked the local network, and I'll notify you if someone \
    becomes available.";
/// Third childcare reply.
pub const CHILDCARE_ANYTHING_ELSE: &str = "Anything else you need help with?";
/// Home cook reply, carries the home cook cards.
pub const HOME_COOK_FOUND: &str =
    "I found 3 local home cooks who serve your area.";
/// Reply to anything unrecognized.
pub const FALLBACK: &str = "I can help you find local services like home \
    cooks, babysitters, tour guides, and more. What would you like to find?";
/// One-time message shown after a reservation, carries the babysitter card.
pub const SPECIAL_OFFER: &str =
    "Good news — we found a babysitter! Here's her profile.";

/// Delay before the one-time special offer message.
pub const SPECIAL_OFFER_DELAY: Duration = Duration::from_millis(1500);

/// One assistant reply produced by a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedReply {
    /// Display text.
    pub content: &'static str,
    /// Cards attached to the reply.
    pub cards: Vec<RecommendationCard>,
}

impl ScriptedReply {
    #[inline]
    fn text(content: &'static str) -> Self {
        Self {
            content,
            cards: vec![],
        }
    }
}

/// A reply and the delay after the previous step before it's appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptStep {
    /// Delay measured from the previous step.
    pub delay: Duration,
    /// What gets appended.
    pub reply: ScriptedReply,
}

/// Returns the ordered reply steps for a category.
pub fn steps_for(category: Category) -> Vec<ScriptStep> {
    let step = |millis, reply| ScriptStep {
        delay: Duration::from_millis(millis),
        reply,
    };
    match category {
        Category::ChildcareEmpty => vec![
            step(500, ScriptedReply::text(CHILDCARE_SEARCHING)),
            step(1500, ScriptedReply::text(CHILDCARE_NONE_FOUND)),
            step(1000, ScriptedReply::text(CHILDCARE_ANYTHING_ELSE)),
        ],
        Category::HomeCookMatch => vec![step(
            1000,
            ScriptedReply {
                content: HOME_COOK_FOUND,
                cards: home_cook_cards(),
            },
        )],
        Category::Fallback => vec![step(800, ScriptedReply::text(FALLBACK))],
    }
}

/// The one-time special offer reply.
pub fn special_offer() -> ScriptedReply {
    ScriptedReply {
        content: SPECIAL_OFFER,
        cards: vec![card(
            "maria-babysitter",
            "María",
            "Babysitter",
            "/profiles/maria.jpg",
            "15 verified jobs in San Martín",
            "Also active in Buenos Aires, Bariloche",
            "From 5k ARS per hour",
            "0x9fE2...8a1C",
        )],
    }
}

fn home_cook_cards() -> Vec<RecommendationCard> {
    vec![
        card(
            "ana-cook",
            "Ana",
            "Home Cook",
            "/profiles/ana.jpg",
            "12 verified jobs in San Martín",
            "Also active in London, CDMX",
            "From 30k ARS per dinner",
            "0x2c75...5c23",
        ),
        card(
            "carlos-cook",
            "Carlos",
            "Home Cook",
            "/profiles/carlos.jpg",
            "18 verified jobs in San Martín",
            "Also active in Buenos Aires, Mendoza",
            "From 35k ARS per dinner",
            "0x5aAe...eAed",
        ),
        card(
            "lucia-cook",
            "Lucía",
            "Home Cook",
            "/profiles/lucia.jpg",
            "9 verified jobs in San Martín",
            "Also active in Barcelona, Lima",
            "From 28k ARS per dinner",
            "0x71C7...976F",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn card(
    id: &str,
    name: &str,
    category: &str,
    avatar: &str,
    reputation: &str,
    global_history: &str,
    pricing: &str,
    address: &str,
) -> RecommendationCard {
    RecommendationCard {
        id: id.to_owned(),
        name: name.to_owned(),
        category: category.to_owned(),
        avatar: avatar.to_owned(),
        reputation: reputation.to_owned(),
        global_history: global_history.to_owned(),
        pricing: pricing.to_owned(),
        address: address.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_card_ids_unique_within_reply() {
        for category in
            [Category::ChildcareEmpty, Category::HomeCookMatch, Category::Fallback]
        {
            for step in steps_for(category) {
                let ids: HashSet<_> =
                    step.reply.cards.iter().map(|card| &card.id).collect();
                assert_eq!(ids.len(), step.reply.cards.len());
            }
        }
    }

    #[test]
    fn test_childcare_timing() {
        let delays: Vec<_> = steps_for(Category::ChildcareEmpty)
            .into_iter()
            .map(|step| step.delay.as_millis())
            .collect();
        assert_eq!(delays, [500, 1500, 1000]);
    }
}
