use crate::domain::model::CardId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happens when a card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    CollectFromBank { amount: i64 },
    PayBank { amount: i64 },
    CollectFromEachPlayer { amount: i64 },
    PayEachPlayer { amount: i64 },
    /// Move forward to a board index, collecting the Go salary when
    /// the move wraps.
    AdvanceTo { space: usize },
    MoveBack { steps: u8 },
    GoToJail,
    /// Savable: the player keeps the card until it is used, and it
    /// only then returns to its deck.
    GetOutOfJailFree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCard {
    pub text: String,
    pub effect: CardEffect,
}

impl ActionCard {
    pub fn new(text: impl Into<String>, effect: CardEffect) -> Self {
        Self {
            text: text.into(),
            effect,
        }
    }

    pub fn is_savable(&self) -> bool {
        matches!(self.effect, CardEffect::GetOutOfJailFree)
    }
}

/// A deck of action cards: a fixed card pool cycled through a draw
/// pile and a discard pile. Savable cards leave both piles while a
/// player holds them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCardDeck {
    pub name: String,
    cards: Vec<ActionCard>,
    draw: VecDeque<CardId>,
    discard: Vec<CardId>,
}

impl ActionCardDeck {
    pub fn new(name: impl Into<String>, cards: Vec<ActionCard>) -> Self {
        let draw = (0..cards.len()).map(CardId).collect();
        Self {
            name: name.into(),
            cards,
            draw,
            discard: Vec::new(),
        }
    }

    pub fn card(&self, id: CardId) -> &ActionCard {
        &self.cards[id.0]
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let mut pile: Vec<CardId> = self.draw.drain(..).collect();
        pile.shuffle(rng);
        self.draw = pile.into();
    }

    /// Take the top card. An empty draw pile reshuffles the discard
    /// back in first. Returns `None` only when every card in the pool
    /// is held by a player.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<CardId> {
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.draw = std::mem::take(&mut self.discard).into();
            self.shuffle(rng);
        }
        self.draw.pop_front()
    }

    pub fn discard(&mut self, card: CardId) {
        self.discard.push(card);
    }

    pub fn pool_size(&self) -> usize {
        self.cards.len()
    }

    pub fn draw_pile_size(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_pile_size(&self) -> usize {
        self.discard.len()
    }

    /// Cards currently held by players.
    pub fn held_count(&self) -> usize {
        self.cards.len() - self.draw.len() - self.discard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deck() -> ActionCardDeck {
        ActionCardDeck::new(
            "Chance",
            vec![
                ActionCard::new("Advance to Go", CardEffect::AdvanceTo { space: 0 }),
                ActionCard::new(
                    "Bank pays you dividend of $50",
                    CardEffect::CollectFromBank { amount: 50 },
                ),
                ActionCard::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree),
            ],
        )
    }

    #[test]
    fn test_draw_and_discard_cycle_conserves_cards() {
        let mut deck = deck();
        let mut rng = StdRng::seed_from_u64(3);
        deck.shuffle(&mut rng);

        for _ in 0..12 {
            let card = deck.draw(&mut rng).unwrap();
            deck.discard(card);
            assert_eq!(
                deck.draw_pile_size() + deck.discard_pile_size(),
                deck.pool_size()
            );
        }
    }

    #[test]
    fn test_empty_draw_pile_reshuffles_discard() {
        let mut deck = deck();
        let mut rng = StdRng::seed_from_u64(3);

        let mut drawn = Vec::new();
        for _ in 0..3 {
            drawn.push(deck.draw(&mut rng).unwrap());
        }
        assert_eq!(deck.draw_pile_size(), 0);
        for card in drawn {
            deck.discard(card);
        }

        assert!(deck.draw(&mut rng).is_some());
        assert_eq!(
            deck.draw_pile_size() + deck.discard_pile_size(),
            deck.pool_size() - 1
        );
    }

    #[test]
    fn test_held_card_leaves_the_deck() {
        let mut deck = deck();
        let mut rng = StdRng::seed_from_u64(3);

        // Draw everything, keep the savable card out, discard the rest.
        let mut kept = None;
        while let Some(card) = deck.draw(&mut rng) {
            if deck.card(card).is_savable() {
                kept = Some(card);
            } else {
                deck.discard(card);
            }
        }
        let kept = kept.expect("deck contains a savable card");
        assert_eq!(deck.held_count(), 1);

        // Cycling the rest of the deck never produces the held card.
        for _ in 0..10 {
            let card = deck.draw(&mut rng).unwrap();
            assert_ne!(card, kept);
            deck.discard(card);
        }

        // Returning it puts it back into circulation.
        deck.discard(kept);
        assert_eq!(deck.held_count(), 0);
    }
}
