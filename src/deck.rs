use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealError {
    #[error("deck ran out of cards: requested {requested}, available {available}")]
    Insufficient { requested: usize, available: usize },
}

/// A standard 52-card deck. The top of the deck is the end of `cards`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use beggar_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// Standard deck shuffled with a seeded RNG.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_seeded(seed);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal exactly `n` cards from the top, in draw order.
    ///
    /// Either all `n` cards are dealt or none are: a short deck is left
    /// untouched.
    ///
    /// ```
    /// use beggar_rs::deck::Deck;
    ///
    /// let mut deck = Deck::standard();
    /// assert_eq!(deck.deal(26).unwrap().len(), 26);
    /// assert_eq!(deck.deal(26).unwrap().len(), 26);
    /// assert!(deck.deal(1).is_err());
    /// ```
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DealError> {
        if n > self.cards.len() {
            return Err(DealError::Insufficient { requested: n, available: self.cards.len() });
        }
        Ok((0..n).filter_map(|_| self.draw()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), DECK_SIZE);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), DECK_SIZE);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Deck::shuffled(42);
        let d2 = Deck::shuffled(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, Deck::standard().cards);
    }

    #[test]
    fn shuffle_with_matches_seeded_shuffle() {
        let mut d = Deck::standard();
        d.shuffle_with(&mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(d.cards, Deck::shuffled(9).cards);
    }

    #[test]
    fn deal_takes_from_the_top() {
        let mut d = Deck::shuffled(7);
        let top = *d.as_slice().last().unwrap();
        let dealt = d.deal(5).unwrap();
        assert_eq!(dealt.len(), 5);
        assert_eq!(dealt[0], top);
        assert_eq!(d.len(), 47);
    }

    #[test]
    fn short_deal_leaves_deck_untouched() {
        let mut d = Deck::standard();
        d.deal(50).unwrap();
        let err = d.deal(3).unwrap_err();
        assert_eq!(err, DealError::Insufficient { requested: 3, available: 2 });
        assert_eq!(d.len(), 2);
    }
}
