use crate::cards::{parse_cards, Card};
use std::collections::VecDeque;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A side's pile of cards. The front is the top (played next); won cards
/// are added at the bottom.
///
/// ```
/// use beggar_rs::hand::Hand;
///
/// let mut hand: Hand = "Kh 2c".parse().unwrap();
/// let top = hand.draw().unwrap();
/// hand.push_bottom(top);
/// assert_eq!(hand.to_string(), "2c Kh");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: VecDeque<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card that will be played next.
    pub fn top(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn push_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn extend_bottom<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Cards from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Contiguous top-to-bottom view, for reporting.
    pub fn snapshot(&mut self) -> &[Card] {
        self.cards.make_contiguous()
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }

    pub(crate) fn take_all(&mut self) -> impl Iterator<Item = Card> + '_ {
        self.cards.drain(..)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards: cards.into() }
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(cards.into())
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_cards(f, self.iter())
    }
}

fn write_cards<W, I>(out: &mut W, cards: I) -> std::fmt::Result
where
    W: std::fmt::Write,
    I: IntoIterator<Item = Card>,
{
    for (i, c) in cards.into_iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{c}")?;
    }
    Ok(())
}

/// Face-down cards one side has committed to a war, in the order laid.
/// Nested wars keep adding to the same pot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarPot {
    cards: Vec<Card>,
}

impl WarPot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Move every card, in laid order, to the bottom of `hand`.
    pub fn drain_into(&mut self, hand: &mut Hand) -> usize {
        let n = self.cards.len();
        hand.extend_bottom(self.cards.drain(..));
        n
    }
}
