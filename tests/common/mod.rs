#![allow(dead_code)]

use beggar_rs::cards::Card;
use beggar_rs::engine::{RoundOutcome, Side, Summary, WarEngine};
use beggar_rs::hand::Hand;
use beggar_rs::report::{HandKind, Reporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Hand(Side, HandKind, Vec<Card>),
    Escalated(usize),
    Round(u64, RoundOutcome),
    Summary(Summary),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Reporter for Recorder {
    fn hand(&mut self, side: Side, kind: HandKind, cards: &[Card]) {
        self.events.push(Event::Hand(side, kind, cards.to_vec()));
    }
    fn war_escalated(&mut self, depth: usize) {
        self.events.push(Event::Escalated(depth));
    }
    fn round_finished(&mut self, round: u64, outcome: &RoundOutcome) {
        self.events.push(Event::Round(round, *outcome));
    }
    fn summary(&mut self, summary: &Summary) {
        self.events.push(Event::Summary(*summary));
    }
}

pub fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

pub fn engine(player: &str, computer: &str) -> WarEngine {
    WarEngine::new(hand(player), hand(computer)).unwrap()
}

pub fn recorded(player: &str, computer: &str) -> WarEngine<Recorder> {
    WarEngine::with_reporter(hand(player), hand(computer), Recorder::default()).unwrap()
}
