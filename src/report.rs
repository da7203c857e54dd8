// Reporting boundary. The engine pushes hand snapshots and results through
// `Reporter` so a console trace, a test recorder, or nothing at all can sit
// on the other side without the engine knowing which.

use crate::cards::Card;
use crate::engine::{RoundOutcome, Side, Summary};
use std::fmt;
use std::io;

/// Which pile a snapshot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    Regular,
    War,
}

impl HandKind {
    pub fn label(self) -> &'static str {
        match self {
            HandKind::Regular => "regular",
            HandKind::War => "war",
        }
    }
}

pub trait Reporter {
    /// A side's pile, top first. Regular hands are reported at the start of
    /// each round and after the deal; war pots (then regular hands) after
    /// each war lay.
    fn hand(&mut self, _side: Side, _kind: HandKind, _cards: &[Card]) {}

    /// A war reveal tied again; `depth` is the new chain length.
    fn war_escalated(&mut self, _depth: usize) {}

    fn round_finished(&mut self, _round: u64, _outcome: &RoundOutcome) {}

    /// Called once, when one side holds every card.
    fn summary(&mut self, _summary: &Summary) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn hand(&mut self, side: Side, kind: HandKind, cards: &[Card]) {
        (**self).hand(side, kind, cards);
    }
    fn war_escalated(&mut self, depth: usize) {
        (**self).war_escalated(depth);
    }
    fn round_finished(&mut self, round: u64, outcome: &RoundOutcome) {
        (**self).round_finished(round, outcome);
    }
    fn summary(&mut self, summary: &Summary) {
        (**self).summary(summary);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Writes a readable game trace to any `io::Write`.
///
/// Write failures do not interrupt the game; the first one is kept and
/// returned by [`ConsoleReporter::finish`].
#[derive(Debug)]
pub struct ConsoleReporter<W: io::Write> {
    out: W,
    show_hands: bool,
    error: Option<io::Error>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: io::Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, show_hands: true, error: None }
    }

    /// Skip hand snapshots and war escalations; keep round results and the summary.
    pub fn summary_only(mut self) -> Self {
        self.show_hands = false;
        self
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            self.error = Some(e);
        }
    }
}

impl<W: io::Write> Reporter for ConsoleReporter<W> {
    fn hand(&mut self, side: Side, kind: HandKind, cards: &[Card]) {
        if !self.show_hands {
            return;
        }
        let line = cards.iter().map(|c| c.pretty()).collect::<Vec<_>>().join(" ");
        self.emit(format_args!(
            "{}'s {} hand ({}): {}\n",
            side,
            kind.label(),
            cards.len(),
            line
        ));
    }

    fn war_escalated(&mut self, depth: usize) {
        if self.show_hands {
            self.emit(format_args!("It is time for _another_ war! (chain of {depth})\n"));
        }
    }

    fn round_finished(&mut self, round: u64, outcome: &RoundOutcome) {
        match outcome {
            RoundOutcome::Won(side) => {
                self.emit(format_args!("Round {round}: {} won\n", side.title()))
            }
            RoundOutcome::War(war) if war.forfeit => self.emit(format_args!(
                "Round {round}: {} won a war ({} out of cards in a war)\n",
                war.winner.title(),
                war.winner.opponent()
            )),
            RoundOutcome::War(war) => self.emit(format_args!(
                "Round {round}: {} won a war of {} tie(s), taking {} cards\n",
                war.winner.title(),
                war.depth,
                war.cards_won
            )),
        }
    }

    /// Plain round wins per side, then wars on a line of their own. Wars are
    /// not folded into the computer's round count.
    fn summary(&mut self, summary: &Summary) {
        let s = &summary.stats;
        self.emit(format_args!(
            "===================\n\
             Game results are...\n\
             {} total rounds played\n\
             Player won {} rounds\n\
             Computer won {} rounds\n\
             {} wars: player won {}, computer won {}, longest chain {}\n\
             {} wins (end of game)\n",
            s.total_rounds,
            s.player_rounds_won,
            s.computer_rounds_won,
            s.wars,
            s.player_wars_won,
            s.computer_wars_won,
            s.deepest_war,
            summary.winner.title()
        ));
    }
}
