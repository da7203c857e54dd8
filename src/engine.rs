use crate::cards::Card;
use crate::deck::{DealError, Deck, DECK_SIZE};
use crate::hand::{Hand, WarPot};
use crate::report::{HandKind, NullReporter, Reporter};
use std::collections::HashSet;
use std::fmt;

/// Cards dealt to each side.
pub const HAND_SIZE: usize = DECK_SIZE / 2;

/// Face-down cards laid per war step, after the tied card itself.
pub const WAR_FACE_DOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Computer];

    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Computer => "computer",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Computer => "Computer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a game could not be set up. Play never starts after one of these.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupError {
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("{0} has no cards to start with")]
    EmptyHand(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won(Side),
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::Won(_))
    }
}

/// Result of one war, however many ties it chained through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct WarOutcome {
    pub winner: Side,
    /// Number of tied comparisons; 1 for a war settled by its first reveal.
    pub depth: usize,
    /// Every card moved to the winner's bottom, its own included.
    pub cards_won: usize,
    /// The loser ran out of cards before it could reveal.
    pub forfeit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(Side),
    War(WarOutcome),
}

impl RoundOutcome {
    pub fn winner(&self) -> Side {
        match self {
            RoundOutcome::Won(side) => *side,
            RoundOutcome::War(war) => war.winner,
        }
    }
}

/// Per-game counters, bumped once per top-level round.
///
/// A war counts as a single round however deep it chains, and it is tallied
/// under `wars`, not under either side's round wins, so
/// `total_rounds == player_rounds_won + computer_rounds_won + wars`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameStats {
    pub total_rounds: u64,
    pub player_rounds_won: u64,
    pub computer_rounds_won: u64,
    pub wars: u64,
    pub player_wars_won: u64,
    pub computer_wars_won: u64,
    pub deepest_war: usize,
}

impl GameStats {
    /// Plain (non-war) rounds won by `side`.
    pub fn rounds_won(&self, side: Side) -> u64 {
        match side {
            Side::Player => self.player_rounds_won,
            Side::Computer => self.computer_rounds_won,
        }
    }

    pub fn wars_won(&self, side: Side) -> u64 {
        match side {
            Side::Player => self.player_wars_won,
            Side::Computer => self.computer_wars_won,
        }
    }

    fn record_round(&mut self, winner: Side) {
        match winner {
            Side::Player => self.player_rounds_won += 1,
            Side::Computer => self.computer_rounds_won += 1,
        }
    }

    fn record_war(&mut self, war: &WarOutcome) {
        self.wars += 1;
        match war.winner {
            Side::Player => self.player_wars_won += 1,
            Side::Computer => self.computer_wars_won += 1,
        }
        self.deepest_war = self.deepest_war.max(war.depth);
    }
}

/// Final result of a game. Wars are tallied apart from either side's plain
/// round wins, see [`GameStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Summary {
    pub winner: Side,
    pub stats: GameStats,
}

/// Two-sided War engine. Owns both hands, the counters, and the reporter.
///
/// ```
/// use beggar_rs::engine::{GameState, Side, WarEngine};
///
/// let mut engine = WarEngine::new("Kh 3c".parse().unwrap(), "2d".parse().unwrap()).unwrap();
/// let summary = engine.run_game();
/// assert_eq!(summary.winner, Side::Player);
/// assert_eq!(engine.state(), GameState::Won(Side::Player));
/// assert_eq!(engine.player().len(), 3);
/// ```
#[derive(Debug)]
pub struct WarEngine<R = NullReporter> {
    player: Hand,
    computer: Hand,
    stats: GameStats,
    starting_cards: usize,
    reporter: R,
}

impl WarEngine {
    pub fn new(player: Hand, computer: Hand) -> Result<Self, SetupError> {
        Self::with_reporter(player, computer, NullReporter)
    }
}

impl<R: Reporter> WarEngine<R> {
    /// Start from explicit hands. Every card must be distinct and both sides
    /// must hold at least one.
    pub fn with_reporter(player: Hand, computer: Hand, reporter: R) -> Result<Self, SetupError> {
        let mut seen = HashSet::with_capacity(player.len() + computer.len());
        for card in player.iter().chain(computer.iter()) {
            if !seen.insert(card) {
                return Err(SetupError::DuplicateCard(card));
            }
        }
        for side in Side::BOTH {
            let hand = match side {
                Side::Player => &player,
                Side::Computer => &computer,
            };
            if hand.is_empty() {
                return Err(SetupError::EmptyHand(side));
            }
        }
        let starting_cards = seen.len();
        Ok(Self { player, computer, stats: GameStats::default(), starting_cards, reporter })
    }

    /// Deal half a deck to each side, player first.
    pub fn deal(deck: &mut Deck, reporter: R) -> Result<Self, SetupError> {
        let player = Hand::from(deck.deal(HAND_SIZE)?);
        let computer = Hand::from(deck.deal(HAND_SIZE)?);
        let mut engine = Self::with_reporter(player, computer, reporter)?;
        engine.report_hands();
        Ok(engine)
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn computer(&self) -> &Hand {
        &self.computer
    }

    pub fn hand(&self, side: Side) -> &Hand {
        match side {
            Side::Player => &self.player,
            Side::Computer => &self.computer,
        }
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn starting_cards(&self) -> usize {
        self.starting_cards
    }

    /// Cards currently held across both hands.
    pub fn card_count(&self) -> usize {
        self.player.len() + self.computer.len()
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub fn state(&self) -> GameState {
        if self.player.is_empty() {
            GameState::Won(Side::Computer)
        } else if self.computer.is_empty() {
            GameState::Won(Side::Player)
        } else {
            GameState::InProgress
        }
    }

    /// Final tallies, once the game is over.
    pub fn summary(&self) -> Option<Summary> {
        match self.state() {
            GameState::Won(winner) => Some(Summary { winner, stats: self.stats }),
            GameState::InProgress => None,
        }
    }

    /// Compare the two top cards and settle the round, escalating to a war
    /// on a tie. Returns `None` without touching anything once a side is out
    /// of cards.
    pub fn play_round(&mut self) -> Option<RoundOutcome> {
        let (p, c) = (self.player.top()?, self.computer.top()?);
        self.stats.total_rounds += 1;
        let round = self.stats.total_rounds;
        self.report_hands();

        let outcome = if p.beats(c) {
            self.award_round(Side::Player, p, c);
            RoundOutcome::Won(Side::Player)
        } else if c.beats(p) {
            self.award_round(Side::Computer, p, c);
            RoundOutcome::Won(Side::Computer)
        } else {
            let war = self.resolve_war();
            self.stats.record_war(&war);
            RoundOutcome::War(war)
        };

        match &outcome {
            RoundOutcome::Won(side) => log::debug!("round {round}: {side} wins {p} vs {c}"),
            RoundOutcome::War(war) => log::debug!(
                "round {round}: {} wins war over {p} vs {c} (depth {}, {} cards, forfeit {})",
                war.winner,
                war.depth,
                war.cards_won,
                war.forfeit
            ),
        }
        self.reporter.round_finished(round, &outcome);
        Some(outcome)
    }

    /// Settle a tie between the two top cards, which must still be on their
    /// hands.
    ///
    /// Each step, a side that is down to its last card (or none) loses at
    /// once, the player being checked first; the winner collects both pots
    /// and that last card. Otherwise each side moves its tied card and up to
    /// [`WAR_FACE_DOWN`] more into its pot, never its final card, and the new
    /// top cards are compared. A strict winner collects the player pot, the
    /// computer pot, the loser's reveal, then its own reveal. Another tie
    /// repeats the step with the same pots.
    ///
    /// Unlike the usual house rule of abandoning the pots when a side runs
    /// dry mid-chain, the forfeit winner takes them, so no card leaves play.
    pub fn resolve_war(&mut self) -> WarOutcome {
        let mut player_pot = WarPot::new();
        let mut computer_pot = WarPot::new();
        let mut depth = 1;
        loop {
            if let Some(loser) = self.short_side() {
                return self.forfeit_war(loser, &mut player_pot, &mut computer_pot, depth);
            }

            let laid = (
                lay_down(&mut self.player, &mut player_pot),
                lay_down(&mut self.computer, &mut computer_pot),
            );
            log::trace!(
                "war step {depth}: laid {}/{}, pots {}/{}",
                laid.0,
                laid.1,
                player_pot.len(),
                computer_pot.len()
            );
            self.report_war(&player_pot, &computer_pot);

            // lay_down keeps a card in each hand; an empty hand would forfeit
            // at the top of the loop
            let (Some(p), Some(c)) = (self.player.top(), self.computer.top()) else {
                continue;
            };
            if p.ties(c) {
                depth += 1;
                self.reporter.war_escalated(depth);
                continue;
            }

            let winner = if p.beats(c) { Side::Player } else { Side::Computer };
            self.player.draw();
            self.computer.draw();
            let (theirs, own) = match winner {
                Side::Player => (c, p),
                Side::Computer => (p, c),
            };
            let hand = self.hand_mut(winner);
            let mut cards_won = player_pot.drain_into(hand) + computer_pot.drain_into(hand);
            hand.push_bottom(theirs);
            hand.push_bottom(own);
            cards_won += 2;
            return WarOutcome { winner, depth, cards_won, forfeit: false };
        }
    }

    /// Play rounds until a side holds every card, then report both final
    /// hands and the summary.
    pub fn run_game(&mut self) -> Summary {
        loop {
            if let GameState::Won(winner) = self.state() {
                let summary = Summary { winner, stats: self.stats };
                log::info!(
                    "{winner} wins after {} rounds ({} wars)",
                    summary.stats.total_rounds,
                    summary.stats.wars
                );
                self.report_hands();
                self.reporter.summary(&summary);
                return summary;
            }
            self.play_round();
        }
    }

    /// Play at most `max_rounds` rounds. No summary is reported.
    pub fn run_for(&mut self, max_rounds: u64) -> GameState {
        for _ in 0..max_rounds {
            if self.play_round().is_none() {
                break;
            }
        }
        self.state()
    }

    fn hand_mut(&mut self, side: Side) -> &mut Hand {
        match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        }
    }

    fn short_side(&self) -> Option<Side> {
        if self.player.len() <= 1 {
            Some(Side::Player)
        } else if self.computer.len() <= 1 {
            Some(Side::Computer)
        } else {
            None
        }
    }

    fn award_round(&mut self, winner: Side, p: Card, c: Card) {
        self.player.draw();
        self.computer.draw();
        let (theirs, own) = match winner {
            Side::Player => (c, p),
            Side::Computer => (p, c),
        };
        let hand = self.hand_mut(winner);
        hand.push_bottom(theirs);
        hand.push_bottom(own);
        self.stats.record_round(winner);
    }

    fn forfeit_war(
        &mut self,
        loser: Side,
        player_pot: &mut WarPot,
        computer_pot: &mut WarPot,
        depth: usize,
    ) -> WarOutcome {
        let winner = loser.opponent();
        let (win_hand, lose_hand) = match winner {
            Side::Player => (&mut self.player, &mut self.computer),
            Side::Computer => (&mut self.computer, &mut self.player),
        };
        let mut cards_won = player_pot.drain_into(win_hand) + computer_pot.drain_into(win_hand);
        cards_won += lose_hand.len();
        win_hand.extend_bottom(lose_hand.take_all());
        log::debug!("{loser} is out of cards in a war");
        WarOutcome { winner, depth, cards_won, forfeit: true }
    }

    fn report_hands(&mut self) {
        self.reporter.hand(Side::Player, HandKind::Regular, self.player.snapshot());
        self.reporter.hand(Side::Computer, HandKind::Regular, self.computer.snapshot());
    }

    fn report_war(&mut self, player_pot: &WarPot, computer_pot: &WarPot) {
        self.reporter.hand(Side::Player, HandKind::War, player_pot.as_slice());
        self.reporter.hand(Side::Computer, HandKind::War, computer_pot.as_slice());
        self.report_hands();
    }
}

/// Move the tied card and up to `WAR_FACE_DOWN` more from `hand` into `pot`,
/// keeping the last card in hand.
fn lay_down(hand: &mut Hand, pot: &mut WarPot) -> usize {
    let mut laid = 0;
    while laid <= WAR_FACE_DOWN && hand.len() > 1 {
        let Some(card) = hand.draw() else { break };
        pot.push(card);
        laid += 1;
    }
    laid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(player: &str, computer: &str) -> WarEngine {
        WarEngine::new(player.parse().unwrap(), computer.parse().unwrap()).unwrap()
    }

    #[test]
    fn higher_top_card_wins_the_round() {
        let mut e = engine("Kh 4c", "2d 5s");
        let outcome = e.play_round().unwrap();
        assert_eq!(outcome, RoundOutcome::Won(Side::Player));
        assert_eq!(e.player().to_string(), "4c 2d Kh");
        assert_eq!(e.computer().to_string(), "5s");
        assert_eq!(e.stats().total_rounds, 1);
        assert_eq!(e.stats().player_rounds_won, 1);
    }

    #[test]
    fn computer_collects_player_card_first() {
        let mut e = engine("3h 4c", "9d 5s");
        assert_eq!(e.play_round(), Some(RoundOutcome::Won(Side::Computer)));
        assert_eq!(e.computer().to_string(), "5s 3h 9d");
        assert_eq!(e.stats().computer_rounds_won, 1);
        assert_eq!(e.stats().player_rounds_won, 0);
    }

    #[test]
    fn lay_down_keeps_the_last_card() {
        let mut hand: Hand = "2c 3c 4c".parse().unwrap();
        let mut pot = WarPot::new();
        assert_eq!(lay_down(&mut hand, &mut pot), 2);
        assert_eq!(hand.to_string(), "4c");
        assert_eq!(pot.len(), 2);

        let mut long: Hand = "2c 3c 4c 5c 6c 7c".parse().unwrap();
        let mut pot = WarPot::new();
        assert_eq!(lay_down(&mut long, &mut pot), 1 + WAR_FACE_DOWN);
        assert_eq!(long.to_string(), "6c 7c");
    }

    #[test]
    fn short_hands_still_reveal_their_last_card() {
        // player can lay only the tied card, then reveals its final card
        let mut e = engine("7c Kc", "7d 2d 3d 4d 5d 6d");
        let outcome = e.play_round().unwrap();
        let RoundOutcome::War(war) = outcome else { panic!("expected a war") };
        assert_eq!(war.winner, Side::Player);
        assert!(!war.forfeit);
        assert_eq!(war.cards_won, 1 + 4 + 2);
        assert_eq!(e.player().to_string(), "7c 7d 2d 3d 4d 5d Kc");
        assert_eq!(e.computer().to_string(), "6d");
    }

    #[test]
    fn one_card_each_goes_to_the_computer() {
        let mut e = engine("7c", "7d");
        let RoundOutcome::War(war) = e.play_round().unwrap() else { panic!("expected a war") };
        assert_eq!(war.winner, Side::Computer);
        assert!(war.forfeit);
        assert_eq!(e.state(), GameState::Won(Side::Computer));
        assert_eq!(e.computer().to_string(), "7d 7c");
    }

    #[test]
    fn finished_game_ignores_further_rounds() {
        let mut e = engine("Kh", "2d");
        e.play_round();
        assert!(e.state().is_over());
        assert_eq!(e.play_round(), None);
        assert_eq!(e.stats().total_rounds, 1);
    }

    #[test]
    fn setup_rejects_duplicates_and_empty_hands() {
        let dup = WarEngine::new("Kh 2c".parse().unwrap(), "Kh".parse().unwrap());
        assert!(matches!(dup, Err(SetupError::DuplicateCard(_))));
        let empty = WarEngine::new(Hand::new(), "Kh".parse().unwrap());
        assert_eq!(empty.unwrap_err(), SetupError::EmptyHand(Side::Player));
    }
}
