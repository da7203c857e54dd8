//! beggar-rs: Beggar Your Neighbour simulation
//!
//! Goals:
//! - Deterministic replay: the outcome depends only on the starting hands
//! - Cards are conserved across every round, war, and forfeit
//! - No panics for bad setup; use `Result` for recoverable errors
//!
//! ## Quick start: play a seeded game
//! ```
//! use beggar_rs::deck::Deck;
//! use beggar_rs::engine::WarEngine;
//! use beggar_rs::report::NullReporter;
//!
//! let mut deck = Deck::shuffled(42);
//! let mut engine = WarEngine::deal(&mut deck, NullReporter).unwrap();
//! engine.run_for(10);
//! assert_eq!(engine.card_count(), 52);
//! ```
//!
//! ## Console runner
//! Run one game with a full trace:
//! ```sh
//! cargo run --bin beggar -- 42
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod hand;
pub mod report;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
