use beggar_rs::deck::Deck;
use beggar_rs::engine::{GameState, WarEngine};
use beggar_rs::report::ConsoleReporter;
use std::process::ExitCode;

const USAGE: &str = "usage: beggar [SEED] [--summary-only] [--max-rounds N]";

#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    summary_only: bool,
    max_rounds: Option<u64>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--summary-only" | "-q" => opts.summary_only = true,
            "--max-rounds" => {
                let n = args.next().ok_or("--max-rounds needs a value")?;
                opts.max_rounds = Some(n.parse().map_err(|_| format!("invalid round count: '{n}'"))?);
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            s if opts.seed.is_none() => {
                opts.seed = Some(s.parse().map_err(|_| format!("invalid seed: '{s}'"))?);
            }
            s => return Err(format!("unexpected argument: '{s}'\n{USAGE}")),
        }
    }
    if opts.seed.is_none() {
        if let Ok(s) = std::env::var("BEGGAR_SEED") {
            opts.seed = Some(s.parse().map_err(|_| format!("invalid BEGGAR_SEED: '{s}'"))?);
        }
    }
    Ok(opts)
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .try_init();

    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    let seed = opts.seed.unwrap_or_else(rand::random);
    log::info!("beggar-rs {} dealing with seed {seed}", beggar_rs::VERSION);

    let mut reporter = ConsoleReporter::stdout();
    if opts.summary_only {
        reporter = reporter.summary_only();
    }
    let mut deck = Deck::shuffled(seed);
    let mut engine = match WarEngine::deal(&mut deck, reporter) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let capped = opts.max_rounds.map(|limit| engine.run_for(limit));
    if capped == Some(GameState::InProgress) {
        let rounds = engine.stats().total_rounds;
        log::warn!("no winner after {rounds} rounds (seed {seed})");
        println!(
            "No winner after {rounds} rounds: player holds {}, computer holds {}",
            engine.player().len(),
            engine.computer().len()
        );
    } else {
        engine.run_game();
    }

    if let Err(e) = engine.into_reporter().finish() {
        eprintln!("ERROR: writing report: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(xs: &[&str]) -> impl Iterator<Item = String> {
        xs.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn seed_and_flags_in_any_order() {
        let opts = parse_args(args(&["--max-rounds", "500", "42", "-q"])).unwrap();
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.max_rounds, Some(500));
        assert!(opts.summary_only);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse_args(args(&["abc"])).is_err());
        assert!(parse_args(args(&["--max-rounds"])).is_err());
        assert!(parse_args(args(&["1", "2"])).is_err());
        assert_eq!(parse_args(args(&["--help"])).unwrap_err(), USAGE);
    }
}
