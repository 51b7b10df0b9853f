//! Zerguem headless demo
//!
//! Plays a full match with an autopilot on a simulated 60 Hz clock and
//! prints the final ranking. `RUST_LOG=info` shows the play-by-play.

use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;
use zerguem::platform::ManualClock;
use zerguem::ranking::Medal;
use zerguem::{GameEvent, GameResult, Game, LogPresenter, Presenter, RankedResult, Settings, Stage};

/// Simulated frame length
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Frames between autopilot shots
const AIM_EVERY: u32 = 20;

struct Args {
    players: Vec<String>,
    seed: Option<u64>,
    settings: Option<PathBuf>,
    json: bool,
}

fn usage() {
    println!("Usage: zerguem [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -p, --players <LIST>  Comma-separated names, or a player count (default 2)");
    println!("  -s, --seed <INT>      Seed for target spawning");
    println!("      --settings <FILE> JSON settings file");
    println!("      --json            Print game events as JSON lines");
    println!("  -h, --help            Print help");
}

fn parse_args(mut iter: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut args = Args {
        players: vec!["Player 1".to_string(), "Player 2".to_string()],
        seed: None,
        settings: None,
        json: false,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--players" | "-p" => {
                let val = iter.next().ok_or("--players requires a value")?;
                args.players = match val.parse::<usize>() {
                    Ok(count) => (0..count).map(zerguem::default_player_name).collect(),
                    Err(_) => val.split(',').map(str::to_string).collect(),
                };
            }
            "--seed" | "-s" => {
                let val = iter.next().ok_or("--seed requires a value")?;
                let seed = val
                    .parse::<u64>()
                    .map_err(|_| format!("seed must be a valid integer, got {}", val))?;
                args.seed = Some(seed);
            }
            "--settings" => {
                let val = iter.next().ok_or("--settings requires a path")?;
                args.settings = Some(PathBuf::from(val));
            }
            "--json" => args.json = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Some(args))
}

/// Prints every event except frames as one JSON object per line
struct JsonLines;

impl Presenter for JsonLines {
    fn on_event(&mut self, event: &GameEvent) -> GameResult<()> {
        if !matches!(event, GameEvent::Frame(_)) {
            println!("{}", serde_json::to_string(event)?);
        }
        Ok(())
    }
}

/// Aim at the first live target. Every fourth shot goes wide.
fn autopilot<P: Presenter>(game: &mut Game<P>, shot: u32) {
    let Some(pos) = game.turn().entities.iter().find(|e| e.is_alive()).map(|e| e.pos) else {
        return;
    };
    let aim = if shot % 4 == 3 {
        pos + Vec2::splat(80.0)
    } else {
        pos
    };
    game.pointer_move(aim.x, aim.y);
    game.click(aim.x, aim.y);
}

fn play<P: Presenter>(mut game: Game<P>, players: &[String]) -> Vec<RankedResult> {
    let clock = ManualClock::new();
    game.start_match(players);
    game.update(&clock);

    let settings = game.settings();
    let per_turn = (settings.turn_duration_secs + settings.transition_secs + 1) as u64;
    let max_frames = per_turn * players.len().max(1) as u64 * 60 * 2;

    let mut shots = 0;
    for frame in 0..max_frames {
        if *game.stage() == Stage::Scoreboard {
            break;
        }
        clock.advance(FRAME_MS);
        game.update(&clock);

        if *game.stage() == Stage::Playing && frame % AIM_EVERY as u64 == 0 {
            autopilot(&mut game, shots);
            shots += 1;
        }
    }

    if *game.stage() != Stage::Scoreboard {
        log::warn!("Match did not finish in {} frames", max_frames);
    }
    game.results().to_vec()
}

fn print_results(results: &[RankedResult]) {
    println!();
    println!("{:<6} {:<16} {:>8} {:>6} {:>9}", "Rank", "Player", "Score", "Hits", "Accuracy");
    for r in results {
        let rank = match r.medal {
            Some(Medal::Gold) => "gold".to_string(),
            Some(Medal::Silver) => "silver".to_string(),
            Some(Medal::Bronze) => "bronze".to_string(),
            None => r.position.to_string(),
        };
        println!(
            "{:<6} {:<16} {:>8} {:>6} {:>8}%",
            rank, r.name, r.score, r.hits, r.accuracy
        );
    }
    if let Some(winner) = zerguem::ranking::winner(results) {
        println!();
        println!("Winner: {} with {} points", winner.name, winner.score);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            usage();
            return ExitCode::FAILURE;
        }
    };

    log::info!("Zerguem (headless) starting...");
    let mut settings = Settings::load_or_default(args.settings.as_deref());
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let results = if args.json {
        play(Game::new(settings, JsonLines), &args.players)
    } else {
        let presenter = LogPresenter::new(&settings);
        let results = play(Game::new(settings, presenter), &args.players);
        print_results(&results);
        results
    };

    if results.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Option<Args>, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_players() {
        let parsed = args(&["--players", "Alice,Bob"]).unwrap().unwrap();
        assert_eq!(parsed.players, ["Alice", "Bob"]);

        let parsed = args(&["-p", "3", "--seed", "9", "--json"]).unwrap().unwrap();
        assert_eq!(parsed.players, ["Player 1", "Player 2", "Player 3"]);
        assert_eq!(parsed.seed, Some(9));
        assert!(parsed.json);
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "abc"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn test_autopilot_match_completes() {
        let settings = Settings {
            turn_duration_secs: 5,
            transition_secs: 1,
            seed: Some(3),
            ..Default::default()
        };
        let players = vec!["Alice".to_string(), "Bob".to_string()];
        let results = play(Game::new(settings, zerguem::NullPresenter), &players);
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|r| r.shots > 0));
    }
}
