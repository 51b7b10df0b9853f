//! Match sequencing
//!
//! A match is an ordered list of players who each play one timed turn.
//! Records are stored by position, so duplicate names are fine.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PLAYERS, MIN_PLAYERS};
use crate::default_player_name;
use crate::ranking::{RankedResult, rank_players};
use crate::sim::TurnStats;

/// A player's finalized result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: u64,
    pub hits: u32,
    pub shots: u32,
    pub accuracy: u32,
    /// Set once the player's turn has been recorded
    pub played: bool,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            hits: 0,
            shots: 0,
            accuracy: 0,
            played: false,
        }
    }

    /// Copy final turn stats in. Only the first call has any effect.
    pub fn finalize(&mut self, stats: &TurnStats) -> bool {
        if self.played {
            log::warn!("Ignoring second result for {}", self.name);
            return false;
        }
        self.score = stats.score;
        self.hits = stats.hits;
        self.shots = stats.shots_fired;
        self.accuracy = stats.accuracy();
        self.played = true;
        true
    }
}

/// Players, whose turn it is and their records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: Vec<String>,
    pub current: usize,
    pub records: Vec<PlayerRecord>,
    pub complete: bool,
}

impl MatchState {
    fn fresh(players: Vec<String>) -> Self {
        let records = players.iter().map(PlayerRecord::new).collect();
        Self {
            players,
            current: 0,
            records,
            complete: false,
        }
    }

    /// First record with this name
    pub fn record(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// What happens after a turn is recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAdvance {
    /// Another player is up
    Next { index: usize, player: String },
    /// Everyone has played
    Finished(Vec<RankedResult>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchController {
    state: MatchState,
}

impl MatchController {
    /// Set up a match. Blank names become "Player N"; the list is clamped to
    /// 1..=10 players.
    pub fn configure_match<S: AsRef<str>>(names: &[S]) -> Self {
        let mut players: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    default_player_name(i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        if players.len() > MAX_PLAYERS {
            log::warn!(
                "{} players configured, keeping the first {}",
                players.len(),
                MAX_PLAYERS
            );
            players.truncate(MAX_PLAYERS);
        }
        while players.len() < MIN_PLAYERS {
            log::warn!("No players configured, adding a default player");
            players.push(default_player_name(players.len()));
        }

        log::info!("Match configured: {}", players.join(", "));
        Self {
            state: MatchState::fresh(players),
        }
    }

    /// Match with `count` default-named players (count clamped to 1..=10)
    pub fn with_player_count(count: usize) -> Self {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        let names: Vec<String> = (0..count).map(default_player_name).collect();
        Self::configure_match(&names)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current
    }

    pub fn current_player(&self) -> &str {
        &self.state.players[self.state.current]
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    /// Write the current player's final stats
    pub fn record_turn(&mut self, stats: &TurnStats) -> bool {
        let index = self.state.current;
        self.state.records[index].finalize(stats)
    }

    /// Move on after a completed turn
    pub fn advance_turn(&mut self) -> TurnAdvance {
        if self.state.current + 1 < self.state.players.len() {
            self.state.current += 1;
            let player = self.current_player().to_string();
            log::info!("Next up: {}", player);
            return TurnAdvance::Next {
                index: self.state.current,
                player,
            };
        }

        self.state.complete = true;
        let results = self.results();
        if let Some(top) = results.first() {
            log::info!("Match complete, winner {} with {}", top.name, top.score);
        }
        TurnAdvance::Finished(results)
    }

    /// Current standings (final once the match is complete)
    pub fn results(&self) -> Vec<RankedResult> {
        rank_players(&self.state.records)
    }

    /// Zero every record and go back to the first player
    pub fn restart(&mut self) {
        let players = std::mem::take(&mut self.state.players);
        self.state = MatchState::fresh(players);
    }
}
