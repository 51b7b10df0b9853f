//! End-of-match ranking
//!
//! Players are ordered by descending score. Ties keep the original player
//! order, so the earlier player ranks higher.

use serde::{Deserialize, Serialize};

use crate::game_match::PlayerRecord;

/// Podium medal for the top three positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// One row of the final score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-indexed
    pub position: usize,
    pub name: String,
    pub score: u64,
    pub hits: u32,
    pub shots: u32,
    pub accuracy: u32,
    pub medal: Option<Medal>,
    pub winner: bool,
}

/// Rank player records by descending score (stable)
pub fn rank_players(records: &[PlayerRecord]) -> Vec<RankedResult> {
    let mut order: Vec<&PlayerRecord> = records.iter().collect();
    order.sort_by(|a, b| b.score.cmp(&a.score));

    order
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let position = i + 1;
            RankedResult {
                position,
                name: record.name.clone(),
                score: record.score,
                hits: record.hits,
                shots: record.shots,
                accuracy: record.accuracy,
                medal: Medal::for_position(position),
                winner: position == 1,
            }
        })
        .collect()
}

/// The match winner, if anyone played
pub fn winner(results: &[RankedResult]) -> Option<&RankedResult> {
    results.iter().find(|r| r.winner)
}
