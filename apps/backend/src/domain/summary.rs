//! Dashboard aggregates for a single player across their games.

use serde::{Deserialize, Serialize};

use crate::entities::games::GameStatus;

/// One game as seen through a single player's membership row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParticipation {
    pub status: GameStatus,
    /// The player's own stake in this game.
    pub deposit_amount: i64,
    pub has_deposited: bool,
    /// The game's accrued yield.
    pub current_yield: i64,
    pub winner_id: Option<i64>,
}

/// Aggregates backing the player dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Sum of the player's stakes across games where they have deposited.
    pub total_deposited: i64,
    /// Yield still in play across the player's non-completed games.
    pub potential_winnings: i64,
    pub active_games: u32,
    pub pending_games: u32,
    pub completed_games: u32,
    /// Games this player has won.
    pub won_games: u32,
}

/// Fold a player's participations into dashboard aggregates.
pub fn summarize(player_id: i64, participations: &[GameParticipation]) -> PlayerSummary {
    let mut summary = PlayerSummary::default();

    for p in participations {
        if p.has_deposited {
            summary.total_deposited += p.deposit_amount;
        }
        match p.status {
            GameStatus::Pending => summary.pending_games += 1,
            GameStatus::Active => summary.active_games += 1,
            GameStatus::Completed => summary.completed_games += 1,
        }
        if p.status != GameStatus::Completed {
            summary.potential_winnings += p.current_yield;
        }
        if p.winner_id == Some(player_id) {
            summary.won_games += 1;
        }
    }

    summary
}
