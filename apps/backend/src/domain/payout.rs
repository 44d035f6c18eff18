//! Settlement math: who is owed what when a game pays out.

use serde::{Deserialize, Serialize};

use crate::domain::lifecycle::PlayerStake;
use crate::entities::games::GameStatus;

/// One player's settlement line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutLine {
    pub player_id: i64,
    /// Principal returned to the player (their own stake, once deposited).
    pub principal: i64,
    /// Yield assigned to the player; the full accrual for the winner, zero otherwise.
    pub yield_share: i64,
    pub total: i64,
}

/// Full settlement view for a game.
///
/// For a non-completed game the breakdown is prospective: no winner yet, and
/// the whole accrued yield is listed as unassigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    pub status: GameStatus,
    pub total_pot: i64,
    pub current_yield: i64,
    pub winner_id: Option<i64>,
    /// Yield not (yet) assigned to any player.
    pub unassigned_yield: i64,
    pub lines: Vec<PayoutLine>,
}

/// Compute the settlement for a game. Pure read; never fails on state.
pub fn compute_payout(
    status: GameStatus,
    total_pot: i64,
    current_yield: i64,
    winner_id: Option<i64>,
    stakes: &[PlayerStake],
) -> PayoutBreakdown {
    let lines: Vec<PayoutLine> = stakes
        .iter()
        .map(|s| {
            let principal = if s.has_deposited { s.deposit_amount } else { 0 };
            let yield_share = match winner_id {
                Some(w) if w == s.player_id => current_yield,
                _ => 0,
            };
            PayoutLine {
                player_id: s.player_id,
                principal,
                yield_share,
                total: principal + yield_share,
            }
        })
        .collect();

    let assigned: i64 = lines.iter().map(|l| l.yield_share).sum();

    PayoutBreakdown {
        status,
        total_pot,
        current_yield,
        winner_id,
        unassigned_yield: current_yield - assigned,
        lines,
    }
}
