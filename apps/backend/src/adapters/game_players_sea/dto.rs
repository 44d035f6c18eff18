//! Write payloads for the player-row adapter.

/// Insert payload for a player joining a game.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub game_id: String,
    pub player_id: i64,
    /// Stake copied from the game's required amount at join time.
    pub deposit_amount: i64,
}

impl PlayerCreate {
    pub fn new(game_id: impl Into<String>, player_id: i64, deposit_amount: i64) -> Self {
        Self {
            game_id: game_id.into(),
            player_id,
            deposit_amount,
        }
    }
}

/// DTO for marking a player's deposit as confirmed.
#[derive(Debug, Clone)]
pub struct PlayerSetDeposited {
    pub id: i64,
    pub wallet_reference: String,
}

impl PlayerSetDeposited {
    pub fn new(id: i64, wallet_reference: impl Into<String>) -> Self {
        Self {
            id,
            wallet_reference: wallet_reference.into(),
        }
    }
}
