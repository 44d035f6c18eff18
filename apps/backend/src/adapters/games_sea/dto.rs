//! Write payloads for the games adapter.

use time::OffsetDateTime;

use crate::entities::games::GameStatus;

/// Insert payload for a new pending game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    /// Generated invite code; doubles as the primary key.
    pub id: String,
    pub name: String,
    pub duration_days: i32,
    pub deposit_amount: i64,
    pub creator_id: i64,
}

impl GameCreate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_days: i32,
        deposit_amount: i64,
        creator_id: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days,
            deposit_amount,
            creator_id,
        }
    }
}

/// Versioned update of lifecycle fields.
///
/// Whatever combination of fields is set changes atomically under one
/// `lock_version` bump; the update only lands if the row still carries
/// `expected_version`.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: String,
    pub status: Option<GameStatus>,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
    pub total_pot: Option<i64>,
    pub current_yield: Option<i64>,
    pub winner_id: Option<i64>,
    pub expected_version: i32,
}

impl GameUpdate {
    pub fn new(id: impl Into<String>, expected_version: i32) -> Self {
        Self {
            id: id.into(),
            status: None,
            starts_at: None,
            ends_at: None,
            total_pot: None,
            current_yield: None,
            winner_id: None,
            expected_version,
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_starts_at(mut self, starts_at: OffsetDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    pub fn with_ends_at(mut self, ends_at: OffsetDateTime) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    pub fn with_total_pot(mut self, total_pot: i64) -> Self {
        self.total_pot = Some(total_pot);
        self
    }

    pub fn with_current_yield(mut self, current_yield: i64) -> Self {
        self.current_yield = Some(current_yield);
        self
    }

    pub fn with_winner_id(mut self, winner_id: i64) -> Self {
        self.winner_id = Some(winner_id);
        self
    }
}
