use crate::entities::games::GameStatus;

/// Before/after view of a game used to derive edge-triggered transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: i32,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: every player deposited and the game went live.
    GameActivated,

    /// Edge-triggered: a winner was resolved and the game closed.
    GameCompleted,
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    if before.status == GameStatus::Pending && after.status == GameStatus::Active {
        transitions.push(GameTransition::GameActivated);
    }

    if before.status != GameStatus::Completed && after.status == GameStatus::Completed {
        transitions.push(GameTransition::GameCompleted);
    }

    transitions
}
