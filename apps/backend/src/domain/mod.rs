//! Domain layer: pure lifecycle rules and read-model computation.

pub mod lifecycle;
pub mod payout;
pub mod summary;
pub mod transition;

#[cfg(test)]
mod tests_props_lifecycle;

// Re-exports for ergonomics
pub use lifecycle::PlayerStake;
pub use transition::{derive_game_transitions, GameLifecycleView, GameTransition};
