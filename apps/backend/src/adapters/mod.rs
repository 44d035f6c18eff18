//! Adapters for external dependencies.

pub mod game_players_sea;
pub mod games_sea;
