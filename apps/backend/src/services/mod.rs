//! Service layer orchestrating domain rules over the persistence adapters.

pub mod game_lifecycle;

pub use game_lifecycle::GameLifecycleService;
