//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization and unique-value generation. It deliberately does
//! not depend on backend types so unit and integration tests can share it.

pub mod logging;
pub mod unique_helpers;
