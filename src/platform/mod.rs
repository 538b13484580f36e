//! Platform abstraction layer
//!
//! Translates browser/native events into game [`Command`]s. Nothing here
//! touches simulation state directly.

pub mod input;

pub use input::{Command, command_for_key, command_for_tap};
