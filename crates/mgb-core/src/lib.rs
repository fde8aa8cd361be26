//! Core domain logic for the micro game bot.
//!
//! This crate is intentionally framework-agnostic. Telegram polling, the Bot
//! API client and the HTTP score server live in adapter crates; they share the
//! score token codec defined here.

pub mod config;
pub mod domain;
pub mod errors;
pub mod launch;
pub mod logging;
pub mod ports;
pub mod score;
pub mod token;

pub use errors::{Error, Result};
