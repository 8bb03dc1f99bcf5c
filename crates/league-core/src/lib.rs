//! Core types and traits for the fantasy stock league client.
//!
//! This crate provides the foundational building blocks including:
//! - Wire types for stocks, holdings, leagues and standings
//! - Session and trade types
//! - Error taxonomy shared by every layer
//! - Seams for the key/value store, the clock and the remote API

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ApiError, DomainError, LeagueError, LeagueResult, StoreError};
pub use types::*;
pub use traits::*;
