//! WalkMystery: a location-based walking-tour puzzle game.
//!
//! A tour is a fixed script of steps loaded from TOML ([`puzzle`]). A
//! [`session::SessionState`] tracks one play-through and moves forward
//! through the script as each step's gate is passed ([`validator`]).

pub mod config;
pub mod error;
pub mod logging;
pub mod puzzle;
pub mod session;
pub mod validator;

pub use error::{TourError, TourResult};
