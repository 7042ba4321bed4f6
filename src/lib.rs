//! Cooldown tracking for a fixed set of roles sharing one timed ability,
//! plus an independent game clock.
//!
//! The core is driven by a host: user actions go through
//! [`tracker::FlashTracker`], and the host polls [`tracker::FlashTracker::frame`]
//! on each [`clock::TickClock`] tick to redraw.

pub mod clock;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod time;
pub mod tracker;

pub use config::Config;
pub use error::{ConfigError, TrackerError};
pub use tracker::{Action, FlashTracker, Frame};
