mod cooldown;
mod game_clock;
mod registry;

use std::time::Duration;

use clap::Subcommand;
use log::{info, warn};

pub use cooldown::{Ability, CooldownTracker};
pub use game_clock::{parse_game_time, GameClock};
pub use registry::{check_role_names, CooldownTable, ModifierKind, Modifiers, Role, RoleRegistry, RoleStatus};

use crate::config::Config;
use crate::error::{ConfigError, TrackerError};
use crate::time::TimeSource;

/// A user action the presentation layer can forward to the tracker.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Mark the ability as used by a role.
    #[command(alias = "flash")]
    Use { role: String },
    /// Clear a role's cooldown.
    Reset { role: String },
    /// Toggle the speed boots modifier for a role.
    Boots { role: String },
    /// Toggle the cooldown trinket modifier for a role.
    Trinket { role: String },
    /// Start the game clock.
    Start,
    /// Stop the game clock.
    Stop,
    /// Start the game clock if stopped, stop it if running.
    Toggle,
    /// Set the game clock to MM:SS while it is stopped.
    ///
    /// Takes the rest of the line as-is, so malformed input still reaches
    /// the clock and resets it to 00:00.
    Set {
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        time: Vec<String>,
    },
}

/// Everything the presentation layer draws on one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub ability: String,
    pub roles: Vec<RoleStatus>,
    pub game_elapsed: Duration,
    pub game_running: bool,
}

/// Role cooldowns and the game clock behind a single time source.
///
/// All state lives here and is only touched through `&mut self`, so a host
/// drives it from one thread: user actions in between periodic
/// [`FlashTracker::frame`] polls.
pub struct FlashTracker<T: TimeSource> {
    registry: RoleRegistry,
    game_clock: GameClock,
    time: T,
}

impl<T: TimeSource> FlashTracker<T> {
    /// Create a tracker from a validated configuration.
    pub fn new(config: &Config, time: T) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = RoleRegistry::new(
            config.roles.iter().map(Role::new),
            config.ability(),
            config.cooldown_table(),
        )?;

        Ok(Self::with_registry(registry, time))
    }

    pub fn with_registry(registry: RoleRegistry, time: T) -> Self {
        Self {
            registry,
            game_clock: GameClock::new(),
            time,
        }
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn game_clock(&self) -> &GameClock {
        &self.game_clock
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn toggle_modifier(&mut self, role: &str, kind: ModifierKind) -> Result<bool, TrackerError> {
        self.registry.toggle_modifier(role, kind)
    }

    pub fn modifiers(&self, role: &str) -> Result<Modifiers, TrackerError> {
        self.registry.modifiers(role)
    }

    pub fn use_ability(&mut self, role: &str) -> Result<Duration, TrackerError> {
        self.registry.use_ability(role, self.time.now())
    }

    pub fn reset_role(&mut self, role: &str) -> Result<(), TrackerError> {
        self.registry.reset_role(role)
    }

    pub fn remaining_for(&mut self, role: &str) -> Result<Duration, TrackerError> {
        self.registry.remaining_for(role, self.time.now())
    }

    pub fn start_game_clock(&mut self) -> bool {
        self.game_clock.start(self.time.now())
    }

    pub fn stop_game_clock(&mut self) -> bool {
        self.game_clock.stop(self.time.now())
    }

    /// Flip the game clock between running and stopped.
    ///
    /// Returns whether the clock is running afterwards.
    pub fn toggle_game_clock(&mut self) -> bool {
        let now = self.time.now();
        if self.game_clock.is_running() {
            self.game_clock.stop(now);
        } else {
            self.game_clock.start(now);
        }
        self.game_clock.is_running()
    }

    pub fn set_game_clock_elapsed(&mut self, text: &str) -> Result<(), TrackerError> {
        self.game_clock.set_elapsed_text(text)
    }

    pub fn elapsed(&self) -> Duration {
        self.game_clock.elapsed(self.time.now())
    }

    /// Perform a single user action.
    pub fn apply(&mut self, action: &Action) -> Result<(), TrackerError> {
        let result = match action {
            Action::Use { role } => self.use_ability(role).map(|duration| {
                info!("{role} on cooldown for {}s", duration.as_secs());
            }),
            Action::Reset { role } => self.reset_role(role),
            Action::Boots { role } => self
                .toggle_modifier(role, ModifierKind::SpeedBoots)
                .map(|_| ()),
            Action::Trinket { role } => self
                .toggle_modifier(role, ModifierKind::CooldownTrinket)
                .map(|_| ()),
            Action::Start => {
                self.start_game_clock();
                Ok(())
            }
            Action::Stop => {
                self.stop_game_clock();
                Ok(())
            }
            Action::Toggle => {
                self.toggle_game_clock();
                Ok(())
            }
            Action::Set { time } => self.set_game_clock_elapsed(&time.join(" ")),
        };

        if let Err(err) = &result {
            warn!("{action:?} rejected: {err}");
        }
        result
    }

    /// Poll the current state of every role and the game clock.
    ///
    /// Reading expires any countdowns that have run out.
    pub fn frame(&mut self) -> Frame {
        let now = self.time.now();
        Frame {
            ability: self.registry.ability().name.clone(),
            roles: self.registry.statuses(now),
            game_elapsed: self.game_clock.elapsed(now),
            game_running: self.game_clock.is_running(),
        }
    }
}
