use std::time::{Duration, Instant};

use log::debug;

/// The timed ability shared by every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub name: String,
    pub base_cooldown: Duration,
}

impl Ability {
    pub fn new(name: impl Into<String>, base_cooldown: Duration) -> Self {
        Self {
            name: name.into(),
            base_cooldown,
        }
    }
}

/// Countdown state for one role's use of the ability.
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    /// When the current countdown started, if one is running.
    activated_at: Option<Instant>,
    /// Duration in effect for the current or most recent activation.
    ///
    /// Fixed when the ability is used, so later modifier changes never
    /// shorten or extend a countdown already in progress.
    current_cooldown: Duration,
}

impl CooldownTracker {
    /// Create an inactive tracker.
    pub fn new(ability: &Ability) -> Self {
        Self {
            activated_at: None,
            current_cooldown: ability.base_cooldown,
        }
    }

    /// Start a countdown.
    ///
    /// Any countdown already running is discarded and replaced.
    ///
    /// # Arguments
    ///
    /// * `duration` - Length of the new countdown.
    /// * `now` - The activation instant.
    pub fn activate(&mut self, duration: Duration, now: Instant) {
        if self.activated_at.is_some() {
            debug!("Restarting active cooldown with {}s", duration.as_secs_f64());
        }
        self.current_cooldown = duration;
        self.activated_at = Some(now);
    }

    /// Stop the countdown, whatever state it is in.
    pub fn reset(&mut self) {
        self.activated_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn current_cooldown(&self) -> Duration {
        self.current_cooldown
    }

    /// Time left until the ability is available again.
    ///
    /// Expiry is lazy: a countdown that has run out is reset here, on the
    /// first read at or after its end, rather than by a background timer.
    pub fn remaining(&mut self, now: Instant) -> Duration {
        let Some(activated_at) = self.activated_at else {
            return Duration::ZERO;
        };

        let elapsed = now.saturating_duration_since(activated_at);
        if elapsed >= self.current_cooldown {
            debug!("Cooldown of {}s expired", self.current_cooldown.as_secs_f64());
            self.reset();
            return Duration::ZERO;
        }

        self.current_cooldown - elapsed
    }
}
