use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};

use super::cooldown::{Ability, CooldownTracker};
use crate::error::{ConfigError, TrackerError};

/// A position whose ability use is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether `name` refers to this role, ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An equipment effect that changes the ability's cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    SpeedBoots,
    CooldownTrinket,
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::SpeedBoots => f.write_str("speed boots"),
            ModifierKind::CooldownTrinket => f.write_str("cooldown trinket"),
        }
    }
}

/// Per-role modifier flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub speed_boots: bool,
    pub cooldown_trinket: bool,
}

impl Modifiers {
    pub fn get(&self, kind: ModifierKind) -> bool {
        match kind {
            ModifierKind::SpeedBoots => self.speed_boots,
            ModifierKind::CooldownTrinket => self.cooldown_trinket,
        }
    }

    fn toggle(&mut self, kind: ModifierKind) -> bool {
        let flag = match kind {
            ModifierKind::SpeedBoots => &mut self.speed_boots,
            ModifierKind::CooldownTrinket => &mut self.cooldown_trinket,
        };
        *flag = !*flag;
        *flag
    }
}

/// Cooldown duration for each combination of modifiers.
///
/// The entries are absolute values. The combined discount is not the sum of
/// the individual ones, so each combination is looked up rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownTable {
    pub base: Duration,
    pub boots: Duration,
    pub trinket: Duration,
    pub both: Duration,
}

impl CooldownTable {
    pub fn resolve(&self, modifiers: Modifiers) -> Duration {
        match (modifiers.speed_boots, modifiers.cooldown_trinket) {
            (false, false) => self.base,
            (true, false) => self.boots,
            (false, true) => self.trinket,
            (true, true) => self.both,
        }
    }
}

impl Default for CooldownTable {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(300),
            boots: Duration::from_secs(267),
            trinket: Duration::from_secs(254),
            both: Duration::from_secs(230),
        }
    }
}

/// What the presentation layer needs to draw one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleStatus {
    pub role: Role,
    pub remaining: Duration,
    pub modifiers: Modifiers,
}

#[derive(Debug)]
struct Slot {
    role: Role,
    modifiers: Modifiers,
    tracker: CooldownTracker,
}

fn find_slot_mut<'a>(slots: &'a mut [Slot], role: &str) -> Result<&'a mut Slot, TrackerError> {
    slots
        .iter_mut()
        .find(|slot| slot.role.matches(role))
        .ok_or_else(|| TrackerError::UnknownRole(role.to_string()))
}

/// Check a role list: at least one role, no blank names, and no duplicates
/// ignoring ASCII case.
pub fn check_role_names<'a, I>(names: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::invalid(format!(
                "role {} has an empty name",
                seen.len() + 1
            )));
        }
        if seen.iter().any(|other| other.eq_ignore_ascii_case(name)) {
            return Err(ConfigError::invalid(format!("duplicate role `{name}`")));
        }
        seen.push(name);
    }

    if seen.is_empty() {
        return Err(ConfigError::invalid("at least one role is required"));
    }
    Ok(())
}

/// The fixed, ordered set of roles and their cooldown state.
#[derive(Debug)]
pub struct RoleRegistry {
    ability: Ability,
    table: CooldownTable,
    slots: Vec<Slot>,
}

impl RoleRegistry {
    /// Create a registry.
    ///
    /// # Arguments
    ///
    /// * `roles` - The roles to track, in display order. Must be non-empty
    ///   and contain no duplicate names (ignoring ASCII case).
    /// * `ability` - The ability every role tracks.
    /// * `table` - Cooldown durations by modifier combination.
    pub fn new<I>(roles: I, ability: Ability, table: CooldownTable) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Role>,
    {
        let slots: Vec<Slot> = roles
            .into_iter()
            .map(|role| Slot {
                tracker: CooldownTracker::new(&ability),
                modifiers: Modifiers::default(),
                role,
            })
            .collect();
        check_role_names(slots.iter().map(|slot| slot.role.name()))?;

        info!(
            "Tracking {} for {} roles (base cooldown {}s)",
            ability.name,
            slots.len(),
            table.base.as_secs()
        );

        Ok(Self {
            ability,
            table,
            slots,
        })
    }

    pub fn ability(&self) -> &Ability {
        &self.ability
    }

    pub fn table(&self) -> &CooldownTable {
        &self.table
    }

    /// Registered roles in order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.slots.iter().map(|slot| &slot.role)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, role: &str) -> Result<&Slot, TrackerError> {
        self.slots
            .iter()
            .find(|slot| slot.role.matches(role))
            .ok_or_else(|| TrackerError::UnknownRole(role.to_string()))
    }

    fn slot_mut(&mut self, role: &str) -> Result<&mut Slot, TrackerError> {
        find_slot_mut(&mut self.slots, role)
    }

    /// Flip one modifier flag. Returns the flag's new value.
    pub fn toggle_modifier(&mut self, role: &str, kind: ModifierKind) -> Result<bool, TrackerError> {
        let slot = self.slot_mut(role)?;
        let enabled = slot.modifiers.toggle(kind);
        debug!("{} {kind}: {enabled}", slot.role);
        Ok(enabled)
    }

    pub fn modifiers(&self, role: &str) -> Result<Modifiers, TrackerError> {
        Ok(self.slot(role)?.modifiers)
    }

    /// The cooldown the role would get if the ability were used now.
    pub fn resolve_cooldown_duration(&self, role: &str) -> Result<Duration, TrackerError> {
        let slot = self.slot(role)?;
        Ok(self.table.resolve(slot.modifiers))
    }

    /// Record an ability use. Returns the cooldown that was started.
    pub fn use_ability(&mut self, role: &str, now: Instant) -> Result<Duration, TrackerError> {
        // Borrows only the slots, leaving the table and ability readable
        let slot = find_slot_mut(&mut self.slots, role)?;
        let duration = self.table.resolve(slot.modifiers);
        slot.tracker.activate(duration, now);
        debug!("{} used {} ({}s)", slot.role, self.ability.name, duration.as_secs());
        Ok(duration)
    }

    pub fn reset_role(&mut self, role: &str) -> Result<(), TrackerError> {
        let slot = self.slot_mut(role)?;
        slot.tracker.reset();
        debug!("{} cooldown reset", slot.role);
        Ok(())
    }

    pub fn remaining_for(&mut self, role: &str, now: Instant) -> Result<Duration, TrackerError> {
        Ok(self.slot_mut(role)?.tracker.remaining(now))
    }

    pub fn is_active(&self, role: &str) -> Result<bool, TrackerError> {
        Ok(self.slot(role)?.tracker.is_active())
    }

    /// Current state of every role, in registration order.
    pub fn statuses(&mut self, now: Instant) -> Vec<RoleStatus> {
        self.slots
            .iter_mut()
            .map(|slot| RoleStatus {
                role: slot.role.clone(),
                remaining: slot.tracker.remaining(now),
                modifiers: slot.modifiers,
            })
            .collect()
    }
}
