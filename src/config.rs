//! Start-up configuration
//!
//! Read once from TOML when the host starts. Every field falls back to the
//! reference deployment: five roles tracking Flash with a 300s cooldown.

use std::path::Path;
use std::time::Duration;

use hex_color::HexColor;
use serde::{Deserialize, Serialize};

use crate::display::Palette;
use crate::error::ConfigError;
use crate::tracker::{check_role_names, Ability, CooldownTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Roles in display order.
    pub roles: Vec<String>,
    pub ability: AbilityConfig,
    pub cooldowns: CooldownConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    pub name: String,
    /// Cooldown in seconds with no modifiers.
    pub base_cooldown: u64,
}

/// Cooldowns in seconds for each modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    pub boots: u64,
    pub trinket: u64,
    pub both: u64,
}

/// Status colours as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub ready: String,
    pub cooling: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roles: ["Top", "Jungle", "Mid", "ADC", "Support"]
                .into_iter()
                .map(String::from)
                .collect(),
            ability: AbilityConfig::default(),
            cooldowns: CooldownConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            name: "Flash".to_string(),
            base_cooldown: 300,
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            boots: 267,
            trinket: 254,
            both: 230,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            ready: "#008000".to_string(),
            cooling: "#FF0000".to_string(),
        }
    }
}

impl Config {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ability.name.trim().is_empty() {
            return Err(ConfigError::invalid("ability name is empty"));
        }

        let cooldowns = [
            ("ability.base_cooldown", self.ability.base_cooldown),
            ("cooldowns.boots", self.cooldowns.boots),
            ("cooldowns.trinket", self.cooldowns.trinket),
            ("cooldowns.both", self.cooldowns.both),
        ];
        for (field, seconds) in cooldowns {
            if seconds == 0 {
                return Err(ConfigError::invalid(format!("{field} must be positive")));
            }
        }

        check_role_names(self.roles.iter().map(String::as_str))?;

        self.colors.palette()?;
        Ok(())
    }

    pub fn ability(&self) -> Ability {
        Ability::new(
            self.ability.name.clone(),
            Duration::from_secs(self.ability.base_cooldown),
        )
    }

    pub fn cooldown_table(&self) -> CooldownTable {
        CooldownTable {
            base: Duration::from_secs(self.ability.base_cooldown),
            boots: Duration::from_secs(self.cooldowns.boots),
            trinket: Duration::from_secs(self.cooldowns.trinket),
            both: Duration::from_secs(self.cooldowns.both),
        }
    }
}

impl ColorConfig {
    /// Parse the configured colours.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let parse = |field: &str, value: &str| {
            HexColor::parse(value)
                .map_err(|_| ConfigError::invalid(format!("colors.{field} `{value}` is not a hex colour")))
        };
        Ok(Palette {
            ready: parse("ready", &self.ready)?,
            cooling: parse("cooling", &self.cooling)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_deployment() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.roles, ["Top", "Jungle", "Mid", "ADC", "Support"]);
        assert_eq!(config.ability().base_cooldown, Duration::from_secs(300));
        assert_eq!(config.cooldown_table(), CooldownTable::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            roles = ["Blue", "Red"]

            [cooldowns]
            boots = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.roles, ["Blue", "Red"]);
        assert_eq!(config.cooldowns.boots, 250);
        assert_eq!(config.cooldowns.trinket, 254);
        assert_eq!(config.ability.name, "Flash");
        assert_eq!(config.colors, ColorConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn written_config_reads_back() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("base_cooldown = 300"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            "roles = []",
            r#"roles = ["Mid", "MID"]"#,
            r#"roles = ["Mid", " "]"#,
            "[ability]\nbase_cooldown = 0",
            "[cooldowns]\nboth = 0",
            "[ability]\nname = \"\"",
            "[colors]\nready = \"green\"",
        ];
        for case in cases {
            assert!(
                matches!(Config::from_toml(case), Err(ConfigError::Invalid { .. })),
                "accepted {case:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Config::from_toml("roles = ["),
            Err(ConfigError::ParseToml(_))
        ));
        assert!(matches!(
            Config::from_toml("[ability]\nbase_cooldown = -5"),
            Err(ConfigError::ParseToml(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = Config::load(Path::new("/nonexistent/flash-tracker.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn parses_palette() {
        let palette = ColorConfig::default().palette().unwrap();
        assert_eq!(palette.ready, Palette::default().ready);
        assert_eq!(palette.cooling, Palette::default().cooling);

        let custom = ColorConfig {
            ready: "#00FF00".to_string(),
            cooling: "#ffa500".to_string(),
        };
        let palette = custom.palette().unwrap();
        assert_eq!((palette.cooling.r, palette.cooling.g, palette.cooling.b), (0xFF, 0xA5, 0x00));
    }
}
