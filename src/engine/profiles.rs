//! Named strategy profiles and the difficulty tiers that select them.
//! Loaded from TOML at runtime by the binaries and the facade.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub const DEFAULT_STRATEGY: &str = "random";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StrategyProfile {
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_strategy_type")]
    pub strategy_type: String,
}

fn default_strategy_type() -> String {
    DEFAULT_STRATEGY.into()
}

impl Default for StrategyProfile {
    fn default() -> Self {
        Self {
            description: "Uniform random moves".into(),
            strategy_type: default_strategy_type(),
        }
    }
}

/// Maps difficulty levels to profile names: 0 easy, 1 medium, 2 hard,
/// anything else the default.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub easy: Option<String>,
    pub medium: Option<String>,
    pub hard: Option<String>,
    pub default: Option<String>,
}

impl DifficultyConfig {
    pub fn resolve(&self, difficulty: u32) -> Option<&str> {
        match difficulty {
            0 => self.easy.as_deref(),
            1 => self.medium.as_deref(),
            2 => self.hard.as_deref(),
            _ => self.default.as_deref(),
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct StrategyProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, StrategyProfile>,
    #[serde(default)]
    pub difficulty: DifficultyConfig,
}

impl StrategyProfilesFile {
    /// Profile for a difficulty level. A tier without a name, or naming an
    /// undefined profile, gets the built-in random profile.
    pub fn profile_for(&self, difficulty: u32) -> StrategyProfile {
        let Some(name) = self.difficulty.resolve(difficulty) else {
            return StrategyProfile::default();
        };
        match self.profiles.get(name) {
            Some(profile) => profile.clone(),
            None => {
                tracing::warn!(difficulty, profile = name, "undefined strategy profile, using random");
                StrategyProfile::default()
            }
        }
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<StrategyProfilesFile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Try to load profiles from well-known paths, returning the defaults if none found.
pub fn load_default_profiles() -> StrategyProfilesFile {
    let candidates = [
        "strategy_profiles.toml",
        "../strategy_profiles.toml",
        "/etc/labyrinth/strategy_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded strategy profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load strategy profiles");
                }
            }
        }
    }
    tracing::info!("no strategy_profiles.toml found, using built-in defaults");
    StrategyProfilesFile::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[profiles.wanderer]
description = "Random walk"
strategy_type = "random"

[profiles.future]
strategy_type = "objective_seeker"

[difficulty]
easy = "wanderer"
hard = "future"
default = "missing"
"#;

    #[test]
    fn test_resolve_tiers() {
        let config = DifficultyConfig {
            easy: Some("a".into()),
            medium: Some("b".into()),
            hard: None,
            default: Some("d".into()),
        };
        assert_eq!(config.resolve(0), Some("a"));
        assert_eq!(config.resolve(1), Some("b"));
        assert_eq!(config.resolve(2), None);
        assert_eq!(config.resolve(3), Some("d"));
        assert_eq!(config.resolve(99), Some("d"));
    }

    #[test]
    fn test_load_profiles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let profiles = load_profiles(file.path()).unwrap();

        assert_eq!(profiles.profiles.len(), 2);
        assert_eq!(profiles.profile_for(0).description, "Random walk");
        assert_eq!(profiles.profile_for(2).strategy_type, "objective_seeker");
        assert_eq!(profiles.profile_for(1), StrategyProfile::default());
        assert_eq!(profiles.profile_for(5), StrategyProfile::default());
    }

    #[test]
    fn test_missing_strategy_type_defaults_to_random() {
        let profiles: StrategyProfilesFile = toml::from_str("[profiles.bare]\n").unwrap();
        assert_eq!(profiles.profiles["bare"].strategy_type, DEFAULT_STRATEGY);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_profiles(&missing).unwrap_err();
        assert!(matches!(err, ProfileError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[profiles.x\nstrategy_type = ").unwrap();
        let err = load_profiles(&broken).unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
