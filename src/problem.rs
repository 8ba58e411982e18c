//! Problem configuration: the init/goal YAML files that seed a [`crate::domain::Domain`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigurationError;

/// One entity's entry in an init or goal configuration file.
#[derive(Clone, Debug, Deserialize)]
pub struct EntityConfig {
    pub position: [f64; 3],
}

/// A parsed init or goal configuration: entity name to its declared pose.
///
/// Entity type (`robot` vs. block) is inferred from the name's prefix
/// before the first `_`, matching the convention the original problem
/// files use (`robot1`, `block1`, …).
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProblemConfig(BTreeMap<String, EntityConfig>);

impl ProblemConfig {
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, EntityConfig> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&EntityConfig> {
        self.0.get(name)
    }
}

impl FromIterator<(String, EntityConfig)> for ProblemConfig {
    fn from_iter<T: IntoIterator<Item = (String, EntityConfig)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Loads and parses the init and goal configuration files for a problem.
///
/// This is decoupled from [`crate::domain::Domain::from_configs`] so that
/// callers who already have parsed configurations (e.g. property tests
/// that build a [`ProblemConfig`] in memory) can skip file I/O entirely.
pub fn load_problem(
    init_path: impl AsRef<Path>,
    goal_path: impl AsRef<Path>,
) -> Result<(ProblemConfig, ProblemConfig), ConfigurationError> {
    let init = read_config(init_path.as_ref())?;
    let goal = read_config(goal_path.as_ref())?;
    Ok((init, goal))
}

fn read_config(path: &Path) -> Result<ProblemConfig, ConfigurationError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| ConfigurationError::Io { path: path.display().to_string(), source })?;
    log::debug!("loaded problem config from {}", path.display());
    Ok(serde_yaml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml() {
        let yaml = "robot1:\n  position: [0.0, 0.0, 0.0]\nblock1:\n  position: [1.0, 0.0, 0.0]\n";
        let config: ProblemConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.get("robot1").unwrap().position, [0.0, 0.0, 0.0]);
        assert_eq!(config.get("block1").unwrap().position, [1.0, 0.0, 0.0]);
    }
}
