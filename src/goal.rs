use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::basic::value::StateValue;
use crate::world_state::WorldState;

/// A partial target state: a map of `"{entity}_{variable}"` keys to the
/// [`StateValue`] each must equal.
///
/// Unlike the richer comparison goals some GOAP planners support, spec §3
/// defines goal satisfaction purely as equality: "a state satisfies the
/// goal iff every goal key has a current value equal to the goal value."
/// Keys absent from the goal are unconstrained.
///
/// # Example
/// ```
/// use block_planner::prelude::*;
///
/// let goal = Goal::new().with("block1_at", "p3");
/// let state = WorldState::new().set("block1_at", "p3").set("robot1_at", "p3");
///
/// assert!(goal.is_satisfied_by(&state));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Goal {
    pub requirements: BTreeMap<String, StateValue>,
}

impl Hash for Goal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.requirements.len().hash(state);
        for (key, value) in &self.requirements {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl Goal {
    pub fn new() -> Self {
        Self { requirements: BTreeMap::new() }
    }

    /// Adds a single requirement, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.requirements.insert(key.into(), value.into());
        self
    }

    /// Builds a goal from a list of `(key, value)` requirements.
    pub fn from_requirements(pairs: &[(String, StateValue)]) -> Self {
        let mut goal = Goal::new();
        for (k, v) in pairs {
            goal = goal.with(k.clone(), v.clone());
        }
        goal
    }

    /// Returns `true` iff every requirement's key holds the required value
    /// in `state`.
    pub fn is_satisfied_by(&self, state: &WorldState) -> bool {
        self.requirements.iter().all(|(key, expected)| state.get(key) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_keys_do_not_block_satisfaction() {
        let goal = Goal::new().with("block1_at", "p3");
        let state = WorldState::new().set("block1_at", "p3").set("block2_at", "p9");
        assert!(goal.is_satisfied_by(&state));
    }

    #[test]
    fn missing_key_is_unsatisfied() {
        let goal = Goal::new().with("block1_at", "p3");
        let state = WorldState::new();
        assert!(!goal.is_satisfied_by(&state));
    }
}
