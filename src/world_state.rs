use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::basic::value::StateValue;

/// The current symbolic state of the block-planning world.
///
/// `WorldState` is a flat map from `"{entity}_{variable}"` keys to
/// [`StateValue`]s. It is the single source of truth for every mutable
/// attribute in the domain (see the module docs on [`crate::entities`] for
/// why entities themselves stay immutable descriptors).
///
/// # Key characteristics
/// - **Immutable by default**: `set` returns a new instance, builder-style.
/// - **Deterministic**: built on a `BTreeMap`, so iteration order and
///   hashing never depend on insertion order.
/// - **Comparable**: two states are equal iff their key sets and all values
///   match (spec §3).
///
/// # Example
/// ```
/// use block_planner::prelude::*;
///
/// let state = WorldState::new()
///     .set("robot1_at", "p1")
///     .set("robot1_gripper_empty", true);
///
/// assert_eq!(state.get("robot1_at"), Some(&StateValue::Str("p1".to_string())));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct WorldState(BTreeMap<String, StateValue>);

impl WorldState {
    /// Creates a new, empty world state.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets or overwrites a variable, builder-style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets or overwrites a variable in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Retrieves the value of a variable, if present.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.0.get(key)
    }

    /// Checks whether a variable is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of variables tracked by this state.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the state's variables in key order.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, StateValue> {
        self.0.iter()
    }

    /// Returns `true` iff `self` and `other` declare exactly the same set
    /// of keys, independent of their values. Used by the apply-preserves-
    /// schema invariant (spec §8, property 1).
    pub fn has_same_key_set(&self, other: &WorldState) -> bool {
        self.0.keys().eq(other.0.keys())
    }
}

impl Hash for WorldState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for (key, value) in &self.0 {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl std::fmt::Display for WorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WorldState {{ ")?;
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let a = WorldState::new().set("p1_clear", true).set("robot1_at", "p1");
        let b = WorldState::new().set("robot1_at", "p1").set("p1_clear", true);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_value_breaks_equality() {
        let a = WorldState::new().set("p1_clear", true);
        let b = WorldState::new().set("p1_clear", false);
        assert_ne!(a, b);
    }

    #[test]
    fn key_set_comparison_ignores_values() {
        let a = WorldState::new().set("p1_clear", true);
        let b = WorldState::new().set("p1_clear", false);
        assert!(a.has_same_key_set(&b));

        let c = WorldState::new().set("p2_clear", false);
        assert!(!a.has_same_key_set(&c));
    }
}
