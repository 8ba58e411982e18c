use std::fmt::Display;
use std::hash::Hash;

/// A value stored under a single key in a [`WorldState`](crate::world_state::WorldState).
///
/// Every attribute in the block-planning domain is either a boolean flag
/// (`clear`, `gripper_empty`, `at_top`, …) or the canonicalised name of
/// another entity (`"GND"` for the ground sentinel, `"None"` for "no
/// entity bound", or a real entity name such as `"block1"`). Unlike the
/// general-purpose GOAP value type this crate descends from, there is no
/// numeric variant: this domain has no numeric fluents.
///
/// # Examples
/// ```
/// use block_planner::prelude::*;
///
/// let clear: StateValue = true.into();
/// let occupant: StateValue = "block1".into();
///
/// assert_eq!(clear, StateValue::Bool(true));
/// assert_eq!(occupant, StateValue::Str("block1".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateValue {
    /// A boolean state flag.
    Bool(bool),
    /// The canonicalised name of an entity, or one of the sentinels
    /// `"GND"` (ground) and `"None"` (no entity bound).
    Str(String),
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Str(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Str(value.to_string())
    }
}

impl Display for StateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Str(v) => write!(f, "Str({v})"),
        }
    }
}

impl StateValue {
    /// Returns the entity/sentinel name carried by this value, if it is a `Str`.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            StateValue::Str(s) => Some(s.as_str()),
            StateValue::Bool(_) => None,
        }
    }

    /// Returns the boolean carried by this value, if it is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            StateValue::Str(_) => None,
        }
    }
}
