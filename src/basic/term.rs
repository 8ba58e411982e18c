use crate::basic::value::StateValue;
use crate::world_state::WorldState;
use std::collections::HashMap;

/// The sentinel string written into a [`WorldState`] for "no entity bound".
pub const NONE_NAME: &str = "None";
/// The name of the ground sentinel entity.
pub const GROUND_NAME: &str = "GND";

/// The bindings from an action schema's parameter names to the concrete
/// entity names (or `"GND"`) a particular grounding uses.
pub type Params = HashMap<String, String>;

/// The right-hand side of a precondition or effect.
///
/// Covers every shape spec §4.B's tagged tuples use: a literal boolean,
/// the "none" sentinel, a reference to one of the action's bound
/// parameters, or a dotted path read from the *current* state (resolved
/// attribute-by-attribute, short-circuiting through [`GROUND_NAME`] or
/// [`NONE_NAME`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// A literal boolean.
    Bool(bool),
    /// The literal "none" sentinel.
    None,
    /// One of the action's bound parameters, e.g. `target_pose`.
    Param(String),
    /// A dotted attribute path, e.g. `["target_pose", "occupied_by"]`.
    /// The first segment is always a bound parameter; remaining segments
    /// are attribute hops, with the last segment naming the variable to
    /// read.
    Path(Vec<String>),
}

impl Term {
    pub fn param(name: impl Into<String>) -> Self {
        Term::Param(name.into())
    }

    pub fn path(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Term::Path(segments.into_iter().map(Into::into).collect())
    }
}

/// Walks a dotted attribute path against `state`, starting from the entity
/// bound to `path[0]`.
///
/// Every segment except the last is an attribute hop: it is read as
/// `"{current}_{hop}"` and must resolve to another entity's name. Hitting
/// [`GROUND_NAME`] or [`NONE_NAME`] at any hop short-circuits to `None`
/// (per spec §4.B/§9: "silently skipped"/"tolerate none by no-op").
///
/// Returns the key that the path's last segment (the variable) should be
/// read from or written to.
fn resolve_path_key(path: &[String], params: &Params, state: &WorldState) -> Option<String> {
    let (hops, variable) = path.split_at(path.len() - 1);
    let mut current = params.get(&hops[0])?.clone();

    for hop in &hops[1..] {
        if current == GROUND_NAME {
            return None;
        }
        match state.get(&format!("{current}_{hop}")) {
            Some(StateValue::Str(s)) if s == NONE_NAME => return None,
            Some(StateValue::Str(s)) => current = s.clone(),
            _ => return None,
        }
    }

    if current == GROUND_NAME {
        return None;
    }
    Some(format!("{current}_{}", variable[0]))
}

/// Resolves a [`Term`] to a concrete [`StateValue`] against `params` and the
/// current `state`.
///
/// Returns `None` when a `Path` term short-circuits through Ground or an
/// unbound ("None") intermediate — the caller (an effect) should then skip
/// that effect entirely, per spec §4.B.
pub fn resolve_term(term: &Term, params: &Params, state: &WorldState) -> Option<StateValue> {
    match term {
        Term::Bool(b) => Some(StateValue::Bool(*b)),
        Term::None => Some(StateValue::Str(NONE_NAME.to_string())),
        Term::Param(p) => params.get(p).cloned().map(StateValue::Str),
        Term::Path(path) => {
            let key = resolve_path_key(path, params, state)?;
            state.get(&key).cloned()
        }
    }
}

/// Resolves the state key that an effect's `target` path should write to.
///
/// This is [`resolve_path_key`] exposed for effect application (see
/// [`crate::action::apply_action`]); conditions never use nested paths, so
/// only effects need it.
pub fn resolve_target_key(target: &[String], params: &Params, state: &WorldState) -> Option<String> {
    resolve_path_key(target, params, state)
}
