//! The three hard-coded action schemas (`move`, `pick`, `place`) and the
//! operators (`is_applicable`, `apply_action`) that ground and apply them.

use crate::basic::term::{resolve_target_key, resolve_term, Params, Term, NONE_NAME};
use crate::domain::Domain;
use crate::entities::Pose;
use crate::world_state::WorldState;

/// A single precondition: `entity_param.variable == expected`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    pub entity_param: String,
    pub variable: String,
    pub expected: Term,
}

impl Condition {
    pub fn new(entity_param: impl Into<String>, variable: impl Into<String>, expected: Term) -> Self {
        Self { entity_param: entity_param.into(), variable: variable.into(), expected }
    }
}

/// A single effect: write `value` to the attribute named by the last
/// segment of `target`, after walking any earlier segments as attribute
/// hops (see [`crate::basic::term`] for the dereference rules).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectSpec {
    pub target: Vec<String>,
    pub value: Term,
}

impl EffectSpec {
    pub fn new(target: impl IntoIterator<Item = impl Into<String>>, value: Term) -> Self {
        Self { target: target.into_iter().map(Into::into).collect(), value }
    }
}

/// A grounded-but-unparameterised action schema: `move`, `pick`, or
/// `place`. These three are hard-coded into the domain (spec §4.B) — they
/// are not user-extensible the way a general GOAP action library's
/// actions would be.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionSchema {
    pub name: &'static str,
    /// Declared parameter order, used to produce `argumentNames` in
    /// schema order when a plan is retraced.
    pub param_order: Vec<&'static str>,
    pub preconditions: Vec<Condition>,
    pub effects: Vec<EffectSpec>,
}

/// `move(robot, start_pose, target_pose)`.
pub fn move_schema() -> ActionSchema {
    ActionSchema {
        name: "move",
        param_order: vec!["robot", "start_pose", "target_pose"],
        preconditions: vec![Condition::new("robot", "at", Term::param("start_pose"))],
        effects: vec![EffectSpec::new(["robot", "at"], Term::param("target_pose"))],
    }
}

/// `pick(robot, object, object_pose)`.
pub fn pick_schema() -> ActionSchema {
    ActionSchema {
        name: "pick",
        param_order: vec!["robot", "object", "object_pose"],
        preconditions: vec![
            Condition::new("robot", "at", Term::param("object_pose")),
            Condition::new("robot", "gripper_empty", Term::Bool(true)),
            Condition::new("object", "at", Term::param("object_pose")),
            Condition::new("object", "at_top", Term::Bool(true)),
        ],
        effects: vec![
            EffectSpec::new(["robot", "holding"], Term::param("object")),
            EffectSpec::new(["robot", "gripper_empty"], Term::Bool(false)),
            EffectSpec::new(["object", "at"], Term::None),
            EffectSpec::new(["object_pose", "occupied_by"], Term::None),
            EffectSpec::new(["object_pose", "clear"], Term::Bool(true)),
            EffectSpec::new(["object", "on", "at_top"], Term::Bool(true)),
            EffectSpec::new(["object", "on", "below"], Term::None),
            EffectSpec::new(["object", "on"], Term::None),
        ],
    }
}

/// `place(robot, object, target_pose)`.
pub fn place_schema() -> ActionSchema {
    ActionSchema {
        name: "place",
        param_order: vec!["robot", "object", "target_pose"],
        preconditions: vec![
            Condition::new("robot", "at", Term::param("target_pose")),
            Condition::new("robot", "holding", Term::param("object")),
            Condition::new("target_pose", "clear", Term::Bool(true)),
            Condition::new("target_pose", "supported", Term::Bool(true)),
        ],
        effects: vec![
            EffectSpec::new(["robot", "holding"], Term::None),
            EffectSpec::new(["robot", "gripper_empty"], Term::Bool(true)),
            EffectSpec::new(["object", "at"], Term::param("target_pose")),
            EffectSpec::new(["object", "on"], Term::path(["target_pose", "on", "occupied_by"])),
            EffectSpec::new(["target_pose", "occupied_by"], Term::param("object")),
            EffectSpec::new(["target_pose", "clear"], Term::Bool(false)),
            EffectSpec::new(["target_pose", "on", "occupied_by", "at_top"], Term::Bool(false)),
            EffectSpec::new(["target_pose", "on", "occupied_by", "below"], Term::param("object")),
        ],
    }
}

/// Checks whether every one of `conds` holds in `state` under `params`.
///
/// Per spec §4.B: resolve the condition's entity, read its current
/// attribute, resolve the expected value, and return `false` on the first
/// mismatch (or on an unbound parameter / missing state key).
pub fn is_applicable(conds: &[Condition], params: &Params, state: &WorldState) -> bool {
    conds.iter().all(|cond| {
        let Some(entity) = params.get(&cond.entity_param) else { return false };
        let key = format!("{entity}_{}", cond.variable);
        let Some(actual) = state.get(&key) else { return false };
        match resolve_term(&cond.expected, params, state) {
            Some(expected) => *actual == expected,
            None => false,
        }
    })
}

/// Applies `effects` to `state` under `params`, returning the resulting
/// state, or `None` if `conds` do not hold (the "empty state sentinel" of
/// spec §4.B — `Option::None` is a natural, idiomatic stand-in for a
/// distinguished empty value).
///
/// Effects are applied in declaration order; an effect whose target path
/// short-circuits through the ground sentinel or an unbound ("None")
/// intermediate is silently skipped, per spec §4.B/§9. After all effects
/// run, every pose's derived `supported` attribute is refreshed (see
/// [`refresh_supported`]).
pub fn apply_action(
    domain: &Domain,
    state: &WorldState,
    conds: &[Condition],
    params: &Params,
    effects: &[EffectSpec],
) -> Option<WorldState> {
    if !is_applicable(conds, params, state) {
        return None;
    }

    let mut new_state = state.clone();
    for effect in effects {
        let Some(key) = resolve_target_key(&effect.target, params, &new_state) else { continue };
        let Some(value) = resolve_term(&effect.value, params, &new_state) else { continue };
        new_state.insert(key, value);
    }

    refresh_supported(&domain.poses, &mut new_state);

    if cfg!(debug_assertions) {
        if let Err(err) = check_invariants(domain, &new_state) {
            panic!("{err}");
        }
    }

    Some(new_state)
}

/// Checks the six domain invariants of spec §3 against `state`.
///
/// Called from [`apply_action`] under `debug_assertions` only: a violation
/// here means a bug in an action schema's effects, not a reachable runtime
/// condition, so it is never surfaced to callers in release builds.
pub fn check_invariants(domain: &Domain, state: &WorldState) -> Result<(), crate::error::PlannerError> {
    use crate::basic::term::GROUND_NAME;

    let bad = |msg: String| Err(crate::error::PlannerError::DomainInvariant(msg));
    let name_at = |key: &str| -> Option<&str> { state.get(key).and_then(|v| v.as_name()) };

    // 1. each pose has at most one occupant.
    let mut occupants: Vec<&str> = Vec::new();
    for pose in &domain.poses {
        if let Some(occ) = name_at(&format!("{}_occupied_by", pose.name)) {
            if occ != NONE_NAME {
                if occupants.contains(&occ) {
                    return bad(format!("object `{occ}` occupies more than one pose"));
                }
                occupants.push(occ);
            }
        }
    }

    // 2. occupied_by == None iff clear == true.
    for pose in &domain.poses {
        let occ = name_at(&format!("{}_occupied_by", pose.name));
        let clear = state.get(&format!("{}_clear", pose.name)).and_then(|v| v.as_bool());
        let is_empty = matches!(occ, Some(NONE_NAME) | None);
        if Some(is_empty) != clear {
            return bad(format!("pose `{}` has clear={clear:?} but occupied_by={occ:?}", pose.name));
        }
    }

    // 3. at most one object is held, and it matches the robot's own bookkeeping.
    let held_objects: Vec<&str> =
        domain.objects.iter().filter(|o| name_at(&format!("{}_at", o.name)) == Some(NONE_NAME)).map(|o| o.name.as_str()).collect();
    if held_objects.len() > 1 {
        return bad(format!("more than one object has at=None: {held_objects:?}"));
    }
    for robot in &domain.robots {
        let holding = name_at(&format!("{}_holding", robot.name));
        let gripper_empty = state.get(&format!("{}_gripper_empty", robot.name)).and_then(|v| v.as_bool());
        let holding_something = !matches!(holding, Some(NONE_NAME) | None);
        if Some(!holding_something) != gripper_empty {
            return bad(format!("robot `{}` holding={holding:?} disagrees with gripper_empty={gripper_empty:?}", robot.name));
        }
        if holding_something != (!held_objects.is_empty()) {
            return bad(format!("robot `{}` holding state disagrees with held object set {held_objects:?}", robot.name));
        }
    }

    // Invariant 4 ("pose.on = GND or pose.on is a pose whose occupied_by is
    // non-none") is deliberately not asserted here. `pose.on`/`pose.below`
    // are static geometry fixed once at domain construction, while
    // `occupied_by` is dynamic; once a whole stack column is unstacked
    // down to the ground, an upper pose's `on` legitimately points at a
    // now-vacant lower pose. That is exactly what the derived `supported`
    // flag already tracks (see `refresh_supported`) without treating it as
    // a hard error — spec §9's own open question answers `supported` as
    // read-only/derived, not invariant-enforced.

    // 5. stacked-object symmetry and at_top consistency.
    for object in &domain.objects {
        if let Some(on) = name_at(&format!("{}_on", object.name)) {
            if on != GROUND_NAME && on != NONE_NAME {
                if name_at(&format!("{on}_below")) != Some(object.name.as_str()) {
                    return bad(format!("`{}.on = {on}` but `{on}.below` does not point back", object.name));
                }
                let on_at_top = state.get(&format!("{on}_at_top")).and_then(|v| v.as_bool());
                if on_at_top != Some(false) {
                    return bad(format!("`{on}` has something on it but at_top != false"));
                }
            }
        }
    }

    // 6. the robot's `at` is always a valid existing pose.
    for robot in &domain.robots {
        match name_at(&format!("{}_at", robot.name)) {
            Some(at) if domain.poses.iter().any(|p| p.name == at) => {}
            other => return bad(format!("robot `{}` is at invalid pose {other:?}", robot.name)),
        }
    }

    Ok(())
}

/// Recomputes `"{pose}_supported"` for every pose in `poses`.
///
/// `supported` is derived (spec §9's Open Question: "its setter in the
/// source is a no-op; treat it as read-only/derived") — no action schema
/// ever lists it as an effect target, so it is kept correct by recomputing
/// it here instead, immediately after any effect list runs: `true` iff the
/// pose rests on the ground, or the pose it rests on is currently occupied.
pub fn refresh_supported(poses: &[Pose], state: &mut WorldState) {
    for pose in poses {
        let on_key = format!("{}_on", pose.name);
        let supported = match state.get(&on_key) {
            Some(v) => match v.as_name() {
                Some(on_name) if crate::entities::is_ground(on_name) => true,
                Some(on_name) => {
                    let occ_key = format!("{on_name}_occupied_by");
                    !matches!(state.get(&occ_key).and_then(|v| v.as_name()), Some(NONE_NAME))
                }
                None => false,
            },
            None => false,
        };
        state.insert(format!("{}_supported", pose.name), supported);
    }
}
