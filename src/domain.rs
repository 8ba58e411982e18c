//! Domain construction: turns a pair of init/goal configurations into a
//! fully-populated [`Domain`] (entities, initial state, goal).

use std::collections::BTreeMap;

use crate::action::refresh_supported;
use crate::basic::term::{GROUND_NAME, NONE_NAME};
use crate::entities::{EntityKind, ObjectBlock, Pose, Robot};
use crate::error::ConfigurationError;
use crate::goal::Goal;
pub use crate::problem::{EntityConfig, ProblemConfig};
use crate::world_state::WorldState;

/// Positions within this XY distance are considered the same stack column.
///
/// Mirrors the tolerance the original loader used for its nearest-neighbour
/// query; a plain pairwise scan stands in for that spatial index here since
/// problem sizes are small (tens of poses, not thousands) and pulling in a
/// k-d tree crate for it would be disproportionate (see `DESIGN.md`).
const STACK_XY_TOLERANCE: f64 = 0.05;

/// The fully-resolved planning domain: every entity, the state they seed,
/// and the goal to reach.
#[derive(Clone, Debug)]
pub struct Domain {
    pub poses: Vec<Pose>,
    pub objects: Vec<ObjectBlock>,
    pub robots: Vec<Robot>,
    pub name_kind: BTreeMap<String, EntityKind>,
    pub goal: Goal,
    pub initial_state: WorldState,
    /// The state the planner is currently reasoning from. Distinct from
    /// `initial_state` so that [`Domain::with_state`] can temporarily swap
    /// in a hypothetical state (e.g. a search node's state) and restore the
    /// original afterwards without losing the problem's starting point.
    pub current_state: WorldState,
}

impl Domain {
    /// Builds a domain from already-parsed init/goal configurations.
    ///
    /// Decoupled from file I/O (see [`crate::problem::load_problem`]) so
    /// callers that already hold parsed configs — tests, chiefly — don't
    /// need a filesystem round trip.
    pub fn from_configs(init: &ProblemConfig, goal: &ProblemConfig) -> Result<Domain, ConfigurationError> {
        let mut poses = Vec::new();
        let mut objects = Vec::new();
        let mut robots = Vec::new();
        let mut name_kind = BTreeMap::new();
        let mut state = WorldState::new();

        name_kind.insert(GROUND_NAME.to_string(), EntityKind::Ground);

        for (name, cfg) in init.iter().chain(goal.iter()) {
            if cfg.position.iter().any(|c| !c.is_finite()) {
                return Err(ConfigurationError::NonFinitePosition(name.clone()));
            }
        }

        for (idx, (name, cfg)) in init.iter().enumerate() {
            let pose_name = format!("p{}", idx + 1);
            let pose = Pose::new(pose_name.clone(), (cfg.position[0], cfg.position[1], cfg.position[2]));
            let is_robot = name.split('_').next() == Some("robot");

            if is_robot {
                state.insert(format!("{name}_at"), pose_name.clone());
                state.insert(format!("{name}_holding"), NONE_NAME);
                state.insert(format!("{name}_gripper_empty"), true);
                name_kind.insert(name.clone(), EntityKind::Robot);
                robots.push(Robot::new(name.clone()));

                state.insert(format!("{pose_name}_clear"), true);
                state.insert(format!("{pose_name}_occupied_by"), NONE_NAME);
            } else {
                state.insert(format!("{name}_at"), pose_name.clone());
                state.insert(format!("{name}_at_top"), true);
                state.insert(format!("{name}_on"), NONE_NAME);
                state.insert(format!("{name}_below"), NONE_NAME);
                name_kind.insert(name.clone(), EntityKind::Object);
                objects.push(ObjectBlock::new(name.clone()));

                state.insert(format!("{pose_name}_clear"), false);
                state.insert(format!("{pose_name}_occupied_by"), name.clone());
            }

            state.insert(format!("{pose_name}_on"), NONE_NAME);
            state.insert(format!("{pose_name}_below"), NONE_NAME);
            state.insert(format!("{pose_name}_supported"), false);
            name_kind.insert(pose_name, EntityKind::Pose);
            poses.push(pose);
        }

        if robots.is_empty() {
            return Err(ConfigurationError::NoRobot);
        }

        let mut goal_requirements = BTreeMap::new();
        for (name, cfg) in goal.iter() {
            if !name_kind.contains_key(name) {
                return Err(ConfigurationError::UnknownGoalEntity(name.clone()));
            }
            let pos = (cfg.position[0], cfg.position[1], cfg.position[2]);
            let pose_name = match find_pose_at_position(&poses, pos) {
                Some(existing) => existing,
                None => {
                    let new_name = format!("p{}", poses.len() + 1);
                    log::info!("goal introduces new pose {new_name} not present in the init configuration");
                    name_kind.insert(new_name.clone(), EntityKind::Pose);
                    state.insert(format!("{new_name}_clear"), true);
                    state.insert(format!("{new_name}_occupied_by"), NONE_NAME);
                    state.insert(format!("{new_name}_on"), NONE_NAME);
                    state.insert(format!("{new_name}_below"), NONE_NAME);
                    state.insert(format!("{new_name}_supported"), false);
                    poses.push(Pose::new(new_name.clone(), pos));
                    new_name
                }
            };
            goal_requirements.insert(format!("{name}_at"), crate::basic::value::StateValue::Str(pose_name));
        }

        if robots.len() > 1 {
            log::info!(
                "domain declares {} robots; the domain transition graph's block sub-graph is built against the first one only",
                robots.len()
            );
        }

        build_physical_relations(&poses, &mut state);
        refresh_supported(&poses, &mut state);

        let goal = Goal { requirements: goal_requirements };
        let current_state = state.clone();
        Ok(Domain { poses, objects, robots, name_kind, goal, initial_state: state, current_state })
    }

    /// Runs `f` with `current_state` temporarily replaced by `scratch`,
    /// restoring the original state afterwards regardless of how `f`
    /// returns. Used by the planner to probe a candidate state without
    /// losing its place in the surrounding search.
    pub fn with_state<R>(&mut self, scratch: WorldState, f: impl FnOnce(&mut Domain) -> R) -> R {
        let saved = std::mem::replace(&mut self.current_state, scratch);
        let result = f(self);
        self.current_state = saved;
        result
    }

    /// Whether `state` satisfies this domain's goal.
    pub fn goal_reached(&self, state: &WorldState) -> bool {
        self.goal.is_satisfied_by(state)
    }
}

fn find_pose_at_position(poses: &[Pose], pos: (f64, f64, f64)) -> Option<String> {
    poses
        .iter()
        .find(|pose| {
            (pose.pos.0 - pos.0).abs() < 1e-9 && (pose.pos.1 - pos.1).abs() < 1e-9 && (pose.pos.2 - pos.2).abs() < 1e-9
        })
        .map(|pose| pose.name.clone())
}

/// Groups poses into stacks by XY proximity, then links each stack's `on`/
/// `below` chain bottom-to-top, propagating the same chain onto whichever
/// object (if any) occupies each pose.
///
/// Grounded on the original loader's `build_physical_relations`: group by
/// horizontal position, sort by height, and walk the sorted list linking
/// neighbours.
fn build_physical_relations(poses: &[Pose], state: &mut WorldState) {
    let mut visited = vec![false; poses.len()];

    for i in 0..poses.len() {
        if visited[i] {
            continue;
        }

        let (xi, yi) = (poses[i].pos.0, poses[i].pos.1);
        let mut group: Vec<usize> =
            (0..poses.len()).filter(|&j| !visited[j] && same_column(poses[j].pos.0, poses[j].pos.1, xi, yi)).collect();
        for &j in &group {
            visited[j] = true;
        }
        group.sort_by(|&a, &b| poses[a].pos.2.partial_cmp(&poses[b].pos.2).unwrap());

        for (j, &pose_idx) in group.iter().enumerate() {
            let pose_name = &poses[pose_idx].name;

            if j == 0 {
                state.insert(format!("{pose_name}_on"), GROUND_NAME);
            }

            if j < group.len() - 1 {
                let above_name = poses[group[j + 1]].name.clone();
                state.insert(format!("{pose_name}_below"), above_name.clone());
                state.insert(format!("{above_name}_on"), pose_name.clone());

                let occupant = object_occupying(state, pose_name);
                let above_occupant = object_occupying(state, &above_name);

                if let Some(occupant) = &occupant {
                    state.insert(format!("{occupant}_at_top"), false);
                    if j == 0 {
                        state.insert(format!("{occupant}_on"), GROUND_NAME);
                    }
                    if let Some(above_occupant) = &above_occupant {
                        state.insert(format!("{occupant}_below"), above_occupant.clone());
                        state.insert(format!("{above_occupant}_on"), occupant.clone());
                    }
                }
            } else if let Some(occupant) = object_occupying(state, pose_name) {
                state.insert(format!("{occupant}_at_top"), true);
            }
        }
    }
}

fn same_column(x: f64, y: f64, xi: f64, yi: f64) -> bool {
    ((x - xi).powi(2) + (y - yi).powi(2)).sqrt() <= STACK_XY_TOLERANCE
}

fn object_occupying(state: &WorldState, pose_name: &str) -> Option<String> {
    match state.get(&format!("{pose_name}_occupied_by")).and_then(|v| v.as_name()) {
        Some(NONE_NAME) | None => None,
        Some(name) => Some(name.to_string()),
    }
}
