//! Domain transition graphs: a per-variable lookahead oracle the planner
//! consults to decide which actions are even worth trying from a state,
//! before falling back on the real precondition check.
//!
//! Grounded on the original loader's two-pass DTG construction: first
//! enumerate one node per `(entity, variable, value)` triple, then wire
//! edges between nodes that a single action grounding can bridge. This
//! crate narrows that to exactly the two sub-graphs the domain needs: the
//! robot's pose graph (`move` edges) and each block's location graph
//! (`pick`/`place` edges to and from the "held" node).

use std::collections::BTreeMap;

use crate::basic::term::{Params, NONE_NAME};
use crate::domain::Domain;
use crate::world_state::WorldState;

/// One node in a domain transition graph: "entity `{entity}`'s `{variable}`
/// equals `{value}`", plus the actions that can move into or out of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DtgNode {
    pub name: String,
    pub entity: String,
    pub variable: &'static str,
    pub value: String,
    /// `(action_name, target_node_name)` pairs, looked up in the owning
    /// [`Dtg`]'s node map rather than held as direct references, so the
    /// graph stays a flat, cycle-free map instead of a web of `Rc`s.
    pub edges: Vec<(&'static str, String)>,
}

/// The complete domain transition graph: every node, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Dtg {
    pub nodes: BTreeMap<String, DtgNode>,
}

impl Dtg {
    fn node_mut(&mut self, name: &str) -> &mut DtgNode {
        self.nodes.get_mut(name).expect("node must be inserted before its edges are wired")
    }
}

/// Builds the domain transition graph for `domain`.
///
/// Per spec §4.D, only the first-loaded robot contributes to the robot
/// sub-graph; if more than one robot is present this is logged once at
/// domain-construction time (see [`crate::domain::Domain::from_configs`]),
/// not repeated here.
pub fn build_dtg(domain: &Domain) -> Dtg {
    let mut dtg = Dtg::default();
    let robot_name = &domain.robots[0].name;

    for pose in &domain.poses {
        let name = robot_at_node_name(robot_name, &pose.name);
        dtg.nodes.insert(
            name.clone(),
            DtgNode { name, entity: robot_name.clone(), variable: "at", value: pose.name.clone(), edges: Vec::new() },
        );
    }
    for a in &domain.poses {
        for b in &domain.poses {
            if a.name == b.name {
                continue;
            }
            let from = robot_at_node_name(robot_name, &a.name);
            let to = robot_at_node_name(robot_name, &b.name);
            dtg.node_mut(&from).edges.push(("move", to));
        }
    }

    for object in &domain.objects {
        let absent = object_at_node_name(&object.name, NONE_NAME);
        dtg.nodes.insert(
            absent.clone(),
            DtgNode {
                name: absent,
                entity: object.name.clone(),
                variable: "at",
                value: NONE_NAME.to_string(),
                edges: Vec::new(),
            },
        );

        for pose in &domain.poses {
            let at_pose = object_at_node_name(&object.name, &pose.name);
            dtg.nodes.insert(
                at_pose.clone(),
                DtgNode {
                    name: at_pose.clone(),
                    entity: object.name.clone(),
                    variable: "at",
                    value: pose.name.clone(),
                    edges: Vec::new(),
                },
            );

            let absent = object_at_node_name(&object.name, NONE_NAME);
            dtg.node_mut(&at_pose).edges.push(("pick", absent.clone()));
            dtg.node_mut(&absent).edges.push(("place", at_pose));
        }
    }

    dtg
}

fn robot_at_node_name(robot: &str, pose: &str) -> String {
    format!("{robot}_at_{pose}")
}

fn object_at_node_name(object: &str, value: &str) -> String {
    format!("{object}_at_{value}")
}

/// Returns every node whose described variable currently holds in `state`.
///
/// This is the frontier the planner expands from: each returned node names
/// an edge (an action grounding) that is *structurally* reachable from the
/// current state, before preconditions beyond that one variable are even
/// checked.
pub fn query_nodes<'a>(dtg: &'a Dtg, state: &WorldState) -> Vec<&'a DtgNode> {
    dtg.nodes
        .values()
        .filter(|node| {
            let key = format!("{}_{}", node.entity, node.variable);
            state.get(&key).and_then(|v| v.as_name()) == Some(node.value.as_str())
        })
        .collect()
}

/// Derives an action's parameter bindings from the DTG edge it was found on.
///
/// `move` binds `robot`/`start_pose`/`target_pose` from the two `{robot}_at_*`
/// node names; `pick`/`place` bind `robot`/`object`/`object_pose` (or
/// `target_pose`) from the `{object}_at_*` node pair plus the acting robot.
pub fn parse_action_params(action_name: &str, src: &DtgNode, tgt: &DtgNode, robot_name: &str) -> Params {
    let mut params = Params::new();
    match action_name {
        "move" => {
            params.insert("robot".to_string(), src.entity.clone());
            params.insert("start_pose".to_string(), src.value.clone());
            params.insert("target_pose".to_string(), tgt.value.clone());
        }
        "pick" => {
            params.insert("robot".to_string(), robot_name.to_string());
            params.insert("object".to_string(), src.entity.clone());
            params.insert("object_pose".to_string(), src.value.clone());
        }
        "place" => {
            params.insert("robot".to_string(), robot_name.to_string());
            params.insert("object".to_string(), tgt.entity.clone());
            params.insert("target_pose".to_string(), tgt.value.clone());
        }
        other => unreachable!("no DTG edge is ever labelled `{other}`"),
    }
    params
}

/// Checks that every entity name a grounding binds is one the domain
/// actually declares (a pose, object, or robot), or the ground sentinel.
///
/// The DTG is built directly from `domain`'s own entities, so a binding
/// referencing an absent entity should never occur in practice; this exists
/// as the defensive check spec §7 names (`ParameterBindingError`) for the
/// case a future DTG source (e.g. a hand-built one in a test) disagrees
/// with the domain it is paired with.
pub fn validate_params(domain: &Domain, params: &Params) -> Result<(), crate::error::PlannerError> {
    for (param_name, entity_name) in params {
        if entity_name == crate::basic::term::GROUND_NAME {
            continue;
        }
        if !domain.name_kind.contains_key(entity_name) {
            return Err(crate::error::PlannerError::ParameterBinding(format!(
                "`{param_name}` is bound to `{entity_name}`, which is not in this domain"
            )));
        }
    }
    Ok(())
}
