//! The acyclic, branch-and-bound tree-search planner.
//!
//! Grounded on the draft search loop in `acyclic_planner_test.py`: pop a
//! live state, use the domain transition graph to find which actions are
//! structurally reachable from it, ground and apply each one, and grow the
//! search tree with whatever new states result — skipping any that would
//! recreate a state already on the current path. This module replaces that
//! draft's BFS-flavoured queue with an explicit depth-first stack and adds
//! the bounding step the draft never got to: once one goal is found, any
//! node that cannot possibly beat it on depth is pruned rather than
//! expanded.

use std::collections::HashSet;

use crate::action::{self, apply_action, is_applicable, ActionSchema};
use crate::basic::term::{Params, NONE_NAME};
use crate::domain::Domain;
use crate::dtg::{self, Dtg, DtgNode};
use crate::plan::node::{LinkedKind, SearchTree};
use crate::world_state::WorldState;

/// How much the planner logs about its own search as it runs.
///
/// Maps onto [`log::Level`]: `None` emits nothing, `Info` logs goal/dead-end
/// milestones, `Track` additionally logs every edge considered, and `Debug`
/// logs full state snapshots at each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    None,
    Info,
    Track,
    Debug,
}

impl Verbosity {
    fn log_level(self) -> Option<log::Level> {
        match self {
            Verbosity::None => None,
            Verbosity::Info => Some(log::Level::Info),
            Verbosity::Track => Some(log::Level::Debug),
            Verbosity::Debug => Some(log::Level::Trace),
        }
    }
}

/// A completed plan step: an action name and its bound arguments, in the
/// schema's declared parameter order.
pub type PlanStep = (String, Vec<String>);

/// Drives the tree search described above over one [`Domain`].
pub struct AcyclicPlanner<'a> {
    domain: &'a Domain,
    dtg: Dtg,
    verbosity: Verbosity,
    /// Caps how many nodes the search will pop from its frontier before
    /// giving up, independent of whether a goal has already been found.
    step_budget: Option<usize>,
}

impl<'a> AcyclicPlanner<'a> {
    pub fn new(domain: &'a Domain) -> Self {
        Self { dtg: dtg::build_dtg(domain), domain, verbosity: Verbosity::None, step_budget: None }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_step_budget(mut self, step_budget: usize) -> Self {
        self.step_budget = Some(step_budget);
        self
    }

    fn log(&self, msg: impl FnOnce() -> String) {
        if let Some(level) = self.verbosity.log_level() {
            log::log!(level, "{}", msg());
        }
    }

    /// Runs the search to completion (or until the step budget is spent)
    /// and returns the shallowest plan found, or `None` if the search
    /// space was exhausted with no goal reached.
    pub fn run(&mut self) -> Option<Vec<PlanStep>> {
        let robot_name = self.domain.robots[0].name.clone();
        let goal_blocks: HashSet<&str> =
            self.domain.goal.requirements.keys().filter_map(|k| k.strip_suffix("_at")).collect();
        let goal_poses: HashSet<&str> =
            self.domain.goal.requirements.values().filter_map(|v| v.as_name()).collect();

        let mut tree = SearchTree::new(self.domain.current_state.clone());
        let mut stack = vec![0usize];
        let mut best: Option<(usize, usize)> = None;
        let mut steps_taken = 0usize;

        while let Some(idx) = stack.pop() {
            if tree.node(idx).kind != LinkedKind::Alive {
                continue;
            }
            if let Some(budget) = self.step_budget {
                if steps_taken >= budget {
                    self.log(|| format!("step budget {budget} exhausted, stopping search"));
                    break;
                }
            }
            if let Some((_, best_depth)) = best {
                if cannot_beat_best(tree.depth(idx), best_depth) {
                    continue;
                }
            }
            steps_taken += 1;

            let state = tree.node(idx).state.clone();
            self.log(|| format!("expanding node {idx} at depth {}: {state}", tree.depth(idx)));

            if self.domain.goal_reached(&state) {
                tree.set_kind(idx, LinkedKind::Goal);
                let depth = tree.depth(idx);
                self.log(|| format!("goal reached at node {idx}, depth {depth}"));
                if best.is_none_or(|(_, best_depth)| depth < best_depth) {
                    best = Some((idx, depth));
                }
                continue;
            }

            let mut expanded_any = false;
            let current_robot_pose = state.get(&format!("{robot_name}_at")).and_then(|v| v.as_name());

            for node in goal_relevant_nodes(&self.dtg, &state, &robot_name, current_robot_pose, &goal_blocks) {
                for (action_name, target_name) in &node.edges {
                    let target = &self.dtg.nodes[target_name];

                    if !edge_is_goal_directed(action_name, node, target, &state, current_robot_pose, &goal_poses) {
                        continue;
                    }

                    let schema = schema_for(action_name);
                    let params = dtg::parse_action_params(action_name, node, target, &robot_name);

                    if let Err(err) = dtg::validate_params(self.domain, &params) {
                        log::error!("{err}");
                        continue;
                    }

                    if !is_applicable(&schema.preconditions, &params, &state) {
                        continue;
                    }
                    let Some(new_state) = apply_action(self.domain, &state, &schema.preconditions, &params, &schema.effects)
                    else {
                        continue;
                    };
                    if new_state == state || tree.ancestor_states(idx).any(|ancestor| *ancestor == new_state) {
                        self.log(|| format!("skipping {action_name} from node {idx}: would revisit an ancestor state"));
                        continue;
                    }

                    let args = args_for(&schema, &params);
                    let child = tree.push_child(idx, schema.name, args, new_state);
                    stack.push(child);
                    expanded_any = true;
                }
            }

            if !expanded_any {
                tree.set_kind(idx, LinkedKind::Dead);
                self.log(|| format!("node {idx} has no live successors, marking dead"));
                if let Some(parent) = tree.parent(idx) {
                    if tree.edge_count(parent) == 1 {
                        tree.set_kind(parent, LinkedKind::Dead);
                    }
                }
            }
        }

        best.map(|(goal_idx, _)| tree.retrace(goal_idx))
    }
}

/// Whether a node sitting at `depth` can be skipped without checking it for
/// the goal, because nothing reachable from it could produce a plan
/// shorter than `best_depth`.
///
/// `depth` itself is a candidate length (the node may already satisfy the
/// goal when it is popped, before any child is ever considered), so only
/// `depth >= best_depth` is prunable. `depth + 1 >= best_depth` is one off:
/// it discards a node sitting exactly one step shallower than the current
/// best before `goal_reached` ever runs on it, which can silently keep a
/// longer plan as `best` when a shorter one was sitting right there.
fn cannot_beat_best(depth: usize, best_depth: usize) -> bool {
    depth >= best_depth
}

fn schema_for(action_name: &str) -> ActionSchema {
    match action_name {
        "move" => action::move_schema(),
        "pick" => action::pick_schema(),
        "place" => action::place_schema(),
        other => unreachable!("no DTG edge is ever labelled `{other}`"),
    }
}

fn args_for(schema: &ActionSchema, params: &Params) -> Vec<String> {
    schema.param_order.iter().map(|name| params.get(*name).cloned().unwrap_or_default()).collect()
}

/// Filters a DTG query down to nodes worth expanding (spec §4.G,
/// `prune_unrelated_nodes`): the acting robot's own node, plus any block
/// node whose pose is either the robot's current pose (so a `pick` from it
/// is at least reachable) or `"None"` (the block is already held, so a
/// `place` from it is worth considering) — and only for blocks the goal
/// actually names.
fn goal_relevant_nodes<'g>(
    dtg: &'g Dtg,
    state: &WorldState,
    robot_name: &str,
    robot_pose: Option<&str>,
    goal_blocks: &HashSet<&str>,
) -> Vec<&'g DtgNode> {
    dtg::query_nodes(dtg, state)
        .into_iter()
        .filter(|node| {
            if node.entity == robot_name {
                return true;
            }
            if !goal_blocks.contains(node.entity.as_str()) {
                return false;
            }
            node.value == NONE_NAME || Some(node.value.as_str()) == robot_pose
        })
        .collect()
}

/// Edge-level goal-directed heuristics (spec §4.G, `unpack_actions_from_nodes`):
/// - `move`: the target pose must currently hold a block, or be a goal position.
/// - `pick` (edge into the `"None"` node): the source pose must be the robot's
///   current pose (already guaranteed by [`goal_relevant_nodes`], re-checked
///   here so the rule lives in one place).
/// - `place` (edge out of the `"None"` node): the target pose must be a goal
///   position.
fn edge_is_goal_directed(
    action_name: &str,
    source: &DtgNode,
    target: &DtgNode,
    state: &WorldState,
    robot_pose: Option<&str>,
    goal_poses: &HashSet<&str>,
) -> bool {
    match action_name {
        "move" => {
            let occupied = state
                .get(&format!("{}_occupied_by", target.value))
                .and_then(|v| v.as_name())
                .is_some_and(|occ| occ != NONE_NAME);
            occupied || goal_poses.contains(target.value.as_str())
        }
        "pick" => Some(source.value.as_str()) == robot_pose,
        "place" => goal_poses.contains(target.value.as_str()),
        other => unreachable!("no DTG edge is ever labelled `{other}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityConfig, ProblemConfig};

    fn domain_with(init: &[(&str, [f64; 3])], goal: &[(&str, [f64; 3])]) -> Domain {
        let init = init.iter().map(|(n, p)| (n.to_string(), EntityConfig { position: *p })).collect();
        let goal = goal.iter().map(|(n, p)| (n.to_string(), EntityConfig { position: *p })).collect();
        Domain::from_configs(&init, &goal).unwrap()
    }

    #[test]
    fn finds_pick_and_place_plan_across_two_empty_poses() {
        let domain = domain_with(
            &[("robot1", [0.0, 0.0, 0.0]), ("block1", [1.0, 0.0, 0.0])],
            &[("block1", [2.0, 0.0, 0.0])],
        );
        let mut planner = AcyclicPlanner::new(&domain);
        let plan = planner.run().expect("plan should be found");

        assert!(!plan.is_empty());
        let last = plan.last().unwrap();
        assert_eq!(last.0, "place");
        assert_eq!(last.1[2], "p3");
    }

    #[test]
    fn returns_none_when_goal_is_unreachable_within_budget() {
        let domain = domain_with(
            &[("robot1", [0.0, 0.0, 0.0]), ("block1", [1.0, 0.0, 0.0])],
            &[("block1", [2.0, 0.0, 0.0])],
        );
        let mut planner = AcyclicPlanner::new(&domain).with_step_budget(0);
        assert!(planner.run().is_none());
    }

    /// Invariant 8 (spec §8): the bound must only ever discard a node once
    /// its *own* depth can no longer beat the current best, not one step
    /// earlier. A node exactly `best_depth - 1` deep must still be checked.
    #[test]
    fn bound_only_discards_nodes_at_or_past_the_current_best_depth() {
        assert!(!cannot_beat_best(3, 4), "a node one step shallower than best could still beat it");
        assert!(cannot_beat_best(4, 4), "a node as deep as best cannot beat it");
        assert!(cannot_beat_best(5, 4), "a node deeper than best cannot beat it");
    }

    /// Invariant 8, end to end: an unrelated block (`block3`, never named in
    /// the goal) sits at an occupied pose the robot is free to detour
    /// through on its way to `block1` (`edge_is_goal_directed`'s `move` rule
    /// allows moving to *any* occupied pose, not just goal-relevant ones).
    /// That detour gives the search tree multiple paths of different
    /// lengths to the same goal-satisfying configuration; branch-and-bound
    /// must still settle on the true shortest one (move, pick, move, place
    /// — 4 steps, the fewest that can possibly fetch and place `block1`),
    /// regardless of the order in which the DFS stack happens to discover
    /// them.
    #[test]
    fn shortest_plan_wins_even_when_a_longer_detour_is_discovered_first() {
        let domain = domain_with(
            &[("robot1", [5.0, 5.0, 0.0]), ("block1", [0.0, 0.0, 0.0]), ("block3", [3.0, 3.0, 0.0])],
            &[("block1", [9.0, 9.0, 0.0])],
        );
        let mut planner = AcyclicPlanner::new(&domain);
        let plan = planner.run().expect("plan should be found");

        assert_eq!(plan.len(), 4, "no valid plan can fetch and place block1 in fewer than 4 steps");
        let actions: Vec<&str> = plan.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(actions, vec!["move", "pick", "move", "place"]);
    }
}
