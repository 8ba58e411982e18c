//! A symbolic task planner for a robotic block-manipulation domain.
//!
//! A single robot moves between named poses and picks up or places blocks
//! that may be stacked on top of one another. The world is represented as
//! a flat [`WorldState`](world_state::WorldState) of `"{entity}_{variable}"`
//! keys; three hard-coded action schemas (`move`, `pick`, `place`) describe
//! how that state can change; a domain transition graph narrows down which
//! groundings of those schemas are worth trying from a given state; and an
//! acyclic, branch-and-bound tree search ([`plan::planner::AcyclicPlanner`])
//! finds the shallowest sequence of groundings that reaches a goal.
//!
//! ```
//! use block_planner::prelude::*;
//!
//! let init = ProblemConfig::from_iter([
//!     ("robot1".to_string(), EntityConfig { position: [0.0, 0.0, 0.0] }),
//!     ("block1".to_string(), EntityConfig { position: [1.0, 0.0, 0.0] }),
//! ]);
//! let goal = ProblemConfig::from_iter([
//!     ("block1".to_string(), EntityConfig { position: [2.0, 0.0, 0.0] }),
//! ]);
//!
//! let domain = Domain::from_configs(&init, &goal).unwrap();
//! let mut planner = AcyclicPlanner::new(&domain);
//! let plan = planner.run();
//! assert!(plan.is_some());
//! ```

pub mod action;
pub mod basic;
pub mod domain;
pub mod dtg;
pub mod entities;
pub mod error;
pub mod goal;
pub mod plan;
pub mod prelude;
pub mod problem;
pub mod world_state;
