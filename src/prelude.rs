pub use crate::action::{apply_action, is_applicable, move_schema, pick_schema, place_schema, ActionSchema, Condition, EffectSpec};
pub use crate::basic::term::{Params, Term};
pub use crate::basic::value::StateValue;
pub use crate::domain::Domain;
pub use crate::dtg::{build_dtg, query_nodes, Dtg, DtgNode};
pub use crate::error::{ConfigurationError, PlannerError};
pub use crate::goal::Goal;
pub use crate::plan::planner::{AcyclicPlanner, PlanStep, Verbosity};
pub use crate::problem::{load_problem, EntityConfig, ProblemConfig};
pub use crate::world_state::WorldState;
