//! S3: two blocks start stacked at the same pose; the goal needs the
//! covering block relocated, which is impossible until it is picked off
//! the stack first. Both blocks are named in the goal — an uninvolved
//! covering block would never be considered for a `place` once picked up
//! (see `goal_relevant_nodes` in `plan::planner`).

use block_planner::prelude::*;

fn main() {
    env_logger::init();

    let init = ProblemConfig::from_iter([
        ("robot1".to_string(), EntityConfig { position: [5.0, 5.0, 0.0] }),
        ("block1".to_string(), EntityConfig { position: [0.0, 0.0, 0.0] }),
        ("block2".to_string(), EntityConfig { position: [0.0, 0.0, 1.0] }),
    ]);
    let goal = ProblemConfig::from_iter([
        ("block1".to_string(), EntityConfig { position: [0.0, 0.0, 0.0] }),
        ("block2".to_string(), EntityConfig { position: [3.0, 0.0, 0.0] }),
    ]);

    let domain = Domain::from_configs(&init, &goal).expect("well-formed problem");
    let mut planner = AcyclicPlanner::new(&domain).with_verbosity(Verbosity::Info);

    match planner.run() {
        Some(plan) => {
            for (action, args) in plan {
                println!("{action}({})", args.join(", "));
            }
        }
        None => println!("no plan found"),
    }
}
