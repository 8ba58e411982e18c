//! S1: a single robot with an empty gripper, nothing to fetch — the
//! shortest possible plan is one `move`.

use block_planner::prelude::*;

fn main() {
    env_logger::init();

    let init = ProblemConfig::from_iter([("robot1".to_string(), EntityConfig { position: [0.0, 0.0, 0.0] })]);
    let goal = ProblemConfig::from_iter([("robot1".to_string(), EntityConfig { position: [1.0, 0.0, 0.0] })]);

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
