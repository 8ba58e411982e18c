//! S2: a lone block must be relocated to an empty pose — the robot has to
//! drive to it, pick it up, drive to the target, and place it down.

use block_planner::prelude::*;

fn main() {
    env_logger::init();

    let init = ProblemConfig::from_iter([
        ("robot1".to_string(), EntityConfig { position: [0.0, 0.0, 0.0] }),
        ("block1".to_string(), EntityConfig { position: [1.0, 0.0, 0.0] }),
    ]);
    let goal = ProblemConfig::from_iter([("block1".to_string(), EntityConfig { position: [2.0, 0.0, 0.0] })]);

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
