//! A small command-line front end: load an init/goal pair of YAML files,
//! plan between them, and print the result.
//!
//! Exit code `0` means a plan was found and printed; `1` means the problem
//! parsed fine but no plan exists within the given step budget; `2` means
//! the problem files themselves were missing, malformed, or inconsistent.

use std::process::ExitCode;

use clap::Parser;

use block_planner::prelude::*;

#[derive(Parser)]
#[command(about = "Plan a robot block-manipulation problem from init/goal YAML files")]
struct Cli {
    /// Path to the initial-state YAML file.
    init: std::path::PathBuf,
    /// Path to the goal-state YAML file.
    goal: std::path::PathBuf,
    /// Caps how many search-tree nodes the planner will expand.
    #[arg(long)]
    step_budget: Option<usize>,
    /// How much the planner logs about its own search.
    #[arg(long, value_enum, default_value = "none")]
    verbosity: CliVerbosity,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CliVerbosity {
    None,
    Info,
    Track,
    Debug,
}

impl From<CliVerbosity> for Verbosity {
    fn from(value: CliVerbosity) -> Self {
        match value {
            CliVerbosity::None => Verbosity::None,
            CliVerbosity::Info => Verbosity::Info,
            CliVerbosity::Track => Verbosity::Track,
            CliVerbosity::Debug => Verbosity::Debug,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let (init, goal) = match load_problem(&cli.init, &cli.goal) {
        Ok(configs) => configs,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let domain = match Domain::from_configs(&init, &goal) {
        Ok(domain) => domain,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let mut planner = AcyclicPlanner::new(&domain).with_verbosity(cli.verbosity.into());
    if let Some(budget) = cli.step_budget {
        planner = planner.with_step_budget(budget);
    }

    match planner.run() {
        Some(plan) => {
            for (action, args) in plan {
                println!("{action}({})", args.join(", "));
            }
            ExitCode::SUCCESS
        }
        None => {
            println!("no plan found");
            ExitCode::from(1)
        }
    }
}
