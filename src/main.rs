use camp_rust::common::SolveOutcome;
use camp_rust::config::{Cli, Config};
use camp_rust::maze::Maze;
use camp_rust::solver::{AStarSolver, Solver};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();

    let config = Box::leak(Box::new(
        if let Some(config_file) = cli.config.as_ref() {
            let config_str = std::fs::read_to_string(config_file)?;
            Config::from_yaml_str(&config_str)
                .with_context(|| format!("error with config file: {config_file}"))?
        } else {
            info!("No config file specified, using default config");
            Config::default()
        }
        .override_from_command_line(&cli)?,
    ));

    let maze = Maze::from_file(&config.maze_path)
        .with_context(|| format!("error loading maze: {}", config.maze_path))?;

    let mut solver = AStarSolver::new(&maze);
    match solver.solve(config) {
        SolveOutcome::Solved(solution) => {
            assert!(solution.verify(&maze));
            info!("solution: {:?} cost {}", solution.moves, solution.cost);
            if let Some(output_path) = config.output_path.as_ref() {
                solution
                    .write_to_yaml(output_path)
                    .with_context(|| format!("error writing solution: {output_path}"))?;
            }
        }
        SolveOutcome::Unreachable => error!("no solution: some collectible is unreachable"),
        SolveOutcome::BudgetExhausted => error!("no solution within the expansion budget"),
    }

    Ok(())
}
