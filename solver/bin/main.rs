use std::{fs, path::PathBuf};

use anyhow::Context;
use solver::{
    util::{load_maze, save_solution, solve},
    SolveOptions, WallPolicy,
};

const MAZE_DIR: &str = "mazes";
const SOLUTION_DIR: &str = "solutions";

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(name) = std::env::args().nth(1) else {
        log::error!("No path to maze image");
        log::error!("Usage: solve-maze <name>  (reads {MAZE_DIR}/<name>.png)");
        std::process::exit(1);
    };

    let options = SolveOptions {
        wall_policy: match std::env::var("MAZE_WALL_POLICY") {
            Ok(policy) => policy.parse::<WallPolicy>()?,
            Err(_) => WallPolicy::default(),
        },
    };

    if options.wall_policy == WallPolicy::Traverse {
        log::warn!("Walls are traversable, the solution may cross non-white pixels");
    }

    fs::create_dir_all(SOLUTION_DIR).context("Setup error")?;

    let maze_path = PathBuf::from(MAZE_DIR).join(format!("{name}.png"));
    let img = load_maze(&maze_path)
        .with_context(|| format!("Error opening {}", maze_path.display()))?;

    let (grid, path) = solve(&img, &options)
        .with_context(|| format!("Could not solve {}", maze_path.display()))?;

    let out = PathBuf::from(SOLUTION_DIR).join(format!("{name}.png"));
    save_solution(&grid, path, &out)?;

    Ok(())
}
