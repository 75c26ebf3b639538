use std::process;

use painter::{config::Config, run};

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Invalid configuration.");
            eprintln!("Details: {}", e);
            process::exit(1);
        }
    };

    match run::run(&config) {
        Ok(path) => println!("Saved maze to {}.", path.display()),
        Err(e) => {
            eprintln!("Error: Failed to make maze.");
            eprintln!("Details: {}", e);
            if let run::RunError::Maze(_) = e {
                eprintln!("Is MAZE_CELL_SIZE larger than MAZE_WIDTH or MAZE_HEIGHT?");
            }
            process::exit(1);
        }
    }
}
