use std::{fmt, fs, io, path::PathBuf};

use chrono::{DateTime, Local, TimeZone};
use rand::{SeedableRng, rngs::StdRng};

use maze::{
    GridError, generate,
    render::{canvas_dimensions, render},
};

use crate::config::Config;

#[derive(Debug)]
pub enum RunError {
    Maze(GridError),
    Io(io::Error),
    Image(image::ImageError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Maze(e) => write!(f, "{}", e),
            RunError::Io(e) => write!(f, "Could not prepare output directory: {}.", e),
            RunError::Image(e) => write!(f, "Could not save image: {}.", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<GridError> for RunError {
    fn from(e: GridError) -> Self {
        RunError::Maze(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<image::ImageError> for RunError {
    fn from(e: image::ImageError) -> Self {
        RunError::Image(e)
    }
}

/// Generates a maze, draws it and saves it as a timestamped PNG under
/// `config.out_dir`. Returns the path written.
pub fn run(config: &Config) -> Result<PathBuf, RunError> {
    let columns = config.columns();
    let rows = config.rows();

    match config.seed {
        Some(seed) => println!("Generating a {}x{} maze (seed {})...", columns, rows, seed),
        None => println!("Generating a {}x{} maze...", columns, rows),
    }

    let grid = match config.seed {
        Some(seed) => generate(columns, rows, &mut StdRng::seed_from_u64(seed))?,
        None => generate(columns, rows, &mut rand::rng())?,
    };

    if config.preview {
        println!("{}", grid);
    }

    let style = config.style();
    let (width, height) = if config.fit {
        canvas_dimensions(&grid, &style)
    } else {
        (config.width, config.height)
    };
    let image = render(&grid, &style, width, height);

    fs::create_dir_all(&config.out_dir)?;
    let path = config.out_dir.join(file_name_for(Local::now()));
    image.save(&path)?;

    Ok(path)
}

pub fn file_name_for<Tz: TimeZone>(timestamp: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("maze_{}.png", timestamp.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn file_name_is_a_second_resolution_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(file_name_for(timestamp), "maze_20240309070501.png");
    }

    #[test]
    fn grid_errors_read_like_sentences() {
        let e = RunError::from(GridError::InvalidDimensions {
            columns: 0,
            rows: 4,
        });
        assert_eq!(
            e.to_string(),
            "A maze needs at least one column and one row, got 0x4."
        );
    }
}
