use std::{env, fmt, path::PathBuf, str::FromStr};

use dotenvy;

use maze::render::{CELL_SIZE, LINE_THICKNESS, Palette, Style};

pub const WIDTH: u32 = 1251;
pub const HEIGHT: u32 = 720;
pub const MAX_SIDE: u32 = 16_384; // Pixels; keeps the grid and raster allocations bounded.

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: u32,  // Canvas pixels.
    pub height: u32, // Canvas pixels.
    pub cell_size: u32,
    pub line_thickness: u32,
    pub seed: Option<u64>,
    pub out_dir: PathBuf,
    pub preview: bool,
    pub fit: bool, // Size the canvas to the maze instead of width x height.
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    ZeroCellSize,
    TooLarge { key: &'static str, value: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{} has an invalid value: '{}'.", key, value)
            }
            ConfigError::ZeroCellSize => write!(f, "MAZE_CELL_SIZE must be greater than zero."),
            ConfigError::TooLarge { key, value } => write!(
                f,
                "{} is {}, but the canvas is at most {} pixels per side.",
                key, value, MAX_SIDE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            cell_size: CELL_SIZE,
            line_thickness: LINE_THICKNESS,
            seed: None,
            out_dir: PathBuf::from("."),
            preview: false,
            fit: false,
        }
    }
}

impl Config {
    /// Reads `.env` if there is one, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let cell_size = parse_or(&lookup, "MAZE_CELL_SIZE", defaults.cell_size)?;
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let seed = match lookup("MAZE_SEED") {
            Some(value) if !value.trim().is_empty() => Some(parse("MAZE_SEED", &value)?),
            _ => None,
        };

        let out_dir = lookup("MAZE_OUT_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.out_dir);

        let preview = match lookup("MAZE_PREVIEW") {
            Some(value) => parse_flag("MAZE_PREVIEW", &value)?,
            None => defaults.preview,
        };
        let fit = match lookup("MAZE_FIT") {
            Some(value) => parse_flag("MAZE_FIT", &value)?,
            None => defaults.fit,
        };

        Ok(Self {
            width: parse_side(&lookup, "MAZE_WIDTH", defaults.width)?,
            height: parse_side(&lookup, "MAZE_HEIGHT", defaults.height)?,
            cell_size,
            line_thickness: parse_side(&lookup, "MAZE_LINE_THICKNESS", defaults.line_thickness)?,
            seed,
            out_dir,
            preview,
            fit,
        })
    }

    // Whole cells only; leftover pixels stay background.
    pub fn columns(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    pub fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    pub fn style(&self) -> Style {
        Style {
            cell_size: self.cell_size,
            line_thickness: self.line_thickness,
            palette: Palette::default(),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => parse(key, &value),
        None => Ok(default),
    }
}

fn parse_side(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    let value = parse_or(lookup, key, default)?;
    if value > MAX_SIDE {
        return Err(ConfigError::TooLarge { key, value });
    }
    Ok(value)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
