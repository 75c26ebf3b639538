//! Perfect maze generation: a randomized depth-first walk over a grid that
//! carves a spanning tree, plus a raster renderer for the result.

pub mod grid;
pub mod maker;
pub mod render;

pub use grid::{Cell, Direction, Grid, GridError, Walls};
pub use maker::{Chooser, generate};
