pub mod backtrack;

use rand::Rng;

use crate::grid::{Grid, GridError};
use backtrack::Backtrack;

pub const START: (usize, usize) = (0, 0);

/// Picks one of `options` choices, returning an index in `0..options`.
/// Only ever called with `options > 0`.
pub trait Chooser {
    fn pick(&mut self, options: usize) -> usize;
}

impl<R: Rng> Chooser for R {
    fn pick(&mut self, options: usize) -> usize {
        self.random_range(0..options)
    }
}

pub struct MazeMaker<'a, C: Chooser + ?Sized> {
    pub grid: Grid,
    chooser: &'a mut C,
}

impl<'a, C: Chooser + ?Sized> MazeMaker<'a, C> {
    pub fn new(columns: usize, rows: usize, chooser: &'a mut C) -> Result<Self, GridError> {
        let grid = Grid::new(columns, rows)?;
        Ok(MazeMaker { grid, chooser })
    }

    fn pick_neighbor(&mut self, cell: (usize, usize)) -> Option<(usize, usize)> {
        let neighbors = self.grid.unvisited_neighbors(cell.0, cell.1);
        if neighbors.is_empty() {
            return None;
        }

        let i = self.chooser.pick(neighbors.len());
        Some(neighbors[i].position())
    }

    fn visit_cell(&mut self, cell: (usize, usize)) {
        self.grid.visit(cell.0, cell.1);
    }

    fn remove_wall_between(&mut self, cell_1: (usize, usize), cell_2: (usize, usize)) {
        self.grid.carve(cell_1, cell_2);
    }
}

/// Builds a `columns` x `rows` grid and carves a perfect maze into it.
pub fn generate<C: Chooser + ?Sized>(
    columns: usize,
    rows: usize,
    chooser: &mut C,
) -> Result<Grid, GridError> {
    let mut maker = MazeMaker::new(columns, rows, chooser)?;
    maker.backtrack();
    Ok(maker.grid)
}
