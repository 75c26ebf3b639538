use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// The four grid directions. Declaration order is the order in which
/// neighbors are enumerated before a random choice is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Direction {
    Right,  // +x
    Left,   // -x
    Bottom, // +y
    Top,    // -y
}

impl Direction {
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Bottom => (0, 1),
            Direction::Top => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Bottom => Direction::Top,
            Direction::Top => Direction::Bottom,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GridError {
    InvalidDimensions { columns: usize, rows: usize },
    // Only produced when loading a serialized grid.
    MismatchedLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    MisplacedCell { index: usize, column: usize, row: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { columns, rows } => write!(
                f,
                "A maze needs at least one column and one row, got {}x{}.",
                columns, rows
            ),
            GridError::MismatchedLength {
                field,
                expected,
                found,
            } => write!(
                f,
                "Grid field `{}` should hold {} entries, found {}.",
                field, expected, found
            ),
            GridError::MisplacedCell { index, column, row } => write!(
                f,
                "Cell {} claims position ({}, {}), which is not where it is stored.",
                index, column, row
            ),
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
    pub visited: bool,
}

impl Cell {
    pub fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|&&wall| wall)
            .count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Vertical,   // Between (c, r) and (c + 1, r).
    Horizontal, // Between (c, r) and (c, r + 1).
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Wall {
    orientation: Orientation,
    index: usize,
}

/// A rectangular grid of cells. Each wall between two adjacent cells is
/// stored once, so both sides always agree. The outer boundary has no
/// storage at all and can never be carved.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,      // Row-major.
    vertical: Vec<bool>,   // (columns - 1) * rows.
    horizontal: Vec<bool>, // columns * (rows - 1).
}

// Unchecked wire shape of `Grid`; every load goes through `TryFrom`.
#[derive(Deserialize)]
struct RawGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    vertical: Vec<bool>,
    horizontal: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let (columns, rows) = (raw.columns, raw.rows);
        let cell_count = checked_cell_count(columns, rows)?;

        let lengths = [
            ("cells", cell_count, raw.cells.len()),
            ("vertical", (columns - 1) * rows, raw.vertical.len()),
            ("horizontal", columns * (rows - 1), raw.horizontal.len()),
        ];
        for (field, expected, found) in lengths {
            if expected != found {
                return Err(GridError::MismatchedLength {
                    field,
                    expected,
                    found,
                });
            }
        }

        for (index, cell) in raw.cells.iter().enumerate() {
            if cell.position() != (index % columns, index / columns) {
                return Err(GridError::MisplacedCell {
                    index,
                    column: cell.column,
                    row: cell.row,
                });
            }
        }

        Ok(Grid {
            columns,
            rows,
            cells: raw.cells,
            vertical: raw.vertical,
            horizontal: raw.horizontal,
        })
    }
}

fn checked_cell_count(columns: usize, rows: usize) -> Result<usize, GridError> {
    let invalid = GridError::InvalidDimensions { columns, rows };
    if columns == 0 || rows == 0 {
        return Err(invalid);
    }
    columns.checked_mul(rows).ok_or(invalid)
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Result<Self, GridError> {
        let cell_count = checked_cell_count(columns, rows)?;

        let mut cells = Vec::with_capacity(cell_count);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell {
                    column,
                    row,
                    visited: false,
                });
            }
        }

        Ok(Self {
            columns,
            rows,
            cells,
            vertical: vec![true; (columns - 1) * rows],
            horizontal: vec![true; columns * (rows - 1)],
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cell_at(&self, column: usize, row: usize) -> &Cell {
        &self.cells[self.index_of(column, row)]
    }

    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<&Cell> {
        self.neighbor_position(cell.column, cell.row, direction)
            .map(|(column, row)| self.cell_at(column, row))
    }

    pub fn unvisited_neighbors(&self, column: usize, row: usize) -> Vec<&Cell> {
        let cell = self.cell_at(column, row);
        Direction::iter()
            .filter_map(|direction| self.neighbor(cell, direction))
            .filter(|neighbor| !neighbor.visited)
            .collect()
    }

    pub fn visit(&mut self, column: usize, row: usize) {
        let i = self.index_of(column, row);
        self.cells[i].visited = true;
    }

    /// Removes the wall shared by two grid-adjacent cells.
    pub fn carve(&mut self, from: (usize, usize), to: (usize, usize)) {
        let direction = Direction::iter()
            .find(|&direction| self.neighbor_position(from.0, from.1, direction) == Some(to));
        let Some(direction) = direction else {
            panic!(
                "cannot carve between ({}, {}) and ({}, {}): cells are not adjacent",
                from.0, from.1, to.0, to.1
            );
        };

        let wall = self
            .wall(from.0, from.1, direction)
            .expect("adjacent cells always share an interior wall");
        match wall.orientation {
            Orientation::Vertical => self.vertical[wall.index] = false,
            Orientation::Horizontal => self.horizontal[wall.index] = false,
        }
    }

    pub fn has_wall(&self, column: usize, row: usize, direction: Direction) -> bool {
        self.assert_in_bounds(column, row);
        match self.wall(column, row, direction) {
            Some(Wall {
                orientation: Orientation::Vertical,
                index,
            }) => self.vertical[index],
            Some(Wall {
                orientation: Orientation::Horizontal,
                index,
            }) => self.horizontal[index],
            None => true,
        }
    }

    pub fn walls(&self, column: usize, row: usize) -> Walls {
        Walls {
            top: self.has_wall(column, row, Direction::Top),
            right: self.has_wall(column, row, Direction::Right),
            bottom: self.has_wall(column, row, Direction::Bottom),
            left: self.has_wall(column, row, Direction::Left),
        }
    }

    /// Number of carved walls, i.e. edges of the passage graph.
    pub fn passages(&self) -> usize {
        self.vertical
            .iter()
            .chain(self.horizontal.iter())
            .filter(|&&wall| !wall)
            .count()
    }

    pub fn log(&self) -> String {
        let mut lines = Vec::with_capacity(2 * self.rows + 1);

        for row in 0..self.rows {
            let mut top = String::new();
            let mut middle = String::new();
            for column in 0..self.columns {
                let walls = self.walls(column, row);
                top.push('+');
                top.push_str(if walls.top { "--" } else { "  " });
                middle.push(if walls.left { '|' } else { ' ' });
                middle.push_str("  ");
            }
            top.push('+');
            middle.push(if self.walls(self.columns - 1, row).right {
                '|'
            } else {
                ' '
            });
            lines.push(top);
            lines.push(middle);
        }

        let mut bottom = String::new();
        for column in 0..self.columns {
            bottom.push('+');
            bottom.push_str(if self.walls(column, self.rows - 1).bottom {
                "--"
            } else {
                "  "
            });
        }
        bottom.push('+');
        lines.push(bottom);

        lines.join("\n")
    }

    fn index_of(&self, column: usize, row: usize) -> usize {
        self.assert_in_bounds(column, row);
        row * self.columns + column
    }

    fn assert_in_bounds(&self, column: usize, row: usize) {
        assert!(
            column < self.columns && row < self.rows,
            "cell ({}, {}) is outside a {}x{} grid",
            column,
            row,
            self.columns,
            self.rows
        );
    }

    fn neighbor_position(
        &self,
        column: usize,
        row: usize,
        direction: Direction,
    ) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = column.checked_add_signed(dx)?;
        let ny = row.checked_add_signed(dy)?;

        if nx < self.columns && ny < self.rows {
            Some((nx, ny))
        } else {
            None
        }
    }

    fn wall(&self, column: usize, row: usize, direction: Direction) -> Option<Wall> {
        self.neighbor_position(column, row, direction)?;

        let (orientation, index) = match direction {
            Direction::Right => (Orientation::Vertical, row * (self.columns - 1) + column),
            Direction::Left => (Orientation::Vertical, row * (self.columns - 1) + column - 1),
            Direction::Bottom => (Orientation::Horizontal, row * self.columns + column),
            Direction::Top => (Orientation::Horizontal, (row - 1) * self.columns + column),
        };

        Some(Wall { orientation, index })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_degenerate_dimensions() {
        assert_eq!(
            Grid::new(0, 5).err(),
            Some(GridError::InvalidDimensions {
                columns: 0,
                rows: 5
            })
        );
        assert_eq!(
            Grid::new(5, 0).err(),
            Some(GridError::InvalidDimensions {
                columns: 5,
                rows: 0
            })
        );
        assert!(Grid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn new_grid_has_every_wall_and_no_visited_cells() {
        let grid = Grid::new(4, 3).unwrap();

        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.passages(), 0);
        for cell in grid.cells() {
            assert!(!cell.visited);
            assert_eq!(grid.walls(cell.column, cell.row).count(), 4);
        }
        assert_eq!(grid.cell_at(3, 2).position(), (3, 2));
    }

    #[test]
    fn neighbor_stays_inside_the_grid() {
        let grid = Grid::new(3, 2).unwrap();
        let corner = *grid.cell_at(0, 0);

        assert_eq!(grid.neighbor(&corner, Direction::Left), None);
        assert_eq!(grid.neighbor(&corner, Direction::Top), None);
        assert_eq!(
            grid.neighbor(&corner, Direction::Right).map(Cell::position),
            Some((1, 0))
        );
        assert_eq!(
            grid.neighbor(&corner, Direction::Bottom).map(Cell::position),
            Some((0, 1))
        );

        let far = *grid.cell_at(2, 1);
        assert_eq!(grid.neighbor(&far, Direction::Right), None);
        assert_eq!(grid.neighbor(&far, Direction::Bottom), None);
    }

    #[test]
    fn unvisited_neighbors_follow_direction_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        let positions: Vec<_> = grid
            .unvisited_neighbors(1, 1)
            .into_iter()
            .map(Cell::position)
            .collect();
        assert_eq!(positions, vec![(2, 1), (0, 1), (1, 2), (1, 0)]);

        grid.visit(0, 1);
        let positions: Vec<_> = grid
            .unvisited_neighbors(1, 1)
            .into_iter()
            .map(Cell::position)
            .collect();
        assert_eq!(positions, vec![(2, 1), (1, 2), (1, 0)]);
    }

    #[test]
    fn carve_removes_the_wall_on_both_sides() {
        let mut grid = Grid::new(2, 2).unwrap();

        grid.carve((0, 0), (1, 0));
        assert!(!grid.walls(0, 0).right);
        assert!(!grid.walls(1, 0).left);

        grid.carve((1, 1), (1, 0));
        assert!(!grid.walls(1, 1).top);
        assert!(!grid.walls(1, 0).bottom);

        assert_eq!(grid.passages(), 2);
        assert!(grid.walls(0, 0).bottom);
        assert!(grid.walls(0, 1).top);
    }

    #[test]
    fn boundary_walls_are_always_up() {
        let grid = Grid::new(1, 1).unwrap();
        for direction in Direction::iter() {
            assert!(grid.has_wall(0, 0, direction));
        }
    }

    #[test]
    #[should_panic(expected = "not adjacent")]
    fn carve_panics_for_cells_that_are_not_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.carve((0, 0), (1, 1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn cell_at_panics_out_of_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        grid.cell_at(2, 0);
    }

    #[test]
    fn log_draws_carved_passages() {
        let mut grid = Grid::new(2, 1).unwrap();
        assert_eq!(grid.log(), "+--+--+\n|  |  |\n+--+--+");

        grid.carve((0, 0), (1, 0));
        assert_eq!(grid.log(), "+--+--+\n|     |\n+--+--+");
        assert_eq!(format!("{}", grid), grid.log());
    }

    #[test]
    fn opposite_directions_undo_each_other() {
        for direction in Direction::iter() {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn serialized_grid_loads_back_unchanged() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.visit(0, 0);
        grid.visit(1, 0);
        grid.carve((0, 0), (1, 0));

        let json = serde_json::to_string(&grid).unwrap();
        let loaded: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, grid);
        assert!(!loaded.walls(1, 0).left);
        assert_eq!(loaded.log(), grid.log());
    }

    #[test]
    fn loading_rejects_zero_dimensions() {
        let json = r#"{"columns":0,"rows":0,"cells":[],"vertical":[],"horizontal":[]}"#;
        let error = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(error.to_string().contains("at least one column"), "{}", error);
    }

    #[test]
    fn loading_rejects_wall_stores_of_the_wrong_length() {
        let json = r#"{"columns":3,"rows":3,"cells":[],"vertical":[],"horizontal":[]}"#;
        let error = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(error.to_string().contains("`cells`"), "{}", error);

        let mut value = serde_json::to_value(Grid::new(3, 3).unwrap()).unwrap();
        value["vertical"] = serde_json::json!([true]);
        let error = serde_json::from_value::<Grid>(value).unwrap_err();
        assert!(error.to_string().contains("`vertical`"), "{}", error);
    }

    #[test]
    fn loading_rejects_cells_out_of_place() {
        let mut value = serde_json::to_value(Grid::new(2, 2).unwrap()).unwrap();
        value["cells"][0]["column"] = serde_json::json!(1);
        let error = serde_json::from_value::<Grid>(value).unwrap_err();
        assert!(error.to_string().contains("Cell 0"), "{}", error);
    }
}
