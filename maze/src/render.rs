use image::{Rgb, RgbImage};

use crate::grid::Grid;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const TURQUOISE: Rgb<u8> = Rgb([87, 255, 188]);
pub const CHARCOAL: Rgb<u8> = Rgb([28, 28, 28]);

pub const CELL_SIZE: u32 = 48; // Pixels per cell side.
pub const LINE_THICKNESS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgb<u8>,
    pub wall: Rgb<u8>,
    pub visited: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: WHITE,
            wall: TURQUOISE,
            visited: CHARCOAL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub cell_size: u32,
    pub line_thickness: u32,
    pub palette: Palette,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            line_thickness: LINE_THICKNESS,
            palette: Palette::default(),
        }
    }
}

/// Smallest canvas that holds the whole maze, including the half of the
/// outer walls that spills past the last cell edge.
pub fn canvas_dimensions(grid: &Grid, style: &Style) -> (u32, u32) {
    let overhang = (style.line_thickness - style.line_thickness / 2).max(1);
    let width = (grid.columns() as u32)
        .saturating_mul(style.cell_size)
        .saturating_add(overhang);
    let height = (grid.rows() as u32)
        .saturating_mul(style.cell_size)
        .saturating_add(overhang);
    (width, height)
}

/// Draws `grid` onto a `width` x `height` canvas. Visited cells are filled
/// first, then every standing wall is stroked on top, so the result doesn't
/// depend on cell order. Anything past the canvas edge is clipped.
pub fn render(grid: &Grid, style: &Style, width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, style.palette.background);
    let size = style.cell_size as i64;

    for cell in grid.cells().filter(|cell| cell.visited) {
        let x = cell.column as i64 * size;
        let y = cell.row as i64 * size;
        fill_rect(&mut image, x, y, x + size, y + size, style.palette.visited);
    }

    for cell in grid.cells() {
        let x = cell.column as i64 * size;
        let y = cell.row as i64 * size;
        let walls = grid.walls(cell.column, cell.row);
        let t = style.line_thickness as i64;
        let color = style.palette.wall;

        if walls.top {
            horizontal_line(&mut image, x, x + size, y, t, color);
        }
        if walls.right {
            vertical_line(&mut image, x + size, y, y + size, t, color);
        }
        if walls.bottom {
            horizontal_line(&mut image, x, x + size, y + size, t, color);
        }
        if walls.left {
            vertical_line(&mut image, x, y, y + size, t, color);
        }
    }

    image
}

fn horizontal_line(image: &mut RgbImage, x0: i64, x1: i64, y: i64, t: i64, color: Rgb<u8>) {
    if t == 0 {
        return;
    }
    let top = y - t / 2;
    fill_rect(image, x0, top, x1, top + t - 1, color);
}

fn vertical_line(image: &mut RgbImage, x: i64, y0: i64, y1: i64, t: i64, color: Rgb<u8>) {
    if t == 0 {
        return;
    }
    let left = x - t / 2;
    fill_rect(image, left, y0, left + t - 1, y1, color);
}

// Bounds are inclusive.
fn fill_rect(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;

    for y in y0.max(0)..=y1.min(max_y) {
        for x in x0.max(0)..=x1.min(max_x) {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}
