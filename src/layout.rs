//! Window-space placement of the header, play canvas, buttons and direction pad.

use crate::game::Dir;

const MARGIN: u32 = 16;
const HEADER_H: u32 = 28;
const BUTTON_W: u32 = 120;
const BUTTON_H: u32 = 28;
const PAD_CELL: u32 = 40;
const PAD_GAP: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w && py < self.y + self.h
    }
}

#[derive(Clone, Debug)]
pub struct Layout {
    pub cell: u32,
    pub width: u32,
    pub height: u32,
    pub header: Rect,
    pub canvas: Rect,
    /// Start in `Idle`, reset after a game over; never both.
    pub button: Rect,
    pub pad: [(Dir, Rect); 4],
}

impl Layout {
    pub fn new(grid_size: u16, cell: u32) -> Self {
        let side = u32::from(grid_size) * cell;
        let pad_side = PAD_CELL * 3 + PAD_GAP * 2;
        let width = side.max(pad_side) + MARGIN * 2;

        let header = Rect::new(MARGIN, MARGIN, width - MARGIN * 2, HEADER_H);
        let canvas = Rect::new((width - side) / 2, header.y + HEADER_H + 4, side, side);
        let button = Rect::new(
            (width - BUTTON_W) / 2,
            canvas.y + side + MARGIN,
            BUTTON_W,
            BUTTON_H,
        );

        let pad_x = (width - pad_side) / 2;
        let pad_y = button.y + BUTTON_H + MARGIN;
        let step = PAD_CELL + PAD_GAP;
        let at = |col: u32, row: u32| Rect::new(pad_x + col * step, pad_y + row * step, PAD_CELL, PAD_CELL);
        let pad = [
            (Dir::Up, at(1, 0)),
            (Dir::Left, at(0, 1)),
            (Dir::Right, at(2, 1)),
            (Dir::Down, at(1, 2)),
        ];

        Self {
            cell,
            width,
            height: pad_y + pad_side + MARGIN,
            header,
            canvas,
            button,
            pad,
        }
    }

    pub fn pad_hit(&self, px: u32, py: u32) -> Option<Dir> {
        self.pad
            .iter()
            .find(|(_, rect)| rect.contains(px, py))
            .map(|&(dir, _)| dir)
    }

    /// Top-left pixel of a grid cell.
    pub fn cell_origin(&self, x: i32, y: i32) -> (u32, u32) {
        (
            self.canvas.x + x as u32 * self.cell,
            self.canvas.y + y as u32 * self.cell,
        )
    }
}
