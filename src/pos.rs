use crate::game::Dir;

/// A cell on the square play grid. Signed so a step past the edge is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self, grid_size: u16) -> bool {
        let n = i32::from(grid_size);
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_one_cell() {
        let p = Pos::new(3, 3);
        assert_eq!(p.step(Dir::Up), Pos::new(3, 2));
        assert_eq!(p.step(Dir::Down), Pos::new(3, 4));
        assert_eq!(p.step(Dir::Left), Pos::new(2, 3));
        assert_eq!(p.step(Dir::Right), Pos::new(4, 3));
    }

    #[test]
    fn bounds_are_half_open() {
        assert!(Pos::new(0, 0).in_bounds(20));
        assert!(Pos::new(19, 19).in_bounds(20));
        assert!(!Pos::new(20, 5).in_bounds(20));
        assert!(!Pos::new(5, -1).in_bounds(20));
    }
}
