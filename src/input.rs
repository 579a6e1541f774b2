use crate::game::Dir;
use winit::event::VirtualKeyCode;

pub const KEY_BINDINGS: [(VirtualKeyCode, Dir); 8] = [
    (VirtualKeyCode::Up, Dir::Up),
    (VirtualKeyCode::W, Dir::Up),
    (VirtualKeyCode::Down, Dir::Down),
    (VirtualKeyCode::S, Dir::Down),
    (VirtualKeyCode::Left, Dir::Left),
    (VirtualKeyCode::A, Dir::Left),
    (VirtualKeyCode::Right, Dir::Right),
    (VirtualKeyCode::D, Dir::Right),
];

/// Minimum travel, in pixels, before a drag counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Direction of a drag along its dominant axis, if it travelled far enough.
pub fn swipe_dir(dx: f32, dy: f32) -> Option<Dir> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        Some(if dx > 0.0 { Dir::Right } else { Dir::Left })
    } else {
        if dy.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        Some(if dy > 0.0 { Dir::Down } else { Dir::Up })
    }
}

/// Tracks one touch or mouse drag from press to release.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    pub fn end(&mut self, x: f32, y: f32) -> Option<Dir> {
        let (ox, oy) = self.origin.take()?;
        swipe_dir(x - ox, y - oy)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }
}
