use crate::game::{Dir, GameState, Snapshot};
use crate::grade::Grade;
use crate::layout::{Layout, Rect};
use crate::screen::Screen;

type Rgb = (u8, u8, u8);

const BACKGROUND: Rgb = (15, 15, 25);
const BOARD: Rgb = (26, 26, 46);
const BORDER: Rgb = (116, 97, 238);
const HEAD: Rgb = (78, 205, 196);
const BODY: Rgb = (69, 183, 209);
const APPLE: Rgb = (255, 107, 107);
const STEM: Rgb = (39, 174, 96);
const GOLD: Rgb = (255, 215, 0);
const TEXT: Rgb = (235, 235, 235);
const MUTED: Rgb = (204, 204, 204);

/// RGBA8 frame buffer with clipped drawing primitives.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { frame, width, height }
    }

    pub fn clear(&mut self, (r, g, b): Rgb) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn blend(&mut self, x: u32, y: u32, (r, g, b): Rgb, a: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let Some(px) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = u16::from(a);
        let ia = 255 - a;
        px[0] = ((u16::from(r) * a + u16::from(px[0]) * ia) / 255) as u8;
        px[1] = ((u16::from(g) * a + u16::from(px[1]) * ia) / 255) as u8;
        px[2] = ((u16::from(b) * a + u16::from(px[2]) * ia) / 255) as u8;
        px[3] = 255;
    }

    pub fn fill(&mut self, rect: Rect, color: Rgb, a: u8) {
        let x2 = (rect.x + rect.w).min(self.width);
        let y2 = (rect.y + rect.h).min(self.height);
        for py in rect.y..y2 {
            for px in rect.x..x2 {
                self.blend(px, py, color, a);
            }
        }
    }

    pub fn stroke(&mut self, rect: Rect, color: Rgb, a: u8) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let x2 = rect.x + rect.w - 1;
        let y2 = rect.y + rect.h - 1;
        for px in rect.x..=x2 {
            self.blend(px, rect.y, color, a);
            self.blend(px, y2, color, a);
        }
        for py in rect.y + 1..y2 {
            self.blend(rect.x, py, color, a);
            self.blend(x2, py, color, a);
        }
    }

    pub fn text(&mut self, text: &str, x: u32, y: u32, scale: u32, color: Rgb) {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = glyph_5x7(ch) {
                for (ry, row) in rows.iter().enumerate() {
                    for rx in 0..5u32 {
                        if (row >> (4 - rx)) & 1 == 1 {
                            let rect = Rect::new(cx + rx * scale, y + ry as u32 * scale, scale, scale);
                            self.fill(rect, color, 255);
                        }
                    }
                }
            }
            cx += 6 * scale;
        }
    }

    fn text_centered(&mut self, text: &str, center_x: u32, y: u32, scale: u32, color: Rgb) {
        let x = center_x.saturating_sub(text_width(text, scale) / 2);
        self.text(text, x, y, scale, color);
    }
}

pub fn text_width(text: &str, scale: u32) -> u32 {
    (text.chars().count() as u32 * 6 * scale).saturating_sub(scale)
}

/// Greedy word wrap to at most `max_chars` per line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn grade_colors(grade: Grade) -> (Rgb, Rgb) {
    let dark = (51, 51, 51);
    let light = (255, 255, 255);
    match grade {
        Grade::SPlus => ((255, 215, 0), dark),
        Grade::S => ((192, 192, 192), dark),
        Grade::A => ((205, 127, 50), light),
        Grade::B => ((78, 205, 196), light),
        Grade::C => ((149, 165, 166), light),
        Grade::D => ((231, 76, 60), light),
    }
}

/// Paints the whole window. Same screen in, same pixels out.
pub fn draw_screen(frame: &mut [u8], layout: &Layout, screen: &Screen) {
    let mut canvas = Canvas::new(frame, layout.width, layout.height);
    canvas.clear(BACKGROUND);
    draw_header(&mut canvas, layout, screen);
    if let Some(snapshot) = screen.snapshot() {
        draw_board(&mut canvas, layout, snapshot);
    }
    if let (GameState::GameOver, Some(report)) = (screen.state(), screen.report()) {
        draw_game_over(&mut canvas, layout, report.score, report.grade, report.message);
    }
    if let Some(label) = screen.button_label() {
        draw_button(&mut canvas, layout.button, label);
    }
    for (dir, rect) in layout.pad {
        draw_pad_button(&mut canvas, rect, dir);
    }
}

fn draw_header(canvas: &mut Canvas<'_>, layout: &Layout, screen: &Screen) {
    let h = layout.header;
    let y = h.y + (h.h - 14) / 2;
    canvas.text(&format!("SCORE: {}", screen.score()), h.x, y, 2, TEXT);
    let best = format!("BEST: {}", screen.high_score());
    let x = (h.x + h.w).saturating_sub(text_width(&best, 2));
    canvas.text(&best, x, y, 2, GOLD);
}

fn draw_board(canvas: &mut Canvas<'_>, layout: &Layout, snapshot: &Snapshot) {
    let board = layout.canvas;
    let cell = layout.cell;
    canvas.fill(board, BOARD, 255);
    for ring in 1..=2 {
        canvas.stroke(
            Rect::new(board.x - ring, board.y - ring, board.w + ring * 2, board.h + ring * 2),
            BORDER,
            255,
        );
    }

    // Faint grid lines; the last ones sit on the board's far edge.
    for i in 0..=u32::from(snapshot.grid_size) {
        let offset = (i * cell).min(board.w - 1);
        canvas.fill(Rect::new(board.x + offset, board.y, 1, board.h), (255, 255, 255), 26);
        canvas.fill(Rect::new(board.x, board.y + offset, board.w, 1), (255, 255, 255), 26);
    }

    if let Some(food) = snapshot.food {
        let (x, y) = layout.cell_origin(food.x, food.y);
        canvas.fill(Rect::new(x + 2, y + 2, cell - 4, cell - 4), APPLE, 255);
        canvas.fill(Rect::new(x + cell / 2 - 1, y + 1, 2, 4), STEM, 255);
    }

    for (i, seg) in snapshot.snake.iter().enumerate().skip(1) {
        let (x, y) = layout.cell_origin(seg.x, seg.y);
        let opacity = (1.0 - i as f32 * 0.03).max(0.6);
        canvas.fill(Rect::new(x + 2, y + 2, cell - 4, cell - 4), BODY, (opacity * 255.0) as u8);
    }

    if let Some(head) = snapshot.snake.first() {
        let (x, y) = layout.cell_origin(head.x, head.y);
        canvas.fill(Rect::new(x + 1, y + 1, cell - 2, cell - 2), HEAD, 255);
        draw_eyes(canvas, x, y, cell, snapshot.heading);
    }
}

fn draw_eyes(canvas: &mut Canvas<'_>, x: u32, y: u32, cell: u32, heading: Dir) {
    let eye = (cell / 5).clamp(1, 3);
    let near = cell / 4;
    let far = cell.saturating_sub(near + eye).max(near);
    let eyes = match heading {
        Dir::Right => [(far, near), (far, far)],
        Dir::Left => [(near, near), (near, far)],
        Dir::Up => [(near, near), (far, near)],
        Dir::Down => [(near, far), (far, far)],
    };
    for (ex, ey) in eyes {
        canvas.fill(Rect::new(x + ex, y + ey, eye, eye), (255, 255, 255), 255);
        if eye == 3 {
            canvas.fill(Rect::new(x + ex + 1, y + ey + 1, 1, 1), (0, 0, 0), 255);
        }
    }
}

fn draw_game_over(canvas: &mut Canvas<'_>, layout: &Layout, score: u32, grade: Grade, message: &str) {
    let board = layout.canvas;
    canvas.fill(board, (0, 0, 0), 230);
    let cx = board.x + board.w / 2;
    // Small boards clip the banner at the top edge instead of above it.
    let mut y = (board.y + board.h / 2).saturating_sub(70).max(board.y);

    canvas.text_centered("GAME OVER!", cx, y, 3, APPLE);
    y += 36;
    canvas.text_centered(&format!("SCORE: {score}"), cx, y, 2, HEAD);
    y += 28;

    let (pill, ink) = grade_colors(grade);
    let label = grade.label();
    let pill_w = text_width(label, 2) + 32;
    canvas.fill(Rect::new(cx.saturating_sub(pill_w / 2), y, pill_w, 24), pill, 255);
    canvas.text_centered(label, cx, y + 5, 2, ink);
    y += 36;

    let max_chars = (board.w.saturating_sub(16) / 6).max(1) as usize;
    for line in wrap(message, max_chars) {
        canvas.text_centered(&line, cx, y, 1, MUTED);
        y += 12;
    }
}

fn draw_button(canvas: &mut Canvas<'_>, rect: Rect, label: &str) {
    canvas.fill(rect, BORDER, 200);
    canvas.stroke(rect, (255, 255, 255), 80);
    canvas.text_centered(label, rect.x + rect.w / 2, rect.y + (rect.h - 14) / 2, 2, TEXT);
}

fn draw_pad_button(canvas: &mut Canvas<'_>, rect: Rect, dir: Dir) {
    canvas.fill(rect, (255, 255, 255), 26);
    canvas.stroke(rect, (255, 255, 255), 77);

    // Arrowhead: a triangle of `size` rows pointing in `dir`.
    let size = rect.w.min(rect.h) / 3;
    let cx = rect.x + rect.w / 2;
    let cy = rect.y + rect.h / 2;
    for i in 0..size {
        let half = i;
        let along = cy - size / 2 + i;
        let across = cx - size / 2 + i;
        match dir {
            Dir::Up => canvas.fill(Rect::new(cx - half, along, half * 2 + 1, 1), TEXT, 255),
            Dir::Down => canvas.fill(Rect::new(cx - half, cy + size / 2 - i, half * 2 + 1, 1), TEXT, 255),
            Dir::Left => canvas.fill(Rect::new(across, cy - half, 1, half * 2 + 1), TEXT, 255),
            Dir::Right => canvas.fill(Rect::new(cx + size / 2 - i, cy - half, 1, half * 2 + 1), TEXT, 255),
        }
    }
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    Some(match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        ' ' => [0; 7],
        _ => return None,
    })
}
