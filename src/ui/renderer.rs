/// Terminal renderer for the host screen and the overlay.
///
/// Each frame is composed in two layers into `next`:
///   1. the host screen, always
///   2. if an overlay is mounted: the host layer is dimmed, then the
///      overlay panel is drawn over it
///
/// `next` is then diffed against `shown` (what the terminal displays).
/// Changed cells are written in horizontal runs: one cursor move per run,
/// colour changes only where they differ from the current pen.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::{Position, GRID_SIZE};
use crate::domain::rules::{REWARD_CODE, REWARD_DISCOUNT_PERCENT, WIN_SCORE};
use crate::host::Host;
use crate::sim::world::GameState;
use crate::ui::overlay::Overlay;

// ── Cell ──

/// One terminal column. Every glyph drawn is single-width.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Background for empty cells and for `Clear`. `Color::Reset` is mapped
    /// to it so that cleared rows and blank cells look the same.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { Self::BASE_BG } else { bg };
        Cell { ch, fg, bg }
    }
}

// ── Frame: one composed screen ──

struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    fn new(w: usize, h: usize) -> Self {
        Frame { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    /// Returns true if the size changed (contents are then blank).
    fn resize(&mut self, w: usize, h: usize) -> bool {
        if self.width == w && self.height == h {
            return false;
        }
        *self = Frame::new(w, h);
        true
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Clipped at the right edge.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.set(cx, y, Cell::new(ch, fg, bg));
        }
    }

    /// Centre `s` in the span `x0..x0 + w`.
    fn put_centered(&mut self, x0: usize, w: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        self.put_str(x0 + w.saturating_sub(len) / 2, y, s, fg, bg);
    }

    fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, bg: Color) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.set(x, y, Cell::new(' ', Color::White, bg));
            }
        }
    }

    /// Modal backdrop: keep glyphs, flatten colours.
    fn dim_all(&mut self) {
        for cell in &mut self.cells {
            cell.fg = Color::Rgb { r: 70, g: 70, b: 80 };
            cell.bg = Color::Rgb { r: 10, g: 10, b: 16 };
        }
    }
}

// ── Layout ──

/// Each game cell = 2 terminal columns.
const CELL_W: usize = 2;

const BOARD_COLS: usize = GRID_SIZE as usize * CELL_W;
const BOARD_ROWS: usize = GRID_SIZE as usize;

/// Overlay panel: 2-col padding + border on each side of the board,
/// header (title, score), board with border, 7 rows of result panel.
const PANEL_W: usize = BOARD_COLS + 6;
const PANEL_H: usize = 1 + 2 + 1 + BOARD_ROWS + 1 + 7;

const PANEL_BG: Color = Color::Rgb { r: 245, g: 245, b: 248 };
const BOARD_BG: Color = Color::Rgb { r: 228, g: 230, b: 235 };
const INK: Color = Color::Rgb { r: 30, g: 30, b: 40 };
const MUTED: Color = Color::Rgb { r: 110, g: 110, b: 120 };
const SNAKE_C: Color = Color::Rgb { r: 37, g: 99, b: 235 };
const FOOD_C: Color = Color::Rgb { r: 239, g: 68, b: 68 };
const OK_C: Color = Color::Rgb { r: 22, g: 163, b: 74 };

/// Top-left corner of the overlay panel, centred in the terminal.
fn panel_origin(term_w: usize, term_h: usize) -> (usize, usize) {
    (term_w.saturating_sub(PANEL_W) / 2, term_h.saturating_sub(PANEL_H) / 2)
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    next: Frame,
    shown: Frame,
    /// `shown` no longer matches the terminal; repaint every cell.
    stale: bool,
    last_mounted: Option<bool>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            next: Frame::new(0, 0),
            shown: Frame::new(0, 0),
            stale: true,
            last_mounted: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        self.stale = true;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, host: &Host) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        let (tw, th) = (tw as usize, th as usize);
        let resized = self.next.resize(tw, th) | self.shown.resize(tw, th);

        // Mounting or unmounting changes nearly every cell anyway.
        let mounted = host.overlay.is_some();
        if resized || self.last_mounted != Some(mounted) {
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.stale = true;
            self.last_mounted = Some(mounted);
        }

        self.compose(host);
        self.flush_runs()?;
        std::mem::swap(&mut self.next, &mut self.shown);
        Ok(())
    }

    fn compose(&mut self, host: &Host) {
        self.next.clear();
        self.compose_host(host);
        if let Some(overlay) = &host.overlay {
            self.next.dim_all();
            self.compose_overlay(overlay);
        }
    }

    fn changed(&self, x: usize, y: usize) -> bool {
        self.stale || self.next.get(x, y) != self.shown.get(x, y)
    }

    // ── Output ──

    fn flush_runs(&mut self) -> io::Result<()> {
        let mut pen = (Color::White, Cell::BASE_BG);
        queue!(self.writer, SetForegroundColor(pen.0), SetBackgroundColor(pen.1))?;
        let mut text = String::with_capacity(self.next.width);

        for y in 0..self.next.height {
            let mut x = 0;
            while x < self.next.width {
                if !self.changed(x, y) {
                    x += 1;
                    continue;
                }
                queue!(self.writer, MoveTo(x as u16, y as u16))?;
                while x < self.next.width && self.changed(x, y) {
                    let cell = self.next.get(x, y);
                    if (cell.fg, cell.bg) != pen {
                        print_pending(&mut self.writer, &mut text)?;
                        if cell.fg != pen.0 {
                            queue!(self.writer, SetForegroundColor(cell.fg))?;
                        }
                        if cell.bg != pen.1 {
                            queue!(self.writer, SetBackgroundColor(cell.bg))?;
                        }
                        pen = (cell.fg, cell.bg);
                    }
                    text.push(cell.ch);
                    x += 1;
                }
                print_pending(&mut self.writer, &mut text)?;
            }
        }

        self.stale = false;
        self.writer.flush()
    }

    // ── Host screen ──

    fn compose_host(&mut self, host: &Host) {
        let w = self.next.width;
        let h = self.next.height;
        let accent = Color::Rgb { r: 120, g: 170, b: 255 };
        let text = Color::Rgb { r: 200, g: 210, b: 230 };
        let faint = Color::Rgb { r: 90, g: 100, b: 130 };

        let top = h.saturating_sub(12) / 2;
        self.next.put_centered(0, w, top, "A Z U R A C O D E", accent, Color::Reset);
        self.next.put_centered(0, w, top + 2, "Websites that work as hard as you do.", text, Color::Reset);
        self.next.put_centered(0, w, top + 3, "Design · Development · Hosting", faint, Color::Reset);

        let footer = h.saturating_sub(4);
        self.next.put_centered(0, w, footer, "© 2024 AzuraCode. All rights reserved.", faint, Color::Reset);

        // The trigger: one unlabeled, barely visible glyph under the footer.
        let gx = w / 2;
        let trigger = Color::Rgb { r: 34, g: 34, b: 50 };
        self.next.set(gx, footer + 1, Cell::new('◆', trigger, Color::Reset));

        self.next.put_str(1, h.saturating_sub(1), "q: quit", faint, Color::Reset);
        if host.openings > 0 {
            let again = "welcome back";
            self.next.put_str(w.saturating_sub(again.len() + 1), h.saturating_sub(1), again, trigger, Color::Reset);
        }
    }

    // ── Overlay ──

    fn compose_overlay(&mut self, overlay: &Overlay) {
        let session = overlay.session();
        let (px, py) = panel_origin(self.next.width, self.next.height);

        self.next.fill_rect(px, py, PANEL_W, PANEL_H, PANEL_BG);

        // Header: title + close hint, then score
        self.next.put_str(px + 2, py + 1, "Snake Game", INK, PANEL_BG);
        self.next.put_str(px + PANEL_W - 9, py + 1, "✕  Esc", MUTED, PANEL_BG);
        let score = format!("Score: {}/{}", session.score, WIN_SCORE);
        self.next.put_centered(px, PANEL_W, py + 2, &score, INK, PANEL_BG);

        // Board with a light border
        let bx = px + 3;
        let by = py + 4;
        let border = Color::Rgb { r: 200, g: 200, b: 208 };
        self.next.fill_rect(bx - 1, by - 1, BOARD_COLS + 2, BOARD_ROWS + 2, border);
        self.next.fill_rect(bx, by, BOARD_COLS, BOARD_ROWS, BOARD_BG);

        let food = session.food.pos;
        self.put_game_cell(bx, by, food, '●', FOOD_C);
        for (i, seg) in session.snake.segments().enumerate() {
            let ch = if i == 0 { '■' } else { '▪' };
            self.put_game_cell(bx, by, seg, ch, SNAKE_C);
        }

        let ry = by + BOARD_ROWS + 2;
        match session.state {
            GameState::Running => {
                self.next.put_centered(px, PANEL_W, ry, "←↑↓→ / WASD to steer", MUTED, PANEL_BG);
            }
            GameState::Over => self.compose_game_over(px, ry, session.score),
            GameState::Won => self.compose_reward(px, ry, session.score),
        }
    }

    fn put_game_cell(&mut self, bx: usize, by: usize, pos: Position, ch: char, fg: Color) {
        if !pos.in_bounds() { return; }
        let col = bx + pos.x as usize * CELL_W;
        let row = by + pos.y as usize;
        self.next.set(col, row, Cell::new(ch, fg, BOARD_BG));
        self.next.set(col + 1, row, Cell::new(ch, fg, BOARD_BG));
    }

    fn compose_game_over(&mut self, px: usize, ry: usize, score: u32) {
        self.next.put_centered(px, PANEL_W, ry, "Game Over!", FOOD_C, PANEL_BG);
        self.next.put_centered(px, PANEL_W, ry + 1, &format!("Final score: {score}/{WIN_SCORE}"), INK, PANEL_BG);
        let hint = format!("Reach {WIN_SCORE} points to unlock a reward!");
        self.next.put_centered(px, PANEL_W, ry + 2, &hint, MUTED, PANEL_BG);
        self.compose_button(px, ry + 4, "Replay");
    }

    fn compose_reward(&mut self, px: usize, ry: usize, score: u32) {
        self.next.put_centered(px, PANEL_W, ry, "Congratulations!", OK_C, PANEL_BG);
        self.next.put_centered(px, PANEL_W, ry + 1, &format!("Perfect score: {score}/{WIN_SCORE}"), INK, PANEL_BG);
        let code = format!("Your promo code: {REWARD_CODE}");
        self.next.put_centered(px, PANEL_W, ry + 2, &code, SNAKE_C, PANEL_BG);
        let use_it = format!("Use it on the contact form for {REWARD_DISCOUNT_PERCENT}% off!");
        self.next.put_centered(px, PANEL_W, ry + 3, &use_it, MUTED, PANEL_BG);
        self.compose_button(px, ry + 4, "Close");
    }

    fn compose_button(&mut self, px: usize, y: usize, label: &str) {
        let text = format!("  {label}  [Enter]  ");
        self.next.put_centered(px, PANEL_W, y, &text, Color::White, SNAKE_C);
    }
}

fn print_pending(writer: &mut impl Write, text: &mut String) -> io::Result<()> {
    if !text.is_empty() {
        queue!(writer, Print(text.as_str()))?;
        text.clear();
    }
    Ok(())
}
