//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: status line, last call, previous calls, the two
//! cards side by side (human left, computer right), then the message lines
//! and a key help line.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    column_letter, Cell, Player, SessionState, Winner, CARD_SIZE, COLUMN_LETTERS, HISTORY_WINDOW,
    MAX_NUMBER,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Narrowest cell that fits `FREE` plus the cursor brackets.
pub const MIN_CELL_WIDTH: u16 = 6;

const CARD_GAP: u16 = 4;
/// Border, letter header, five rows, border.
const CARD_FRAME_H: u16 = CARD_SIZE as u16 + 3;

const ROW_STATUS: u16 = 0;
const ROW_LAST_CALL: u16 = 1;
const ROW_PREVIOUS: u16 = 2;
const ROW_CARD_LABELS: u16 = 4;
const ROW_CARDS: u16 = 5;
const ROW_MESSAGE: u16 = ROW_CARDS + CARD_FRAME_H + 1;
const ROW_DETAIL: u16 = ROW_MESSAGE + 1;
const ROW_HELP: u16 = ROW_DETAIL + 1;
const LAYOUT_H: u16 = ROW_HELP + 1;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const CARD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const ACCENT: Rgb = Rgb::new(240, 220, 80);

const HELP: &str = "n new  p pause  arrows move  enter mark  b BINGO  q quit";

/// A lightweight terminal renderer for a Bingo session.
pub struct GameView {
    /// Card cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: MIN_CELL_WIDTH,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(MIN_CELL_WIDTH),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn card_frame_w(&self) -> u16 {
        CARD_SIZE as u16 * self.cell_w + 2
    }

    /// Width and height of the full layout.
    pub fn layout_size(&self) -> (u16, u16) {
        (self.card_frame_w() * 2 + CARD_GAP, LAYOUT_H)
    }

    fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.layout_size();
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    fn card_origin(&self, viewport: Viewport, player: Player) -> (u16, u16) {
        let (x, y) = self.origin(viewport);
        let x = match player {
            Player::Human => x,
            Player::Opponent => x + self.card_frame_w() + CARD_GAP,
        };
        (x, y + ROW_CARDS)
    }

    /// Top-left terminal position of a card cell.
    pub fn cell_origin(
        &self,
        viewport: Viewport,
        player: Player,
        col: usize,
        row: usize,
    ) -> (u16, u16) {
        let (x, y) = self.card_origin(viewport, player);
        (x + 1 + col as u16 * self.cell_w, y + 2 + row as u16)
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_cursor(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], with a cursor `(col, row)` drawn on the
    /// human card.
    pub fn render_into_with_cursor(
        &self,
        snap: &GameSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let (x, y) = self.origin(viewport);

        self.draw_status(fb, snap, x, y + ROW_STATUS);
        self.draw_last_call(fb, snap, x, y + ROW_LAST_CALL);
        self.draw_previous(fb, snap, x, y + ROW_PREVIOUS);

        let label = CellStyle::new(TEXT, BLACK).bold();
        let labels = [(Player::Human, "YOUR CARD"), (Player::Opponent, "COMPUTER'S CARD")];
        for (player, text) in labels {
            let (cx, _) = self.card_origin(viewport, player);
            fb.put_str(cx, y + ROW_CARD_LABELS, text, label);
            let card_cursor = match player {
                Player::Human => cursor,
                Player::Opponent => None,
            };
            self.draw_card(fb, snap, player, card_cursor, viewport);
        }

        self.draw_messages(fb, snap, x, y);

        let help = CellStyle::new(TEXT, BLACK).dim();
        fb.put_str(x, y + ROW_HELP, HELP, help);

        if snap.state == SessionState::Paused {
            let (w, _) = self.layout_size();
            self.draw_overlay_text(fb, x, y + ROW_CARDS, w, CARD_FRAME_H, "  PAUSED  ");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_cursor(
        &self,
        snap: &GameSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_cursor(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let title = CellStyle::new(ACCENT, BLACK).bold();
        let value = CellStyle::new(TEXT, BLACK);
        fb.put_str(x, y, "B I N G O", title);

        let mut cx = fb.put_str(x + 12, y, "CALLED ", value);
        cx = fb.put_u32(cx, y, snap.called.len() as u32, value);
        cx = fb.put_str(cx, y, "/", value);
        fb.put_u32(cx, y, MAX_NUMBER as u32, value);

        let status = match snap.state {
            SessionState::Idle => "READY",
            SessionState::Playing => "PLAYING",
            SessionState::Paused => "PAUSED",
            SessionState::Over => "GAME OVER",
        };
        let (w, _) = self.layout_size();
        let sx = x + w.saturating_sub(status.len() as u16);
        fb.put_str(sx, y, status, value.bold());
    }

    fn draw_last_call(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::new(TEXT, BLACK).bold();
        let cx = fb.put_str(x, y, "LAST CALL  ", label);
        match snap.last_called() {
            Some(n) => {
                let call = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(30, 60, 140)).bold();
                put_call(fb, cx, y, n, call);
            }
            None => {
                fb.put_char(cx, y, '-', CellStyle::new(TEXT, BLACK));
            }
        }
    }

    fn draw_previous(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::new(TEXT, BLACK).dim();
        let value = CellStyle::new(TEXT, BLACK);
        let mut cx = fb.put_str(x, y, "PREVIOUS   ", label);
        for n in snap.previous_calls().take(HISTORY_WINDOW) {
            cx = put_call(fb, cx, y, n, value);
            cx = cx.saturating_add(1);
        }
    }

    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        player: Player,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
    ) {
        let (x, y) = self.card_origin(viewport, player);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        self.draw_border(fb, x, y, self.card_frame_w(), CARD_FRAME_H, border);

        let header = CellStyle::new(ACCENT, CARD_BG).bold();
        for (col, letter) in COLUMN_LETTERS.iter().enumerate() {
            let px = x + 1 + col as u16 * self.cell_w;
            fb.fill_rect(px, y + 1, self.cell_w, 1, ' ', header);
            fb.put_char(px + self.cell_w / 2, y + 1, *letter, header);
        }

        let card = snap.card(player);
        let winning = winning_cells(snap, player);

        for col in 0..CARD_SIZE {
            for row in 0..CARD_SIZE {
                let (px, py) = self.cell_origin(viewport, player, col, row);
                let Some(card) = card else {
                    fb.fill_rect(px, py, self.cell_w, 1, ' ', CellStyle::new(TEXT, CARD_BG));
                    continue;
                };

                let cell = card.cell(col, row);
                let is_winning = winning.is_some_and(|cells| cells.contains(&(col, row)));
                let style = cell_style(snap, player, cell, is_winning);
                self.draw_cell(fb, px, py, cell, style);

                if cursor == Some((col, row)) {
                    let bracket = CellStyle {
                        fg: ACCENT,
                        ..style
                    }
                    .bold();
                    fb.put_char(px, py, '[', bracket);
                    fb.put_char(px + self.cell_w - 1, py, ']', bracket);
                }
            }
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, px: u16, py: u16, cell: Cell, style: CellStyle) {
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        match cell {
            Cell::Free => {
                let start = px + (self.cell_w - 4) / 2;
                fb.put_str(start, py, "FREE", style);
            }
            Cell::Number(n) => {
                let digits = if n >= 10 { 2 } else { 1 };
                let start = px + (self.cell_w - digits) / 2;
                fb.put_u32(start, py, n as u32, style);
            }
        }
    }

    fn draw_messages(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let headline = CellStyle::new(ACCENT, BLACK).bold();
        let detail = CellStyle::new(TEXT, BLACK);

        if let Some(outcome) = snap.outcome {
            let cx = fb.put_str(x, y + ROW_MESSAGE, "Game Over! ", headline);
            fb.put_str(cx, y + ROW_MESSAGE, outcome.winner.message(), headline);
            match outcome.pattern {
                Some(pattern) if outcome.winner != Winner::Draw => {
                    let cx = fb.put_str(x, y + ROW_DETAIL, "Winning Pattern: ", detail);
                    fb.put_str(cx, y + ROW_DETAIL, &pattern.to_string(), detail.bold());
                }
                _ => {
                    fb.put_str(x, y + ROW_DETAIL, &outcome.description(), detail);
                }
            }
            return;
        }

        match snap.state {
            SessionState::Idle => {
                fb.put_str(x, y + ROW_MESSAGE, "Press n to start a new game", detail);
            }
            _ if snap.false_claim => {
                let warn = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(160, 40, 40)).bold();
                fb.put_str(x, y + ROW_MESSAGE, " Not a BINGO yet! ", warn);
            }
            _ if snap.claim_eligible => {
                let cx = fb.put_str(x, y + ROW_MESSAGE, "BINGO!", headline);
                fb.put_str(cx, y + ROW_MESSAGE, " Press b to claim it", detail);
            }
            _ => {}
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Write a call as `B-7`. Returns the next column.
fn put_call(fb: &mut FrameBuffer, x: u16, y: u16, n: u8, style: CellStyle) -> u16 {
    fb.put_char(x, y, column_letter(Cell::Number(n)), style);
    fb.put_char(x + 1, y, '-', style);
    fb.put_u32(x + 2, y, n as u32, style)
}

fn winning_cells(snap: &GameSnapshot, player: Player) -> Option<[(usize, usize); CARD_SIZE]> {
    let outcome = snap.outcome?;
    let owner = match player {
        Player::Human => Winner::Human,
        Player::Opponent => Winner::Opponent,
    };
    if outcome.winner != owner {
        return None;
    }
    outcome.pattern.map(|pattern| pattern.cells())
}

fn cell_style(snap: &GameSnapshot, player: Player, cell: Cell, winning: bool) -> CellStyle {
    let white = Rgb::new(255, 255, 255);
    if winning {
        return CellStyle::new(BLACK, Rgb::new(240, 200, 60)).bold();
    }
    match cell {
        Cell::Free => CellStyle::new(white, Rgb::new(30, 100, 50)),
        Cell::Number(n) => {
            if snap.is_marked(player, cell) {
                match player {
                    Player::Human => CellStyle::new(white, Rgb::new(40, 120, 60)).bold(),
                    Player::Opponent => CellStyle::new(white, Rgb::new(140, 60, 60)),
                }
            } else if player == Player::Human && snap.is_markable(n) {
                CellStyle::new(ACCENT, CARD_BG).bold()
            } else {
                CellStyle::new(TEXT, CARD_BG)
            }
        }
    }
}
