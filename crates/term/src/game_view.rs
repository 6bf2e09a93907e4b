//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CardSnapshot, SessionSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{CardState, RoundStatus};

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

/// Terminal columns taken by one card: `[AB]`.
const CARD_W: u16 = 4;
const GAP_X: u16 = 1;
const GAP_Y: u16 = 1;
const HUD_MIN_W: u16 = 14;

const BG: Rgb = Rgb::new(0, 0, 0);
const TABLE_BG: Rgb = Rgb::new(20, 40, 30);

const FACE_COLORS: [Rgb; 6] = [
    Rgb::new(240, 90, 90),
    Rgb::new(90, 200, 240),
    Rgb::new(240, 210, 80),
    Rgb::new(120, 220, 120),
    Rgb::new(200, 130, 240),
    Rgb::new(255, 160, 60),
];

/// Two-character label for a face index.
pub fn face_glyph(face: u32) -> [char; 2] {
    let first = (b'A' + (face % 26) as u8) as char;
    let second = (b'A' + ((face + face / 26) % 26) as u8) as char;
    [first, second]
}

/// A lightweight terminal renderer for the card grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Size of the framed grid in terminal cells.
    pub fn frame_size(rows: u16, columns: u16) -> (u16, u16) {
        let inner_w = columns.saturating_mul(CARD_W + GAP_X).saturating_add(GAP_X);
        let inner_h = rows.saturating_mul(1 + GAP_Y).saturating_add(GAP_Y);
        (inner_w.saturating_add(2), inner_h.saturating_add(2))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `cursor` is the `(row, column)` of the keyboard cursor, if shown.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<(u16, u16)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::default().on(BG)));

        let (frame_w, frame_h) = Self::frame_size(snap.rows, snap.columns);
        let start_x = viewport.width.saturating_sub(frame_w.saturating_add(HUD_MIN_W)) / 2;
        let start_y = viewport.height.saturating_sub(frame_h.saturating_add(2)) / 2 + 1;

        let title = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(start_x, start_y.saturating_sub(1), "MEMORY MATCH", title);

        fb.fill_rect(
            start_x.saturating_add(1),
            start_y.saturating_add(1),
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            CellStyle::default().on(TABLE_BG),
        );
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        for row in 0..snap.rows {
            if card_origin(start_x, start_y, row, 0).1 >= viewport.height {
                break;
            }
            for column in 0..snap.columns {
                if card_origin(start_x, start_y, row, column).0 >= viewport.width {
                    break;
                }
                if let Some(card) = snap.card_at(row, column) {
                    let selected = cursor == Some((row, column));
                    self.draw_card(fb, start_x, start_y, row, column, card, selected);
                }
            }
        }

        if let Some(banner) = status_banner(snap.status) {
            let text_w = banner.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(
                x,
                start_y.saturating_add(frame_h.saturating_sub(1)),
                banner,
                CellStyle::fg(Rgb::new(255, 255, 255)).bold(),
            );
        }

        fb.put_str(
            0,
            viewport.height.saturating_sub(1),
            "arrows move  space flip  r restart  q quit",
            CellStyle::default().dim(),
        );

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_hud(fb, snap, viewport, panel_x, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<(u16, u16)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        column: u16,
        card: &CardSnapshot,
        selected: bool,
    ) {
        let (x, y) = card_origin(start_x, start_y, row, column);

        let (text, mut style) = if card.removed {
            ([' '; 4], CellStyle::default().on(TABLE_BG))
        } else if card.state == CardState::Flipping {
            (
                ['[', '.', '.', ']'],
                CellStyle::fg(Rgb::new(200, 200, 200)).on(Rgb::new(40, 40, 70)),
            )
        } else if card.face_up() {
            let [a, b] = face_glyph(card.face);
            let style = if card.state == CardState::Matched {
                face_style(card.face).dim()
            } else {
                face_style(card.face).bold()
            };
            (['[', a, b, ']'], style)
        } else {
            (
                ['[', '#', '#', ']'],
                CellStyle::fg(Rgb::new(150, 150, 170)).on(Rgb::new(40, 40, 70)),
            )
        };
        if selected {
            style = style.reversed();
        }
        for (dx, ch) in (0u16..).zip(text) {
            fb.put_char(x.saturating_add(dx), y, ch, style);
        }
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < HUD_MIN_W - 2 {
            return;
        }
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "COMBO", label);
        fb.put_u32(panel_x, y + 1, snap.combo, value);
        y += 3;

        fb.put_str(panel_x, y, "MOVES", label);
        if snap.moves_total == 0 {
            fb.put_str(panel_x, y + 1, "-", value);
        } else {
            let x = fb.put_u32(panel_x, y + 1, snap.moves_remaining, value);
            let x = fb.put_str(x, y + 1, "/", value);
            fb.put_u32(x, y + 1, snap.moves_total, value);
        }
        y += 3;

        fb.put_str(panel_x, y, "PAIRS", label);
        let x = fb.put_u32(panel_x, y + 1, snap.matched_pairs, value);
        let x = fb.put_str(x, y + 1, "/", value);
        fb.put_u32(x, y + 1, snap.pair_count, value);
        y += 3;

        fb.put_str(panel_x, y, "ROUND", label);
        let x = fb.put_u32(panel_x, y + 1, snap.round_id, value);
        fb.put_str(x + 1, y + 1, snap.status.as_str(), value.dim());
    }
}

/// Top-left cell of the card at `(row, column)`.
fn card_origin(start_x: u16, start_y: u16, row: u16, column: u16) -> (u16, u16) {
    let x = column
        .saturating_mul(CARD_W + GAP_X)
        .saturating_add(start_x.saturating_add(1 + GAP_X));
    let y = row
        .saturating_mul(1 + GAP_Y)
        .saturating_add(start_y.saturating_add(1 + GAP_Y));
    (x, y)
}

fn face_style(face: u32) -> CellStyle {
    CellStyle::fg(FACE_COLORS[face as usize % FACE_COLORS.len()]).on(Rgb::new(245, 245, 235))
}

fn status_banner(status: RoundStatus) -> Option<&'static str> {
    match status {
        RoundStatus::Preview => Some(" MEMORIZE "),
        RoundStatus::Won => Some(" CLEARED! "),
        RoundStatus::Lost => Some(" OUT OF MOVES "),
        RoundStatus::Uninitialized | RoundStatus::Playing => None,
    }
}
