//! Drawing the session into any [`Renderer2d`].

use cozy_chess::{Color as Side, File, Piece, Rank, Square};
use engine::graphics::{Color, Renderer2d, text_height, text_width};
use engine::ui::{Anchor, Rect, Size};

use crate::board::{BoardState, Outcome};
use crate::effects::Visual;
use crate::prompt::DurationPrompt;
use crate::session::{GameSession, Phase};
use crate::sprites::{PieceSprites, piece_letter};

pub const BOARD_PX: u32 = 600;
pub const SQUARE_PX: u32 = BOARD_PX / 8;

pub const LIGHT: Color = [240, 217, 181, 255];
pub const DARK: Color = [181, 136, 99, 255];
pub const RED: Color = [255, 0, 0, 255];
pub const TEXT: Color = [200, 0, 0, 255];
pub const BLACK: Color = [0, 0, 0, 255];
const SELECTED: Color = [120, 0, 0, 255];
const WHITE_PIECE: Color = [250, 250, 250, 255];
const BLACK_PIECE: Color = [25, 25, 25, 255];
const CRASH_BG: Color = [0, 0, 120, 255];
const CRASH_TEXT: Color = [230, 230, 230, 255];

const TEXT_SCALE: u32 = 3;
const HUD_POS: (u32, u32) = (20, 20);
const PROMPT_LABEL: &str = "Enter game duration (seconds):";

/// Board square under a buffer pixel. Rank 8 is the top row.
pub fn square_at(x: u32, y: u32) -> Option<Square> {
    if x >= BOARD_PX || y >= BOARD_PX {
        return None;
    }
    let file = (x / SQUARE_PX) as usize;
    let rank = 7 - (y / SQUARE_PX) as usize;
    Some(Square::new(File::index(file), Rank::index(rank)))
}

pub fn square_rect(square: Square) -> Rect {
    let file = square.file() as u32;
    let rank = square.rank() as u32;
    Rect::new(file * SQUARE_PX, (7 - rank) * SQUARE_PX, SQUARE_PX, SQUARE_PX)
}

fn square_color(square: Square) -> Color {
    let file = square.file() as u32;
    let rank = square.rank() as u32;
    if (file + rank) % 2 == 0 { DARK } else { LIGHT }
}

pub fn draw_session(session: &GameSession, sprites: &PieceSprites, gfx: &mut dyn Renderer2d) {
    if let Some(prompt) = session.prompt() {
        draw_prompt(prompt, gfx);
        return;
    }

    match session.visual() {
        Visual::RedScreen => gfx.clear(RED),
        Visual::CrashScreen { title, message } => draw_crash(title, message, gfx),
        Visual::Board => {
            draw_table(session, sprites, gfx);
        }
        Visual::BoardWithCaption(caption) => {
            draw_table(session, sprites, gfx);
            draw_banner(caption, BOARD_PX / 2, gfx);
        }
    }
}

/// Board, clock and end-of-game status.
fn draw_table(session: &GameSession, sprites: &PieceSprites, gfx: &mut dyn Renderer2d) {
    draw_board(session.board(), session.selected(), sprites, gfx);
    if let Some(timer) = session.timer() {
        draw_hud(timer.remaining_secs(), gfx);
    }
    if let Phase::GameOver(outcome) = session.phase() {
        draw_banner(&outcome_text(*outcome), BOARD_PX / 2, gfx);
    }
}

pub fn draw_prompt(prompt: &DurationPrompt, gfx: &mut dyn Renderer2d) {
    gfx.clear(BLACK);
    let y = BOARD_PX / 2 - 50;
    gfx.draw_text_scaled(50, y, PROMPT_LABEL, TEXT, TEXT_SCALE);
    gfx.draw_text_scaled(50, BOARD_PX / 2, prompt.text(), TEXT, TEXT_SCALE);
}

pub fn draw_board(
    board: &BoardState,
    selected: Option<Square>,
    sprites: &PieceSprites,
    gfx: &mut dyn Renderer2d,
) {
    gfx.clear(BLACK);
    for square in Square::ALL {
        let rect = square_rect(square);
        gfx.fill_rect(rect, square_color(square));
        if let Some((side, piece)) = board.piece_at(square) {
            match sprites.get(side, piece) {
                Some(sprite) => gfx.draw_sprite(rect.x, rect.y, sprite),
                None => draw_glyph(rect, side, piece, gfx),
            }
        }
    }
    if let Some(square) = selected {
        let rect = square_rect(square);
        gfx.rect_outline(rect, SELECTED);
        gfx.rect_outline(rect.shrink(1), SELECTED);
    }
}

fn draw_glyph(square: Rect, side: Side, piece: Piece, gfx: &mut dyn Renderer2d) {
    let (fill, ink) = match side {
        Side::White => (WHITE_PIECE, BLACK_PIECE),
        Side::Black => (BLACK_PIECE, WHITE_PIECE),
    };
    let token = square.shrink(SQUARE_PX / 5);
    gfx.fill_rect(token, fill);
    gfx.rect_outline(token, ink);

    let letter = piece_letter(piece).to_string();
    let size = Size::new(text_width(&letter, TEXT_SCALE), text_height(&letter, TEXT_SCALE));
    let at = token.place(size, Anchor::Center);
    gfx.draw_text_scaled(at.x, at.y, &letter, ink, TEXT_SCALE);
}

pub fn draw_hud(remaining_secs: u64, gfx: &mut dyn Renderer2d) {
    let text = format!("Time Left: {remaining_secs}s");
    gfx.draw_text_scaled(HUD_POS.0, HUD_POS.1, &text, TEXT, TEXT_SCALE);
}

/// A dark band across the board with `text` centred on it.
fn draw_banner(text: &str, center_y: u32, gfx: &mut dyn Renderer2d) {
    let h = text_height(text, TEXT_SCALE) + 20;
    let band = Rect::new(0, center_y.saturating_sub(h / 2), BOARD_PX, h);
    gfx.blend_rect(band, BLACK, 200);
    let size = Size::new(text_width(text, TEXT_SCALE), text_height(text, TEXT_SCALE));
    let at = band.place(size, Anchor::Center);
    gfx.draw_text_scaled(at.x, at.y, text, TEXT, TEXT_SCALE);
}

fn draw_crash(title: &str, message: &str, gfx: &mut dyn Renderer2d) {
    gfx.clear(CRASH_BG);
    let area = Rect::from_size(BOARD_PX, BOARD_PX).shrink(40);
    gfx.draw_text_scaled(area.x, area.y, title, CRASH_TEXT, TEXT_SCALE + 1);
    let size = Size::new(text_width(message, TEXT_SCALE), text_height(message, TEXT_SCALE));
    let at = area.place(size, Anchor::CenterLeft);
    gfx.draw_text_scaled(at.x, at.y, message, CRASH_TEXT, TEXT_SCALE);
}

pub fn outcome_text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Checkmate { winner: Side::White } => "Checkmate. You win.".to_string(),
        Outcome::Checkmate { winner: Side::Black } => "Checkmate. You lose.".to_string(),
        Outcome::Draw => "Draw.".to_string(),
    }
}
