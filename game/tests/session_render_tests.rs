use std::time::Duration;

use cozy_chess::{Color, Piece, Square};
use engine::graphics::{CpuRenderer, Sprite};
use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize};
use game::dice::ScriptedDice;
use game::render::{BLACK, BOARD_PX, DARK, LIGHT, RED, SQUARE_PX, TEXT, draw_session, square_rect};
use game::session::GameSession;
use game::sprites::PieceSprites;
use game::variant::Variant;

fn render(session: &GameSession, sprites: &PieceSprites) -> RgbaBufferSurface {
    let size = SurfaceSize::new(BOARD_PX, BOARD_PX);
    let mut surface = RgbaBufferSurface::new(size);
    {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        draw_session(session, sprites, &mut gfx);
    }
    surface.present().unwrap();
    surface
}

fn count(surface: &RgbaBufferSurface, color: [u8; 4]) -> usize {
    surface
        .frame()
        .chunks_exact(4)
        .filter(|px| px[..] == color[..])
        .count()
}

#[test]
fn prompt_phase_draws_the_prompt_not_the_board() {
    let session = GameSession::new(Variant::Classic);
    let surface = render(&session, &PieceSprites::empty());
    assert_eq!(count(&surface, LIGHT), 0);
    assert!(count(&surface, BLACK) > 0);
    assert!(count(&surface, TEXT) > 0);
    assert_eq!(surface.presented(), 1);
}

#[test]
fn board_shows_clock_in_the_corner() {
    let session = GameSession::with_duration(Variant::Classic, Duration::from_secs(45));
    let surface = render(&session, &PieceSprites::empty());

    let a8 = square_rect(Square::A8);
    let clock_red = (a8.y..a8.y + a8.h)
        .flat_map(|y| (a8.x..a8.x + a8.w).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y) == Some(TEXT))
        .count();
    assert!(clock_red > 0);
    // h1 has no overlay.
    let h1 = square_rect(Square::H1);
    assert_eq!(surface.pixel(h1.x + 2, h1.y + 2), Some(LIGHT));
    assert_eq!(surface.pixel(2, BOARD_PX - 2), Some(DARK));
}

#[test]
fn loaded_sprites_replace_glyphs() {
    let mut sprites = PieceSprites::empty();
    let blue = [0u8, 0, 255, 255].repeat((SQUARE_PX * SQUARE_PX) as usize);
    sprites.set(
        Color::White,
        Piece::Rook,
        Sprite::from_rgba(SQUARE_PX, SQUARE_PX, blue).unwrap(),
    );
    let session = GameSession::with_duration(Variant::Classic, Duration::from_secs(45));
    let surface = render(&session, &sprites);

    let a1 = square_rect(Square::A1);
    assert_eq!(surface.pixel(a1.x, a1.y), Some([0, 0, 255, 255]));
    let h1 = square_rect(Square::H1);
    assert_eq!(surface.pixel(h1.x + h1.w - 1, h1.y + h1.h - 1), Some([0, 0, 255, 255]));
    assert_eq!(count(&surface, [0, 0, 255, 255]), 2 * (SQUARE_PX * SQUARE_PX) as usize);
}

#[test]
fn jumpscare_fills_the_window_red() {
    let mut session = GameSession::with_duration(Variant::Classic, Duration::from_secs(45));
    let mut dice = ScriptedDice::new().roll(true);
    session.click(Square::E2, &mut dice);
    session.click(Square::E4, &mut dice);

    let surface = render(&session, &PieceSprites::empty());
    assert_eq!(count(&surface, RED), (BOARD_PX * BOARD_PX) as usize);

    session.tick(Duration::from_secs(1), &mut dice);
    let surface = render(&session, &PieceSprites::empty());
    assert_eq!(count(&surface, RED), 0);
}

#[test]
fn fake_crash_hides_the_board() {
    let mut session = GameSession::with_duration(Variant::Cursed, Duration::from_secs(45));
    let mut dice = ScriptedDice::new().roll(true);
    session.click(Square::E2, &mut dice);
    session.click(Square::E5, &mut dice);

    let surface = render(&session, &PieceSprites::empty());
    assert_eq!(count(&surface, LIGHT), 0);
    assert_eq!(count(&surface, DARK), 0);
}
