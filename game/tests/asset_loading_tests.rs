use std::fs;
use std::path::{Path, PathBuf};

use cozy_chess::{Color, Piece};
use game::assets::{AssetError, AssetPolicy};
use game::sfx::{Cue, SoundBank};
use game::sprites::{PieceSprites, load_sprite, sprite_file_name};
use game::variant::Variant;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("haunted-chess-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap_or_else(|err| {
        panic!("failed to create {}: {err}", dir.display());
    });
    dir
}

fn write_png_rgba(path: &Path, width: u32, height: u32, rgba: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(path).unwrap_or_else(|err| {
        panic!("failed to create png at {}: {err}", path.display());
    });
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut png_writer = encoder.write_header().unwrap_or_else(|err| {
        panic!("failed to write png header at {}: {err}", path.display());
    });
    png_writer.write_image_data(rgba).unwrap_or_else(|err| {
        panic!("failed to write png data at {}: {err}", path.display());
    });
}

#[test]
fn sprites_are_scaled_to_a_square() {
    let dir = scratch_dir("sprites");
    let green = [0u8, 200, 0, 255].repeat(16 * 16);
    write_png_rgba(
        &dir.join(sprite_file_name(Color::White, Piece::Knight)),
        16,
        16,
        &green,
    );

    let sprites = PieceSprites::load(&dir, 75);
    assert_eq!(sprites.loaded_count(), 1);
    let knight = sprites.get(Color::White, Piece::Knight).unwrap();
    assert_eq!((knight.width(), knight.height()), (75, 75));
    // Scaling a flat colour keeps it, up to filter rounding.
    let px = &knight.rgba()[..4];
    assert!(px[0] < 5 && px[1] > 195 && px[2] < 5 && px[3] > 250, "{px:?}");
    assert!(sprites.get(Color::Black, Piece::Knight).is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn garbage_png_is_an_image_error() {
    let dir = scratch_dir("garbage");
    let path = dir.join("wk.png");
    fs::write(&path, b"not a png").unwrap();

    let err = load_sprite(&path, 75).unwrap_err();
    assert!(matches!(err, AssetError::Image { .. }), "{err}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn classic_tolerates_missing_sounds() {
    let dir = scratch_dir("classic-sounds");
    let bank = SoundBank::load(&dir, Variant::Classic.cues(), AssetPolicy::Lenient).unwrap();
    assert!(bank.is_empty());
    assert!(!bank.contains(Cue::Scream));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cursed_refuses_to_start_without_sounds() {
    let dir = scratch_dir("cursed-sounds");
    let err = SoundBank::load(&dir, Variant::Cursed.cues(), AssetPolicy::Strict).unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));
    assert!(err.path().ends_with(Path::new("sounds").join("laugh.mp3")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn undecodable_sound_fails_strict_loading() {
    let dir = scratch_dir("bad-sound");
    let path = Cue::Laugh.path_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"definitely not audio").unwrap();

    let err = SoundBank::load(&dir, &[Cue::Laugh], AssetPolicy::Strict).unwrap_err();
    assert!(matches!(err, AssetError::Sound { .. }), "{err}");

    let _ = fs::remove_dir_all(&dir);
}
