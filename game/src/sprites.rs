use std::fs;
use std::path::{Path, PathBuf};

use cozy_chess::{Color, Piece};
use engine::graphics::Sprite;
use image::imageops::{self, FilterType};

use crate::assets::{AssetError, AssetPolicy};

pub const PIECES_DIR: &str = "pieces";

/// Piece images, already scaled to one board square. Missing entries fall back to glyphs.
#[derive(Debug, Clone, Default)]
pub struct PieceSprites {
    sprites: Vec<Option<Sprite>>,
}

impl PieceSprites {
    pub fn empty() -> Self {
        Self {
            sprites: vec![None; Color::NUM * Piece::NUM],
        }
    }

    /// Loads all twelve piece images. Failures are logged and leave that piece on the glyph.
    pub fn load(assets_dir: &Path, size: u32) -> Self {
        let mut sprites = Self::empty();
        for color in Color::ALL {
            for piece in Piece::ALL {
                let path = assets_dir.join(sprite_file_name(color, piece));
                // Lenient resolution never returns an error.
                if let Ok(Some(sprite)) = AssetPolicy::Lenient.resolve(load_sprite(&path, size)) {
                    sprites.set(color, piece, sprite);
                }
            }
        }
        tracing::info!(loaded = sprites.loaded_count(), "piece sprites ready");
        sprites
    }

    pub fn set(&mut self, color: Color, piece: Piece, sprite: Sprite) {
        if self.sprites.is_empty() {
            *self = Self::empty();
        }
        self.sprites[slot(color, piece)] = Some(sprite);
    }

    pub fn get(&self, color: Color, piece: Piece) -> Option<&Sprite> {
        self.sprites.get(slot(color, piece))?.as_ref()
    }

    pub fn loaded_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_some()).count()
    }
}

fn slot(color: Color, piece: Piece) -> usize {
    color as usize * Piece::NUM + piece as usize
}

pub fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

/// `pieces/wp.png` style path relative to the assets directory.
pub fn sprite_file_name(color: Color, piece: Piece) -> PathBuf {
    let side = match color {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let letter = piece_letter(piece).to_ascii_lowercase();
    Path::new(PIECES_DIR).join(format!("{side}{letter}.png"))
}

/// Decodes a PNG and scales it to `size`×`size`.
pub fn load_sprite(path: &Path, size: u32) -> Result<Sprite, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let scaled = imageops::resize(&decoded.to_rgba8(), size, size, FilterType::Triangle);
    let (w, h) = scaled.dimensions();
    sprite_from_pixels(path, w, h, scaled.into_raw())
}

fn sprite_from_pixels(
    path: &Path,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
) -> Result<Sprite, AssetError> {
    Sprite::from_rgba(width, height, rgba).ok_or_else(|| AssetError::PixelBuffer {
        path: path.to_path_buf(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_color_and_letter() {
        assert_eq!(
            sprite_file_name(Color::White, Piece::Pawn),
            Path::new("pieces").join("wp.png")
        );
        assert_eq!(
            sprite_file_name(Color::Black, Piece::Knight),
            Path::new("pieces").join("bn.png")
        );
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let sprites = PieceSprites::load(Path::new("/definitely/not/here"), 75);
        assert_eq!(sprites.loaded_count(), 0);
        assert!(sprites.get(Color::White, Piece::King).is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_sprite(Path::new("/definitely/not/here/wk.png"), 75).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn short_pixel_buffer_names_the_file() {
        let path = Path::new("pieces/wq.png");
        let err = sprite_from_pixels(path, 2, 2, vec![0; 12]).unwrap_err();
        assert!(matches!(
            err,
            AssetError::PixelBuffer {
                width: 2,
                height: 2,
                ..
            }
        ));
        assert_eq!(err.path(), path);
        assert!(err.to_string().contains("pieces/wq.png"), "{err}");
    }

    #[test]
    fn set_and_get_by_piece() {
        let mut sprites = PieceSprites::empty();
        let sprite = Sprite::from_rgba(1, 1, vec![1, 2, 3, 255]).unwrap();
        sprites.set(Color::Black, Piece::Queen, sprite.clone());
        assert_eq!(sprites.get(Color::Black, Piece::Queen), Some(&sprite));
        assert!(sprites.get(Color::White, Piece::Queen).is_none());
        assert_eq!(sprites.loaded_count(), 1);
    }
}
