use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use serde::Serialize;

use crate::assets::{AssetError, AssetPolicy};

/// Per-cue volumes (0.0..=1.0).
///
/// The scream is the loudest thing in the game; ambience sits underneath everything else.
pub const SCREAM_VOLUME: f32 = 1.0;
pub const LAUGH_VOLUME: f32 = 0.8;
pub const ERROR_VOLUME: f32 = 0.7;
pub const AMBIENCE_VOLUME: f32 = 0.5;

pub const SOUNDS_DIR: &str = "sounds";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Scream,
    Laugh,
    Error,
    Ambience1,
    Ambience2,
    Ambience3,
}

impl Cue {
    pub const AMBIENCE: [Cue; 3] = [Cue::Ambience1, Cue::Ambience2, Cue::Ambience3];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Scream => "scream.mp3",
            Cue::Laugh => "laugh.mp3",
            Cue::Error => "error.mp3",
            Cue::Ambience1 => "ambience1.mp3",
            Cue::Ambience2 => "ambience2.mp3",
            Cue::Ambience3 => "ambience3.mp3",
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            Cue::Scream => SCREAM_VOLUME,
            Cue::Laugh => LAUGH_VOLUME,
            Cue::Error => ERROR_VOLUME,
            Cue::Ambience1 | Cue::Ambience2 | Cue::Ambience3 => AMBIENCE_VOLUME,
        }
    }

    pub fn path_in(self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(SOUNDS_DIR).join(self.file_name())
    }
}

/// Encoded sound clips, checked to be decodable at load time.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: Vec<(Cue, Arc<[u8]>)>,
}

impl SoundBank {
    pub fn load(
        assets_dir: &Path,
        cues: &[Cue],
        policy: AssetPolicy,
    ) -> Result<Self, AssetError> {
        let mut clips = Vec::with_capacity(cues.len());
        for &cue in cues {
            if let Some(bytes) = policy.resolve(load_clip(&cue.path_in(assets_dir)))? {
                clips.push((cue, bytes));
            }
        }
        tracing::info!(loaded = clips.len(), requested = cues.len(), "sound bank ready");
        Ok(Self { clips })
    }

    pub fn get(&self, cue: Cue) -> Option<Arc<[u8]>> {
        self.clips
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, bytes)| Arc::clone(bytes))
    }

    pub fn contains(&self, cue: Cue) -> bool {
        self.clips.iter().any(|(c, _)| *c == cue)
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

fn load_clip(path: &Path) -> Result<Arc<[u8]>, AssetError> {
    let bytes: Arc<[u8]> = fs::read(path)
        .map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .into();
    Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|source| AssetError::Sound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes)
}

/// Fire-and-forget playback on the default output device.
pub struct Sfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
}

impl Sfx {
    pub fn new(bank: SoundBank) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            bank,
        })
    }

    pub fn play(&self, cue: Cue) {
        let Some(bytes) = self.bank.get(cue) else {
            tracing::debug!(?cue, "cue has no clip, staying silent");
            return;
        };
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(cue.volume());

        let Ok(source) = Decoder::new(Cursor::new(bytes)) else {
            return;
        };
        sink.append(source);
        sink.detach();
    }
}
