pub mod ai;
pub mod app;
pub mod assets;
pub mod board;
pub mod cli;
pub mod dice;
pub mod effects;
pub mod prompt;
pub mod render;
pub mod round_timer;
pub mod serde_duration;
pub mod session;
pub mod sfx;
pub mod sprites;
pub mod variant;
pub mod voice;
