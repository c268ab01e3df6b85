use anyhow::{Context, anyhow};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use engine::surface::SurfaceSize;
use game::app::HauntedApp;
use game::cli::Cli;
use game::render::BOARD_PX;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    tracing::info!(
        variant = cli.variant.name(),
        assets = %cli.assets_dir.display(),
        "starting"
    );

    let app = HauntedApp::from_cli(cli).context("loading assets")?;
    let config = AppConfig {
        title: "Haunted Chess".to_string(),
        size: SurfaceSize::new(BOARD_PX, BOARD_PX),
        resizable: false,
        vsync: None,
    };
    run_game(config, app).map_err(|err| anyhow!("window: {err}"))
}
