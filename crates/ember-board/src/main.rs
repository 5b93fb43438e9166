//! Tic-tac-toe board sandbox on the ember engine.

mod app;
mod assets;
mod game;

use ember_engine::device::GpuInit;
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::window::{Runtime, RuntimeConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Tic Tac Toe".to_string(),
        icon: Some(assets::asset_path(assets::ICON)),
        ..RuntimeConfig::default()
    };
    log::info!("starting {}", config.title);

    Runtime::run(config, GpuInit::default(), app::TicTacToe::new())
}
