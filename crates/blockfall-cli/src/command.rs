use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{Game, GameConfig, GameStats, PieceSeed, Ui};
use blockfall_tui::{TerminalUi, Theme};
use clap::Parser;

use crate::config;

/// Falling-block puzzle game for the terminal
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct CommandArgs {
    /// Show block indices instead of solid colors
    #[clap(long)]
    dev: bool,
    /// Board height in cells
    #[clap(long)]
    height: Option<i32>,
    /// Board width in cells
    #[clap(long)]
    width: Option<i32>,
    /// Number of upcoming pieces shown
    #[clap(long)]
    queue_size: Option<usize>,
    /// Seed for the piece sequence, 32 hex digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// JSON file with game settings; flags take precedence
    #[clap(long)]
    config: Option<PathBuf>,
}

impl CommandArgs {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => config::read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(queue_size) = self.queue_size {
            config.queue_size = queue_size;
        }
        Ok(config)
    }

    fn theme(&self) -> Theme {
        if self.dev { Theme::Dev } else { Theme::Standard }
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let config = args.game_config()?;

    let ui = TerminalUi::new(args.theme());
    let mut game = Game::new(ui, config).context("invalid game configuration")?;
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    let seed = game.seed();

    let stats = run_until_stopped(game)?;
    eprintln!(
        "score: {}, level: {}, lines: {}",
        stats.score(),
        stats.level(),
        stats.cleared_lines()
    );
    eprintln!("seed: {seed}");
    Ok(())
}

/// Runs `game` on its own thread until it ends.
///
/// SIGINT, SIGTERM and SIGHUP stop the game the same way the quit key does,
/// so the terminal is restored before the process exits.
fn run_until_stopped<U>(game: Game<U>) -> anyhow::Result<GameStats>
where
    U: Ui + Send + 'static,
{
    let stop = game.stop_handle();
    ctrlc::set_handler(move || stop.stop()).context("failed to install signal handler")?;
    let stats = game.spawn().join()?;
    Ok(stats)
}
