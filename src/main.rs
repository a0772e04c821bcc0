//! Contagion entry point
//!
//! Loads settings and levels, resolves assets, then runs the fixed-rate loop
//! until the game is won, lost or the tick limit is hit. The exit code tells
//! the three apart.

use std::path::PathBuf;

use clap::Parser;

use contagion::assets::{AssetLoader, DirectoryLoader, ManifestLoader};
use contagion::error::{EngineError, ExitStatus};
use contagion::platform::{InputHandle, InputScript, RunOptions, run};
use contagion::renderer::{AsciiRenderer, LogRenderer, NullRenderer, RenderAdapter};
use contagion::sim::{Campaign, GamePhase, GameState, LevelSequence};
use contagion::{RenderMode, Settings};

/// Contagion: eat every coin, don't catch what the zombies have
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level campaign file (JSON); the built-in campaign when omitted
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,

    /// Directory every sprite must exist in; names are not checked when omitted
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Input script: one `<tick> <direction>` per line
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Override the layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run ticks back to back instead of in real time
    #[arg(long)]
    headless: bool,

    /// Frame output: ascii, log or none
    #[arg(long, value_parser = parse_render_mode)]
    render: Option<RenderMode>,
}

fn parse_render_mode(s: &str) -> Result<RenderMode, String> {
    RenderMode::from_str(s).ok_or_else(|| format!("unknown render mode: {s}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::info!("Contagion starting...");

    let status = match play(&cli) {
        Ok(status) => status,
        Err(err) => {
            match &err {
                EngineError::NoLevels => log::error!("No levels!"),
                other => log::error!("{}", other),
            }
            ExitStatus::from(&err)
        }
    };
    std::process::exit(status.code());
}

fn play(cli: &Cli) -> Result<ExitStatus, EngineError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(max_ticks) = cli.max_ticks {
        settings.max_ticks = max_ticks;
    }
    if let Some(mode) = cli.render {
        settings.render.mode = mode;
    }

    let campaign = match &cli.levels {
        Some(path) => Campaign::load(path)?,
        None => Campaign::builtin()?,
    };

    let mut loader: Box<dyn AssetLoader> = match &cli.assets {
        Some(dir) => Box::new(DirectoryLoader::new(dir)),
        None => Box::new(ManifestLoader),
    };
    let mut state = GameState::new(&settings, LevelSequence::from(campaign), loader.as_mut())?;
    log::info!(
        "{} assets resolved, {} more levels queued",
        state.assets().len(),
        state.levels_remaining()
    );

    let mut script = cli.script.as_deref().map(InputScript::load).transpose()?;
    let input = InputHandle::new();

    let mut renderer: Box<dyn RenderAdapter> = match settings.render.mode {
        RenderMode::Ascii => Box::new(AsciiRenderer::new(
            std::io::stdout(),
            settings.playfield,
            settings.render.columns,
            settings.render.rows,
        )),
        RenderMode::Log => Box::new(LogRenderer::new()),
        RenderMode::None => Box::new(NullRenderer),
    };

    let options = RunOptions {
        headless: cli.headless,
        ..RunOptions::from(&settings)
    };
    let outcome = run(&mut state, renderer.as_mut(), &input, script.as_mut(), &options)?;

    match outcome.phase {
        GamePhase::GameComplete => log::info!("Thanks for playing! Final score {}", outcome.score),
        GamePhase::Lost => log::info!("Infected after {} ticks, score {}", outcome.ticks, outcome.score),
        _ => log::info!("Stopped after {} ticks, score {}", outcome.ticks, outcome.score),
    }
    Ok(outcome.exit_status())
}
