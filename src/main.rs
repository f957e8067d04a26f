mod app;
mod command;
mod config;
mod consts;
mod game;
mod pacer;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use crate::game::Game;
use crate::pacer::FramePacer;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

static USAGE: &str = "\
Usage: gridsnake [<options>]

Options:
  -c, --config <PATH>     Read configuration from <PATH>
  -l, --log-file <PATH>   Write log messages to <PATH>
  -h, --help              Show this help message and exit
  -V, --version           Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    let (config_path, log_file) = match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run { config, log_file }) => (config, log_file),
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let config = match setup(config_path.as_deref(), log_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(Game::new(&config)).run(terminal, FramePacer::new(config.tick_period()));
    ratatui::restore();
    tracing::info!("Exiting");
    io_exit(r)
}

/// Load the configuration and, if a log file is set either on the command
/// line or in the configuration, start logging to it
fn setup(config_path: Option<&Path>, log_file: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match config_path {
        Some(path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            Err(ConfigError::NoPath) => Config::default(),
            Err(e) => return Err(e.into()),
        },
    };
    if let Some(path) = log_file.as_deref().or(config.log_file.as_deref()) {
        init_logging(path)
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
        tracing::info!(
            width = config.grid.width(),
            height = config.grid.height(),
            ticks_per_second = config.ticks_per_second.get(),
            fruit_avoids_snake = config.fruit_avoids_snake,
            "Configuration loaded"
        );
    }
    Ok(config)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}
