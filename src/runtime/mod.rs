use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::config;
use crate::logging;

mod event_loop;
mod settings;
mod startup;

const USAGE: &str = "usage: platter [DATA_DIR]\n       platter --print-config\n       platter --help";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run { data_dir: Option<PathBuf> },
    PrintConfig,
    Help,
}

/// Parse the arguments following the program name.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut args = args.into_iter();
    let command = match args.next() {
        None => Command::Run { data_dir: None },
        Some(arg) => match arg.as_str() {
            "--print-config" => Command::PrintConfig,
            "-h" | "--help" => Command::Help,
            opt if opt.starts_with('-') => {
                return Err(format!("unknown option: {opt}\n{USAGE}"));
            }
            dir => Command::Run {
                data_dir: Some(PathBuf::from(dir)),
            },
        },
    };

    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument: {extra}\n{USAGE}"));
    }
    Ok(command)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match parse_args(env::args().skip(1))? {
        Command::PrintConfig => {
            print!("{}", config::Settings::default_toml()?);
            return Ok(());
        }
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Run { data_dir } => data_dir,
    };

    let (settings, config_fallback) = settings::load_settings();
    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("platter: could not open log file, logging disabled: {e}");
    }
    if let Some(reason) = &config_fallback {
        warn!("{reason}");
    }

    let mut app = startup::open_catalog(data_dir, &settings)?;
    app.status = config_fallback;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(count = app.records().len(), "exiting");
    run_result
}
