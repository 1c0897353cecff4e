use anyhow::Context;
use log::{error, info, warn};
use scribe::buffer::Document;
use scribe::cli::{self, CliArgs};
use scribe::config::EditorConfig;
use scribe::editor::Editor;
use scribe::terminal::{self, RawTerminal, Terminal};
use std::fs::File;

/// Entry point: parse arguments, set up logging and the terminal, run the
/// editor until the user quits, and restore the terminal on every exit path.
fn main() {
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version arrive here too
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = init_logging(&cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    match run(&cli_args) {
        Ok(()) => info!("Exiting"),
        Err(e) => {
            terminal::restore_terminal();
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Logging is off unless RUST_LOG is set or a log file is given; stderr
/// belongs to the terminal while the editor is drawing.
fn init_logging(args: &CliArgs) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut config = EditorConfig::load(args.config.as_deref());
    if let Some(tab_stop) = args.tab_stop {
        config.tab_stop = tab_stop.max(1);
    }
    info!("Starting with {:?}", config);

    terminal::install_panic_hook();
    terminal::install_signal_handlers();

    let mut term = RawTerminal::new().context("cannot enable raw mode")?;
    let (rows, cols) = term.window_size().context("cannot determine window size")?;

    let mut open_error = None;
    let doc = match &args.file {
        Some(path) => Document::open(path, config.tab_stop).unwrap_or_else(|e| {
            warn!("Cannot open {}: {}", path.display(), e);
            open_error = Some(format!("Can't open {}: {}", path.display(), e));
            Document::new(config.tab_stop)
        }),
        None => Document::new(config.tab_stop),
    };

    let mut editor = Editor::new(doc, config, rows, cols);
    if let Some(message) = open_error {
        editor.set_status_message(message);
    }

    match editor.run(&mut term) {
        Ok(()) => {}
        Err(e) if terminal::input::terminate_requested() => {
            info!("Terminated by signal ({})", e);
        }
        Err(e) => return Err(e).context("editor session failed"),
    }
    term.clear().context("cannot clear the screen")?;
    Ok(())
}
