//! quizbox - Terminal Quiz Game
//!
//! Ten questions, three choices each, playable with the keyboard or a gamepad.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use quizbox::app::messages::AppMessage;
use quizbox::app::runtime::spawn_input_thread;
use quizbox::app::Services;
use quizbox::audio::build_audio_service;
use quizbox::render::TerminalUI;
use quizbox::timer::TokioTimers;
use quizbox::{Application, QuestionBank, QuizConfig};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::{self, UnboundedSender};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("quizbox")
        .version(quizbox::VERSION)
        .about("A ten-question terminal quiz game")
        .long_about(
            "quizbox is a multiple-choice quiz for the terminal. Move with the arrow keys \
             or a gamepad D-pad, answer with Enter or the south button, pause with p or \
             Start, and press r five times to return to the title.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to a TOML config file"),
        )
        .arg(
            Arg::new("mute")
                .long("mute")
                .action(ArgAction::SetTrue)
                .help("Disable all sound"),
        )
        .arg(
            Arg::new("no-gamepad")
                .long("no-gamepad")
                .action(ArgAction::SetTrue)
                .help("Do not poll for gamepads"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write logs to this file (filtered by RUST_LOG)"),
        )
        .get_matches();

    let mut config = QuizConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(path) = matches.get_one::<PathBuf>("log-file") {
        config.log_file = Some(path.clone());
    }
    if matches.get_flag("no-gamepad") {
        config.input.gamepad = false;
    }
    let muted = matches.get_flag("mute");

    let destination = LogDestination::choose(
        config.log_file.as_deref(),
        std::io::stderr().is_terminal(),
    );
    init_logging(destination)?;

    if !std::io::stdout().is_terminal() {
        anyhow::bail!("quizbox must be run in an interactive terminal");
    }

    let questions = QuestionBank::standard()?;
    log::info!("starting quizbox {} with {} questions", quizbox::VERSION, questions.len());

    let (tx, rx) = mpsc::unbounded_channel();
    let shutdown = Arc::new(AtomicBool::new(false));

    let mut threads = vec![spawn_input_thread(
        tx.clone(),
        Arc::clone(&shutdown),
        config.input_poll_interval(),
    )?];
    if config.input.gamepad {
        threads.extend(start_gamepad(&config, tx.clone(), Arc::clone(&shutdown))?);
    }

    let services = Services {
        ui_renderer: Box::new(TerminalUI::new()),
        audio: build_audio_service(&config.audio, muted),
        timers: Box::new(TokioTimers::new(tx)),
    };
    let ctx = config.session_context(questions);
    let mut app = Application::new(ctx, services, config.audio.clone(), rx);

    let outcome = app.run().await;

    shutdown.store(true, Ordering::SeqCst);
    drop(app);
    for handle in threads {
        let _ = handle.join();
    }

    outcome?;
    Ok(())
}

/// Where log records go. The game owns the screen, so records must never reach a
/// terminal stderr.
#[derive(Debug, PartialEq, Eq)]
enum LogDestination<'a> {
    File(&'a Path),
    Stderr,
    Discard,
}

impl<'a> LogDestination<'a> {
    fn choose(log_file: Option<&'a Path>, stderr_is_terminal: bool) -> Self {
        match log_file {
            Some(path) => LogDestination::File(path),
            None if stderr_is_terminal => LogDestination::Discard,
            None => LogDestination::Stderr,
        }
    }
}

fn init_logging(destination: LogDestination<'_>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match destination {
        LogDestination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogDestination::Discard => {
            builder.target(env_logger::Target::Pipe(Box::new(std::io::sink())));
        }
        LogDestination::Stderr => {}
    }
    builder.init();
    Ok(())
}

#[cfg(feature = "gamepad")]
fn start_gamepad(
    config: &QuizConfig,
    tx: UnboundedSender<AppMessage>,
    shutdown: Arc<AtomicBool>,
) -> Result<Option<JoinHandle<()>>> {
    use quizbox::app::runtime::spawn_gamepad_thread;
    use quizbox::input::gamepad::GilrsSource;

    let handle = spawn_gamepad_thread(
        GilrsSource::new,
        tx,
        shutdown,
        config.gamepad_poll_interval(),
    )?;
    Ok(Some(handle))
}

#[cfg(not(feature = "gamepad"))]
fn start_gamepad(
    _config: &QuizConfig,
    _tx: UnboundedSender<AppMessage>,
    _shutdown: Arc<AtomicBool>,
) -> Result<Option<JoinHandle<()>>> {
    log::info!("built without the `gamepad` feature, keyboard only");
    Ok(None)
}
