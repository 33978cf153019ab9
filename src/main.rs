//! ZenSoul CLI - guided anxiety-relief exercises in the terminal
//!
//! - `list` shows the built-in exercises
//! - `run` walks through an exercise with a live countdown
//! - `suggest` asks the AI guide for a new exercise that fits your mood
//! - `affirm` prints an affirmation

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::{info, warn};

use zensoul::cli::{forward_lines, Cli, Commands, Display, SuggestArgs};
use zensoul::guide::{fallback_affirmation, generate_affirmation, Guide};
use zensoul::{Catalog, Exercise, GeminiOracle, Session, SessionCommand, SessionEvent, ZenConfig};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over the default level, which is `warn`, or `info`
/// with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No command provided, show help
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        generate_completions(shell);
        return Ok(());
    }

    let config = ZenConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mut catalog = Catalog::with_defaults().context("built-in exercises are invalid")?;

    match command {
        Commands::List { json } => {
            if json {
                Display::show_catalog_json(&catalog)?;
            } else {
                Display::show_catalog(&catalog);
            }
        }
        Commands::Run(args) => {
            let exercise = catalog.find(&args.key).cloned().with_context(|| {
                format!("unknown exercise '{}' (see `zensoul list`)", args.key)
            })?;
            run_session(exercise, &config, args.cycles).await?;
        }
        Commands::Suggest(args) => suggest(&mut catalog, &config, args).await?,
        Commands::Affirm { mood } => {
            let text = match GeminiOracle::from_config(&config.oracle) {
                Ok(oracle) => generate_affirmation(&oracle, mood.as_deref()).await,
                Err(err) => {
                    info!(error = %err, "oracle unavailable, using a fallback affirmation");
                    fallback_affirmation().to_string()
                }
            };
            Display::show_affirmation(&text);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Asks the guide for a new exercise and optionally runs it.
async fn suggest(catalog: &mut Catalog, config: &ZenConfig, args: SuggestArgs) -> Result<()> {
    let oracle =
        GeminiOracle::from_config(&config.oracle).context("the AI guide is not available")?;
    let mut guide = Guide::new(oracle);

    let recommendation = match guide.recommend(catalog, &args.mood, args.category).await {
        Ok(recommendation) => recommendation,
        Err(err) => {
            Display::show_notice(err.notice());
            bail!(err);
        }
    };

    Display::show_recommendation(&recommendation);
    if args.run {
        run_session(recommendation.exercise, config, None).await?;
    }
    Ok(())
}

/// Runs an interactive session until the user quits or `cycles` complete.
async fn run_session(
    exercise: Arc<Exercise>,
    config: &ZenConfig,
    cycles: Option<u32>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let mut session = Session::new(Arc::clone(&exercise), &config.timing, event_tx);
    Display::show_session_header(&session.snapshot());

    // A finite run ends on its cycle count, so only open-ended runs stop at end of input.
    spawn_input_reader(command_tx.clone(), cycles.is_none());

    let printer = {
        let exercise = Arc::clone(&exercise);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                Display::show_event(&event, &exercise);
                if let (Some(limit), SessionEvent::CycleCompleted { cycles: done }) =
                    (cycles, &event)
                {
                    if *done >= limit {
                        let _ = command_tx.send(SessionCommand::Quit);
                    }
                }
            }
        })
    };

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = command_tx.send(SessionCommand::Quit);
        }
    });

    session.start();
    session.run(command_rx).await;

    let cycles_completed = session.cycles_completed();
    let responses = session.responses().clone();
    // Dropping the session closes the event channel and ends the printer.
    drop(session);
    interrupt.abort();
    printer.await.context("event printer stopped unexpectedly")?;

    info!(key = exercise.key(), cycles_completed, "session finished");
    if exercise.is_timed() {
        println!("Completed {cycles_completed} cycle(s). Well done.");
    }

    if !responses.is_empty() {
        match GeminiOracle::from_config(&config.oracle) {
            Ok(oracle) => match Guide::new(oracle).feedback(&exercise, &responses).await {
                Ok(feedback) => Display::show_feedback(&feedback),
                Err(err) => {
                    warn!(error = %err, "feedback request failed");
                    Display::show_notice(err.notice());
                }
            },
            Err(err) => info!(error = %err, "skipping feedback"),
        }
    }

    Ok(())
}

/// Reads stdin on a plain thread and forwards parsed commands.
///
/// The thread stays blocked on stdin after the session ends and is torn
/// down with the process.
fn spawn_input_reader(commands: mpsc::UnboundedSender<SessionCommand>, quit_on_eof: bool) {
    std::thread::spawn(move || {
        forward_lines(std::io::stdin().lock(), &commands, quit_on_eof);
    });
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
