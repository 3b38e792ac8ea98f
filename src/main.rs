use encyclo::app::App;
use encyclo::cli::{self, CliCommand, HeadlessArgs, TuiArgs};
use encyclo::client::EncycloClient;
use encyclo::config::ClientConfig;
use encyclo::logging::{self, LogTarget};
use encyclo::ui;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

/// Redraw and timer tick while idle.
const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match cli::parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}\n\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };
    if let Some(result) = cli::run_cli_command(&command) {
        return result;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    match command {
        CliCommand::Headless(args) => runtime.block_on(run_headless(args)),
        CliCommand::RunTui(args) => runtime.block_on(run_tui(args)),
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}

async fn run_headless(args: HeadlessArgs) -> Result<()> {
    let config = args.common.apply(ClientConfig::from_env()?);
    logging::init(LogTarget::Stderr)?;

    let client = EncycloClient::from_config(&config)?;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let outcome =
        cli::run_headless(&client, &args, config.max_rounds, &mut stdout, &mut stderr).await?;
    info!(rounds = outcome.rounds.len(), "Headless run finished");
    Ok(())
}

async fn run_tui(args: TuiArgs) -> Result<()> {
    let config = args.common.apply(ClientConfig::from_env()?);
    if config.log_to_file {
        logging::init(LogTarget::File)?;
    }

    let client = EncycloClient::from_config(&config)?;
    let mut app = App::new(client, &config);
    let autostart = args.topic.is_some();
    if let Some(topic) = args.topic {
        app = app.with_topic(topic);
    }

    setup_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    if autostart {
        app.submit_topic();
    }
    let result = run_app(&mut terminal, &mut app).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
