use pixcat::adapters::ReqwestHttpClient;
use pixcat::app::{App, AppMessage};
use pixcat::cli::{parse_args, run_cli_command, CliCommand};
use pixcat::config::ViewerConfig;
use pixcat::source::{self, ImageSource};
use pixcat::terminal::{setup_panic_hook, TerminalManager};
use pixcat::traits::HttpClient;
use pixcat::{logging, ui};

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::ffi::OsString;
use std::sync::Arc;
use tokio::sync::mpsc;

fn main() -> Result<()> {
    let command = parse_args(std::env::args_os());
    if let Some(code) = run_cli_command(&command) {
        std::process::exit(code);
    }
    let CliCommand::View { sources, color } = command else {
        return Ok(());
    };

    color_eyre::install()?;

    let mut config = ViewerConfig::from_env();
    if let Some(profile) = color {
        config = config.with_color_profile(profile);
    }
    logging::init(&config)?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(sources, config))
}

async fn run(args: Vec<OsString>, config: ViewerConfig) -> Result<()> {
    let client: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.http_timeout()));
    let sources: Vec<Arc<dyn ImageSource>> = args
        .iter()
        .map(|arg| source::from_arg(arg, Arc::clone(&client)))
        .collect();

    let mut app = App::new(sources, config);
    tracing::info!(
        sources = app.sources.len(),
        profile = %app.profile,
        "Starting viewer"
    );

    let mut term_manager = TerminalManager::new()?;
    let (width, height) = term_manager.size()?;
    app.on_resize(width, height);

    let result = run_app(term_manager.terminal(), &mut app).await;

    term_manager.restore();
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Resize(width, height))) => app.on_resize(width, height),
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        app.quit();
                    }
                    // Input closed
                    None => app.quit(),
                }
            }

            // Results from load tasks and animations
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
            tracing::info!("Quitting");
            return Ok(());
        }
    }
}
