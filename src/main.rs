use tapcanvas::app::{App, AppMessage};
use tapcanvas::cli::{parse_args, run_cli_command, version_line, CliCommand};
use tapcanvas::startup::{init_logging, AppConfig};
use tapcanvas::terminal::{install_panic_hook, TerminalManager};
use tapcanvas::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info};

/// How often expired notices are swept.
const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result;
    }
    let CliCommand::Run(options) = command else {
        return Err(eyre!("unhandled command"));
    };

    let config = AppConfig::from_env().with_cli(&options);
    init_logging(&config.log_file, &config.log_filter)?;
    info!("{} starting", version_line());

    // Resolve the asset source before touching the terminal so a bad URL
    // is reported on a normal screen.
    let loader = config.asset_loader()?;

    install_panic_hook();
    let runtime = tokio::runtime::Runtime::new()?;

    let mut manager = TerminalManager::new()?;
    let result = runtime.block_on(async {
        let mut app = App::new(config);
        app.start_loading(loader);
        app.start_watcher();
        run_app(manager.terminal(), &mut app).await
    });
    manager.restore()?;

    if let Err(e) = &result {
        error!("Exited with error: {:?}", e);
    }
    result
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
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();
    let mut tick = tokio::time::interval(TICK);

    loop {
        if app.take_redraw() {
            let completed = terminal.draw(|f| ui::render(f, &mut *app))?;
            if app.take_pending_capture() {
                let snapshot = app.build_snapshot(completed.buffer);
                app.spawn_capture(snapshot);
            }
        }
        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }

        tokio::select! {
            _ = tick.tick() => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        app.handle_key_event(key);
                    }
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse_event(mouse),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }

            Some(msg) = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }
    }
}
