use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use audion::app::cli::Args;
use audion::app::config::AppConfig;
use audion::app::{logging, App};
use audion::player::remote::installed_apps;
use audion::player::MediaSource;
use audion::ui;

fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.list_apps {
        let apps = installed_apps();
        if apps.is_empty() {
            println!("No supported player application found.");
        }
        for (i, name) in apps.iter().enumerate() {
            println!("{}. {}", i + 1, name);
        }
        return Ok(());
    }

    if args.faces_dir {
        match AppConfig::faces_dir() {
            Some(dir) => println!("{}", dir.display()),
            None => anyhow::bail!("could not create the faces folder"),
        }
        return Ok(());
    }

    let (config, state) = AppConfig::load();
    let _log_guard = logging::init(&AppConfig::get_log_dir(), &args.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let requested = args.requested_source().or_else(|| state.last_source.clone());
    let mut app =
        App::new(config, state, installed_apps()).with_state_path(AppConfig::get_state_path());

    // Streams are fetched with a blocking client, so the first item is
    // opened before the runtime exists.
    if let Some(source) = requested {
        let source: MediaSource = source.parse().unwrap_or_else(|never| match never {});
        if !app.open(source.clone()) {
            warn!(source = %source, "starting with nothing open");
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("could not start the event loop")?;
    let result = runtime.block_on(run(&mut app));

    app.save_state();
    info!("bye");
    result
}

async fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Draw, then wait for a key or the next timer, whichever comes first.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut reader = EventStream::new();

    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        let deadline = app.next_deadline();
        let timer = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at.into()).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            event = reader.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = timer => {}
        }

        app.tick(Instant::now());
    }
    Ok(())
}
