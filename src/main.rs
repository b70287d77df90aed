//! ambucheck - Ambulance Readiness Checklist
//!
//! Terminal wizard that walks the crew through the vehicle's equipment
//! checklist and posts the finished record to a spreadsheet endpoint.

use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use ambucheck::application::App;
use ambucheck::cli::Cli;
use ambucheck::domain::Catalog;
use ambucheck::infrastructure::{init_logging, Config, Submitter, Transport};
use ambucheck::presentation::{item_viewport_rows, render_ui, InputHandler};

/// Entry point for the checklist wizard.
///
/// Loads configuration, sets up logging and the terminal, then runs the
/// event loop until the user quits.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.as_str()).context("applying --endpoint")?;
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }

    init_logging(cli.verbosity(), &config.log_file_path());

    let catalog = Catalog::default();
    let submitter = Submitter::from_config(&config.endpoint, catalog)
        .map_err(ambucheck::Error::from)
        .context("creating HTTP client")?;
    if !submitter.is_configured() {
        info!("no endpoint configured; submissions will be refused");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, submitter.is_configured());
    let res = run_app(&mut terminal, &mut app, &submitter);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// A pending submission is dispatched right after the frame showing the
/// saving state is drawn, and its outcome is applied before the next key is
/// read.
fn run_app<B: Backend, T: Transport>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    submitter: &Submitter<T>,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_size(item_viewport_rows(size.height));
        terminal.draw(|f| render_ui(f, app))?;

        if app.loading {
            let result = submitter.submit(&app.record);
            app.finish_submit(result);
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if InputHandler::is_quit(app, key.code, key.modifiers) {
                    return Ok(());
                }
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }
    }
}
