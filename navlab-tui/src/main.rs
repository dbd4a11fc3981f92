//! navlab — terminal chart of mutual-fund NAVs rebased to 100 at an anchor date.
//!
//! Startup loads every configured scheme (network or saved JSON), aligns the
//! series on a daily calendar, then hands the dataset to the event loop.

mod app;
mod bridge;
mod coords;
mod input;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use navlab_core::config::load_config;
use navlab_core::data::mfapi::DEFAULT_BASE_URL;
use navlab_core::data::provider::StdoutProgress;
use navlab_core::data::{load_store, DataProvider, Dataset, JsonFileProvider, MfApiProvider};

use crate::app::{AppState, StatusLevel};

#[derive(Parser)]
#[command(name = "navlab", about = "Compare mutual-fund NAVs rebased to 100")]
struct Cli {
    /// Instrument and view configuration.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Read saved `<scheme>.json` responses from this directory instead of the network.
    #[arg(long)]
    offline_dir: Option<PathBuf>,

    /// NAV API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let provider: Box<dyn DataProvider> = match &cli.offline_dir {
        Some(dir) => Box::new(JsonFileProvider::new(dir)),
        None => Box::new(MfApiProvider::new(cli.base_url.as_str()).context("building HTTP client")?),
    };
    tracing::info!(
        provider = provider.name(),
        instruments = config.instruments.len(),
        "loading series"
    );

    let (store, summary) = load_store(provider.as_ref(), &config.instruments, &StdoutProgress)
        .context("no instrument could be loaded")?;
    let dataset = Dataset::build(store).context("aligning series")?;

    let mut app = AppState::new(dataset, &config.view).context("initial view")?;
    for (label, reason) in &summary.failures {
        app.push_message(StatusLevel::Warning, format!("Dropped {label}: {reason}"));
    }

    // Restore the terminal before the panic message prints.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("session ended");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        if app.needs_draw() {
            let size = terminal.size()?;
            app.screen = Rect::new(0, 0, size.width, size.height);
            terminal.draw(|f| ui::draw(f, app))?;
            app.mark_drawn();
        }

        // 50ms poll, ~20 FPS.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(..) => app.ctx.bridge_mut().mark_dirty(),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Log to a file under the cache dir; the terminal belongs to the chart.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(dir) = dirs::cache_dir().map(|d| d.join("navlab")) else {
        return Ok(());
    };
    let path = dir.join("navlab.log");
    let file = open_log(&dir, &path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn open_log(dir: &Path, path: &Path) -> Result<File> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    File::create(path).with_context(|| format!("opening {}", path.display()))
}
