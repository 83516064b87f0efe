mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod model;
mod table;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::{App, DataSource};
use crate::config::{AppConfig, GeneralConfig, LoggingConfig, ThemeConfig};
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::table::{SortColumn, SortDirection, TableView};
use crate::tui::{install_panic_hook, Tui};

/// A terminal dashboard listing files and folders in a sortable, filterable table.
#[derive(Parser, Debug)]
#[command(name = "file_table_tui", version, about)]
struct Cli {
    /// JSON data file (defaults to the built-in sample dashboard)
    data: Option<PathBuf>,

    /// Explicit config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial name filter
    #[arg(long)]
    filter: Option<String>,

    /// Initial sort, e.g. `size` or `date:desc`
    #[arg(long, value_parser = parse_sort_arg)]
    sort: Option<SortArg>,

    /// Print the table (header states and visible rows) as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,

    /// Log filter, e.g. `debug` or `file_table_tui=trace`
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Config overrides carried by CLI flags.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                data_path: None,
                mouse: self.no_mouse.then_some(false),
            },
            logging: LoggingConfig {
                level: self.log_level.clone(),
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            ..Default::default()
        }
    }
}

/// Initial sort requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortArg {
    column: SortColumn,
    direction: SortDirection,
}

/// Parse `column[:asc|desc]`; a bare column sorts ascending.
fn parse_sort_arg(s: &str) -> Result<SortArg, String> {
    let (column, direction) = match s.split_once(':') {
        Some((c, d)) => (c, Some(d)),
        None => (s, None),
    };
    let column =
        SortColumn::parse(column).ok_or_else(|| format!("unknown sort column `{column}`"))?;
    let direction = match direction {
        Some(d) => {
            SortDirection::parse(d).ok_or_else(|| format!("unknown sort direction `{d}`"))?
        }
        None => SortDirection::Ascending,
    };
    Ok(SortArg { column, direction })
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let _log_guard = if config.logging_enabled() && !cli.dump {
        match logging::init(&config.log_dir(), config.log_level()) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let source = match cli.data.clone().or_else(|| config.data_path()) {
        Some(path) => {
            let path = path.canonicalize().map_err(|_| {
                AppError::InvalidPath(format!("{} does not exist", path.display()))
            })?;
            DataSource::File(path)
        }
        None => DataSource::Sample,
    };

    let records = source.load()?;
    info!(source = %source.label(), count = records.len(), "records loaded");

    let mut view = TableView::new(records);
    if let Some(query) = &cli.filter {
        view.set_filter(query);
    }
    if let Some(sort) = cli.sort {
        view.sort_by(sort.column, sort.direction);
    }

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&view.snapshot())?);
        return Ok(());
    }

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(view, source, &config);
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick => app.clear_expired_status(),
            Event::Resize => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    info!("exiting");
    Ok(())
}
