use clap::{Parser, Subcommand};
use crossterm::event;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use asmpad::kernel::color::ColorScheme;
use asmpad::kernel::services::adapters::{
    database_path, ensure_settings_file, load_settings, AsyncRuntime, JsonRepository,
};
use asmpad::kernel::services::ports::{ColorSchemeRecord, Settings, SettingsRepository};
use asmpad::kernel::{Action, AppState, EditorError, Effect, Store};
use asmpad::models::build_file_tree;
use asmpad::tui::{Flow, TerminalGuard, Workbench};

mod logging;

const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "asmpad")]
#[command(about = "A terminal editor for assembly source")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// File or directory to open (defaults to the current directory)
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Register a syntax/autocomplete configuration
    AddConfig { name: String, json_path: PathBuf },
    /// Store a highlight color for a category of a configuration
    SetColor {
        name: String,
        category: String,
        /// Color as #RRGGBB
        value: String,
    },
    /// List registered configurations
    ListConfigs,
}

fn to_io(e: EditorError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn open_repository(settings: &Settings) -> io::Result<Arc<dyn SettingsRepository>> {
    let repo = match database_path(settings) {
        Some(path) => JsonRepository::open(path).map_err(to_io)?,
        None => {
            tracing::warn!("no cache directory, configurations will not be saved");
            JsonRepository::in_memory()
        }
    };
    Ok(Arc::new(repo))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let logging = logging::init();
    if let Some(guard) = logging.as_ref() {
        tracing::debug!(log_dir = %guard.log_dir().display(), "logging to file");
    }
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings();
    let repo = open_repository(&settings)?;

    match cli.command {
        Some(Command::AddConfig { name, json_path }) => {
            add_config(repo.as_ref(), &name, &json_path)
        }
        Some(Command::SetColor {
            name,
            category,
            value,
        }) => set_color(repo.as_ref(), &name, &category, &value),
        Some(Command::ListConfigs) => list_configs(repo.as_ref()),
        None => run(cli.path, &settings, repo),
    }
}

fn add_config(repo: &dyn SettingsRepository, name: &str, json_path: &Path) -> io::Result<()> {
    let json_path = json_path
        .canonicalize()
        .unwrap_or_else(|_| json_path.to_path_buf());
    if !json_path.is_file() {
        eprintln!(
            "asmpad: JSON file not found at the specified path '{}'",
            json_path.display()
        );
        std::process::exit(1);
    }
    let record = repo.add_config(name, &json_path).map_err(to_io)?;
    println!("{}\t{}\t{}", record.id, record.name, record.json_path.display());
    Ok(())
}

fn set_color(
    repo: &dyn SettingsRepository,
    name: &str,
    category: &str,
    value: &str,
) -> io::Result<()> {
    let configs = repo.all_configs().map_err(to_io)?;
    let Some(config) = configs.iter().find(|c| c.name == name) else {
        eprintln!("asmpad: no configuration named '{}'", name);
        std::process::exit(1);
    };

    let stored = repo
        .color_schemes()
        .map_err(to_io)?
        .into_iter()
        .find(|s| s.config_id == config.id)
        .unwrap_or_default();
    let mut scheme = ColorScheme::from_hex_map(&stored.colors);
    if !scheme.set_hex(category, value) {
        tracing::warn!(category, value, "invalid color ignored");
        eprintln!("asmpad: ignoring invalid color '{}' (expected #RRGGBB)", value);
        return Ok(());
    }

    repo.save_color_scheme(ColorSchemeRecord {
        config_id: config.id,
        colors: scheme.to_hex_map(),
    })
    .map_err(to_io)
}

fn list_configs(repo: &dyn SettingsRepository) -> io::Result<()> {
    for record in repo.all_configs().map_err(to_io)? {
        let marker = if record.json_path.exists() { "" } else { "  (missing)" };
        println!(
            "{}\t{}\t{}{}",
            record.id,
            record.name,
            record.json_path.display(),
            marker
        );
    }
    Ok(())
}

fn run(path: Option<PathBuf>, settings: &Settings, repo: Arc<dyn SettingsRepository>) -> io::Result<()> {
    let target = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let target = target.canonicalize().unwrap_or(target);
    let (root, open_file) = if target.is_file() {
        let root = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (root, Some(target))
    } else {
        (target, None)
    };

    let tree = match build_file_tree(&root) {
        Ok(tree) => Some(tree),
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "cannot read workspace");
            None
        }
    };
    tracing::info!(root = %root.display(), "workspace opened");

    let store = Store::new(AppState::new(root, tree));
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, repo, settings.shell.clone())?;
    runtime.run(Effect::LoadConfigs);

    let guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut workbench = Workbench::new(store, runtime, rx, settings, guard.reports_key_release());
    if let Some(file) = open_file {
        workbench.dispatch(Action::OpenPath(file));
    }

    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| workbench.render(frame))?;
            dirty = workbench.sync_view_heights();
            if dirty {
                continue;
            }
        }

        if event::poll(TICK)? {
            match workbench.handle_event(event::read()?) {
                Flow::Quit => break,
                Flow::Continue { changed } => dirty |= changed,
            }
        }
        dirty |= workbench.poll_runtime();
    }

    tracing::info!("exiting");
    drop(terminal);
    drop(guard);
    Ok(())
}
