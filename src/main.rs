use anyhow::{Context, Result};
use culture_desk::config::{load_or_default, AppConfig, DEFAULT_CONFIG_FILE};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_or_default(&config_path)?;

    init_logging(&config)?;
    info!(config = %config_path.display(), version = culture_desk::VERSION, "culture desk starting");

    run_ui_mode(config)
}

/// Log to the configured file; stdout belongs to the terminal UI
fn init_logging(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("Failed to open log file: {}", config.logging.file.display()))?;

    let filter = EnvFilter::try_new(&config.logging.level)
        .with_context(|| format!("Invalid log level: {}", config.logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: AppConfig) -> Result<()> {
    use culture_desk::{ui, ModuleRegistry, PanelContext, Shell};

    // Background feeds run here while the UI loop owns the main thread
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let context = PanelContext::new(runtime.handle().clone(), config);
    let shell = Shell::new(ModuleRegistry::new(), context);

    let mut app = ui::App::new(shell);
    ui::run_ui(&mut app)?;

    // Unmount before the runtime goes away so the feed is cancelled cleanly
    drop(app);
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    info!("culture desk closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
