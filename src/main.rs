// Glimpse CLI - resolve and render inline component previews from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as TokioMutex;
use tracing::{info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use glimpse::cache::CacheStore;
use glimpse::cli::{JsonMarkerSink, OutputFormat, TextMarkerSink};
use glimpse::config::GlimpseConfig;
use glimpse::host::project::{FileDocumentOpener, ProjectDefinitionProvider};
use glimpse::host::{Document, MarkerSink, Theme};
use glimpse::images::ImageAcquirer;
use glimpse::orchestrator::{DEBOUNCE_MS, DecorationEngine, PassScheduler};
use glimpse::watcher;

type CliEngine = DecorationEngine<ProjectDefinitionProvider, FileDocumentOpener, Arc<dyn MarkerSink>>;

#[derive(Parser)]
#[command(name = "glimpse", version, about = "Glimpse - Inline Component Preview Engine")]
struct Cli {
    /// Path to glimpse.toml (defaults to ./glimpse.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve previews for a single file and print the markers
    Scan {
        file: PathBuf,
        /// Directory searched for component declarations (defaults to the
        /// file's parent)
        #[arg(long)]
        project_root: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "dark")]
        theme: Theme,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Watch a file and re-resolve previews on every (debounced) edit
    Watch {
        file: PathBuf,
        #[arg(long)]
        project_root: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "dark")]
        theme: Theme,
    },
    /// Delete cache entries older than the configured maximum age
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with both console and file output
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("glimpse=info"))
        .unwrap();

    let logs_dir = ".glimpse/logs";
    fs::create_dir_all(logs_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create logs directory: {}", e);
    });

    let file_appender = rolling::daily(logs_dir, "glimpse.log");
    let (non_blocking_file, _file_guard) = non_blocking(file_appender);
    let (non_blocking_console, _console_guard) = non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking_console)
                .with_target(false)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    match cli.command {
        Commands::Scan {
            file,
            project_root,
            theme,
            format,
        } => scan(&file, project_root, theme, format, cli.config.as_deref()).await,
        Commands::Watch {
            file,
            project_root,
            theme,
        } => watch(file, project_root, theme, cli.config).await,
        Commands::Clean => clean(cli.config.as_deref()),
    }
}

fn build_engine(
    file: &Path,
    project_root: Option<PathBuf>,
    theme: Theme,
    sink: Arc<dyn MarkerSink>,
    config: &GlimpseConfig,
) -> Result<CliEngine> {
    let root = project_root
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let cache = CacheStore::new(CacheStore::default_location());
    let acquirer = ImageAcquirer::new(cache, &config.svg_color)?;
    let swept = acquirer.cache().evict_older_than(config.cache_max_age());
    if swept > 0 {
        info!("🧹 evicted {} stale preview(s)", swept);
    }

    Ok(DecorationEngine::new(
        ProjectDefinitionProvider::new(root),
        FileDocumentOpener,
        acquirer,
        sink,
        theme,
    ))
}

async fn run_file_pass(engine: &TokioMutex<CliEngine>, file: &Path, config_path: Option<&Path>) {
    let text = match tokio::fs::read_to_string(file).await {
        Ok(text) => text,
        Err(e) => {
            warn!("cannot read {}: {}", file.display(), e);
            return;
        }
    };
    let config = GlimpseConfig::load(config_path);
    let document = Document::new(file.display().to_string(), text);
    engine.lock().await.run_pass(&document, &config).await;
}

async fn scan(
    file: &Path,
    project_root: Option<PathBuf>,
    theme: Theme,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = GlimpseConfig::load(config_path);

    match format {
        OutputFormat::Text => {
            let sink: Arc<dyn MarkerSink> =
                Arc::new(TextMarkerSink::new(file.display().to_string()));
            let engine = TokioMutex::new(build_engine(file, project_root, theme, sink, &config)?);
            run_file_pass(&engine, file, config_path).await;
        }
        OutputFormat::Json => {
            let sink = Arc::new(JsonMarkerSink::default());
            let dyn_sink: Arc<dyn MarkerSink> = sink.clone();
            let engine =
                TokioMutex::new(build_engine(file, project_root, theme, dyn_sink, &config)?);
            run_file_pass(&engine, file, config_path).await;
            println!("{}", sink.render()?);
        }
    }
    Ok(())
}

async fn watch(
    file: PathBuf,
    project_root: Option<PathBuf>,
    theme: Theme,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = GlimpseConfig::load(config_path.as_deref());
    let sink: Arc<dyn MarkerSink> = Arc::new(TextMarkerSink::new(file.display().to_string()));
    let engine = Arc::new(TokioMutex::new(build_engine(
        &file,
        project_root,
        theme,
        sink,
        &config,
    )?));

    // Initial pass before settling into the watch loop.
    run_file_pass(&engine, &file, config_path.as_deref()).await;

    let scheduler = PassScheduler::new(Duration::from_millis(DEBOUNCE_MS));
    let pass_file = file.clone();
    watcher::watch_file(&file, move || {
        let engine = Arc::clone(&engine);
        let file = pass_file.clone();
        let config_path = config_path.clone();
        scheduler.schedule(async move {
            run_file_pass(&engine, &file, config_path.as_deref()).await;
        });
    })
    .await
    .context("watch loop failed")
}

fn clean(config_path: Option<&Path>) -> Result<()> {
    let config = GlimpseConfig::load(config_path);
    let cache = CacheStore::new(CacheStore::default_location());
    cache.ensure_directory();
    let deleted = cache.evict_older_than(config.cache_max_age());
    println!("removed {} cache entr(ies) older than {} day(s)", deleted, config.cache_max_age_days);
    Ok(())
}
