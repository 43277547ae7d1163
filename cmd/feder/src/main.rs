//! feder - render Feder index visualizations to HTML.

mod request;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use giztoy_feder::{
    Action, EmbedBuilder, EmbedConfig, EvcxrDisplay, HtmlFileDisplay, RandomIdSource,
    SearchParams, ViewParams,
};
use tracing_subscriber::EnvFilter;

use settings::Settings;

/// Render Feder index visualizations to HTML.
///
/// The request file (YAML or JSON) describes the index, media and params;
/// flags override it. Defaults come from ~/.giztoy/feder/config.yaml.
#[derive(Parser, Debug)]
#[command(name = "feder")]
#[command(about = "Render Feder index visualizations to HTML")]
#[command(version)]
struct Cli {
    /// Request file (YAML or JSON)
    #[arg(short = 'f', long = "file", global = true)]
    request: Option<PathBuf>,

    /// Index file path or URL
    #[arg(long, global = true)]
    index_file: Option<String>,

    /// Index source kind (hnswlib, faiss)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Media URL list (one per line, or a YAML/JSON list)
    #[arg(long, global = true)]
    media_urls: Option<PathBuf>,

    /// View params as a JSON object
    #[arg(long, global = true)]
    view_params: Option<String>,

    /// Search params as a JSON object
    #[arg(long, global = true)]
    search_params: Option<String>,

    /// Feder module URL
    #[arg(long, global = true)]
    library_url: Option<String>,

    /// Settings file (default is ~/.giztoy/feder/config.yaml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output HTML file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    output: Option<PathBuf>,

    /// Print evcxr rich-output markers around the HTML
    #[arg(long, global = true, conflicts_with = "output")]
    evcxr: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Action to run (default: the request file's action, else overview)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Show the whole index structure
    Overview,
    /// Search with the stored vector of a row
    SearchById {
        /// Row id of the target vector
        id: u64,
    },
    /// Search with a random test vector
    SearchRandom,
}

impl From<Commands> for Action {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Overview => Action::Overview,
            Commands::SearchById { id } => Action::SearchById { id },
            Commands::SearchRandom => Action::SearchRandomTestVector,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = settings::load_settings(cli.settings.as_deref())?;
    let base = match &cli.request {
        Some(path) => request::load_document(path)
            .with_context(|| format!("failed to load request {}", path.display()))?,
        None => EmbedConfig::default(),
    };
    let cfg = resolve_config(&cli, &settings, base)?;
    tracing::debug!(index_file = %cfg.index_file, source = %cfg.index_source, action = ?cfg.action, "resolved request");

    let builder = EmbedBuilder::from_config(&cfg, &RandomIdSource);
    run(builder, cfg.action, &cli)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(builder: EmbedBuilder, action: Action, cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.output {
        let mut builder = builder.display(HtmlFileDisplay::new(path));
        builder.apply(action, true)?;
        eprintln!("wrote {}", path.display());
    } else if cli.evcxr {
        let mut builder = builder.display(EvcxrDisplay::stdout());
        builder.apply(action, true)?;
    } else {
        let mut builder = builder;
        if let Some(html) = builder.apply(action, false)? {
            print!("{}", html);
        }
    }
    Ok(())
}

/// Layers settings, request file and flags; later layers win.
fn resolve_config(cli: &Cli, settings: &Settings, base: EmbedConfig) -> Result<EmbedConfig> {
    let mut cfg = base;

    let mut view_params = settings.view_params.clone();
    view_params.merge(std::mem::take(&mut cfg.view_params));
    if let Some(raw) = &cli.view_params {
        let flag: ViewParams = serde_json::from_str(raw).context("invalid --view-params")?;
        view_params.merge(flag);
    }
    cfg.view_params = view_params;

    let mut search_params = settings.search_params.clone();
    search_params.merge(std::mem::take(&mut cfg.search_params));
    if let Some(raw) = &cli.search_params {
        let flag: SearchParams = serde_json::from_str(raw).context("invalid --search-params")?;
        search_params.merge(flag);
    }
    cfg.search_params = search_params;

    if let Some(url) = &cli.library_url {
        cfg.library_url = url.clone();
    } else if cfg.library_url.is_empty() {
        cfg.library_url = settings.library_url.clone();
    }

    if let Some(file) = &cli.index_file {
        cfg.index_file = file.clone();
    }
    if let Some(source) = &cli.source {
        cfg.index_source = source.clone();
    }
    if let Some(path) = &cli.media_urls {
        cfg.media_urls = request::load_media_urls(path)
            .with_context(|| format!("failed to load media urls {}", path.display()))?;
    }
    if let Some(cmd) = cli.command {
        cfg.action = cmd.into();
    }

    if cfg.index_file.is_empty() {
        bail!("index file is required (--index-file or index_file in the request file)");
    }
    if cfg.index_source.is_empty() {
        bail!("index source is required (--source or index_source in the request file)");
    }
    Ok(cfg)
}
