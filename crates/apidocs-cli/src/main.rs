use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::{debug, info, warn};

use apidocs_core::config::{self, CONFIG_FILE_NAME, ServiceConfig};
use apidocs_core::{DocumentSet, DocumentStore, generate};
use apidocs_server::{AppState, router};

#[derive(Parser)]
#[command(name = "apidocs", about = "Versioned OpenAPI documents and browsing UI", version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the documents and the browsing UI
    Serve {
        /// Address to bind, overriding the config
        #[arg(short, long)]
        bind: Option<String>,

        /// Re-read the config every N seconds and rebuild when it changes
        #[arg(long)]
        watch_interval: Option<u64>,
    },

    /// Print a generated document
    Inspect {
        /// Group name of the document (e.g. v1); omit for a summary
        #[arg(short, long)]
        group: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: InspectFormat,
    },

    /// Generate every document and report what was built
    Validate,

    /// Write a starter configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            watch_interval,
        } => cmd_serve(&cli.config, bind, watch_interval).await,

        Commands::Inspect { group, format } => cmd_inspect(&cli.config, group, format),

        Commands::Validate => cmd_validate(&cli.config),

        Commands::Init { force } => cmd_init(&cli.config, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apidocs", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn require_config(path: &Path) -> Result<ServiceConfig> {
    config::load_config(path)?.with_context(|| {
        format!(
            "{} not found. Run `apidocs init` to create one.",
            path.display()
        )
    })
}

fn load_documents(path: &Path) -> Result<(ServiceConfig, DocumentSet)> {
    let cfg = require_config(path)?;
    let set = generate(&cfg)
        .with_context(|| format!("failed to generate documents from {}", path.display()))?;
    Ok((cfg, set))
}

async fn cmd_serve(path: &Path, bind: Option<String>, watch_interval: Option<u64>) -> Result<()> {
    let cfg = require_config(path)?;
    let store = Arc::new(
        DocumentStore::from_config(&cfg)
            .with_context(|| format!("failed to generate documents from {}", path.display()))?,
    );

    if let Some(secs) = watch_interval {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        tokio::spawn(watch_config(
            path.to_path_buf(),
            content,
            Duration::from_secs(secs.max(1)),
            Arc::clone(&store),
        ));
    }

    let addr = bind.unwrap_or_else(|| cfg.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let app = router(AppState::new(store, cfg.service.name.as_str()));
    apidocs_server::serve(listener, app).await?;
    Ok(())
}

/// Poll the config file and rebuild the published documents when it changes.
async fn watch_config(
    path: PathBuf,
    mut last: String,
    interval: Duration,
    store: Arc<DocumentStore>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        ticker.tick().await;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {e}", path.display());
                continue;
            }
        };
        if content == last {
            debug!("{} unchanged", path.display());
            continue;
        }

        info!("{} changed, rebuilding documents", path.display());
        match config::parse_config(&content, &path) {
            Ok(cfg) => match store.rebuild(&cfg) {
                Ok(set) => debug!("serving {} documents", set.len()),
                Err(e) => debug!("previous documents still served after: {e}"),
            },
            Err(e) => warn!("{e}"),
        }
        last = content;
    }
}

fn cmd_inspect(path: &Path, group: Option<String>, format: InspectFormat) -> Result<()> {
    let (_, set) = load_documents(path)?;

    let value = match group {
        Some(group) => {
            let doc = set.get(&group).with_context(|| {
                let known: Vec<&str> = set.documents().map(|(name, _)| name).collect();
                format!("unknown group {group}; known groups: {}", known.join(", "))
            })?;
            serde_json::to_value(doc.as_ref())?
        }
        None => build_inspect_summary(&set),
    };

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&value)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&value)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(set: &DocumentSet) -> serde_json::Value {
    let documents: Vec<serde_json::Value> = set
        .documents()
        .map(|(name, doc)| {
            let endpoint = set.endpoints().get(name);
            serde_json::json!({
                "group": name,
                "title": doc.info.title,
                "url": endpoint.map(|e| e.url.as_str()),
                "label": endpoint.map(|e| e.display_label.as_str()),
                "operations": doc.operations().count(),
            })
        })
        .collect();

    serde_json::json!({
        "root": set.endpoints().root,
        "documents": documents,
    })
}

fn cmd_validate(path: &Path) -> Result<()> {
    let (cfg, set) = load_documents(path)?;

    eprintln!("Valid config: {} {}", cfg.service.name, cfg.service.version);
    for (name, doc) in set.documents() {
        let deprecated = doc
            .info
            .description
            .as_deref()
            .is_some_and(|d| d.contains(apidocs_core::builder::DEPRECATION_NOTICE));
        eprintln!(
            "  {name}: {} paths, {} operations{}",
            doc.paths.len(),
            doc.operations().count(),
            if deprecated { " (deprecated)" } else { "" }
        );
    }
    eprintln!("Browsing UI at {}", set.endpoints().root);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(path, config::default_config_content())
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}
