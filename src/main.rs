use std::sync::Arc;

use clap::{Parser, Subcommand};

use otvet_bot::application::services::{DispatchService, ReplyService};
use otvet_bot::domain::entities::{IncomingEvent, MenuTree};
use otvet_bot::domain::traits::Messenger;
use otvet_bot::infrastructure::adapters::bitrix::{build_router, BitrixAdapter};
use otvet_bot::infrastructure::adapters::console::ConsoleAdapter;
use otvet_bot::infrastructure::config::Config;
use otvet_bot::infrastructure::knowledge::KnowledgeBase;
use otvet_bot::infrastructure::llm::{build_provider, LLMConfig};

#[derive(Parser)]
#[command(name = "otvet-bot")]
#[command(about = "Bitrix24 webhook relay bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (console mode when Bitrix is not configured)
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("otvet-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!(
        "Starting {} with {:?} strategy",
        config.bot.name,
        config.bot.strategy
    );

    let tree = load_menu(&config);
    let dispatcher = DispatchService::new(tree).with_fallback(&config.bot.fallback_reply);

    let knowledge = match &config.knowledge.path {
        Some(path) => match KnowledgeBase::load(path) {
            Ok(kb) => {
                tracing::info!("Loaded {} keyword rules from {}", kb.len(), path.display());
                kb
            }
            Err(e) => {
                tracing::warn!("Failed to load keyword rules: {}, using defaults", e);
                KnowledgeBase::with_defaults()
            }
        },
        None => KnowledgeBase::with_defaults(),
    };

    let llm_config = LLMConfig::from_env();
    let llm = build_provider(&llm_config);

    let rt = tokio::runtime::Runtime::new().unwrap();

    match &config.bitrix {
        Some(bitrix) if bitrix.is_usable() => {
            let adapter = BitrixAdapter::new(bitrix.clone());
            let replies = Arc::new(ReplyService::new(
                config.bot.strategy,
                dispatcher,
                knowledge,
                llm,
                llm_config,
                adapter,
            ));
            rt.block_on(serve(&config, replies));
        }
        _ => {
            tracing::warn!("Bitrix credentials not configured, running in console mode");
            let replies = ReplyService::new(
                config.bot.strategy,
                dispatcher,
                knowledge,
                llm,
                llm_config,
                ConsoleAdapter::new(),
            );
            rt.block_on(run_console(replies));
        }
    }
}

/// A missing menu file falls back to the built-in tree; a malformed one is a
/// startup failure
fn load_menu(config: &Config) -> MenuTree {
    let path = &config.menu.path;
    if path.exists() {
        match MenuTree::load(path) {
            Ok(tree) => {
                tracing::info!(
                    "Loaded menu with {} commands from {}",
                    tree.len(),
                    path.display()
                );
                tree
            }
            Err(e) => {
                tracing::error!("Invalid menu definition {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("Menu file {} not found, using built-in menu", path.display());
        MenuTree::default_tree()
    }
}

async fn serve<M: Messenger + 'static>(config: &Config, replies: Arc<ReplyService<M>>) {
    let app = build_router(&config.server.webhook_path, replies);

    let listener = match tokio::net::TcpListener::bind(&config.server.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.server.bind, e);
            return;
        }
    };

    tracing::info!(
        "Listening on {}{}",
        config.server.bind,
        config.server.webhook_path
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

async fn run_console<M: Messenger>(replies: ReplyService<M>) {
    tracing::info!("Console mode: type /menu or a question, Ctrl-C to quit");

    let console = ConsoleAdapter::new();
    loop {
        let Some(input) = console.read_line("> ").await else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        let event = if input.starts_with('/') {
            IncomingEvent::from_command("console", "0", input)
        } else {
            IncomingEvent::from_text("console", "0", input)
        };
        replies.handle(event).await;
    }
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
