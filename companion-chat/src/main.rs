//! `companion` — chat with a virtual companion in the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use companion_chat::backend::client_from_config;
use companion_chat::{Companion, SessionOptions, session, setup};
use companion_core::persona::Persona;
use companion_core::{CommunicationStyle, CompanionConfig, UserAge};
use companion_llm::ChatBackend;

#[derive(Debug, Parser)]
#[command(name = "companion", version, about = "Chat with a virtual companion persona")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Your age (13-100); asked interactively when omitted.
    #[arg(long)]
    age: Option<i64>,
    /// Communication style: formal, friendly, romantic or playful.
    #[arg(long)]
    style: Option<CommunicationStyle>,
    /// Never call the remote completion service.
    #[arg(long)]
    offline: bool,
    /// Key for the OpenAI-compatible service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Seed for reproducible topic and reply picks.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CompanionConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CompanionConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(run(cli, config))
}

async fn run(cli: Cli, config: CompanionConfig) -> Result<()> {
    let backend = client_from_config(&config.llm, cli.api_key.as_deref(), cli.offline);
    let mut out = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    setup::print_banner(&mut out, backend.is_available())?;
    let age = match cli.age {
        Some(value) => UserAge::new(value)?,
        None => setup::ask_age(&mut lines, &mut out).await?,
    };
    let style = match cli.style {
        Some(style) => style,
        None => setup::ask_style(&mut lines, &mut out).await?,
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let persona = Persona::new(config.general.persona_name.clone(), age, style);
    let mut companion = Companion::new(persona, &config, backend, rng)?;

    let options = SessionOptions::from(&config.session);
    session::run(&mut companion, &mut lines, &mut out, &options).await?;
    Ok(())
}
