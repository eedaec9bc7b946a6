use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folio_core::{
    chat::backend_for, persona, providers::GitHubSource, seed, Aggregation, Aggregator,
    ChatSession, Config, ExportFormat, Exporter, Limit, LoadState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Portfolio projects from your GitHub accounts, plus a chat twin", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/folio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub account to aggregate; repeat or comma-separate for several
    #[arg(long = "account", global = true, env = "FOLIO_ACCOUNTS", value_delimiter = ',')]
    accounts: Vec<String>,

    /// Repositories requested per account
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Keep only the N most-starred projects
    #[arg(long, global = true, conflicts_with = "all")]
    top: Option<usize>,

    /// Keep every project
    #[arg(long, global = true)]
    all: bool,

    /// Gemini API key for the chat commands
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_key: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List aggregated projects
    Projects {
        /// table, json or markdown
        #[arg(long, short, default_value = "table", value_parser = parse_format)]
        format: ExportFormat,
    },
    /// Show every detail of one project
    Show {
        /// Project id
        id: String,
    },
    /// Print the chat system instruction
    Prompt,
    /// Ask the digital twin a single question
    Ask {
        message: String,
    },
    /// Talk to the digital twin interactively
    Chat,
    /// Print the static profile
    Profile,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(value)
        .ok_or_else(|| format!("unknown format {:?} (expected table, json or markdown)", value))
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if !self.accounts.is_empty() {
            config.github.accounts = self.accounts.clone();
        }
        if let Some(page_size) = self.page_size {
            config.github.page_size = page_size;
        }
        if self.all {
            config.github.top_n = Limit::Unbounded;
        } else if let Some(top) = self.top {
            anyhow::ensure!(top > 0, "--top must be at least 1");
            config.github.top_n = Limit::Top(top);
        }
        if let Some(key) = &self.gemini_key {
            config.chat.api_key = Some(key.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run one aggregation, logging while it is in flight
async fn load_projects(config: &Config) -> anyhow::Result<Aggregation> {
    let source = GitHubSource::from_config(&config.github)?;
    let aggregator = Aggregator::from_config(Box::new(source), &config.github)?;

    let state = LoadState::default();
    tracing::info!("Loading projects for {}", aggregator.accounts().join(", "));
    let state = state.settle(aggregator.aggregate().await);

    let aggregation = state
        .aggregation()
        .cloned()
        .context("aggregation did not settle")?;

    if let Some(reason) = aggregation.fallback_reason() {
        eprintln!("(showing fallback data: {})", reason);
    }
    Ok(aggregation)
}

async fn run_chat(config: &Config, projects: &[folio_core::Project]) -> anyhow::Result<()> {
    let backend = backend_for(&config.chat);
    let mut session = ChatSession::new(seed::profile());

    if let Some(greeting) = session.messages().first() {
        println!("{}\n", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Some(reply) = session.ask(backend.as_ref(), line, projects).await {
            println!("{}\n", reply);
        }
    }

    Ok(())
}

fn print_profile() {
    let profile = seed::profile();

    println!("{}", profile.name);
    println!("{} at {}", profile.profession, profile.institution);
    println!("{}\n", profile.location);
    println!("{}\n", profile.bio);
    for skill in &profile.skills {
        println!("{}: {}", skill.category, skill.items.join(", "));
    }
    println!();
    println!("Email:  {}", profile.email);
    println!("Phone:  {}", profile.phone);
    let github: Vec<String> = profile
        .accounts
        .iter()
        .map(|a| format!("https://github.com/{}", a))
        .collect();
    println!("GitHub: {}", github.join("  "));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "folio=debug" } else { "folio=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Projects { format } => {
            let config = cli.load_config()?;
            let aggregation = load_projects(&config).await?;
            print!("{}", Exporter::render(aggregation.projects(), *format)?);
        }
        Commands::Show { id } => {
            let config = cli.load_config()?;
            let aggregation = load_projects(&config).await?;
            let project = aggregation
                .find(id)
                .with_context(|| format!("no project with id {}", id))?;
            print!("{}", Exporter::to_detail(project));
        }
        Commands::Prompt => {
            let config = cli.load_config()?;
            let aggregation = load_projects(&config).await?;
            print!(
                "{}",
                persona::system_instruction(&seed::profile(), aggregation.projects())
            );
        }
        Commands::Ask { message } => {
            let config = cli.load_config()?;
            let backend = backend_for(&config.chat);
            let aggregation = load_projects(&config).await?;
            let mut session = ChatSession::new(seed::profile());
            match session.ask(backend.as_ref(), message, aggregation.projects()).await {
                Some(reply) => println!("{}", reply),
                None => anyhow::bail!("message is empty"),
            }
        }
        Commands::Chat => {
            let config = cli.load_config()?;
            let aggregation = load_projects(&config).await?;
            run_chat(&config, aggregation.projects()).await?;
        }
        Commands::Profile => print_profile(),
        // Does not load the existing file, so a broken config can be replaced
        Commands::Config {
            action: ConfigAction::Init { force },
        } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            anyhow::ensure!(
                *force || !path.exists(),
                "{} already exists (use --force to overwrite)",
                path.display()
            );
            let written = match &cli.config {
                Some(_) => {
                    Config::default().save_to(&path)?;
                    path
                }
                None => Config::default().save()?,
            };
            println!("Wrote {}", written.display());
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            let mut shown = cli.load_config()?;
            if shown.chat.api_key.is_some() {
                shown.chat.api_key = Some("<redacted>".to_string());
            }
            print!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}
