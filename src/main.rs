use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use uuid::Uuid;

use tripwire_client::{ClientConfig, HttpMutationClient, Navigator, QueryCache};
use tripwire_config::{SUPPORTED_CHAINS, TriggerInput};
use tripwire_form::{Collaborators, FormNotice, FormNotifier, SubmitOutcome, TriggerForm};
use tripwire_validator::{ValidationErrors, validate_trigger};

/// Tripwire - author and submit on-chain agent triggers
#[derive(Parser)]
#[command(name = "tripwire")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the config file (default: ~/.tripwire/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// API root, overrides the config file
  #[arg(long, global = true)]
  base_url: Option<String>,

  /// Bearer token, overrides the config file
  #[arg(long, global = true, env = "TRIPWIRE_API_TOKEN", hide_env_values = true)]
  api_token: Option<String>,

  /// Request timeout in milliseconds, overrides the config file
  #[arg(long, global = true)]
  timeout_ms: Option<u64>,

  /// Log output format
  #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
  log_format: LogFormat,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
  Text,
  Json,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate a trigger file and print the normalized document
  Validate {
    /// Path to the trigger file (JSON)
    trigger_file: PathBuf,
  },

  /// Create a trigger for an organization
  Create {
    /// Owning organization
    #[arg(long)]
    org: Uuid,

    /// Path to the trigger file (JSON)
    trigger_file: PathBuf,
  },

  /// Replace an existing trigger with the contents of a file
  Update {
    /// Trigger to update
    #[arg(long)]
    id: Uuid,

    /// Path to the trigger file (JSON)
    trigger_file: PathBuf,
  },

  /// List the supported chains
  Chains,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.log_format);

  let Some(command) = cli.command.as_ref() else {
    println!("tripwire - use --help to see available commands");
    return Ok(());
  };

  match command {
    Commands::Validate { trigger_file } => validate(trigger_file),
    Commands::Create { org, trigger_file } => {
      let config = load_config(&cli)?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(create(config, *org, trigger_file))
    }
    Commands::Update { id, trigger_file } => {
      let config = load_config(&cli)?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(update(config, *id, trigger_file))
    }
    Commands::Chains => {
      for chain in SUPPORTED_CHAINS {
        let network = if chain.testnet { "testnet" } else { "mainnet" };
        println!("{:>10}  {} ({})", chain.id.get(), chain.name, network);
      }
      Ok(())
    }
  }
}

/// Logs go to stderr so stdout stays clean for command output.
fn init_tracing(format: LogFormat) {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr);

  match format {
    LogFormat::Text => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
  let path = match &cli.config {
    Some(path) => path.clone(),
    None => ClientConfig::default_dir()
      .context("could not determine home directory")?
      .join("config.json"),
  };

  let mut config = ClientConfig::load(&path)?;
  if let Some(base_url) = &cli.base_url {
    config.base_url = base_url.clone();
  }
  if let Some(api_token) = &cli.api_token {
    config.api_token = Some(api_token.clone());
  }
  if let Some(timeout_ms) = cli.timeout_ms {
    config.timeout_ms = timeout_ms;
  }
  Ok(config)
}

fn read_trigger_file(path: &Path) -> Result<TriggerInput> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read trigger file: {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse trigger file: {}", path.display()))
}

fn report(errors: &ValidationErrors) {
  for error in errors {
    eprintln!("  {}: {}", error.path, error.message);
  }
}

fn validate(path: &Path) -> Result<()> {
  let input = read_trigger_file(path)?;
  match validate_trigger(&input) {
    Ok(document) => {
      println!("{}", serde_json::to_string_pretty(&document)?);
      Ok(())
    }
    Err(errors) => {
      report(&errors);
      bail!("{} validation error(s) in {}", errors.len(), path.display())
    }
  }
}

/// Prints the route the user would be taken to.
struct PrintNavigator;

impl Navigator for PrintNavigator {
  fn navigate(&self, route: &str) {
    println!("{}", route);
  }
}

/// Forwards form notices to the log.
struct LogNotifier;

impl FormNotifier for LogNotifier {
  fn notify(&self, notice: FormNotice) {
    match notice {
      FormNotice::StepBlocked { step, message } => info!(step = %step, "{}", message),
      FormNotice::SubmitBlocked {
        error_count,
        message,
      } => info!(error_count, "{}", message),
      FormNotice::Submitted { trigger_id, kind } => {
        info!(trigger_id = %trigger_id, kind = ?kind, "trigger submitted")
      }
      FormNotice::SubmitFailed { message } => info!("submit failed: {}", message),
    }
  }
}

fn collaborators(client: Arc<HttpMutationClient>) -> Collaborators {
  Collaborators {
    client,
    cache: Arc::new(QueryCache::default()),
    navigator: Arc::new(PrintNavigator),
  }
}

async fn create(config: ClientConfig, organization_id: Uuid, path: &Path) -> Result<()> {
  let input = read_trigger_file(path)?;
  let route_prefix = config.route_prefix.clone();
  let client = Arc::new(HttpMutationClient::new(config)?);

  let mut form = TriggerForm::create(organization_id, collaborators(client))
    .with_notifier(LogNotifier)
    .with_route_prefix(route_prefix);
  form.set_values(input);

  run_form(&mut form).await
}

async fn update(config: ClientConfig, trigger_id: Uuid, path: &Path) -> Result<()> {
  let input = read_trigger_file(path)?;
  let route_prefix = config.route_prefix.clone();
  let client = Arc::new(HttpMutationClient::new(config)?);

  let existing = client
    .fetch(trigger_id)
    .await
    .with_context(|| format!("failed to load trigger {}", trigger_id))?;
  info!(trigger_id = %existing.id, name = %existing.name, "loaded trigger");

  let mut form = TriggerForm::edit(existing, collaborators(client))
    .with_notifier(LogNotifier)
    .with_route_prefix(route_prefix);
  form.set_values(input);

  run_form(&mut form).await
}

/// Walk the wizard step by step, then submit.
async fn run_form<N: FormNotifier>(form: &mut TriggerForm<N>) -> Result<()> {
  while !form.steps().is_last() {
    let step = form.current_step();
    if !form.go_to_next_step() {
      report(form.errors());
      bail!("step '{}' has errors", step.title());
    }
  }

  match form.submit().await {
    SubmitOutcome::Saved { .. } => Ok(()),
    SubmitOutcome::Invalid(errors) => {
      report(&errors);
      bail!("{} validation error(s)", errors.len())
    }
    SubmitOutcome::Busy => bail!("a submission is already in progress"),
    SubmitOutcome::Failed { message } => bail!(message),
  }
}
