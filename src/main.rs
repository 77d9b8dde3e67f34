//! userctl — command-line client for a user-management REST API.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userctl::config;
use userctl::constants;
use userctl::env;
use userctl::models;
use userctl::output;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cli::args::{Cli, Command, CreateArgs, GetArgs, ListArgs, LoginArgs, OutputFormat};
use config::Config;
use env::Env;
use models::Credentials;
use output::OutputRenderer;
use output::json::JsonRenderer;
use output::terminal::TerminalRenderer;
use userctl::UserClient;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let renderer: Box<dyn OutputRenderer> = match cli.format {
        OutputFormat::Terminal => Box::new(TerminalRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    };

    match cli.command {
        Command::Version => run_version(),
        Command::Config => run_config(&load_config(cli.api_url, cli.timeout)?),
        Command::List(args) => {
            let config = load_config(cli.api_url, cli.timeout)?;
            run_list(&config, args, renderer.as_ref()).await
        }
        Command::Get(args) => {
            let config = load_config(cli.api_url, cli.timeout)?;
            run_get(&config, args, renderer.as_ref()).await
        }
        Command::Create(args) => {
            let config = load_config(cli.api_url, cli.timeout)?;
            run_create(&config, *args, renderer.as_ref()).await
        }
        Command::Login(args) => {
            let config = load_config(cli.api_url, cli.timeout)?;
            run_login(&config, args, renderer.as_ref()).await
        }
    }
}

/// Resolve config files and environment, then apply CLI flags on top.
fn load_config(api_url: Option<String>, timeout: Option<u64>) -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let mut config = Config::load(Some(&cwd), &Env::real()).context("failed to load config")?;

    // Layer 1: CLI flags
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    if let Some(secs) = timeout {
        if secs == 0 {
            bail!("--timeout must be at least 1 second");
        }
        config.api.timeout_secs = secs;
    }

    tracing::debug!(base_url = %config.api.base_url, "resolved configuration");
    Ok(config)
}

fn client(config: &Config) -> Result<UserClient> {
    UserClient::from_config(config).context("failed to set up API client")
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Print the resolved configuration as TOML.
fn run_config(config: &Config) -> Result<()> {
    let rendered = config.to_toml().context("failed to render config")?;
    print!("{rendered}");
    if let Some(path) = Config::global_config_path() {
        eprintln!("# global config: {}", path.display());
    }
    Ok(())
}

async fn run_list(config: &Config, args: ListArgs, renderer: &dyn OutputRenderer) -> Result<()> {
    let query = args.query();
    let users = client(config)?
        .list_users(Some(&query))
        .await
        .context("failed to list users")?;
    print!("{}", with_newline(renderer.render_users(&users)));
    Ok(())
}

async fn run_get(config: &Config, args: GetArgs, renderer: &dyn OutputRenderer) -> Result<()> {
    let user = client(config)?
        .get_user(args.id)
        .await
        .with_context(|| format!("failed to fetch user {}", args.id))?;
    print!("{}", with_newline(renderer.render_user(&user)));
    Ok(())
}

async fn run_create(config: &Config, args: CreateArgs, renderer: &dyn OutputRenderer) -> Result<()> {
    let user = client(config)?
        .create_user(&args.new_user())
        .await
        .with_context(|| format!("failed to create user '{}'", args.username))?;
    print!("{}", with_newline(renderer.render_user(&user)));
    Ok(())
}

async fn run_login(config: &Config, args: LoginArgs, renderer: &dyn OutputRenderer) -> Result<()> {
    let Some(password) = args.password else {
        bail!(
            "no password given: pass --password or set {}",
            constants::ENV_PASSWORD
        );
    };
    let credentials = Credentials::new(args.username, password);
    let token = client(config)?
        .authenticate(&credentials)
        .await
        .with_context(|| format!("failed to authenticate '{}'", credentials.username))?;
    print!("{}", with_newline(renderer.render_token(&token)));
    Ok(())
}

/// JSON renderers return no trailing newline; terminal ones do.
fn with_newline(mut rendered: String) -> String {
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}
