//! Clap argument types.

use clap::{Parser, ValueEnum};

use userctl::models::{NewUser, PageableQuery};

/// Client for a user-management REST API.
#[derive(Parser, Debug)]
#[command(name = "userctl", version = userctl::constants::VERSION)]
pub struct Cli {
    /// Base URL of the API (overrides config and environment).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format.
    #[arg(long, global = true, default_value = "terminal")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List users, optionally one page at a time.
    List(ListArgs),

    /// Fetch a single user by id.
    Get(GetArgs),

    /// Create a user.
    Create(Box<CreateArgs>),

    /// Authenticate and print the returned token.
    Login(LoginArgs),

    /// Print the resolved configuration.
    Config,

    /// Print version and build information.
    Version,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled text for humans.
    Terminal,
    /// Pretty-printed JSON as returned by the API.
    Json,
}

/// Arguments for the `list` subcommand.
///
/// Paging flags must be given together; the client rejects a partial set.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Page number (0-based on most backends).
    #[arg(long)]
    pub page: Option<u32>,

    /// Users per page.
    #[arg(long)]
    pub offset: Option<u32>,

    /// Field to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order, e.g. asc or desc.
    #[arg(long)]
    pub order: Option<String>,
}

impl ListArgs {
    pub fn query(&self) -> PageableQuery {
        PageableQuery {
            page: self.page,
            offset: self.offset,
            sort: self.sort.clone(),
            order: self.order.clone(),
        }
    }
}

/// Arguments for the `get` subcommand.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Numeric user id.
    #[arg(allow_negative_numbers = true)]
    pub id: i64,
}

/// Arguments for the `create` subcommand.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub email: String,

    /// Only sent together with --last-name and --authority.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Only sent together with --first-name and --authority.
    #[arg(long)]
    pub last_name: Option<String>,

    /// Role identifier; unknown values fall back to the default role.
    #[arg(long)]
    pub authority: Option<String>,
}

impl CreateArgs {
    pub fn new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            authority: self.authority.clone(),
        }
    }
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,

    /// Password (prefer the environment variable to keep it out of shell history).
    #[arg(long, env = userctl::constants::ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paged_list() {
        let cli = Cli::try_parse_from([
            "userctl", "list", "--page", "2", "--offset", "10", "--sort", "id", "--order", "asc",
        ])
        .unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.query(), PageableQuery::new(2, 10, "id", "asc"));
    }

    #[test]
    fn list_without_flags_is_unpaged() {
        let cli = Cli::try_parse_from(["userctl", "list"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(args.query().is_empty());
    }

    #[test]
    fn get_rejects_non_integer_id() {
        assert!(Cli::try_parse_from(["userctl", "get", "abc"]).is_err());
        assert!(Cli::try_parse_from(["userctl", "get", "4.2"]).is_err());
        assert!(Cli::try_parse_from(["userctl", "get", "42"]).is_ok());
    }

    #[test]
    fn create_maps_optional_profile() {
        let cli = Cli::try_parse_from([
            "userctl", "create", "--username", "a", "--password", "b", "--email", "c@d.e",
            "--first-name", "F", "--last-name", "L", "--authority", "ADMIN",
        ])
        .unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };
        let user = args.new_user();
        assert_eq!(user.first_name.as_deref(), Some("F"));
        assert_eq!(user.authority.as_deref(), Some("ADMIN"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userctl", "get", "1", "--format", "json", "--api-url", "http://x", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
        assert_eq!(cli.verbose, 2);
    }
}
