//! Command-line interface for the client.

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::category::Category;
use crate::client::FreshBooks;
use crate::config::{
    ClientConfig, ENV_ACCOUNT, ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOKEN, HTTP_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::types::ListOptions;

/// FreshBooks client - manage account resources over the XML API.
#[derive(Parser)]
#[command(name = "freshbooks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Account name, i.e. the host label of {account}.freshbooks.com
    #[arg(long, global = true, env = ENV_ACCOUNT)]
    pub account: Option<String>,

    /// Full endpoint URL (overrides --account)
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// API authentication token
    #[arg(long, global = true, env = ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage expense categories.
    #[command(subcommand)]
    Category(CategoryCommand),
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category.
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Show a category.
    Get {
        /// Category identifier
        id: String,
    },
    /// Change fields of a category.
    Update {
        /// Category identifier
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a category.
    Delete {
        /// Category identifier
        id: String,
    },
    /// List all categories.
    List,
}

/// Field values for create and update.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Category name
    #[arg(long)]
    pub name: Option<String>,

    /// Identifier of the first tax
    #[arg(long)]
    pub tax1: Option<String>,

    /// Identifier of the second tax
    #[arg(long)]
    pub tax2: Option<String>,

    /// Identifier of the parent category
    #[arg(long)]
    pub parent_id: Option<String>,

    /// Any other field, as KEY=VALUE (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
}

impl FieldArgs {
    fn apply(self, category: &mut Category) {
        let named = [
            ("name", self.name),
            ("tax1", self.tax1),
            ("tax2", self.tax2),
            ("parent_id", self.parent_id),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                category.set_field(key, value);
            }
        }
        for (key, value) in self.extra {
            category.set_field(key, value);
        }
    }
}

/// Parse a `KEY=VALUE` pair. The value may be empty; the key must be a
/// writable category field name.
fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    Category::SCHEMA
        .check_field_name(key)
        .map_err(|e| e.to_string())?;
    Ok((key.to_string(), value.to_string()))
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = client_config(&cli)?;
    let client = FreshBooks::from_config(&config)?;
    tracing::debug!(?config, "client configured");

    match cli.command {
        Commands::Category(command) => category_command(&client, command).await,
    }
}

/// Resolve connection settings.
///
/// clap has already merged each flag over its environment variable, so the
/// parsed values stand in for the environment in [`ClientConfig::from_lookup`].
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    ClientConfig::from_lookup(|key| match key {
        ENV_ACCOUNT => cli.account.clone(),
        ENV_API_URL => cli.api_url.clone(),
        ENV_TOKEN => cli.token.clone(),
        ENV_TIMEOUT_SECS => Some(cli.timeout.to_string()),
        _ => None,
    })
}

/// Execute a category subcommand.
async fn category_command(client: &FreshBooks, command: CategoryCommand) -> Result<()> {
    let pb = spinner();
    let mut category = client.category();

    let outcome = match command {
        CategoryCommand::Create { fields } => {
            pb.set_message("Creating category...");
            fields.apply(&mut category);
            category.create().await.map(|c| vec![c.clone()])
        }
        CategoryCommand::Get { id } => {
            pb.set_message(format!("Fetching category {id}..."));
            category.get(id).await.map(|c| vec![c.clone()])
        }
        CategoryCommand::Update { id, fields } => {
            pb.set_message(format!("Updating category {id}..."));
            category.set_id(id);
            fields.apply(&mut category);
            category.update().await.map(|c| vec![c.clone()])
        }
        CategoryCommand::Delete { id } => {
            pb.set_message(format!("Deleting category {id}..."));
            category.set_id(id);
            category.delete().await.map(|_| Vec::new())
        }
        CategoryCommand::List => {
            pb.set_message("Listing categories...");
            category.list(&ListOptions::default()).await
        }
    };

    pb.finish_and_clear();
    let categories = outcome?;

    if categories.is_empty() {
        println!("{}", style("Done.").green().bold());
    }
    for category in &categories {
        print_category(category);
    }

    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_category(category: &Category) {
    println!(
        "{} {}",
        style("Category").bold(),
        style(category.id().unwrap_or("?")).cyan()
    );
    for (name, value) in Category::SCHEMA.ordered(category.fields()) {
        println!("  {name}: {}", style(value).green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_category_list() {
        let cli = Cli::parse_from(["freshbooks", "--account", "acme", "category", "list"]);

        assert_eq!(cli.account.as_deref(), Some("acme"));
        assert!(matches!(cli.command, Commands::Category(CategoryCommand::List)));
    }

    #[test]
    fn test_cli_parse_create_with_fields() {
        let cli = Cli::parse_from([
            "freshbooks",
            "category",
            "create",
            "--name",
            "Travel",
            "--field",
            "colour=green",
            "--field",
            "note=",
        ]);

        let Commands::Category(CategoryCommand::Create { fields }) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(fields.name.as_deref(), Some("Travel"));
        assert_eq!(
            fields.extra,
            vec![
                ("colour".to_string(), "green".to_string()),
                ("note".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_cli_parse_update() {
        let cli = Cli::parse_from(["freshbooks", "category", "update", "42", "--tax1", "3"]);

        let Commands::Category(CategoryCommand::Update { id, fields }) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(id, "42");
        assert_eq!(fields.tax1.as_deref(), Some("3"));
    }

    #[test]
    fn test_parse_key_value_rejects_missing_separator() {
        assert!(parse_key_value("colour").is_err());
        assert!(parse_key_value("=green").is_err());
        assert_eq!(
            parse_key_value("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }

    #[test]
    fn test_parse_key_value_rejects_unwritable_keys() {
        for raw in ["bad name=x", "category_id=7", "a<b=c"] {
            assert!(parse_key_value(raw).is_err(), "{raw}");
        }
        let err = parse_key_value("category_id=7").unwrap_err();
        assert!(err.contains("reserved for the record identifier"));
    }

    #[test]
    fn test_client_config_from_account_and_timeout() {
        let cli = Cli::parse_from([
            "freshbooks",
            "--account",
            "acme",
            "--token",
            "secret",
            "--timeout",
            "7",
            "category",
            "list",
        ]);

        let config = client_config(&cli).unwrap();
        assert_eq!(config.api_url, "https://acme.freshbooks.com/api/2.1/xml-in");
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_client_config_prefers_api_url() {
        let cli = Cli::parse_from([
            "freshbooks",
            "--account",
            "acme",
            "--api-url",
            "http://127.0.0.1:9/xml-in",
            "--token",
            "secret",
            "category",
            "list",
        ]);

        let config = client_config(&cli).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9/xml-in");
    }
}
