pub mod client;
pub mod utils;

use clap::{Parser, Subcommand};

use self::client::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "ghlctl")]
#[command(about = "Operator CLI for the GHL Dashboard API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "GHL_API_URL",
        default_value = "http://localhost:3000",
        help = "Dashboard API base URL"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Update auto-sync settings for a base's integration")]
    Settings {
        #[arg(help = "Base identifier")]
        base_id: String,
        #[arg(long, help = "Enable auto-sync")]
        enabled: bool,
        #[arg(long, help = "Sync interval in minutes (1, 5, 15, 30, 60)")]
        interval: Option<i64>,
    },

    #[command(about = "Show current auto-sync settings")]
    ShowSettings {
        #[arg(help = "Base identifier")]
        base_id: String,
    },

    #[command(about = "Count contacts in the connected GHL location")]
    ContactsCount {
        #[arg(help = "Base identifier")]
        base_id: String,
    },

    #[command(about = "Disconnect a base's GHL integration")]
    Disconnect {
        #[arg(help = "Base identifier")]
        base_id: String,
    },

    #[command(about = "Check server health")]
    Health,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.server)?;

    let (response, summary) = match cli.command {
        Commands::Settings { base_id, enabled, interval } => {
            let response = client.update_settings(&base_id, enabled, interval).await?;
            (response, format!("Updated auto-sync settings for {}", base_id))
        }
        Commands::ShowSettings { base_id } => {
            let response = client.get_settings(&base_id).await?;
            let summary = utils::describe_settings(&base_id, &response.body);
            (response, summary)
        }
        Commands::ContactsCount { base_id } => {
            let response = client.contacts_count(&base_id).await?;
            let total = response.body.get("total").and_then(|v| v.as_u64()).unwrap_or(0);
            (response, format!("{} contacts", total))
        }
        Commands::Disconnect { base_id } => {
            let response = client.disconnect(&base_id).await?;
            (response, format!("Disconnected GHL integration for {}", base_id))
        }
        Commands::Health => {
            let response = client.health().await?;
            (response, "Server healthy".to_string())
        }
    };

    utils::output_response(output_format, &response, &summary)
}
