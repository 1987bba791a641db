mod admin;
mod catalog;
mod render;

use clap::{Parser, Subcommand};

use joystick_client::StoreClient;
use joystick_core::load_app_config;

#[derive(Debug, Parser)]
#[command(name = "joystick")]
#[command(about = "Joystick: PC Paradise — storefront catalog and admin portal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the public catalog
    Catalog {
        /// Case-insensitive search over name, genre, and platform
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product in detail
    Show {
        id: i64,
        /// Return to the admin table afterwards instead of ending here
        #[arg(long)]
        from_admin: bool,
    },
    /// Back-office product management
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Debug, Subcommand)]
enum AdminCommands {
    /// Print the product table with active sale tiers
    List,
    /// Create a product (platform is always PC)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        price: f64,
        /// Defaults to a random 5-24 stock level when omitted
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Edit fields on an existing product
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a product (asks for confirmation unless --yes)
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Apply or clear a discount tier
    Sale {
        id: i64,
        /// One of 20, 30, or 50
        #[arg(long, conflicts_with = "clear")]
        percent: Option<u32>,
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let client = StoreClient::new(&config)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { search } => catalog::run_catalog(client, search).await,
        Commands::Show { id, from_admin } => catalog::run_show(client, id, from_admin).await,
        Commands::Admin { command } => match command {
            AdminCommands::List => admin::run_list(client).await,
            AdminCommands::Add {
                name,
                genre,
                price,
                quantity,
                description,
                image_url,
            } => admin::run_add(client, name, genre, price, quantity, description, image_url).await,
            AdminCommands::Edit {
                id,
                name,
                genre,
                price,
                quantity,
                description,
                image_url,
            } => {
                admin::run_edit(
                    client,
                    id,
                    name,
                    genre,
                    price,
                    quantity,
                    description,
                    image_url,
                )
                .await
            }
            AdminCommands::Delete { id, yes } => admin::run_delete(client, id, yes).await,
            AdminCommands::Sale { id, percent, clear } => {
                admin::run_sale(client, id, percent, clear).await
            }
        },
    }
}
