//! GoMarketplace CLI - Inspect and edit the stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! gm-cli show
//!
//! # Add one unit of a product
//! gm-cli add --id p1 --title "Green Tea" --image-url https://cdn.example.com/tea.png --price 4.50
//!
//! # Adjust quantities
//! gm-cli increment p1
//! gm-cli decrement p1
//!
//! # Empty the cart
//! gm-cli clear
//! ```
//!
//! # Commands
//!
//! - `show` - Print the stored line items
//! - `add` - Add one unit of a product
//! - `increment` / `decrement` - Change the quantity of a line item
//! - `clear` - Remove every line item

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(short, long)]
        id: String,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price (e.g. 4.50)
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit to a line item
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit from a line item
    Decrement {
        /// Product ID
        id: String,
    },
    /// Remove every line item
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cart=info,gm_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::cart::CommandError> {
    let provider = commands::cart::open().await?;

    match cli.command {
        Commands::Show => commands::cart::show(&provider),
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&provider, &id, &title, &image_url, price).await?,
        Commands::Increment { id } => commands::cart::increment(&provider, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&provider, &id).await?,
        Commands::Clear => commands::cart::clear(&provider).await?,
    }
    Ok(())
}
