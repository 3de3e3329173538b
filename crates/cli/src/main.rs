//! `sf`: the Cartwheel storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! sf categories
//! sf category smartphones
//! sf search "phone case"
//!
//! # Cart
//! sf cart add 12 --quantity 2
//! sf cart show
//!
//! # Sign in, pick an address, pay
//! sf auth login -e shopper@example.com
//! sf address list
//! sf checkout --address 65f1c0
//!
//! # Orders
//! sf orders list --status pending
//! sf orders cancel ORD-1001
//! ```
//!
//! Configuration comes from `STOREFRONT_*` environment variables (see
//! `cartwheel_storefront::config`). Logs go to stderr; set `RUST_LOG` to
//! change the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::{
    AddressAction, AuthAction, CartAction, CliError, OrdersAction, ProfileAction,
};

#[derive(Parser)]
#[command(name = "sf")]
#[command(author, version, about = "Cartwheel storefront CLI")]
struct Cli {
    /// Print machine-readable JSON instead of text where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,
    /// List the products in a category
    Category {
        /// Category slug, e.g. `smartphones`
        slug: String,
    },
    /// Show one product
    Product {
        /// Product id
        id: u64,
    },
    /// List products page by page
    Products {
        #[arg(long, default_value_t = 30)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Search the catalog
    Search {
        /// Search term
        term: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in, sign up and manage the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage saved delivery addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Pay for the cart
    Checkout {
        /// Address id to deliver to (defaults to the default address)
        #[arg(long)]
        address: Option<String>,
        /// Only print the totals
        #[arg(long)]
        summary: bool,
    },
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Profile and account settings
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Dump the whole client state as JSON
    State,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_storefront=info,cartwheel_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        report(&e);
        std::process::exit(1);
    }
}

#[allow(clippy::print_stderr)]
fn report(error: &CliError) {
    eprintln!("error: {}", error.user_message());
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let storefront = commands::open()?;
    let json = cli.json;

    match cli.command {
        Commands::Categories => commands::catalog::categories(&storefront, json).await,
        Commands::Category { slug } => {
            commands::catalog::category(&storefront, &slug, json).await
        }
        Commands::Product { id } => commands::catalog::product(&storefront, id, json).await,
        Commands::Products { limit, skip } => {
            commands::catalog::products(&storefront, limit, skip, json).await
        }
        Commands::Search { term } => commands::catalog::search(&storefront, &term, json).await,
        Commands::Cart { action } => commands::cart::run(&storefront, action, json).await,
        Commands::Auth { action } => commands::auth::run(&storefront, action, json).await,
        Commands::Address { action } => commands::address::run(&storefront, action, json).await,
        Commands::Checkout { address, summary } => {
            commands::checkout::run(&storefront, address, summary, json).await
        }
        Commands::Orders { action } => commands::orders::run(&storefront, action, json).await,
        Commands::Profile { action } => commands::profile::run(&storefront, action, json).await,
        Commands::State => commands::print_json(&storefront.state().await),
    }
}
