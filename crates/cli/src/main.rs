//! Lina Optic CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! lina-optic-cli migrate
//!
//! # Create an admin user
//! lina-optic-cli admin create -u admin -e admin@linaoptic.com -p <password> -r super_admin
//!
//! # Seed the catalog from a YAML file
//! lina-optic-cli seed products fixtures/catalog.yaml --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create admin users
//! - `seed products` - Load catalog fixtures

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lina-optic-cli")]
#[command(author, version, about = "Lina Optic CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with fixtures
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Login username
        #[arg(short, long)]
        username: String,
        /// Contact email
        #[arg(short, long)]
        email: String,
        /// Password (hashed with argon2 before storage)
        #[arg(short, long)]
        password: String,
        /// Role: admin or super_admin
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load catalog products from a YAML file
    Products {
        /// Path to the YAML fixture file
        file: String,
        /// Delete existing products first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Admin {
            action:
                AdminAction::Create {
                    username,
                    email,
                    password,
                    role,
                },
        } => commands::admin::create(&username, &email, &password, &role).await,
        Commands::Seed {
            target: SeedTarget::Products { file, clear },
        } => commands::seed::products(&file, clear).await,
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
