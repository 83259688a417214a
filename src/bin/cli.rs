use anyhow::Context;
use bookswap::bookswap_db::PgStore;
use bookswap::cli::create_user;
use bookswap::cli::seeder::{SeedConfig, reset_store, seed_store};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bookswap-cli")]
#[command(about = "Bookswap CLI - Administrative tools for Bookswap", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users, books and tags
    Seed {
        /// Number of users to create
        #[arg(long, default_value = "10")]
        users: usize,

        /// Number of books per user
        #[arg(long, default_value = "3")]
        books_per_user: usize,

        /// Number of tags to create
        #[arg(long, default_value = "8")]
        tags: usize,
    },
    /// Delete ALL users, books, tags and exchange requests, not only seeded ones
    ResetDb {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let store = PgStore::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser { username, password } => {
            handle_create_user(&store, username, password).await
        }
        Commands::Seed {
            users,
            books_per_user,
            tags,
        } => {
            let config = SeedConfig {
                users,
                books_per_user,
                tags,
            };
            seed_store(&store, config)
                .await
                .context("Error seeding database")?;
            Ok(())
        }
        Commands::ResetDb { yes } => handle_reset_db(&store, yes).await,
    }
}

async fn handle_reset_db(store: &PgStore, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("This deletes every account and book in the database. Continue?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Aborted, nothing was deleted");
            return Ok(());
        }
    }

    reset_store(store).await.context("Error resetting database")
}

async fn handle_create_user(
    store: &PgStore,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user = create_user(store, &username, &password)
        .await
        .context("Error creating user")?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Username: {}", user.username);
    Ok(())
}
