use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use tracing::info;

use ground::bias::BiasView;
use ground::categorize::CategoryFilter;
use ground::client::{ApiClient, ClientSession, FetchState};
use ground::config::Config;
use ground::db::models::ArticleQuery;
use ground::db::Database;
use ground::feeds::FeedClient;
use ground::output::terminal;
use ground::pipeline::ingest::{self, IngestOptions};

/// Ground: bias-aware news aggregation.
///
/// Pulls articles from news feeds, tags each with a category and a
/// left/center/right bias estimate, and serves them over a JSON API.
/// The reader commands (headlines, sources, scores) browse a running server.
#[derive(Parser)]
#[command(name = "ground", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Add the default news outlets (skips ones already present)
    Seed,

    /// Create an account directly in the database
    CreateUser {
        email: String,

        #[arg(long)]
        password: String,

        /// Allow managing sources and triggering fetches over the API
        #[arg(long)]
        superuser: bool,
    },

    /// Fetch every active feed and store new articles
    Fetch {
        /// Number of feeds to download in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Max entries per feed (default: GROUND_MAX_ENTRIES or 50)
        #[arg(long)]
        max_entries: Option<usize>,
    },

    /// Run the API server
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "8000")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Don't fetch feeds on a timer
        #[arg(long)]
        no_schedule: bool,
    },

    /// Show the latest headlines from the server
    Headlines {
        /// Category or navigation label (e.g. "Politics", "Business & Markets")
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        source_id: Option<i64>,

        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// List news sources
    Sources,

    /// Show live sports scores
    Scores {
        /// Randomised demo matches instead of the live board
        #[arg(long)]
        demo: bool,
    },

    /// Create a reader account on the server
    Signup {
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in and remember the access token
    Login {
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the reader theme, or switch between dark and light
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Show the bias label and left/center/right split for a score
    Bias {
        /// Score from -100 (left) to 100 (right); omit for "unknown"
        #[arg(allow_negative_numbers = true)]
        score: Option<f64>,
    },

    /// Show system status (DB stats, last fetch)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ground=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Ground database...");
            let db = ground::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext steps:");
            println!("  ground seed    # add the default news outlets");
            println!("  ground fetch   # pull their feeds");
        }

        Commands::Seed => {
            let db = ground::db::open_sqlite(&config.db_path)?;
            let (created, skipped) = ground::db::seed::seed_sources(db.as_ref()).await?;
            println!(
                "{} {created} sources added, {skipped} already present",
                "Seeded:".green().bold()
            );
        }

        Commands::CreateUser {
            email,
            password,
            superuser,
        } => {
            let db = ground::db::open_sqlite(&config.db_path)?;
            create_user(db.as_ref(), &email, &password, superuser).await?;
        }

        Commands::Fetch {
            concurrency,
            max_entries,
        } => {
            let db = ground::db::open_sqlite(&config.db_path)?;
            let client = FeedClient::new()?;
            let options = IngestOptions {
                concurrency,
                max_entries: max_entries.unwrap_or(config.max_entries_per_feed),
                show_progress: true,
            };
            let summary = ingest::run(db.as_ref(), &client, &options).await?;
            terminal::display_ingest_summary(&summary);
        }

        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            bind,
            no_schedule,
        } => {
            let db = ground::db::initialize_sqlite(&config.db_path)?;
            ground::web::run_server(config, db, port, &bind, !no_schedule).await?;
        }

        Commands::Headlines {
            category,
            source_id,
            limit,
        } => {
            let filter = match category.as_deref() {
                Some(raw) => CategoryFilter::parse(raw).with_context(|| {
                    let labels: Vec<&str> =
                        CategoryFilter::NAV.iter().map(|f| f.label()).collect();
                    format!("Unknown category '{raw}'. Try one of: {}", labels.join(", "))
                })?,
                None => CategoryFilter::All,
            };
            let session = ClientSession::load(&config.session_path);
            let client = ApiClient::new(&config.api_url, session.token())?;
            let query = ArticleQuery {
                limit,
                category: filter.category().map(|c| c.as_str().to_string()),
                source_id,
                ..Default::default()
            };

            let spinner = spinner("Loading headlines...");
            let state = FetchState::from_result(client.articles(&query).await);
            spinner.finish_and_clear();

            terminal::display_headlines(filter, &state, session.theme(), Utc::now());
        }

        Commands::Sources => {
            let session = ClientSession::load(&config.session_path);
            let client = ApiClient::new(&config.api_url, session.token())?;
            let state = FetchState::from_result(client.sources().await);
            terminal::display_sources(&state);
        }

        Commands::Scores { demo } => {
            let session = ClientSession::load(&config.session_path);
            let client = ApiClient::new(&config.api_url, session.token())?;
            let spinner = spinner("Loading live scores...");
            let state = FetchState::from_result(client.live_scores(demo).await);
            spinner.finish_and_clear();
            terminal::display_live_scores(&state, session.theme());
        }

        Commands::Signup { email, password } => {
            let client = ApiClient::new(&config.api_url, None)?;
            let user = client.signup(&email, &password).await?;
            println!("Account created for {}", user.email.bold());
            println!("Sign in with: ground login {} --password ...", user.email);
        }

        Commands::Login { email, password } => {
            let mut session = ClientSession::load(&config.session_path);
            let client = ApiClient::new(&config.api_url, None)?;
            let token = client.login(&email, &password).await?;
            session.set_token(&token.access_token)?;

            let client = ApiClient::new(&config.api_url, session.token())?;
            let me = client.me().await?;
            let role = if me.is_superuser { " (superuser)" } else { "" };
            println!("Signed in as {}{role}", me.email.bold());
        }

        Commands::Logout => {
            let mut session = ClientSession::load(&config.session_path);
            if session.is_logged_in() {
                session.logout()?;
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
        }

        Commands::Theme { toggle } => {
            let mut session = ClientSession::load(&config.session_path);
            let theme = if toggle {
                session.toggle_theme()?
            } else {
                session.theme()
            };
            println!("Theme: {}", theme.to_string().bold());
        }

        Commands::Bias { score } => {
            let score = score.filter(|s| s.is_finite());
            terminal::display_bias(&BiasView::from_score(score));
        }

        Commands::Status => {
            let db: Arc<dyn Database> = match ground::db::open_sqlite(&config.db_path) {
                Ok(db) => db,
                Err(_) => {
                    println!("Database: not initialized");
                    println!("\nRun `ground init` to set up the database.");
                    return Ok(());
                }
            };
            ground::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn create_user(db: &dyn Database, email: &str, password: &str, superuser: bool) -> Result<()> {
    let email = email.trim();
    if !email.contains('@') {
        anyhow::bail!("'{email}' doesn't look like an email address");
    }
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    if db.get_user_by_email(email).await?.is_some() {
        anyhow::bail!("A user with email {email} already exists");
    }

    let hashed = ground::auth::hash_password_async(password.to_string()).await?;
    let Some(user) = db.create_user(email, &hashed, superuser).await? else {
        anyhow::bail!("A user with email {email} already exists");
    };
    let role = if user.is_superuser { "superuser" } else { "user" };
    println!("Created {role} {} (id {})", user.email.bold(), user.id);
    Ok(())
}
