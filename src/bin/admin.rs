//! CLI administration tool for parabens.
//!
//! Works directly on the shortlink snapshot and the preview image cache,
//! using the same environment configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # List all shortlinks
//! cargo run --bin admin -- links list
//!
//! # Create (or look up) the shortlink for a greeting path
//! cargo run --bin admin -- links create "/aniversario/Ana_Maria"
//!
//! # Show where a code points
//! cargo run --bin admin -- links resolve aB3dE9z
//!
//! # Pre-render a preview image
//! cargo run --bin admin -- og render "Feliz Aniversário, Ana Maria"
//! ```
//!
//! Run it while the server is stopped: both processes rewrite the same snapshot
//! file and do not coordinate.

use parabens::config::{self, Config};
use parabens::server::{Services, build_services};
use parabens::utils::message::{og_cache_key, og_image_text_prefix, og_image_url};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing parabens.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage shortlinks
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Manage preview images
    Og {
        #[command(subcommand)]
        action: OgAction,
    },
}

/// Shortlink subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all shortlinks
    List,

    /// Create a shortlink, or show the existing one
    Create {
        /// Greeting path, e.g. "/formatura/Carlos"
        path: String,
    },

    /// Show the path behind a code
    Resolve {
        /// Seven-character short code
        code: String,
    },
}

/// Preview image subcommands.
#[derive(Subcommand)]
enum OgAction {
    /// Render the preview image for a text into the cache
    Render {
        /// Text as it would appear in `/og-image.png?text=`
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let services = build_services(&config);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &config, &services).await?,
        Commands::Og { action } => handle_og_action(action, &config, &services).await?,
    }

    Ok(())
}

/// Dispatches shortlink commands.
async fn handle_links_action(
    action: LinksAction,
    config: &Config,
    services: &Services,
) -> Result<()> {
    match action {
        LinksAction::List => list_links(config, services).await,
        LinksAction::Create { path } => create_link(config, services, path).await,
        LinksAction::Resolve { code } => resolve_link(config, services, code).await,
    }
}

/// Lists all shortlinks ordered by code.
///
/// # Output Format
///
/// ```text
/// Shortlinks
///
///   Code     Path
///   ----------------------------------------------------------------
///   aB3dE9z  /aniversario/Ana_Maria
/// ```
async fn list_links(config: &Config, services: &Services) -> Result<()> {
    println!("{}", "Shortlinks".bright_blue().bold());
    println!();

    let entries = services
        .shortlinks
        .entries()
        .await
        .with_context(|| {
            format!(
                "Failed to load {}",
                config.shortlink_db_path.display()
            )
        })?;

    if entries.is_empty() {
        println!("{}", "  No shortlinks found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <path>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<8} {}",
        "Code".bright_white().bold(),
        "Path".bright_white().bold()
    );
    println!("  {}", "-".repeat(64).bright_black());

    for (code, path) in &entries {
        println!("  {:<8} {}", code.cyan(), path);
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Creates the shortlink for `path`, or reports the one that already exists.
async fn create_link(config: &Config, services: &Services, path: String) -> Result<()> {
    let trimmed = path.trim();
    if trimmed.trim_start_matches('/').is_empty() {
        anyhow::bail!("Path must carry a message");
    }

    let full_path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    let link = services
        .shortlinks
        .get_or_create(&full_path)
        .await
        .context("Failed to create shortlink")?;

    if link.created {
        println!("{}", "Shortlink created".green().bold());
    } else {
        println!("{}", "Shortlink already exists".yellow());
    }
    println!();
    println!("  Code:  {}", link.code.bright_yellow().bold());
    println!("  Path:  {}", link.path.cyan());
    println!(
        "  Short: {}",
        format!("{}/s/{}", config.base_url(), link.code).bright_white()
    );
    println!();

    Ok(())
}

/// Prints the destination of `code`.
async fn resolve_link(config: &Config, services: &Services, code: String) -> Result<()> {
    let path = services
        .shortlinks
        .resolve(&code)
        .await
        .with_context(|| format!("Cannot resolve '{code}'"))?;

    println!("  {} -> {}", code.cyan(), path);
    println!("  {}", format!("{}{}", config.base_url(), path).bright_black());

    Ok(())
}

/// Dispatches preview image commands.
async fn handle_og_action(action: OgAction, config: &Config, services: &Services) -> Result<()> {
    match action {
        OgAction::Render { text } => render_image(config, services, text).await,
    }
}

/// Renders one preview image through the render queue.
///
/// Cached images are reported without rendering again.
async fn render_image(config: &Config, services: &Services, text: String) -> Result<()> {
    let text = og_image_text_prefix(&text);
    if text.is_empty() {
        anyhow::bail!("Text must not be empty");
    }

    let key = og_cache_key(&text);
    let cached = services.render_queue.cache().contains(&key).await;

    let path = services
        .render_queue
        .render(&key, &text)
        .await
        .with_context(|| format!("Failed to render preview image for '{text}'"))?;

    if cached {
        println!("{}", "Preview image already cached".yellow());
    } else {
        println!("{}", "Preview image rendered".green().bold());
    }
    println!();
    println!("  Key:  {}", key.cyan());
    println!("  File: {}", path.display().to_string().bright_white());
    println!(
        "  URL:  {}",
        og_image_url(config.base_url(), &text).bright_black()
    );
    println!();

    Ok(())
}
