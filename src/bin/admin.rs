//! CLI administration tool for linkpaste.
//!
//! Lists and removes links and snippets, shows counts, and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin linkpaste-admin -- links list
//!
//! # Delete a link by id or short code
//! cargo run --bin linkpaste-admin -- links delete aB3xY9
//!
//! # List and delete snippets
//! cargo run --bin linkpaste-admin -- snippets list
//! cargo run --bin linkpaste-admin -- snippets delete 42 --yes
//!
//! # View statistics
//! cargo run --bin linkpaste-admin -- stats
//!
//! # Check database connection and migrations
//! cargo run --bin linkpaste-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL or SQLite connection string

use linkpaste::domain::entities::{Link, Snippet};
use linkpaste::domain::repositories::{LinkRepository, SnippetRepository};
use linkpaste::infrastructure::persistence::{Database, PoolSettings};
use linkpaste::utils::code_generator::is_valid_code;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// Width of the content preview column in `snippets list`.
const PREVIEW_LEN: usize = 40;

/// CLI tool for managing linkpaste.
#[derive(Parser)]
#[command(name = "linkpaste-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage snippets
    Snippets {
        #[command(subcommand)]
        action: SnippetAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Delete a link
    Delete {
        /// Short code or link id
        id_or_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SnippetAction {
    /// List all snippets (encrypted content is never shown)
    List,

    /// Delete a snippet
    Delete {
        /// Short code or snippet id
        id_or_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply pending migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let settings = PoolSettings {
        max_connections: 1,
        ..PoolSettings::default()
    };
    let db = Database::connect(&database_url, &settings)
        .await
        .context("Failed to connect to database")?;

    let repos = db.repositories();
    let result = match cli.command {
        Commands::Links { action } => handle_link_action(action, repos.links).await,
        Commands::Snippets { action } => handle_snippet_action(action, repos.snippets).await,
        Commands::Stats => handle_stats(repos.links, repos.snippets).await,
        Commands::Db { action } => handle_db_action(action, &db).await,
    };

    db.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, repo: Arc<dyn LinkRepository>) -> Result<()> {
    match action {
        LinkAction::List => list_links(repo).await,
        LinkAction::Delete { id_or_code, yes } => delete_link(repo, id_or_code, yes).await,
    }
}

/// Dispatches snippet management commands.
async fn handle_snippet_action(
    action: SnippetAction,
    repo: Arc<dyn SnippetRepository>,
) -> Result<()> {
    match action {
        SnippetAction::List => list_snippets(repo).await,
        SnippetAction::Delete { id_or_code, yes } => delete_snippet(repo, id_or_code, yes).await,
    }
}

/// Lists all links in creation order.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   ID  Code    Created              URL
///   ───────────────────────────────────────────────────────────
///   1   aB3xY9  2025-01-15 10:30     https://example.com
/// ```
async fn list_links(repo: Arc<dyn LinkRepository>) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<7} {:<20} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<7} {:<20} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link by id or short code with confirmation prompt.
async fn delete_link(
    repo: Arc<dyn LinkRepository>,
    id_or_code: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = find_link(repo.as_ref(), &id_or_code)
        .await?
        .context("Link not found")?;

    println!("  Code: {}", link.short_code.cyan());
    println!("  URL:  {}", link.original_url);
    println!("  ID:   {}", link.id.to_string().bright_black());
    println!();

    if !skip_confirm && !confirm("Delete this link?")? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.delete(link.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Lists all snippets. Encrypted snippets show no preview.
async fn list_snippets(repo: Arc<dyn SnippetRepository>) -> Result<()> {
    println!("{}", "📝 Snippets".bright_blue().bold());
    println!();

    let snippets = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list snippets: {}", e))?;

    if snippets.is_empty() {
        println!("{}", "  No snippets found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<7} {:<20} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Content".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for snippet in &snippets {
        let preview = if snippet.is_encrypted() {
            "ENCRYPTED".yellow()
        } else {
            preview(&snippet.content).normal()
        };

        println!(
            "  {:<5} {:<7} {:<20} {}",
            snippet.id.to_string().bright_black(),
            snippet.short_code.cyan(),
            snippet
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            preview
        );
    }

    println!();
    println!(
        "  Total: {}",
        snippets.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a snippet by id or short code with confirmation prompt.
async fn delete_snippet(
    repo: Arc<dyn SnippetRepository>,
    id_or_code: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Snippet".bright_blue().bold());
    println!();

    let snippet = find_snippet(repo.as_ref(), &id_or_code)
        .await?
        .context("Snippet not found")?;

    println!("  Code:      {}", snippet.short_code.cyan());
    println!("  Encrypted: {}", snippet.encrypted);
    println!("  ID:        {}", snippet.id.to_string().bright_black());
    println!();

    if !skip_confirm && !confirm("Delete this snippet?")? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.delete(snippet.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete snippet: {}", e))?;

    println!("{}", "✅ Snippet deleted".green().bold());
    println!();

    Ok(())
}

/// Displays link and snippet counts.
async fn handle_stats(
    links: Arc<dyn LinkRepository>,
    snippets: Arc<dyn SnippetRepository>,
) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = links
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let snippets_count = snippets
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count snippets: {}", e))?;

    println!(
        "  Links:    {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Snippets: {}",
        snippets_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, db: &Database) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            db.migrate().await?;

            println!(
                "{} ({})",
                "✅ Database connection OK, migrations applied".green().bold(),
                db.backend().bright_white()
            );
        }
    }

    Ok(())
}

/// Looks up a link by short code, falling back to numeric id.
///
/// Codes win so that all-digit codes like `123456` stay addressable.
async fn find_link(repo: &dyn LinkRepository, id_or_code: &str) -> Result<Option<Link>> {
    if is_valid_code(id_or_code) {
        let found = repo
            .find_by_code(id_or_code)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
        if found.is_some() {
            return Ok(found);
        }
    }

    match id_or_code.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e)),
        Err(_) => Ok(None),
    }
}

/// Looks up a snippet by short code, falling back to numeric id.
async fn find_snippet(repo: &dyn SnippetRepository, id_or_code: &str) -> Result<Option<Snippet>> {
    if is_valid_code(id_or_code) {
        let found = repo
            .find_by_code(id_or_code)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
        if found.is_some() {
            return Ok(found);
        }
    }

    match id_or_code.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e)),
        Err(_) => Ok(None),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() > PREVIEW_LEN || first_line.len() < content.len() {
        let cut: String = first_line.chars().take(PREVIEW_LEN).collect();
        format!("{cut}…")
    } else {
        first_line.to_string()
    }
}
