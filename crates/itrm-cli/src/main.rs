//! itrm CLI: interactive budget chat, one-shot questions, and setup.
//!
//! Usage:
//!   itrm chat               Start an interactive chat session
//!   itrm ask "<prompt>"     Answer a single prompt and exit
//!   itrm classify "<text>"  Show which intent a prompt routes to
//!   itrm onboard            Create a default configuration
//!   itrm status             Show configuration status

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};

use itrm_core::assistant::{Assistant, Turn};
use itrm_core::config::{Config, ProductMode, LLM_KEY_ENV, SEARCH_KEY_ENV};
use itrm_core::ledger::{format_currency, BudgetLedger};
use itrm_core::presentation;
use itrm_core::session::SessionManager;

#[derive(Parser)]
#[command(
    name = "itrm",
    version,
    about = "A conversational assistant for IT budget planning",
    long_about = "itrm answers questions about an IT budget, adjusts category forecasts, \
                  and researches product alternatives with a web-search-backed LLM."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Session name (default: "default")
        #[arg(short, long, default_value = "default")]
        session: String,

        /// Answer product questions from the built-in catalog instead of the agent
        #[arg(long = "static")]
        static_lookup: bool,
    },

    /// Answer one prompt against a fresh ledger
    Ask {
        prompt: String,

        /// Answer product questions from the built-in catalog instead of the agent
        #[arg(long = "static")]
        static_lookup: bool,
    },

    /// Print the intent a prompt routes to
    Classify { prompt: String },

    /// Create or reset the default configuration
    Onboard,

    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Chat {
            session,
            static_lookup,
        }) => cmd_chat(&session, static_lookup).await?,
        Some(Commands::Ask {
            prompt,
            static_lookup,
        }) => cmd_ask(&prompt, static_lookup).await?,
        Some(Commands::Classify { prompt }) => cmd_classify(&prompt),
        Some(Commands::Onboard) => cmd_onboard()?,
        Some(Commands::Status) => cmd_status()?,
        None => cmd_chat("default", false).await?,
    }

    Ok(())
}

// ── Shared Setup ────────────────────────────────────────────────────

/// Load config and build the assistant. Configuration problems are
/// printed in full and abort startup.
fn setup_assistant(static_lookup: bool) -> Result<(Assistant, Config)> {
    let mut config = Config::load()?;
    if static_lookup {
        config.product.mode = ProductMode::Static;
    }

    match Assistant::from_config(&config, reqwest::Client::new()) {
        Ok(assistant) => Ok((assistant, config)),
        Err(errors) => {
            eprintln!("\n  \x1b[31m❌ Configuration errors:\x1b[0m");
            for e in &errors {
                eprintln!("     • {}", e);
            }
            eprintln!();
            eprintln!("  Run `itrm onboard`, or pass --static to skip the research agent.");
            anyhow::bail!("Fix the above {} error(s) before starting", errors.len());
        }
    }
}

fn print_turn(turn: &Turn) {
    let rendered = presentation::render(&turn.reply);
    for line in rendered.text.lines() {
        println!("  \x1b[32m{}\x1b[0m", line);
    }
    if let Some(panel) = rendered.side_panel {
        println!();
        for line in panel.lines() {
            println!("  \x1b[36m{}\x1b[0m", line);
        }
    }
    println!();
}

fn print_ledger(ledger: &BudgetLedger) {
    println!();
    for (category, amount) in ledger.entries() {
        println!("  {:<14} {:>14}", category.label(), format_currency(amount));
    }
    println!("  {:<14} {:>14}", "Revenue", format_currency(ledger.revenue()));
    println!();
}

fn print_sessions(sessions: &SessionManager, current: &str) {
    println!();
    for key in sessions.keys() {
        if let Some(session) = sessions.get(key) {
            let marker = if key == current { "*" } else { " " };
            println!(
                "  {} {:<16} started {}  {} turn(s)",
                marker,
                key,
                session.created_at.format("%Y-%m-%d %H:%M:%S"),
                session.turns
            );
        }
    }
    println!();
}

// ── Chat Command ────────────────────────────────────────────────────

async fn cmd_chat(session_key: &str, static_lookup: bool) -> Result<()> {
    let (assistant, config) = setup_assistant(static_lookup)?;
    let mut sessions = SessionManager::new();
    let mut current = session_key.to_string();
    sessions.get_or_create(&current);

    println!();
    println!("  🤖 itrm v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "  Product research: {} | Session: {}",
        match config.product.mode {
            ProductMode::Agent => "web agent",
            ProductMode::Static => "built-in catalog",
        },
        current
    );
    println!();
    println!("  Ask me anything about your IT strategy.");
    println!("  Commands: /ledger, /reset, /session <name>, /quit");
    println!("  ─────────────────────────────────────");
    println!();

    let stdin = io::stdin();
    loop {
        print!("  \x1b[36m>\x1b[0m ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" | "/q" => {
                println!("  Goodbye! 👋");
                break;
            }
            "/reset" => {
                sessions.get_or_create(&current).reset();
                println!("  Ledger reset to defaults.");
                continue;
            }
            "/ledger" => {
                print_ledger(&sessions.get_or_create(&current).ledger);
                continue;
            }
            _ => {}
        }

        if let Some(name) = input.strip_prefix("/session") {
            let name = name.trim();
            if name.is_empty() {
                print_sessions(&sessions, &current);
            } else {
                current = name.to_string();
                sessions.get_or_create(&current);
                println!("  Switched to session: {}", current);
            }
            continue;
        }

        println!();
        let session = sessions.get_or_create(&current);
        let turn = assistant.respond(session, input).await;
        print_turn(&turn);
    }

    Ok(())
}

// ── Ask Command ─────────────────────────────────────────────────────

async fn cmd_ask(prompt: &str, static_lookup: bool) -> Result<()> {
    let (assistant, _config) = setup_assistant(static_lookup)?;
    let mut sessions = SessionManager::new();
    let turn = assistant
        .respond(sessions.get_or_create("ask"), prompt)
        .await;
    print_turn(&turn);
    Ok(())
}

// ── Classify Command ────────────────────────────────────────────────

fn cmd_classify(prompt: &str) {
    let assistant = Assistant::default();
    let (intent, stage) = assistant.router().route(prompt);
    println!("{} ({:?})", intent, stage);
}

// ── Onboard Command ─────────────────────────────────────────────────

fn cmd_onboard() -> Result<()> {
    let path = Config::write_default_template()?;
    println!();
    println!("  ✅ Configuration created at:");
    println!("     {}", path.display());
    println!();
    println!("  Next steps:");
    println!("  1. Add your LLM and Brave Search API keys (or export {} and {})", LLM_KEY_ENV, SEARCH_KEY_ENV);
    println!("  2. Run `itrm chat` to start chatting");
    println!();
    Ok(())
}

// ── Status Command ──────────────────────────────────────────────────

fn cmd_status() -> Result<()> {
    let config_path = Config::default_path();
    let config = Config::load()?;

    println!();
    println!("  🤖 itrm status");
    println!("  ─────────────────────────────────────");

    if config_path.exists() {
        println!("  Config:    {}", config_path.display());
    } else {
        println!("  Config:    ⚠️  Not found (run `itrm onboard`)");
    }

    match config.providers.find_active() {
        Some((name, _)) => println!("  Provider:  ✅ {} configured", name),
        None => println!("  Provider:  ❌ No LLM API key"),
    }
    if config.tools.web_search.api_key.is_empty() {
        println!("  Search:    ❌ No search API key");
    } else {
        println!("  Search:    ✅ configured");
    }
    println!("  Model:     {}", config.agents.defaults.model);
    println!("  Mode:      {:?}", config.product.mode);

    match config.validate() {
        Ok(()) => println!("  Ready:     ✅"),
        Err(errors) => println!("  Ready:     ❌ {} problem(s)", errors.len()),
    }

    println!();
    Ok(())
}
